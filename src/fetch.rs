//! Transport boundary: envelope parsing and the page-fetch seam.
//!
//! The controller is generic over [`PageFetcher`], so the concurrency
//! contract can be tested without any network. [`HttpPageFetcher`] is the
//! production implementation, speaking the two inbound envelope shapes:
//!
//! - paginated: `{status: "success"|true, message?, data: [...], meta?: {...}}`
//! - single-shot: `{success: bool, message?, data: [...]}` (no metadata;
//!   treated as one complete page)

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::AuthContext;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::query;
use crate::types::{FetchIntent, PageMeta};

/// One page of results, normalized from either envelope shape.
#[derive(Debug, Clone)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Present for paginated modes; `None` for single-shot responses.
    pub meta: Option<PageMeta>,
}

/// The seam between the controller and the transport.
pub trait PageFetcher: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Fetch the page described by `intent`.
    fn fetch_page(
        &self,
        intent: &FetchIntent,
    ) -> impl Future<Output = Result<PageResponse<Self::Item>>> + Send;
}

impl<F: PageFetcher> PageFetcher for Arc<F> {
    type Item = F::Item;

    fn fetch_page(
        &self,
        intent: &FetchIntent,
    ) -> impl Future<Output = Result<PageResponse<Self::Item>>> + Send {
        F::fetch_page(self, intent)
    }
}

/// Success flag of the paginated envelope: either a bare boolean or a
/// status string such as `"success"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusFlag {
    Bool(bool),
    Text(String),
}

impl StatusFlag {
    fn is_success(&self) -> bool {
        match self {
            StatusFlag::Bool(value) => *value,
            StatusFlag::Text(value) => value.eq_ignore_ascii_case("success"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PaginatedEnvelope<T> {
    status: StatusFlag,
    #[serde(default)]
    message: Option<String>,
    data: Vec<T>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct SingleShotEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Vec<T>,
}

fn rejection(message: Option<String>) -> SyncError {
    SyncError::Api(message.unwrap_or_else(|| "request rejected by server".to_string()))
}

/// HTTP implementation of [`PageFetcher`] for the paginated list endpoints.
pub struct HttpPageFetcher<T> {
    client: reqwest::Client,
    config: SyncConfig,
    auth: AuthContext,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageFetcher<T> {
    pub fn new(config: SyncConfig, auth: AuthContext) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            config,
            auth,
            _item: PhantomData,
        })
    }

    fn build_url(&self, intent: &FetchIntent) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| SyncError::Config(format!("invalid base URL: {e}")))?;
        // Trailing-slash-insensitive join.
        let endpoint = self.config.endpoints.for_mode(intent.mode);
        let joined = if self.config.base_url.ends_with('/') {
            base.join(endpoint)
        } else {
            let path = format!("{}/{}", base.path().trim_end_matches('/'), endpoint);
            base.join(&path)
        };
        let mut url =
            joined.map_err(|e| SyncError::Config(format!("invalid endpoint path: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query::query_pairs(&intent.filters) {
                pairs.append_pair(&key, &value);
            }
            if intent.mode.strategy().paginated {
                pairs.append_pair("page", &intent.page.to_string());
                pairs.append_pair("per_page", &self.config.per_page.to_string());
            }
            if let Some(profile_id) = self.auth.profile_id() {
                pairs.append_pair("profile_id", profile_id);
            }
        }

        Ok(url)
    }
}

impl<T> PageFetcher for HttpPageFetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch_page(&self, intent: &FetchIntent) -> Result<PageResponse<T>> {
        let url = self.build_url(intent)?;
        debug!(%url, page = intent.page, reset = intent.reset, "issuing list fetch");

        let mut request = self.client.get(url);
        if let Some(bearer) = self.auth.bearer() {
            request = request.header(header::AUTHORIZATION, bearer);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("error")
            )));
        }

        if intent.mode.strategy().paginated {
            let envelope: PaginatedEnvelope<T> = response.json().await?;
            if !envelope.status.is_success() {
                return Err(rejection(envelope.message));
            }
            Ok(PageResponse {
                items: envelope.data,
                meta: envelope.meta,
            })
        } else {
            let envelope: SingleShotEnvelope<T> = response.json().await?;
            if !envelope.success {
                return Err(rejection(envelope.message));
            }
            Ok(PageResponse {
                items: envelope.data,
                meta: None,
            })
        }
    }
}
