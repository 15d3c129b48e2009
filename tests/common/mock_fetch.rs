//! Scripted and echoing mock fetchers for controller tests.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;

use listsync::{
    FetchIntent, FilterValue, Mode, PageFetcher, PageMeta, PageResponse, Result, SyncError,
};

/// Minimal list item standing in for a job/talent card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub name: String,
}

pub fn card(id: u32) -> Card {
    Card {
        id,
        name: format!("card-{id}"),
    }
}

pub fn cards(range: Range<u32>) -> Vec<Card> {
    range.map(card).collect()
}

pub fn meta(current_page: u32, last_page: u32) -> PageMeta {
    PageMeta {
        current_page,
        per_page: 8,
        total: u64::from(last_page) * 8,
        last_page,
    }
}

/// One scripted response for a request slot.
#[derive(Clone)]
pub enum Script {
    Page {
        delay_ms: u64,
        items: Vec<Card>,
        meta: Option<PageMeta>,
    },
    Fail {
        delay_ms: u64,
        message: String,
    },
}

fn slot(mode: Mode, page: u32, q: &str) -> (Mode, u32, String) {
    (mode, page, q.to_string())
}

fn intent_q(intent: &FetchIntent) -> String {
    match intent.filters.get("q") {
        Some(FilterValue::Text(q)) => q.clone(),
        _ => String::new(),
    }
}

/// Fetcher answering from per-`(mode, page, q)` script queues, recording
/// every intent it is asked to serve. Keying on the `q` filter keeps
/// concurrent episodes for the same page from draining each other's
/// scripts.
#[derive(Default)]
pub struct MockFetcher {
    scripts: Mutex<HashMap<(Mode, u32, String), VecDeque<Script>>>,
    issued: Mutex<Vec<FetchIntent>>,
}

impl MockFetcher {
    /// Queue a response for requests with no `q` filter; repeated calls for
    /// the same slot answer in order.
    pub fn script(&self, mode: Mode, page: u32, script: Script) {
        self.script_for(mode, page, "", script);
    }

    /// Queue a response for requests carrying `q`.
    pub fn script_for(&self, mode: Mode, page: u32, q: &str, script: Script) {
        self.scripts
            .lock()
            .entry(slot(mode, page, q))
            .or_default()
            .push_back(script);
    }

    /// Every intent whose fetch actually reached the transport, in order.
    pub fn issued(&self) -> Vec<FetchIntent> {
        self.issued.lock().clone()
    }
}

impl PageFetcher for MockFetcher {
    type Item = Card;

    async fn fetch_page(&self, intent: &FetchIntent) -> Result<PageResponse<Card>> {
        self.issued.lock().push(intent.clone());
        let script = self
            .scripts
            .lock()
            .get_mut(&slot(intent.mode, intent.page, &intent_q(intent)))
            .and_then(VecDeque::pop_front);

        match script {
            Some(Script::Page {
                delay_ms,
                items,
                meta,
            }) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(PageResponse { items, meta })
            }
            Some(Script::Fail { delay_ms, message }) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Err(SyncError::Api(message))
            }
            None => Err(SyncError::Api(format!(
                "no script for {:?} page {}",
                intent.mode, intent.page
            ))),
        }
    }
}

/// Fetcher answering every request after a random delay with a single item
/// that echoes the request's `q` filter, for last-issued-wins properties.
#[derive(Default)]
pub struct EchoFetcher {
    pub max_delay_ms: u64,
}

impl PageFetcher for EchoFetcher {
    type Item = Card;

    async fn fetch_page(&self, intent: &FetchIntent) -> Result<PageResponse<Card>> {
        let delay = rand::rng().random_range(0..=self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        Ok(PageResponse {
            items: vec![Card {
                id: intent.page,
                name: intent_q(intent),
            }],
            meta: Some(meta(intent.page, 99)),
        })
    }
}
