//! Opaque credential pass-through for the HTTP fetcher.
//!
//! Authentication and profile selection are owned by an external
//! collaborator; this crate only attaches the values it is handed. The
//! bearer token is held via `secrecy` so it cannot leak through `Debug`
//! output or request logging.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Bearer token and active-profile identifier attached to every request.
#[derive(Clone, Default)]
pub struct AuthContext {
    token: Option<SecretString>,
    profile_id: Option<String>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    /// The `Authorization` header value, if a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("profile_id", &self.profile_id)
            .finish()
    }
}
