//! Client-side synchronization for paginated, filterable,
//! infinitely-scrollable list views.
//!
//! The core is [`ListSyncController`]: it keeps one visible list consistent
//! with a sequence of rapidly-changing, independently-issued, cancellable
//! fetches, gating result application on a monotonic request token so that
//! the last-issued intent always wins over the last-completed response.
//! [`FilterDebouncer`] collapses keystroke streams into single intents and
//! [`ScrollSentinel`] turns end-of-list visibility into load-more intents;
//! both feed the controller, which publishes [`ListViewModel`] snapshots for
//! the UI layer to render.

pub mod auth;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod query;
pub mod sentinel;
pub mod types;

pub use auth::AuthContext;
pub use config::{EndpointTable, SyncConfig};
pub use controller::{ListSyncController, ListViewModel};
pub use debounce::{FilterDebouncer, IntentSink};
pub use error::{Result, SyncError};
pub use fetch::{HttpPageFetcher, PageFetcher, PageResponse};
pub use sentinel::ScrollSentinel;
pub use types::{FetchIntent, FilterSet, FilterValue, Mode, ModeStrategy, PageMeta};
