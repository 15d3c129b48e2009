//! View model and pure state transitions.
//!
//! The transitions are plain functions over [`ListViewModel`] so the flag
//! discipline can be unit tested without any async machinery; the controller
//! applies them under its token guard.

use crate::error::SyncError;
use crate::types::{FetchIntent, PageMeta};

/// The stable view model exposed to the UI layer. Mutated only by the
/// controller; the UI only reads snapshots.
#[derive(Debug, Clone)]
pub struct ListViewModel<T> {
    /// Visible items, append-preserving for page merges and fully replaced
    /// on reset.
    pub items: Vec<T>,
    /// A reset-class fetch is in flight.
    pub loading: bool,
    /// A load-more-class fetch is in flight.
    pub loading_more: bool,
    /// The in-flight fetch switches data-source mode.
    pub switching: bool,
    /// Human-readable failure from the most recent settled episode.
    pub error: Option<String>,
    /// Latest authoritative pagination metadata, if any.
    pub meta: Option<PageMeta>,
    pub has_more: bool,
}

impl<T> Default for ListViewModel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loading_more: false,
            switching: false,
            error: None,
            meta: None,
            has_more: false,
        }
    }
}

/// Flag mutations performed synchronously before the fetch suspends.
pub(crate) fn begin_fetch<T>(vm: &mut ListViewModel<T>, intent: &FetchIntent, switching: bool) {
    if intent.reset {
        vm.loading = true;
    } else {
        vm.loading_more = true;
    }
    if switching {
        vm.switching = true;
    }
    if intent.page == 1 {
        vm.error = None;
    }
}

/// Failure application for the latest episode.
///
/// Page-1 failures are fatal to the view: items cleared, message surfaced.
/// Later-page failures are recoverable: items retained, message surfaced.
pub(crate) fn apply_failure<T>(vm: &mut ListViewModel<T>, error: &SyncError, intent: &FetchIntent) {
    if intent.page == 1 {
        vm.items.clear();
        vm.meta = None;
        vm.has_more = false;
    }
    vm.error = Some(error.to_string());
}

/// Clears the in-flight flags. Only ever invoked for the latest token, so a
/// fast-resolving stale episode cannot clear the flags of a newer pending one.
pub(crate) fn finish_fetch<T>(vm: &mut ListViewModel<T>) {
    vm.loading = false;
    vm.loading_more = false;
    vm.switching = false;
}
