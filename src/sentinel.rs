//! Scroll sentinel: turns "near end of list" visibility signals into
//! load-more intents.
//!
//! Pure state machine (`Idle -> Requesting -> Idle`), so the guard
//! conjunction is unit testable without a DOM or any async machinery. The
//! caller feeds it visibility events and view-model snapshots.

use crate::controller::ListViewModel;
use crate::types::{FetchIntent, FilterSet, Mode};

#[derive(Debug, Default)]
pub struct ScrollSentinel {
    /// Page requested by the in-flight load-more, if any. `Some` is the
    /// `Requesting` phase; no further intent fires until it resolves.
    requested_page: Option<u32>,
}

impl ScrollSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sentinel element became visible. Emits a load-more intent iff
    /// there is another page, nothing is in flight, the list is non-empty,
    /// and no earlier emission is still unresolved. The conjunction prevents
    /// duplicate page loads from overlapping visibility events and prevents
    /// loading page 2 before page 1 has ever resolved.
    pub fn on_visible<T>(
        &mut self,
        vm: &ListViewModel<T>,
        filters: &FilterSet,
        mode: Mode,
    ) -> Option<FetchIntent> {
        if self.requested_page.is_some() {
            return None;
        }
        if !vm.has_more || vm.loading || vm.loading_more || vm.items.is_empty() {
            return None;
        }
        let meta = vm.meta?;
        let next_page = meta.current_page + 1;
        self.requested_page = Some(next_page);
        Some(FetchIntent::load_more(next_page, filters.clone(), mode))
    }

    /// Observe a view-model snapshot; re-arms once the emitted request has
    /// resolved (page advanced, failure surfaced, or no more pages) and the
    /// in-flight flags have cleared.
    pub fn on_view_model<T>(&mut self, vm: &ListViewModel<T>) {
        let Some(requested) = self.requested_page else {
            return;
        };
        if vm.loading || vm.loading_more {
            return;
        }
        let resolved = vm.error.is_some()
            || !vm.has_more
            || vm.meta.is_some_and(|meta| meta.current_page >= requested);
        if resolved {
            self.requested_page = None;
        }
    }

    /// Forget any unresolved emission. Callers invoke this alongside
    /// reset-class intents, since a reset restarts pagination from page 1.
    pub fn reset(&mut self) {
        self.requested_page = None;
    }

    pub fn is_requesting(&self) -> bool {
        self.requested_page.is_some()
    }
}
