//! The list-sync controller.
//!
//! Orchestrates request tokens, episode cancellation, and page accumulation
//! to keep one list view consistent with a stream of rapidly-changing,
//! independently-issued fetch intents. Each list view owns an independent
//! controller instance; nothing is shared across instances.
//!
//! The correctness mechanism is the monotonic request token: a result is
//! applied to the view model iff its originating token still equals the
//! latest issued token at completion time. Cancellation of the superseded
//! episode is advisory (it stops wasted work); even an un-cancellable
//! transport would behave correctly under the token guard, just wastefully.

mod accumulator;
pub mod model;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::debounce::IntentSink;
use crate::error::SyncError;
use crate::fetch::{PageFetcher, PageResponse};
use crate::types::{FetchIntent, FilterSet, Mode};

pub use model::ListViewModel;

/// Token counter, live abort handle, and issuance bookkeeping. Owned
/// exclusively by one controller; every mutation happens inside one lock
/// acquisition, so token issuance is strictly monotonic and the abort-then-
/// store-new-handle ordering cannot race.
struct EpisodeState {
    token: u64,
    live: Option<CancellationToken>,
    last_mode: Option<Mode>,
    last_intent: Option<FetchIntent>,
}

struct Inner<F: PageFetcher> {
    fetcher: F,
    state: Mutex<EpisodeState>,
    vm: watch::Sender<ListViewModel<F::Item>>,
}

/// Controller for one paginated, filterable, infinitely-scrollable list.
pub struct ListSyncController<F: PageFetcher> {
    inner: Arc<Inner<F>>,
}

impl<F: PageFetcher> Clone for ListSyncController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: PageFetcher> ListSyncController<F> {
    pub fn new(fetcher: F) -> Self {
        let (vm, _) = watch::channel(ListViewModel::default());
        Self {
            inner: Arc::new(Inner {
                fetcher,
                state: Mutex::new(EpisodeState {
                    token: 0,
                    live: None,
                    last_mode: None,
                    last_intent: None,
                }),
                vm,
            }),
        }
    }

    /// Subscribe to view-model snapshots. The channel coalesces: a slow
    /// reader observes the latest state, not every intermediate one.
    pub fn subscribe(&self) -> watch::Receiver<ListViewModel<F::Item>> {
        self.inner.vm.subscribe()
    }

    /// The current view-model snapshot.
    pub fn view_model(&self) -> ListViewModel<F::Item> {
        self.inner.vm.borrow().clone()
    }

    /// Issue a fetch episode for `intent`. Fire-and-forget; the result lands
    /// asynchronously in the view model.
    ///
    /// Token claim, previous-episode cancellation, new-handle storage, and
    /// flag mutation all happen synchronously before the fetch suspends, so
    /// concurrent triggers always observe a strictly increasing token
    /// sequence and the flags of a newer episode can never be clobbered by
    /// an older one.
    pub fn run_intent(&self, intent: FetchIntent) {
        let cancel = CancellationToken::new();
        let my_token = {
            let mut state = self.inner.state.lock();
            state.token += 1;
            let my_token = state.token;

            if let Some(previous) = state.live.take() {
                trace!(token = my_token, "cancelling superseded episode");
                previous.cancel();
            }
            state.live = Some(cancel.clone());

            let switching = state.last_mode.is_some_and(|mode| mode != intent.mode);
            state.last_mode = Some(intent.mode);
            state.last_intent = Some(intent.clone());

            self.inner
                .vm
                .send_modify(|vm| model::begin_fetch(vm, &intent, switching));
            my_token
        };

        debug!(
            token = my_token,
            page = intent.page,
            reset = intent.reset,
            mode = ?intent.mode,
            "issuing fetch episode"
        );

        let this = self.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => Err(SyncError::Cancelled),
                result = this.inner.fetcher.fetch_page(&intent) => result,
            };
            this.complete(my_token, &intent, result);
        });
    }

    /// Settle one episode under the token guard.
    fn complete(
        &self,
        my_token: u64,
        intent: &FetchIntent,
        result: Result<PageResponse<F::Item>, SyncError>,
    ) {
        let mut state = self.inner.state.lock();
        let is_latest = state.token == my_token;

        match result {
            Ok(response) => {
                if is_latest {
                    trace!(token = my_token, count = response.items.len(), "applying page");
                    self.inner
                        .vm
                        .send_modify(|vm| accumulator::merge(vm, response, intent));
                } else {
                    trace!(
                        token = my_token,
                        latest = state.token,
                        "discarding stale response"
                    );
                }
            }
            Err(error) if error.is_cancelled() => {
                trace!(token = my_token, "episode cancelled");
            }
            Err(error) => {
                if is_latest {
                    warn!(
                        token = my_token,
                        page = intent.page,
                        error = %error,
                        "fetch episode failed"
                    );
                    self.inner
                        .vm
                        .send_modify(|vm| model::apply_failure(vm, &error, intent));
                } else {
                    trace!(token = my_token, "discarding stale failure");
                }
            }
        }

        if is_latest {
            state.live = None;
            self.inner.vm.send_modify(model::finish_fetch);
        }
    }

    /// Convenience for a reset-class intent with the given filters and mode.
    pub fn reset(&self, filters: FilterSet, mode: Mode) {
        self.run_intent(FetchIntent::reset(filters, mode));
    }

    /// Re-issue the most recently issued intent (the retry affordance after
    /// a surfaced failure). No-op before any intent has been issued.
    pub fn retry(&self) {
        let intent = self.inner.state.lock().last_intent.clone();
        if let Some(intent) = intent {
            self.run_intent(intent);
        }
    }

    /// Unmount teardown: cancel the live episode and invalidate any token
    /// still in flight so its result can never mutate the view model.
    pub fn dispose(&self) {
        let mut state = self.inner.state.lock();
        state.token += 1;
        if let Some(live) = state.live.take() {
            live.cancel();
        }
    }
}

impl<F: PageFetcher> IntentSink for ListSyncController<F> {
    fn dispatch(&self, intent: FetchIntent) {
        self.run_intent(intent);
    }
}
