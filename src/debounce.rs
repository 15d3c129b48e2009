//! Filter debouncing.
//!
//! Free-text edits arrive as a stream of keystrokes; only the value standing
//! after a quiet interval should produce a fetch. Structural changes
//! (selecting from an enumerated list, toggling mode) are discrete user
//! actions and fire immediately.
//!
//! Implemented with a generation counter: every edit bumps the generation
//! and parks a task for the quiet interval; the task only dispatches if its
//! generation is still current when it wakes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::trace;

use crate::types::{FetchIntent, FilterSet, Mode};

/// Consumer of fetch intents. Implemented by the controller; tests and
/// adapters can implement it over channels.
pub trait IntentSink: Send + Sync + 'static {
    fn dispatch(&self, intent: FetchIntent);
}

impl IntentSink for tokio::sync::mpsc::UnboundedSender<FetchIntent> {
    fn dispatch(&self, intent: FetchIntent) {
        let _ = self.send(intent);
    }
}

pub struct FilterDebouncer<S: IntentSink> {
    sink: Arc<S>,
    quiet: Duration,
    generation: Arc<AtomicU64>,
}

impl<S: IntentSink> FilterDebouncer<S> {
    pub fn new(sink: S, quiet: Duration) -> Self {
        Self {
            sink: Arc::new(sink),
            quiet,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A free-text edit. Emits one reset-class intent for the edited filter
    /// state after the quiet interval, unless a newer edit supersedes it.
    pub fn edit(&self, filters: FilterSet, mode: Mode) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let counter = Arc::clone(&self.generation);
        let sink = Arc::clone(&self.sink);
        let quiet = self.quiet;

        tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if counter.load(Ordering::SeqCst) == generation {
                sink.dispatch(FetchIntent::reset(filters, mode));
            } else {
                trace!(generation, "debounced edit superseded");
            }
        });
    }

    /// A structural change. Fires immediately and invalidates any pending
    /// debounced edit.
    pub fn apply_now(&self, filters: FilterSet, mode: Mode) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.sink.dispatch(FetchIntent::reset(filters, mode));
    }

    /// Invalidate any pending debounced edit without dispatching.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
