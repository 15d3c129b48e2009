//! Core data model for list synchronization.
//!
//! A list view is driven by a stream of [`FetchIntent`]s: reset-class intents
//! replace the visible list (first page, new filters, mode switch) and
//! load-more-class intents append to it (subsequent pages via infinite
//! scroll). Intents are immutable and constructed once per triggering event.

use serde::Deserialize;

/// Pagination metadata returned by paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// Data source for a list view.
///
/// The two modes have different pagination contracts: `All` is
/// server-paginated, while `Curated` returns its entire result set in one
/// response and never has further pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Server-paginated full data set.
    All,
    /// Single-shot curated data set (e.g. eligible-only results).
    Curated,
}

/// Per-mode pagination contract, consumed uniformly by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStrategy {
    /// Whether the endpoint accepts `page`/`per_page` and returns `meta`.
    /// Single-shot modes force `has_more = false` regardless of payload size.
    pub paginated: bool,
}

impl Mode {
    pub const fn strategy(self) -> ModeStrategy {
        match self {
            Mode::All => ModeStrategy { paginated: true },
            Mode::Curated => ModeStrategy { paginated: false },
        }
    }
}

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Free-text or enumerated scalar, sent as `key=value`.
    Text(String),
    /// Boolean toggle, sent as `key=1` or `key=0`.
    Flag(bool),
    /// Multi-select, sent comma-joined as `key=v1,v2`.
    List(Vec<String>),
}

impl FilterValue {
    /// Blank values are omitted from outgoing requests entirely; empty
    /// params are never sent.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Flag(_) => false,
            FilterValue::List(values) => values.is_empty(),
        }
    }
}

/// An ordered mapping of filter key to value, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter, replacing any existing value for the key in place.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style variant of [`FilterSet::set`].
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One fetch request against the data source, consumed exactly once by the
/// controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchIntent {
    /// 1-based page number.
    pub page: u32,
    /// Whether the result replaces the visible list rather than appending.
    pub reset: bool,
    pub filters: FilterSet,
    pub mode: Mode,
}

impl FetchIntent {
    /// A reset-class intent: first page, list fully replaced on arrival.
    pub fn reset(filters: FilterSet, mode: Mode) -> Self {
        Self {
            page: 1,
            reset: true,
            filters,
            mode,
        }
    }

    /// A load-more-class intent: appends `page` to the visible list.
    pub fn load_more(page: u32, filters: FilterSet, mode: Mode) -> Self {
        Self {
            page,
            reset: false,
            filters,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(FilterValue::Text(String::new()).is_blank());
        assert!(!FilterValue::Text("Dubai".to_string()).is_blank());
        assert!(FilterValue::List(vec![]).is_blank());
        assert!(!FilterValue::List(vec!["a".to_string()]).is_blank());
        assert!(!FilterValue::Flag(false).is_blank());
        assert!(!FilterValue::Flag(true).is_blank());
    }

    #[test]
    fn test_filter_set_preserves_insertion_order() {
        let mut filters = FilterSet::new();
        filters.set("city", FilterValue::Text("Dubai".to_string()));
        filters.set("q", FilterValue::Text("model".to_string()));
        filters.set("verified", FilterValue::Flag(true));

        let keys: Vec<&str> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["city", "q", "verified"]);
    }

    #[test]
    fn test_filter_set_replaces_in_place() {
        let mut filters = FilterSet::new();
        filters.set("q", FilterValue::Text("pa".to_string()));
        filters.set("city", FilterValue::Text("Dubai".to_string()));
        filters.set("q", FilterValue::Text("par".to_string()));

        assert_eq!(filters.len(), 2);
        let keys: Vec<&str> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["q", "city"]);
        assert_eq!(
            filters.get("q"),
            Some(&FilterValue::Text("par".to_string()))
        );
    }

    #[test]
    fn test_intent_constructors() {
        let reset = FetchIntent::reset(FilterSet::new(), Mode::All);
        assert_eq!(reset.page, 1);
        assert!(reset.reset);

        let more = FetchIntent::load_more(3, FilterSet::new(), Mode::All);
        assert_eq!(more.page, 3);
        assert!(!more.reset);
    }

    #[test]
    fn test_mode_strategy() {
        assert!(Mode::All.strategy().paginated);
        assert!(!Mode::Curated.strategy().paginated);
    }
}
