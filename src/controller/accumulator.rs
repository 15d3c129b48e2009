//! Page accumulation: replace-on-reset, append-on-load-more.

use crate::fetch::PageResponse;
use crate::types::FetchIntent;

use super::model::ListViewModel;

/// Merge one page of results into the view model.
///
/// The response's metadata replaces the previous counts wholesale; `has_more`
/// is derived from it, except in single-shot modes where it is forced `false`
/// regardless of payload size.
pub(crate) fn merge<T>(
    vm: &mut ListViewModel<T>,
    response: PageResponse<T>,
    intent: &FetchIntent,
) {
    if intent.reset {
        vm.items = response.items;
    } else {
        vm.items.extend(response.items);
    }

    vm.has_more = if intent.mode.strategy().paginated {
        response
            .meta
            .is_some_and(|meta| meta.current_page < meta.last_page)
    } else {
        false
    };
    vm.meta = response.meta;
    vm.error = None;
}
