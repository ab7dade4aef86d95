//! Search and ordering helpers shared by the list endpoints.

use common::query::SortOrder;
use std::cmp::Ordering;

/// Case-insensitive containment; `needle` must already be lowercased.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive comparison used for name-like sort keys.
pub(crate) fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub(crate) fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
