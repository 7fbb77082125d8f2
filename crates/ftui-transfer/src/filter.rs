#![forbid(unsafe_code)]

//! Search filtering for one side of a transfer.

use std::sync::Arc;

use crate::item::TransferRecord;

/// Host-supplied search predicate: `(query, record) -> matches`.
pub type FilterPredicate<T> = Arc<dyn Fn(&str, &T) -> bool>;

/// Predicate matching records whose title contains the query, ignoring case.
#[must_use]
pub fn title_contains<T: TransferRecord + 'static>() -> FilterPredicate<T> {
    Arc::new(|query: &str, record: &T| {
        record
            .title()
            .to_lowercase()
            .contains(&query.to_lowercase())
    })
}

/// Filter `indices` into `records`, keeping order.
///
/// An empty query returns `indices` unchanged. Without a predicate every
/// record matches.
pub fn filter<T>(
    records: &[T],
    indices: &[usize],
    predicate: Option<&FilterPredicate<T>>,
    query: &str,
) -> Vec<usize> {
    let Some(predicate) = predicate.filter(|_| !query.is_empty()) else {
        return indices.to_vec();
    };
    indices
        .iter()
        .copied()
        .filter(|&i| predicate(query, &records[i]))
        .collect()
}
