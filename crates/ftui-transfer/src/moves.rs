#![forbid(unsafe_code)]

//! Resolving moves between the two sides.
//!
//! A move never edits the inputs. It computes the keys that actually travel
//! and the proposed target keys; the caller emits them and clears the
//! origin selection.
//!
//! # Invariants
//!
//! 1. Disabled records never travel, whatever the current filter or page.
//! 2. Moving left keeps the remaining target keys in order.
//! 3. Moving right places moved keys according to [`MoveOrder`].
//! 4. An empty move is still a move: the outcome simply carries no keys.

use std::collections::{HashMap, HashSet};

use crate::config::MoveOrder;
use crate::event::Side;
use crate::item::{Key, TransferRecord};
use crate::partition::Partition;

/// Keys that travel and the proposed target keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub target_keys: Vec<Key>,
    pub moved_keys: Vec<Key>,
}

/// Disabled flags of the records in a partition, looked up by key.
struct DisabledIndex<'a> {
    disabled: HashMap<&'a str, bool>,
}

impl<'a> DisabledIndex<'a> {
    fn new<T: TransferRecord>(records: &'a [T], partition: &'a Partition) -> Self {
        // Later records overwrite earlier ones, matching partition's duplicate rule.
        let disabled = partition
            .keys
            .iter()
            .zip(records)
            .map(|(key, record)| (key.as_str(), record.disabled()))
            .collect();
        Self { disabled }
    }

    fn is_disabled(&self, key: &str) -> bool {
        self.disabled.get(key).copied().unwrap_or(false)
    }
}

/// Enabled, de-duplicated subset of `keys`.
fn movable<'k, T: TransferRecord>(
    keys: impl IntoIterator<Item = &'k Key>,
    records: &[T],
    partition: &Partition,
) -> Vec<Key> {
    let index = DisabledIndex::new(records, partition);
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|key| !index.is_disabled(key))
        .filter(|key| seen.insert(key.as_str()))
        .cloned()
        .collect()
}

/// Resolve a move of `origin_selection` to `direction`.
pub fn resolve_move<T: TransferRecord>(
    direction: Side,
    origin_selection: &[Key],
    target_keys: &[Key],
    records: &[T],
    partition: &Partition,
    order: MoveOrder,
) -> MoveOutcome {
    match direction {
        Side::Right => {
            let on_right: HashSet<&str> = target_keys.iter().map(String::as_str).collect();
            let moved_keys: Vec<Key> = movable(origin_selection, records, partition)
                .into_iter()
                .filter(|key| !on_right.contains(key.as_str()))
                .collect();
            let target_keys = match order {
                MoveOrder::Prepend => moved_keys.iter().chain(target_keys).cloned().collect(),
                MoveOrder::Append => target_keys.iter().chain(&moved_keys).cloned().collect(),
            };
            MoveOutcome {
                target_keys,
                moved_keys,
            }
        }
        Side::Left => remove_keys(origin_selection, target_keys, records, partition),
    }
}

/// Take `keys` off the right side, skipping disabled records and keys that
/// are not targets.
pub fn remove_keys<T: TransferRecord>(
    keys: &[Key],
    target_keys: &[Key],
    records: &[T],
    partition: &Partition,
) -> MoveOutcome {
    let on_right: HashSet<&str> = target_keys.iter().map(String::as_str).collect();
    let moved_keys: Vec<Key> = movable(keys, records, partition)
        .into_iter()
        .filter(|key| on_right.contains(key.as_str()))
        .collect();
    let leaving: HashSet<&str> = moved_keys.iter().map(String::as_str).collect();
    let target_keys = target_keys
        .iter()
        .filter(|key| !leaving.contains(key.as_str()))
        .cloned()
        .collect();
    MoveOutcome {
        target_keys,
        moved_keys,
    }
}
