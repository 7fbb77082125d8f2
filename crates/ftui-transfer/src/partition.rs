#![forbid(unsafe_code)]

//! Splitting a data source into left and right lists.
//!
//! The right list is ordered by the target keys, the left list by the data
//! source. Both lists hold indices into the data source so records are never
//! copied.
//!
//! # Invariants
//!
//! 1. Every surviving record lands on exactly one side.
//! 2. Right order equals target-key order with orphan keys removed.
//! 3. Runs in O(n + m) for n records and m target keys.

use std::collections::HashMap;

use crate::error::Diagnostic;
use crate::item::{Key, KeyResolver, RowKey, TransferRecord};

/// Result of [`partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Indices of left-side records, in data-source order.
    pub left: Vec<usize>,
    /// Indices of right-side records, in target-key order.
    pub right: Vec<usize>,
    /// Resolved key for each data-source index.
    pub keys: Vec<Key>,
    /// Contract violations found in the input.
    pub diagnostics: Vec<Diagnostic>,
}

impl Partition {
    /// Keys of the records at `indices`.
    pub fn keys_of<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Key> + 'a {
        indices.iter().map(move |&i| &self.keys[i])
    }

    /// Total number of records that were placed on a side.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// Partition `records` into left/right lists given the right-side `target_keys`.
pub fn partition<T: TransferRecord>(
    records: &[T],
    target_keys: &[Key],
    row_key: Option<&RowKey<T>>,
) -> Partition {
    let resolver = KeyResolver::new(row_key);
    let keys: Vec<Key> = records.iter().map(|r| resolver.key_of(r)).collect();
    let mut diagnostics = Vec::new();

    // Last occurrence of a key wins.
    let mut owner: HashMap<&str, usize> = HashMap::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        if let Some(previous) = owner.insert(key.as_str(), index) {
            crate::warn!(key = %key, dropped_index = previous, kept_index = index, "duplicate key in data source");
            diagnostics.push(Diagnostic::DuplicateKey {
                key: key.clone(),
                dropped_index: previous,
                kept_index: index,
            });
        }
    }

    let mut slot_of: HashMap<&str, usize> = HashMap::with_capacity(target_keys.len());
    for (position, key) in target_keys.iter().enumerate() {
        if let Some(&first_position) = slot_of.get(key.as_str()) {
            crate::warn!(key = %key, position, first_position, "duplicate target key");
            diagnostics.push(Diagnostic::DuplicateTargetKey {
                key: key.clone(),
                position,
                first_position,
            });
        } else {
            slot_of.insert(key.as_str(), position);
        }
    }

    let mut slots: Vec<Option<usize>> = vec![None; target_keys.len()];
    let mut left = Vec::with_capacity(records.len().saturating_sub(target_keys.len()));
    for (index, key) in keys.iter().enumerate() {
        if owner.get(key.as_str()) != Some(&index) {
            continue;
        }
        match slot_of.get(key.as_str()) {
            Some(&slot) => slots[slot] = Some(index),
            None => left.push(index),
        }
    }

    let mut right = Vec::with_capacity(slots.len());
    for (position, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(index) => right.push(index),
            None => {
                let key = &target_keys[position];
                // Repeats were already reported above.
                if slot_of.get(key.as_str()) == Some(&position) {
                    crate::warn!(key = %key, position, "target key has no record");
                    diagnostics.push(Diagnostic::OrphanTargetKey {
                        key: key.clone(),
                        position,
                    });
                }
            }
        }
    }

    crate::trace!(
        records = records.len(),
        targets = target_keys.len(),
        left = left.len(),
        right = right.len(),
        "partitioned data source"
    );

    Partition {
        left,
        right,
        keys,
        diagnostics,
    }
}
