#![forbid(unsafe_code)]

//! Per-side selection sets.
//!
//! Selections are ordered key sequences with set semantics: a key appears at
//! most once and new keys are appended. Keys are not required to be visible
//! or even present on their side; the tracker works over the abstract key
//! space and consistency with the partition is restored by
//! [`SelectionState::derive_from_controlled`].

use std::collections::HashSet;

use crate::event::Side;
use crate::item::Key;

/// Checked state of a side's "select all" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckStatus {
    /// No candidate is selected.
    #[default]
    None,
    /// Some but not all candidates are selected.
    Partial,
    /// Every candidate is selected (and there is at least one).
    All,
}

/// Selected and total counts for a side's header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSummary {
    pub selected: usize,
    pub total: usize,
}

/// Source (left) and target (right) selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState {
    pub source: Vec<Key>,
    pub target: Vec<Key>,
}

impl SelectionState {
    /// Split a combined selection by target membership.
    ///
    /// Keys in `target_keys` go to the target side, all others to the source
    /// side. Order is preserved and repeats collapse onto the first occurrence.
    #[must_use]
    pub fn derive_from_controlled(selected_keys: &[Key], target_keys: &[Key]) -> Self {
        let targets: HashSet<&str> = target_keys.iter().map(String::as_str).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(selected_keys.len());
        let mut state = Self::default();
        for key in selected_keys {
            if !seen.insert(key.as_str()) {
                continue;
            }
            if targets.contains(key.as_str()) {
                state.target.push(key.clone());
            } else {
                state.source.push(key.clone());
            }
        }
        state
    }

    /// Keys selected on `side`.
    #[must_use]
    pub fn keys(&self, side: Side) -> &[Key] {
        match side {
            Side::Left => &self.source,
            Side::Right => &self.target,
        }
    }

    fn keys_mut(&mut self, side: Side) -> &mut Vec<Key> {
        match side {
            Side::Left => &mut self.source,
            Side::Right => &mut self.target,
        }
    }

    /// Whether `key` is selected on `side`.
    #[must_use]
    pub fn contains(&self, side: Side, key: &str) -> bool {
        self.keys(side).iter().any(|k| k == key)
    }

    /// Check or uncheck a single key.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle(&mut self, side: Side, key: &str, checked: bool) -> bool {
        let keys = self.keys_mut(side);
        let position = keys.iter().position(|k| k == key);
        match (checked, position) {
            (true, None) => {
                keys.push(key.to_string());
                true
            }
            (false, Some(i)) => {
                keys.remove(i);
                true
            }
            _ => false,
        }
    }

    /// Union `affected` into the selection, or remove it when `check_all` is false.
    pub fn select_all<'a, I>(&mut self, side: Side, affected: I, check_all: bool)
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let keys = self.keys_mut(side);
        if check_all {
            let mut present: HashSet<Key> = keys.iter().cloned().collect();
            for key in affected {
                if present.insert(key.clone()) {
                    keys.push(key.clone());
                }
            }
        } else {
            let remove: HashSet<&str> = affected.into_iter().map(String::as_str).collect();
            keys.retain(|k| !remove.contains(k.as_str()));
        }
    }

    /// Flip membership of every key in `affected`.
    pub fn invert<'a, I>(&mut self, side: Side, affected: I)
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let keys = self.keys_mut(side);
        let mut present: HashSet<Key> = keys.iter().cloned().collect();
        let mut removed: HashSet<&str> = HashSet::new();
        for key in affected {
            if present.remove(key) {
                removed.insert(key.as_str());
            } else if !removed.contains(key.as_str()) {
                present.insert(key.clone());
                keys.push(key.clone());
            }
        }
        keys.retain(|k| !removed.contains(k.as_str()));
    }

    /// Empty the selection on `side`.
    pub fn clear(&mut self, side: Side) {
        self.keys_mut(side).clear();
    }

    /// State of the "select all" control over `candidates`.
    #[must_use]
    pub fn check_status<'a, I>(&self, side: Side, candidates: I) -> CheckStatus
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let selected: HashSet<&str> = self.keys(side).iter().map(String::as_str).collect();
        let (mut hit, mut total) = (0usize, 0usize);
        for key in candidates {
            total += 1;
            if selected.contains(key.as_str()) {
                hit += 1;
            }
        }
        match hit {
            0 => CheckStatus::None,
            n if n == total => CheckStatus::All,
            _ => CheckStatus::Partial,
        }
    }
}
