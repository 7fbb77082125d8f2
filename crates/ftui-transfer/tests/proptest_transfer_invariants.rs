//! Property-based invariant tests for the transfer engine.
//!
//! 1. Partition completeness: left ⊎ right == data source, right == targets.
//! 2. Move conservation: a right move with selection S yields S ++ targets.
//! 3. Disabled exclusion: disabled keys never appear in moved keys.
//! 4. Origin selection is empty after every move.
//! 5. Selection subset after controlled derivation.
//! 6. Current page never exceeds max page.
//! 7. Visible rows are a contiguous window of the filtered rows.
//! 8. Filtering is an order-preserving subsequence.
//! 9. No panics on arbitrary request sequences.

use std::collections::HashSet;

use ftui_transfer::filter::filter;
use ftui_transfer::partition::partition;
use ftui_transfer::{
    Key, SelectionState, Side, Transfer, TransferConfig, TransferEvent, TransferItem,
    TransferProps, TransferRequest, title_contains,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

/// Unique-keyed records with random disabled flags, plus a target subset.
fn data_and_targets() -> impl Strategy<Value = (Vec<TransferItem>, Vec<Key>)> {
    prop::collection::vec(any::<bool>(), 0..24)
        .prop_flat_map(|flags| {
            let items: Vec<TransferItem> = flags
                .iter()
                .enumerate()
                .map(|(i, &disabled)| {
                    TransferItem::new(format!("k{i}"))
                        .with_title(format!("t{}", i % 5))
                        .with_disabled(disabled)
                })
                .collect();
            let keys: Vec<Key> = items.iter().map(|i| i.key.clone()).collect();
            let n = keys.len();
            (
                Just(items),
                Just(keys).prop_shuffle(),
                0..=n,
            )
        })
        .prop_map(|(items, shuffled, take)| {
            let targets = shuffled.into_iter().take(take).collect();
            (items, targets)
        })
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn request() -> impl Strategy<Value = TransferRequest> {
    prop_oneof![
        (side(), 0usize..30, any::<bool>()).prop_map(|(side, i, checked)| TransferRequest::Toggle {
            side,
            key: format!("k{i}"),
            checked,
        }),
        (side(), any::<bool>()).prop_map(|(side, checked)| TransferRequest::SelectAll { side, checked }),
        side().prop_map(|side| TransferRequest::SelectCurrentPage { side }),
        side().prop_map(|side| TransferRequest::InvertCurrentPage { side }),
        side().prop_map(|to| TransferRequest::Move { to }),
        (side(), "t[0-4]?").prop_map(|(side, query)| TransferRequest::Search { side, query }),
        side().prop_map(|side| TransferRequest::ClearSearch { side }),
        (side(), 0usize..8).prop_map(|(side, page)| TransferRequest::SetPage { side, page }),
    ]
}

fn keys_of(records: &[&TransferItem]) -> Vec<Key> {
    records.iter().map(|r| r.key.clone()).collect()
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn partition_is_complete((items, targets) in data_and_targets()) {
        let p = partition(&items, &targets, None);
        prop_assert!(p.diagnostics.is_empty());
        prop_assert_eq!(p.placed(), items.len());

        let right: Vec<Key> = p.keys_of(&p.right).cloned().collect();
        prop_assert_eq!(&right, &targets);

        let left: HashSet<&Key> = p.keys_of(&p.left).collect();
        for key in &targets {
            prop_assert!(!left.contains(key));
        }
        prop_assert!(p.left.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn right_move_prepends_selection(
        (items, targets) in data_and_targets(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut transfer = Transfer::new(TransferConfig::default());
        transfer.sync(TransferProps::new(items.clone(), targets.clone()));
        let left = keys_of(&transfer.items(Side::Left));
        prop_assume!(!left.is_empty());

        let mut selected: Vec<Key> = Vec::new();
        for pick in &picks {
            let key = pick.get(&left).clone();
            if !selected.contains(&key) {
                selected.push(key);
            }
        }
        transfer.dispatch(TransferRequest::SelectKeys {
            side: Side::Left,
            keys: selected.clone(),
            checked: true,
        });
        let events = transfer.dispatch(TransferRequest::Move { to: Side::Right });
        prop_assert!(transfer.selection(Side::Left).is_empty());

        let disabled: HashSet<&str> = items
            .iter()
            .filter(|i| i.disabled)
            .map(|i| i.key.as_str())
            .collect();
        let expected_moved: Vec<Key> = selected
            .iter()
            .filter(|k| !disabled.contains(k.as_str()))
            .cloned()
            .collect();

        let Some(TransferEvent::Change { target_keys, moved_keys, direction }) = events.last() else {
            return Err(TestCaseError::fail("move did not emit a change"));
        };
        prop_assert_eq!(*direction, Side::Right);
        prop_assert_eq!(moved_keys, &expected_moved);
        let expected_targets: Vec<Key> = expected_moved.iter().chain(&targets).cloned().collect();
        prop_assert_eq!(target_keys, &expected_targets);

        transfer.sync(TransferProps::new(items, target_keys.clone()));
        let right = keys_of(&transfer.items(Side::Right));
        prop_assert_eq!(&right[..expected_moved.len()], expected_moved.as_slice());
    }

    #[test]
    fn derived_selection_is_subset_of_sides(
        (items, targets) in data_and_targets(),
        requests in prop::collection::vec(request(), 0..16),
    ) {
        let mut transfer = Transfer::new(TransferConfig::default().with_page_size(3));
        transfer.sync(TransferProps::new(items.clone(), targets.clone()));
        for req in requests {
            transfer.dispatch(req);
        }
        let combined: Vec<Key> = transfer
            .selection(Side::Left)
            .iter()
            .chain(transfer.selection(Side::Right))
            .cloned()
            .collect();
        let derived = SelectionState::derive_from_controlled(&combined, &targets);
        let target_set: HashSet<&Key> = targets.iter().collect();
        prop_assert!(derived.target.iter().all(|k| target_set.contains(k)));
        prop_assert!(derived.source.iter().all(|k| !target_set.contains(k)));
    }

    #[test]
    fn pages_stay_in_range(
        (items, targets) in data_and_targets(),
        page_size in 1usize..6,
        requests in prop::collection::vec(request(), 0..24),
    ) {
        let mut transfer = Transfer::new(
            TransferConfig::default()
                .with_page_size(page_size)
                .with_filter(title_contains()),
        );
        let mut target_keys = targets;
        transfer.sync(TransferProps::new(items.clone(), target_keys.clone()));
        for req in requests {
            for event in transfer.dispatch(req) {
                if let TransferEvent::Change { target_keys: next, .. } = event {
                    target_keys = next;
                }
            }
            transfer.sync(TransferProps::new(items.clone(), target_keys.clone()));

            for side in Side::BOTH {
                let max = transfer.max_page(side);
                let current = transfer.current_page(side);
                prop_assert!(current >= 1 && current <= max);

                let filtered = keys_of(&transfer.filtered(side));
                let visible = keys_of(&transfer.visible(side));
                prop_assert!(visible.len() <= page_size);
                let start = (current - 1) * page_size;
                prop_assert_eq!(&filtered[start..start + visible.len()], visible.as_slice());
            }
        }
    }

    #[test]
    fn filter_is_order_preserving_subsequence(
        (items, _targets) in data_and_targets(),
        query in "t[0-4]?",
    ) {
        let indices: Vec<usize> = (0..items.len()).rev().collect();
        let pred = title_contains();
        let out = filter(&items, &indices, Some(&pred), &query);
        let mut cursor = indices.iter();
        for i in &out {
            prop_assert!(cursor.any(|j| j == i));
        }
        prop_assert_eq!(filter(&items, &indices, None, &query), indices);
    }
}
