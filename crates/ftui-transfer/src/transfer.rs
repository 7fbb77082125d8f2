#![forbid(unsafe_code)]

//! The transfer facade.
//!
//! [`Transfer`] is driven in cycles. At the start of each cycle the host hands
//! over an immutable [`TransferProps`] snapshot through [`Transfer::sync`],
//! which re-partitions, re-derives a controlled selection, re-filters and
//! clamps pages. User gestures then arrive as [`TransferRequest`]s through
//! [`Transfer::dispatch`], which answers with [`TransferEvent`]s.
//!
//! # Controlled inputs
//!
//! Membership is always host-owned: a move only *proposes* new target keys in
//! [`TransferEvent::Change`]. Until the host feeds them back through `sync`,
//! the partition stays on the old keys.
//!
//! Selection is host-owned when the props carry `selected_keys`. In that mode
//! mutations emit [`TransferEvent::SelectChange`] proposals but leave the
//! local selection untouched; otherwise the engine keeps the selection itself.
//! Search text follows the same rule per side.
//!
//! # Example
//!
//! ```
//! use ftui_transfer::{Side, Transfer, TransferConfig, TransferEvent, TransferItem, TransferProps, TransferRequest};
//!
//! let mut transfer = Transfer::new(TransferConfig::default());
//! transfer.sync(TransferProps::new(
//!     vec![TransferItem::new("a"), TransferItem::new("b")],
//!     vec!["b".to_string()],
//! ));
//! transfer.dispatch(TransferRequest::Toggle { side: Side::Left, key: "a".into(), checked: true });
//! let events = transfer.dispatch(TransferRequest::Move { to: Side::Right });
//! assert!(events.iter().any(|e| matches!(
//!     e,
//!     TransferEvent::Change { target_keys, .. } if target_keys == &["a", "b"]
//! )));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::config::TransferConfig;
use crate::error::{ConfigError, Diagnostic};
use crate::event::{Side, TransferEvent, TransferRequest};
use crate::filter::filter;
use crate::item::{Key, TransferRecord};
use crate::moves::{MoveOutcome, remove_keys, resolve_move};
use crate::paginator::{PageState, PageWindow};
use crate::partition::{Partition, partition};
use crate::selection::{CheckStatus, SelectionState, SelectionSummary};

bitflags! {
    /// Operation buttons that currently have something to do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Operations: u8 {
        /// Move the left selection to the right.
        const MOVE_RIGHT = 0b001;
        /// Move the right selection to the left.
        const MOVE_LEFT  = 0b010;
        /// Remove rows from the right side (one-way mode).
        const REMOVE     = 0b100;
    }
}

/// Host-owned input snapshot for one update cycle.
pub struct TransferProps<T> {
    /// Every record, in left-side order.
    pub data_source: Arc<[T]>,
    /// Right-side membership and order.
    pub target_keys: Arc<[Key]>,
    /// Combined controlled selection, `None` for engine-owned selection.
    pub selected_keys: Option<Arc<[Key]>>,
    /// Controlled search text per side (`[left, right]`).
    pub search: [Option<String>; 2],
}

impl<T> TransferProps<T> {
    /// Snapshot with engine-owned selection and search.
    pub fn new(data_source: impl Into<Arc<[T]>>, target_keys: impl Into<Arc<[Key]>>) -> Self {
        Self {
            data_source: data_source.into(),
            target_keys: target_keys.into(),
            selected_keys: None,
            search: [None, None],
        }
    }

    /// Control the selection from the host.
    #[must_use]
    pub fn with_selected_keys(mut self, selected_keys: impl Into<Arc<[Key]>>) -> Self {
        self.selected_keys = Some(selected_keys.into());
        self
    }

    /// Control one side's search text from the host.
    #[must_use]
    pub fn with_search(mut self, side: Side, query: impl Into<String>) -> Self {
        self.search[side.index()] = Some(query.into());
        self
    }
}

impl<T> Default for TransferProps<T> {
    fn default() -> Self {
        Self::new(Vec::<T>::new(), Vec::<Key>::new())
    }
}

impl<T> Clone for TransferProps<T> {
    fn clone(&self) -> Self {
        Self {
            data_source: Arc::clone(&self.data_source),
            target_keys: Arc::clone(&self.target_keys),
            selected_keys: self.selected_keys.clone(),
            search: self.search.clone(),
        }
    }
}

impl<T> fmt::Debug for TransferProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferProps")
            .field("records", &self.data_source.len())
            .field("target_keys", &self.target_keys)
            .field("selected_keys", &self.selected_keys)
            .field("search", &self.search)
            .finish()
    }
}

/// Identifier returned by [`Transfer::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&TransferEvent)>;

#[derive(Debug, Clone, Default)]
struct SideView {
    query: String,
    filtered: Vec<usize>,
    page: PageState,
}

/// Dual-list transfer engine.
pub struct Transfer<T> {
    config: TransferConfig<T>,
    props: TransferProps<T>,
    partition: Partition,
    selection: SelectionState,
    sides: [SideView; 2],
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl<T> fmt::Debug for Transfer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transfer")
            .field("config", &self.config)
            .field("props", &self.props)
            .field("selection", &self.selection)
            .field("sides", &self.sides)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: TransferRecord> Transfer<T> {
    /// Create an empty transfer.
    ///
    /// An invalid page size is treated as 1 and logged; use
    /// [`try_new`](Self::try_new) to reject it instead.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn new(config: TransferConfig<T>) -> Self {
        if let Err(err) = config.validate() {
            crate::warn!(error = %err, "invalid transfer config, page size forced to 1");
        }
        let page = PageState::new(config.page_size());
        Self {
            config,
            props: TransferProps::default(),
            partition: Partition::default(),
            selection: SelectionState::default(),
            sides: [
                SideView {
                    page,
                    ..SideView::default()
                },
                SideView {
                    page,
                    ..SideView::default()
                },
            ],
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Create an empty transfer, rejecting an invalid configuration.
    pub fn try_new(config: TransferConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Start a new cycle from a host snapshot.
    ///
    /// Recomputes the partition, re-derives a controlled selection, applies
    /// controlled search text, re-filters both sides and clamps both pages.
    /// Emits nothing.
    pub fn sync(&mut self, props: TransferProps<T>) {
        let _span = crate::debug_span!(
            "transfer_sync",
            records = props.data_source.len(),
            targets = props.target_keys.len()
        )
        .entered();

        self.partition = partition(
            &props.data_source,
            &props.target_keys,
            self.config.row_key.as_ref(),
        );
        if let Some(selected) = &props.selected_keys {
            // Keys without a placed record (orphan targets included) select nothing.
            let placed: HashSet<&str> = self
                .partition
                .keys_of(&self.partition.left)
                .chain(self.partition.keys_of(&self.partition.right))
                .map(String::as_str)
                .collect();
            let selected: Vec<Key> = selected
                .iter()
                .filter(|key| placed.contains(key.as_str()))
                .cloned()
                .collect();
            let right_keys: Vec<Key> = self.partition.keys_of(&self.partition.right).cloned().collect();
            self.selection = SelectionState::derive_from_controlled(&selected, &right_keys);
        }
        for side in Side::BOTH {
            if let Some(query) = &props.search[side.index()] {
                self.sides[side.index()].query = query.clone();
            }
        }
        self.props = props;
        for side in Side::BOTH {
            self.refilter(side);
        }
    }

    /// Handle one request and return the events it produced.
    ///
    /// Subscribed listeners receive the same events, in order, before this
    /// returns.
    pub fn dispatch(&mut self, request: TransferRequest) -> Vec<TransferEvent> {
        let _span = crate::debug_span!("transfer_dispatch", request = request.name()).entered();

        let mut events = Vec::new();
        if self.config.disabled && !matches!(request, TransferRequest::Scroll { .. }) {
            crate::debug!(request = request.name(), "transfer disabled, request ignored");
            return events;
        }

        match request {
            TransferRequest::Toggle { side, key, checked } => {
                self.mutate_selection(&mut events, |s| {
                    s.toggle(side, &key, checked);
                });
            }
            TransferRequest::SelectKeys {
                side,
                keys,
                checked,
            } => {
                self.mutate_selection(&mut events, |s| s.select_all(side, &keys, checked));
            }
            TransferRequest::SelectAll { side, checked } => {
                let keys = self.enabled_keys(&self.sides[side.index()].filtered);
                self.mutate_selection(&mut events, |s| s.select_all(side, &keys, checked));
            }
            TransferRequest::SelectCurrentPage { side } => {
                let keys = self.enabled_keys(self.visible_indices(side));
                self.mutate_selection(&mut events, |s| s.select_all(side, &keys, true));
            }
            TransferRequest::InvertCurrentPage { side } => {
                let keys = self.enabled_keys(self.visible_indices(side));
                self.mutate_selection(&mut events, |s| s.invert(side, &keys));
            }
            TransferRequest::Move { to } => self.move_to(to, &mut events),
            TransferRequest::Remove { keys } => self.remove(&keys, &mut events),
            TransferRequest::RemoveAll => {
                let keys = self.keys_at(&self.sides[Side::Right.index()].filtered);
                self.remove(&keys, &mut events);
            }
            TransferRequest::RemoveCurrentPage => {
                let keys = self.keys_at(self.visible_indices(Side::Right));
                self.remove(&keys, &mut events);
            }
            TransferRequest::Search { side, query } => self.search(side, query, &mut events),
            TransferRequest::ClearSearch { side } => self.search(side, String::new(), &mut events),
            TransferRequest::SetPage { side, page } => {
                let view = &mut self.sides[side.index()];
                let len = view.filtered.len();
                let landed = view.page.set_page(page, len);
                if landed != page {
                    crate::debug!(requested = page, landed, "page request clamped");
                }
            }
            TransferRequest::Scroll { side, event } => {
                events.push(TransferEvent::Scroll { side, event });
            }
        }

        for (_, listener) in &mut self.listeners {
            for event in &events {
                listener(event);
            }
        }
        events
    }

    /// Register a listener for every dispatched event.
    pub fn subscribe(&mut self, listener: impl FnMut(&TransferEvent) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ── Pull accessors ──────────────────────────────────────────────────

    /// Records on `side`, before filtering.
    #[must_use]
    pub fn items(&self, side: Side) -> Vec<&T> {
        self.records_at(self.side_indices(side))
    }

    /// Records on `side` that match the side's search.
    #[must_use]
    pub fn filtered(&self, side: Side) -> Vec<&T> {
        self.records_at(&self.sides[side.index()].filtered)
    }

    /// Records on the current page of `side`.
    #[must_use]
    pub fn visible(&self, side: Side) -> Vec<&T> {
        self.records_at(self.visible_indices(side))
    }

    /// Keys of the records on the current page of `side`.
    #[must_use]
    pub fn visible_keys(&self, side: Side) -> Vec<Key> {
        self.keys_at(self.visible_indices(side))
    }

    /// Selected keys on `side`.
    #[must_use]
    pub fn selection(&self, side: Side) -> &[Key] {
        self.selection.keys(side)
    }

    /// Both selections.
    #[must_use]
    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether the selection is host-controlled.
    #[must_use]
    pub fn is_selection_controlled(&self) -> bool {
        self.props.selected_keys.is_some()
    }

    /// Last page of `side`.
    #[must_use]
    pub fn max_page(&self, side: Side) -> usize {
        let view = &self.sides[side.index()];
        view.page.max_page(view.filtered.len())
    }

    /// Current page of `side`.
    #[must_use]
    pub fn current_page(&self, side: Side) -> usize {
        self.sides[side.index()].page.current_page()
    }

    /// Page indicator data for `side`.
    #[must_use]
    pub fn page_window(&self, side: Side) -> PageWindow {
        let view = &self.sides[side.index()];
        view.page.window(view.filtered.len())
    }

    /// Search text of `side`.
    #[must_use]
    pub fn query(&self, side: Side) -> &str {
        &self.sides[side.index()].query
    }

    /// State of the "select all" control of `side`, over its enabled filtered records.
    #[must_use]
    pub fn check_status(&self, side: Side) -> CheckStatus {
        let candidates = self.enabled_keys(&self.sides[side.index()].filtered);
        self.selection.check_status(side, &candidates)
    }

    /// Selected and filtered counts of `side`.
    #[must_use]
    pub fn summary(&self, side: Side) -> SelectionSummary {
        SelectionSummary {
            selected: self.selection.keys(side).len(),
            total: self.sides[side.index()].filtered.len(),
        }
    }

    /// Operations that currently have something to act on.
    #[must_use]
    pub fn operations(&self) -> Operations {
        let mut ops = Operations::empty();
        if self.config.disabled {
            return ops;
        }
        if !self.selection.source.is_empty() {
            ops |= Operations::MOVE_RIGHT;
        }
        if self.config.one_way {
            ops |= Operations::REMOVE;
        } else if !self.selection.target.is_empty() {
            ops |= Operations::MOVE_LEFT;
        }
        ops
    }

    /// Contract violations found in the current props.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.partition.diagnostics
    }

    /// Current props snapshot.
    #[must_use]
    pub fn props(&self) -> &TransferProps<T> {
        &self.props
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &TransferConfig<T> {
        &self.config
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn side_indices(&self, side: Side) -> &[usize] {
        match side {
            Side::Left => &self.partition.left,
            Side::Right => &self.partition.right,
        }
    }

    fn visible_indices(&self, side: Side) -> &[usize] {
        let view = &self.sides[side.index()];
        view.page.slice(&view.filtered)
    }

    fn records_at(&self, indices: &[usize]) -> Vec<&T> {
        indices.iter().map(|&i| &self.props.data_source[i]).collect()
    }

    fn keys_at(&self, indices: &[usize]) -> Vec<Key> {
        self.partition.keys_of(indices).cloned().collect()
    }

    fn enabled_keys(&self, indices: &[usize]) -> Vec<Key> {
        indices
            .iter()
            .filter(|&&i| !self.props.data_source[i].disabled())
            .map(|&i| self.partition.keys[i].clone())
            .collect()
    }

    fn refilter(&mut self, side: Side) {
        let indices = match side {
            Side::Left => &self.partition.left,
            Side::Right => &self.partition.right,
        };
        let view = &mut self.sides[side.index()];
        view.filtered = filter(
            &self.props.data_source,
            indices,
            self.config.filter.as_ref(),
            &view.query,
        );
        view.page.clamp(view.filtered.len());
    }

    /// Apply `f` to a copy of the selection and report the result.
    ///
    /// The copy replaces the local selection only when it is engine-owned.
    fn mutate_selection(
        &mut self,
        events: &mut Vec<TransferEvent>,
        f: impl FnOnce(&mut SelectionState),
    ) {
        let mut next = self.selection.clone();
        f(&mut next);
        events.push(TransferEvent::SelectChange {
            source_selected: next.source.clone(),
            target_selected: next.target.clone(),
        });
        if !self.is_selection_controlled() {
            self.selection = next;
        }
    }

    fn move_to(&mut self, to: Side, events: &mut Vec<TransferEvent>) {
        if self.config.one_way && to == Side::Left {
            crate::debug!("one-way transfer, move to left ignored");
            return;
        }
        let origin = to.opposite();
        let outcome = resolve_move(
            to,
            self.selection.keys(origin),
            &self.props.target_keys,
            &self.props.data_source,
            &self.partition,
            self.config.move_order,
        );
        self.finish_move(origin, to, outcome, events);
    }

    fn remove(&mut self, keys: &[Key], events: &mut Vec<TransferEvent>) {
        if !self.config.one_way {
            crate::debug!("remove requires one-way mode, request ignored");
            return;
        }
        let outcome = remove_keys(
            keys,
            &self.props.target_keys,
            &self.props.data_source,
            &self.partition,
        );
        self.finish_move(Side::Right, Side::Left, outcome, events);
    }

    fn finish_move(
        &mut self,
        origin: Side,
        direction: Side,
        outcome: MoveOutcome,
        events: &mut Vec<TransferEvent>,
    ) {
        crate::debug!(
            direction = ?direction,
            moved = outcome.moved_keys.len(),
            targets = outcome.target_keys.len(),
            "move resolved"
        );
        self.mutate_selection(events, |s| s.clear(origin));
        events.push(TransferEvent::Change {
            target_keys: outcome.target_keys,
            direction,
            moved_keys: outcome.moved_keys,
        });
    }

    fn search(&mut self, side: Side, query: String, events: &mut Vec<TransferEvent>) {
        if self.props.search[side.index()].is_none() {
            self.sides[side.index()].query = query.clone();
            self.refilter(side);
        }
        events.push(TransferEvent::Search { side, query });
    }
}
