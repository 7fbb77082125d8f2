#![forbid(unsafe_code)]

//! Inbound requests and outbound events.
//!
//! Hosts translate each user gesture into one [`TransferRequest`] and hand it
//! to [`Transfer::dispatch`](crate::Transfer::dispatch). The engine answers
//! with zero or more [`TransferEvent`]s, which are also delivered to every
//! subscribed listener.

use crate::item::Key;

/// One of the two lists of a transfer.
///
/// As a move direction, the side names the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Source list: records not in the target keys.
    Left,
    /// Target list: records named by the target keys.
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Both sides, left first.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub(crate) const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Raw scroll information relayed from the presentation layer.
///
/// The engine does not interpret it; it is echoed back as
/// [`TransferEvent::Scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    /// First visible row.
    pub offset: usize,
    /// Rows that fit in the viewport.
    pub viewport: usize,
}

/// A user gesture relayed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferRequest {
    /// Check or uncheck one row.
    Toggle { side: Side, key: Key, checked: bool },
    /// Check or uncheck an explicit set of keys.
    SelectKeys {
        side: Side,
        keys: Vec<Key>,
        checked: bool,
    },
    /// Check or uncheck every enabled record in the side's filtered list.
    SelectAll { side: Side, checked: bool },
    /// Check every enabled record on the side's current page.
    SelectCurrentPage { side: Side },
    /// Flip the selection of every enabled record on the side's current page.
    InvertCurrentPage { side: Side },
    /// Move the opposite side's selection to `to`.
    Move { to: Side },
    /// Remove specific keys from the right side (one-way mode).
    Remove { keys: Vec<Key> },
    /// Remove every enabled record in the right side's filtered list.
    RemoveAll,
    /// Remove every enabled record on the right side's current page.
    RemoveCurrentPage,
    /// Update the search text of a side.
    Search { side: Side, query: String },
    /// Clear the search text of a side.
    ClearSearch { side: Side },
    /// Jump to a page (clamped).
    SetPage { side: Side, page: usize },
    /// Scroll notification, passed through untouched.
    Scroll { side: Side, event: ScrollEvent },
}

impl TransferRequest {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TransferRequest::Toggle { .. } => "toggle",
            TransferRequest::SelectKeys { .. } => "select_keys",
            TransferRequest::SelectAll { .. } => "select_all",
            TransferRequest::SelectCurrentPage { .. } => "select_current_page",
            TransferRequest::InvertCurrentPage { .. } => "invert_current_page",
            TransferRequest::Move { .. } => "move",
            TransferRequest::Remove { .. } => "remove",
            TransferRequest::RemoveAll => "remove_all",
            TransferRequest::RemoveCurrentPage => "remove_current_page",
            TransferRequest::Search { .. } => "search",
            TransferRequest::ClearSearch { .. } => "clear_search",
            TransferRequest::SetPage { .. } => "set_page",
            TransferRequest::Scroll { .. } => "scroll",
        }
    }
}

/// A fact the host should learn about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferEvent {
    /// Proposed new target keys after a move or remove.
    Change {
        target_keys: Vec<Key>,
        direction: Side,
        moved_keys: Vec<Key>,
    },
    /// The full selection pair after a selection mutation.
    SelectChange {
        source_selected: Vec<Key>,
        target_selected: Vec<Key>,
    },
    /// Search text of a side changed.
    Search { side: Side, query: String },
    /// Scroll pass-through.
    Scroll { side: Side, event: ScrollEvent },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for side in Side::BOTH {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }

    #[test]
    fn request_names_are_snake_case() {
        let req = TransferRequest::Move { to: Side::Right };
        assert_eq!(req.name(), "move");
        assert_eq!(TransferRequest::RemoveAll.name(), "remove_all");
    }
}
