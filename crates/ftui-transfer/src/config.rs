#![forbid(unsafe_code)]

//! Transfer configuration.

use std::fmt;

use crate::error::ConfigError;
use crate::filter::FilterPredicate;
use crate::item::RowKey;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where moved keys land in the target keys on a move to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOrder {
    /// Most recently moved first.
    #[default]
    Prepend,
    /// Most recently moved last.
    Append,
}

/// Paging settings shared by both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationConfig {
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Configuration for a [`Transfer`](crate::Transfer).
pub struct TransferConfig<T> {
    /// Paging, or `None` to show every filtered row.
    pub pagination: Option<PaginationConfig>,
    /// Ordering policy for moves to the right.
    pub move_order: MoveOrder,
    /// One-way mode: records only travel right and leave via `Remove*`.
    pub one_way: bool,
    /// Ignore every request except scroll pass-through.
    pub disabled: bool,
    /// Key derivation for records without an intrinsic key.
    pub row_key: Option<RowKey<T>>,
    /// Search predicate; `None` accepts everything.
    pub filter: Option<FilterPredicate<T>>,
}

impl<T> Default for TransferConfig<T> {
    fn default() -> Self {
        Self {
            pagination: Some(PaginationConfig::default()),
            move_order: MoveOrder::default(),
            one_way: false,
            disabled: false,
            row_key: None,
            filter: None,
        }
    }
}

impl<T> Clone for TransferConfig<T> {
    fn clone(&self) -> Self {
        Self {
            pagination: self.pagination,
            move_order: self.move_order,
            one_way: self.one_way,
            disabled: self.disabled,
            row_key: self.row_key.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<T> fmt::Debug for TransferConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferConfig")
            .field("pagination", &self.pagination)
            .field("move_order", &self.move_order)
            .field("one_way", &self.one_way)
            .field("disabled", &self.disabled)
            .field("row_key", &self.row_key.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl<T> TransferConfig<T> {
    /// Default configuration (paging on, 10 rows per page).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size, enabling paging.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination = Some(PaginationConfig { page_size });
        self
    }

    /// Show every filtered row on a single page.
    #[must_use]
    pub fn without_pagination(mut self) -> Self {
        self.pagination = None;
        self
    }

    /// Set the ordering policy for moves to the right.
    #[must_use]
    pub fn with_move_order(mut self, order: MoveOrder) -> Self {
        self.move_order = order;
        self
    }

    /// Enable one-way mode.
    #[must_use]
    pub fn one_way(mut self, one_way: bool) -> Self {
        self.one_way = one_way;
        self
    }

    /// Disable the whole transfer.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Derive keys with `row_key` instead of the records' own keys.
    #[must_use]
    pub fn with_row_key(mut self, row_key: RowKey<T>) -> Self {
        self.row_key = Some(row_key);
        self
    }

    /// Filter search results with `predicate`.
    #[must_use]
    pub fn with_filter(mut self, predicate: FilterPredicate<T>) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Page size in effect, `None` when paging is off.
    #[must_use]
    pub fn page_size(&self) -> Option<usize> {
        self.pagination.map(|p| p.page_size)
    }

    /// Check the configuration for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.pagination {
            Some(PaginationConfig { page_size: 0 }) => Err(ConfigError::ZeroPageSize),
            _ => Ok(()),
        }
    }
}
