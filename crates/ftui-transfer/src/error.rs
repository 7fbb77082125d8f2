#![forbid(unsafe_code)]

//! Configuration errors and input diagnostics.
//!
//! Nothing in the engine is fatal. Malformed host input (duplicate keys,
//! orphaned target keys) is repaired deterministically and reported as a
//! [`Diagnostic`]; only an unusable configuration is rejected outright.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Duplicate key in data source | Later record wins, [`Diagnostic::DuplicateKey`] |
//! | Target key without a record | Key dropped from right side, [`Diagnostic::OrphanTargetKey`] |
//! | Target key listed twice | First position wins, [`Diagnostic::DuplicateTargetKey`] |
//! | `page_size == 0` | [`ConfigError::ZeroPageSize`] from `validate` |

use std::fmt;

use crate::item::Key;

/// Errors raised by [`TransferConfig::validate`](crate::TransferConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Pagination was enabled with a page size of zero.
    ZeroPageSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "pagination page size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A recoverable contract violation found while partitioning host input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// Two records share a key. The record at `kept_index` is used.
    DuplicateKey {
        key: Key,
        dropped_index: usize,
        kept_index: usize,
    },
    /// A target key has no matching record and was left out of the right side.
    OrphanTargetKey { key: Key, position: usize },
    /// A target key appears more than once; only `first_position` is used.
    DuplicateTargetKey {
        key: Key,
        position: usize,
        first_position: usize,
    },
}

impl Diagnostic {
    /// The key the diagnostic refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Diagnostic::DuplicateKey { key, .. }
            | Diagnostic::OrphanTargetKey { key, .. }
            | Diagnostic::DuplicateTargetKey { key, .. } => key,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateKey {
                key,
                dropped_index,
                kept_index,
            } => write!(
                f,
                "duplicate key {key:?} in data source: record {dropped_index} dropped, record {kept_index} kept"
            ),
            Diagnostic::OrphanTargetKey { key, position } => write!(
                f,
                "target key {key:?} at position {position} has no record in the data source"
            ),
            Diagnostic::DuplicateTargetKey {
                key,
                position,
                first_position,
            } => write!(
                f,
                "target key {key:?} at position {position} repeats position {first_position}"
            ),
        }
    }
}

impl std::error::Error for Diagnostic {}
