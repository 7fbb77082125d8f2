#![forbid(unsafe_code)]

//! Records managed by a transfer.

use std::fmt;
use std::sync::Arc;

/// Identity of a record within a data source.
pub type Key = String;

/// Host-supplied key derivation, used when records carry no intrinsic key.
pub type RowKey<T> = Arc<dyn Fn(&T) -> Key>;

/// A record that can live on either side of a transfer.
///
/// Keys must be unique within a data source. Duplicates are tolerated but
/// reported, see [`Diagnostic::DuplicateKey`](crate::Diagnostic::DuplicateKey).
pub trait TransferRecord {
    /// Intrinsic key of the record.
    ///
    /// Ignored when the transfer is configured with a [`RowKey`].
    fn key(&self) -> Key;

    /// Disabled records can be selected but never moved.
    fn disabled(&self) -> bool {
        false
    }

    /// Text used by [`title_contains`](crate::filter::title_contains).
    fn title(&self) -> &str {
        ""
    }
}

/// A ready-made record with the fields a transfer list usually shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferItem {
    pub key: Key,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
}

impl TransferItem {
    /// Create an enabled item whose title equals its key.
    pub fn new(key: impl Into<Key>) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            description: None,
            disabled: false,
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the secondary description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the item as disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl TransferRecord for TransferItem {
    fn key(&self) -> Key {
        self.key.clone()
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for TransferItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl From<&str> for TransferItem {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Resolves keys for records, honouring an optional [`RowKey`].
pub(crate) struct KeyResolver<'a, T> {
    row_key: Option<&'a RowKey<T>>,
}

impl<'a, T: TransferRecord> KeyResolver<'a, T> {
    pub(crate) fn new(row_key: Option<&'a RowKey<T>>) -> Self {
        Self { row_key }
    }

    pub(crate) fn key_of(&self, record: &T) -> Key {
        match self.row_key {
            Some(f) => f(record),
            None => record.key(),
        }
    }
}
