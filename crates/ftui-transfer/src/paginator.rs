#![forbid(unsafe_code)]

//! Page cursor for one side of a transfer.
//!
//! Pages are 1-based. The cursor is clamped whenever the list it pages over
//! changes length, so it never points past the last page.

use std::ops::Range;

/// Number of pages needed for `len` items, never less than one.
#[must_use]
pub fn max_page(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Current page of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: Option<usize>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PageState {
    /// Create a cursor on page 1. `None` disables paging.
    #[must_use]
    pub fn new(page_size: Option<usize>) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.map(|s| s.max(1)),
        }
    }

    /// The 1-based current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page, `None` when paging is off.
    #[must_use]
    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Last valid page for a list of `len` items.
    #[must_use]
    pub fn max_page(&self, len: usize) -> usize {
        match self.page_size {
            Some(size) => max_page(len, size),
            None => 1,
        }
    }

    /// Pull the cursor back onto the last page if the list shrank.
    ///
    /// Returns `true` if the page changed.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = self.max_page(len);
        if self.current_page > last {
            crate::trace!(from = self.current_page, to = last, "page clamped");
            self.current_page = last;
            return true;
        }
        false
    }

    /// Move to `page`, clamped into `1..=max_page(len)`.
    ///
    /// Returns the page actually selected.
    pub fn set_page(&mut self, page: usize, len: usize) -> usize {
        self.current_page = page.clamp(1, self.max_page(len));
        self.current_page
    }

    /// Index range of the current page within a list of `len` items.
    #[must_use]
    pub fn range(&self, len: usize) -> Range<usize> {
        match self.page_size {
            Some(size) => {
                let page = self.current_page.clamp(1, self.max_page(len));
                let start = ((page - 1) * size).min(len);
                let end = (page * size).min(len);
                start..end
            }
            None => 0..len,
        }
    }

    /// Slice out the current page of `items`.
    #[must_use]
    pub fn slice<'a, I>(&self, items: &'a [I]) -> &'a [I] {
        &items[self.range(items.len())]
    }

    /// Describe the current page for a page indicator.
    #[must_use]
    pub fn window(&self, len: usize) -> PageWindow {
        let range = self.range(len);
        PageWindow {
            current: self.current_page.clamp(1, self.max_page(len)),
            total: self.max_page(len),
            start: range.start,
            end: range.end,
        }
    }
}

/// Snapshot of the visible page, for hosts that draw a page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageWindow {
    /// 1-based current page.
    pub current: usize,
    /// Number of pages.
    pub total: usize,
    /// First visible index in the filtered list.
    pub start: usize,
    /// One past the last visible index.
    pub end: usize,
}

impl PageWindow {
    /// Render as "X/Y".
    #[must_use]
    pub fn compact_label(&self) -> String {
        format!("{}/{}", self.current, self.total)
    }

    /// Render as "Page X/Y".
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {}/{}", self.current, self.total)
    }

    /// Number of visible items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the page shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
