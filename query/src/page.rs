//! Pagination

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Zero-based page index and a non-zero page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: NonZeroUsize,
}

impl PageRequest {
    pub fn new(index: usize, size: NonZeroUsize) -> Self {
        Self { index, size }
    }

    /// First page of the given size. Returns `None` for size zero.
    pub fn first(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(|size| Self::new(0, size))
    }

    /// Offset of the first item on this page
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size.get())
    }
}

/// One page of results plus the total they were cut from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: NonZeroUsize,
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.get())
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total: self.total,
        }
    }

    /// Paginator caption, e.g. "11 – 20 of 42"
    pub fn range_label(&self) -> String {
        if self.total == 0 || self.items.is_empty() {
            return format!("0 of {}", self.total);
        }
        let start = self.page_index.saturating_mul(self.page_size.get());
        format!("{} – {} of {}", start + 1, start + self.items.len(), self.total)
    }
}

/// Cut one page out of `items`.
///
/// An index past the end yields an empty page.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let start = request.offset().min(items.len());
    let end = start.saturating_add(request.size.get()).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page_index: request.index,
        page_size: request.size,
        total: items.len(),
    }
}
