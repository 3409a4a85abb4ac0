//! View state owned by the front end
//!
//! Tracks the user's search, sort and page selections and turns them into an
//! `AddressQuery`. Search input is debounced; sort changes are deduplicated
//! but applied immediately.
//!
//! Keystroke-driven front ends feed `input_search` and call `poll` from their
//! event loop, sleeping until `search_deadline`. Line-oriented front ends such
//! as the interactive shell submit whole entries through `set_search`, which
//! applies the text at once.

use addrbook_core::{QueryConfig, SortOrder};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::debounce::{Debouncer, Distinct};
use crate::engine::AddressQuery;
use crate::filter::SearchTerm;
use crate::page::PageRequest;

const FALLBACK_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct ViewState {
    search: Debouncer<String>,
    sort: Distinct<Option<SortOrder>>,
    page_index: usize,
    page_size: NonZeroUsize,
    page_size_options: Vec<NonZeroUsize>,
}

impl ViewState {
    pub fn new(config: &QueryConfig) -> Self {
        let page_size = NonZeroUsize::new(config.default_page_size).unwrap_or(FALLBACK_PAGE_SIZE);
        let mut page_size_options: Vec<NonZeroUsize> = config
            .page_size_options
            .iter()
            .filter_map(|size| NonZeroUsize::new(*size))
            .collect();
        if !page_size_options.contains(&page_size) {
            page_size_options.push(page_size);
            page_size_options.sort();
        }

        Self {
            search: Debouncer::new(
                String::new(),
                Duration::from_millis(config.search_debounce_ms),
            ),
            sort: Distinct::new(config.default_sort),
            page_index: 0,
            page_size,
            page_size_options,
        }
    }

    /// Record raw search input. It takes effect on a later `poll` or `commit_search`.
    pub fn input_search(&mut self, text: &str, now: Instant) {
        self.search.push(text.to_string(), now);
    }

    /// Apply pending search input whose quiet period has elapsed.
    ///
    /// Returns true if the effective search term changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => {
                debug!("Search changed to '{}'", term);
                true
            }
            None => false,
        }
    }

    /// When pending search input will take effect, if any is waiting
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Apply pending search input now, e.g. when the user presses enter
    pub fn commit_search(&mut self) -> bool {
        self.search.flush().is_some()
    }

    /// Set the search text and apply it immediately
    pub fn set_search(&mut self, text: &str) -> bool {
        self.search.push(text.to_string(), Instant::now());
        self.commit_search()
    }

    /// Returns true if the sort order changed
    pub fn set_sort(&mut self, sort: Option<SortOrder>) -> bool {
        let changed = self.sort.set(sort);
        if changed {
            debug!("Sort changed to {:?}", sort);
        }
        changed
    }

    pub fn set_page(&mut self, index: usize, size: NonZeroUsize) {
        self.page_index = index;
        self.page_size = size;
    }

    /// Change the page size, keeping the first visible item on screen
    pub fn set_page_size(&mut self, size: NonZeroUsize) {
        let offset = self.page_index.saturating_mul(self.page_size.get());
        self.page_size = size;
        self.page_index = offset / size.get();
    }

    /// Move forward if another page exists for `total` items
    pub fn next_page(&mut self, total: usize) -> bool {
        let pages = total.div_ceil(self.page_size.get());
        if self.page_index.saturating_add(1) < pages {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn search_text(&self) -> &str {
        self.search.current()
    }

    pub fn sort(&self) -> Option<SortOrder> {
        *self.sort.current()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[NonZeroUsize] {
        &self.page_size_options
    }

    /// Current query inputs
    pub fn query(&self) -> AddressQuery {
        AddressQuery::new(
            SearchTerm::new(self.search.current()),
            self.sort(),
            PageRequest::new(self.page_index, self.page_size),
        )
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&QueryConfig::default())
    }
}
