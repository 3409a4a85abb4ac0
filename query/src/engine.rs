//! Query engine: filter, sort, paginate

use addrbook_core::{Address, SortOrder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{filter_addresses, SearchTerm};
use crate::page::{paginate, Page, PageRequest};
use crate::sort::sort_addresses;

/// Full set of query inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub search: SearchTerm,
    pub sort: Option<SortOrder>,
    pub page: PageRequest,
}

impl AddressQuery {
    pub fn new(search: SearchTerm, sort: Option<SortOrder>, page: PageRequest) -> Self {
        Self { search, sort, page }
    }
}

/// Filtered and sorted addresses, not yet paginated
pub fn matching(
    addresses: &[Address],
    search: &SearchTerm,
    sort: Option<SortOrder>,
) -> Vec<Address> {
    let mut view = filter_addresses(addresses, search);
    sort_addresses(&mut view, sort);
    view.into_iter().cloned().collect()
}

/// Run a query against a snapshot of the store
pub fn run_query(addresses: &[Address], query: &AddressQuery) -> Page<Address> {
    let mut view = filter_addresses(addresses, &query.search);
    sort_addresses(&mut view, query.sort);
    let page = paginate(&view, query.page).map(Address::clone);

    debug!(
        "Query '{}' matched {} of {}, page {} has {}",
        query.search,
        page.total,
        addresses.len(),
        page.page_index,
        page.items.len()
    );

    page
}
