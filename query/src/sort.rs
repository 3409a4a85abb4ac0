//! Creation-time ordering

use addrbook_core::{Address, SortOrder};

/// Sort in place by creation time. `None` keeps the current order.
///
/// The sort is stable, so addresses created at the same instant keep their
/// relative order.
pub fn sort_addresses(addresses: &mut [&Address], order: Option<SortOrder>) {
    match order {
        Some(SortOrder::Newest) => addresses.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortOrder::Oldest) => addresses.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        None => {}
    }
}
