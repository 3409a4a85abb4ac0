//! Search term filtering

use addrbook_core::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized search term: trimmed and lower-cased
///
/// Deserialization goes through the same normalization as `new`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        SearchTerm(raw.trim().to_lowercase())
    }

    /// Term that matches everything
    pub fn any() -> Self {
        SearchTerm(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match on any searchable field
    pub fn matches(&self, address: &Address) -> bool {
        self.is_empty()
            || address
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        SearchTerm::new(raw)
    }
}

impl From<String> for SearchTerm {
    fn from(raw: String) -> Self {
        SearchTerm::new(&raw)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep addresses matching `term`, in their original order.
///
/// Always returns a new sequence, even for an empty term.
pub fn filter_addresses<'a>(addresses: &'a [Address], term: &SearchTerm) -> Vec<&'a Address> {
    addresses.iter().filter(|a| term.matches(a)).collect()
}
