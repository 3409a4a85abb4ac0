//! Address store
//!
//! Holds the authoritative in-memory address collection, assigns ids,
//! notifies subscribers of changes, and exports or restores JSON snapshots.

pub mod store;
pub mod memory;
pub mod seed;
pub mod snapshot;

pub use store::*;
pub use memory::*;
pub use seed::*;
pub use snapshot::*;
