//! Address query engine
//!
//! Pure derivation of a displayable page from the stored addresses:
//! filter by search term, sort by creation time, then paginate. Also holds
//! the input-side helpers a front end uses to drive it: the debouncer and
//! the view state.

pub mod filter;
pub mod sort;
pub mod page;
pub mod engine;
pub mod debounce;
pub mod view;

pub use filter::*;
pub use sort::*;
pub use page::*;
pub use engine::*;
pub use debounce::*;
pub use view::*;
