//! Address book core library
//!
//! Core types, traits, and configuration shared by the store, the query
//! engine and the command line front end.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;
