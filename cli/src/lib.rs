//! Address book command line front end

pub mod app;
pub mod form;
pub mod render;
pub mod shell;

pub use app::*;
pub use form::*;
pub use render::*;
pub use shell::run_shell;
