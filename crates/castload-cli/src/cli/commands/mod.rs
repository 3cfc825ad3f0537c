//! CLI command handlers.

mod cat;
mod info;

pub use cat::run_cat;
pub use info::run_info;
