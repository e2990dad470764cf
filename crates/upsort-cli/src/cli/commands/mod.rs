//! CLI command handlers, one per file.

mod classify;
mod config;
mod resolve;
mod table;

pub use classify::run_classify;
pub use config::run_config;
pub use resolve::{run_resolve, ResolveArgs};
pub use table::run_table;
