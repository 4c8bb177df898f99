//! CLI subcommand implementations.

pub mod add;
pub mod calendar;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod report;
pub mod status;
pub mod summary;
pub mod util;
