//! Command-line interface for memoalign.

mod commands;
pub mod marks;
pub mod reporter;

pub use commands::{is_verbose, run};
