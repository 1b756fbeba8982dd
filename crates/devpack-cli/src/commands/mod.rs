//! Command implementations for the devpack CLI.
//!
//! - [`dev`] - Finalize the development config and launch the bundler
//! - [`print`] - Print the merged development config
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod dev;
pub mod print;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use dev::execute as dev_execute;
pub use print::execute as print_execute;
