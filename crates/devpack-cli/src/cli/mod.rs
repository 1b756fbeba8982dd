//! Command-line interface definition for devpack.
//!
//! # Command Structure
//!
//! - `devpack dev` - Finalize the development config and optionally launch
//!   the bundler with `PORT` set
//! - `devpack print` - Print the merged development config

mod commands;
mod tests;

use clap::Parser;

pub use commands::{Command, DevArgs, PrintArgs, SourceArgs};

/// devpack - development configuration for bundler dev servers
#[derive(Parser, Debug)]
#[command(
    name = "devpack",
    version,
    about = "Development configuration for bundler dev servers",
    long_about = "devpack merges a base bundler configuration with development defaults\n\
                  (hot reload, history fallback, API proxy, bundle analyzer), finds a free\n\
                  port and hands the finalized configuration to the bundler."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
