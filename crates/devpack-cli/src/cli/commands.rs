use clap::{Args, Subcommand};
use devpack_config::DEFAULT_TITLE;
use std::path::PathBuf;

/// Available devpack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Finalize the development config
    ///
    /// Loads the base config, applies the development defaults, finds a free
    /// port and writes the result as JSON. Anything after `--` is run with
    /// `PORT` set to the resolved port.
    Dev(DevArgs),

    /// Print the merged development config without resolving a port
    Print(PrintArgs),
}

/// Where the base config comes from and how the template is titled
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Base config file
    ///
    /// Defaults to devpack.config.json, devpack.toml or the "devpack" field
    /// of package.json in the working directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory
    ///
    /// Config discovery and the index.ejs template are resolved against it.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Document title for the HTML template
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    pub title: String,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the finalized config here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Command to run once the config is written
    ///
    /// Example:
    ///   devpack dev --out dev.config.json -- webpack serve --config dev.config.json
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
