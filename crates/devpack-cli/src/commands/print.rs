//! Print command implementation.

use crate::cli::PrintArgs;
use crate::commands::utils;
use crate::error::Result;

/// Execute the print command.
///
/// Writes the merged development config to stdout. No port lookup happens,
/// so `devServer.port` is the base port from the environment.
pub fn execute(args: PrintArgs) -> Result<()> {
    let setup = utils::prepare(&args.source)?;
    println!("{}", serde_json::to_string_pretty(&setup.config)?);
    Ok(())
}
