//! Dev command implementation.
//!
//! Finalizes the development config and, when a command follows `--`, runs
//! it with `PORT` pointing at the resolved port.
//!
//! The config leaves this process as JSON, and the `onErrors` hook is not
//! part of it. Desktop notifications on failed compilations therefore only
//! fire when a bundler is driven in-process through the library API
//! ([`crate::dev::Bootstrapper`] plus `FriendlyErrorsOptions::report`), not
//! from `devpack dev`.

use crate::cli::DevArgs;
use crate::commands::utils;
use crate::dev::Bootstrapper;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use std::path::Path;

/// Execute the dev command.
///
/// # Process Flow
///
/// 1. Load the base config and merge the development overrides
/// 2. Resolve a free port and append the reporter and analyzer plugins
/// 3. Publish `PORT` and print the success messages
/// 4. Write the finalized config to `--out` or stdout
/// 5. Run the trailing command, if any
///
/// # Errors
///
/// Returns errors for:
/// - Missing or invalid base config
/// - Invalid environment values
/// - No free port
/// - A trailing command that fails to start or exits unsuccessfully
pub async fn execute(args: DevArgs) -> Result<()> {
    let setup = utils::prepare(&args.source)?;

    let server = Bootstrapper::new(setup.env)
        .create_dev_server(setup.config)
        .await?;

    publish_port(server.port);
    for message in &server.messages {
        ui::success(message);
    }

    let json = serde_json::to_string_pretty(&server.config)?;
    match &args.out {
        Some(out) => {
            let path = utils::resolve_path(out, &setup.cwd);
            std::fs::write(&path, json).with_path(&path)?;
            ui::info(&format!("Config written to {}", path.display()));
        }
        None => println!("{}", json),
    }

    match args.command.split_first() {
        Some((program, rest)) => run_command(program, rest, server.port, &setup.cwd).await,
        None => Ok(()),
    }
}

/// Expose the resolved port to the rest of the process and its children.
pub fn publish_port(port: u16) {
    std::env::set_var("PORT", port.to_string());
    tracing::debug!(port, "published PORT");
}

async fn run_command(program: &str, args: &[String], port: u16, cwd: &Path) -> Result<()> {
    tracing::debug!(program, ?args, "running command");

    let status = tokio::process::Command::new(program)
        .args(args)
        .current_dir(cwd)
        .env("PORT", port.to_string())
        .status()
        .await
        .with_hint(format!("Is '{}' installed and on PATH?", program))?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::CommandFailed {
            command: program.to_string(),
            code: status.code(),
        })
    }
}
