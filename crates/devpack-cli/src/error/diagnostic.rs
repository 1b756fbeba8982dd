//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, DevServerError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::DevServer(e) => dev_server_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

fn dev_server_error_to_miette(err: DevServerError) -> Report {
    match err {
        DevServerError::Bind { host, port, source } => miette::miette!(
            "Failed to bind {}:{}: {}\n\nHint: Check the HOST environment variable",
            host,
            port,
            source
        ),
        _ => miette::miette!("{}", err),
    }
}
