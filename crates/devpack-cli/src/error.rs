//! Error handling for the devpack CLI.
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`, `DevServerError`) carry detail
//! - **Error conversion** is automatic via `#[from]` attributes
//! - **Context helpers** attach paths and hints to errors
//!
//! # Example
//!
//! ```rust,no_run
//! use devpack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_config(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

mod diagnostic;

pub use devpack_config::ConfigError;
pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Base config discovery or environment errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dev server bootstrap errors
    #[error("Dev server error: {0}")]
    DevServer(#[from] DevServerError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The command launched after bootstrap exited unsuccessfully
    #[error("Command '{command}' exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    CommandFailed {
        /// Program that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Dev server bootstrap errors.
///
/// Any of these aborts startup. The configuration passed to the bootstrapper
/// is left as it was.
#[derive(Debug, Error)]
pub enum DevServerError {
    /// Every port in the scan window is taken
    #[error("No free port between {start} and {end}\n\nHint: Set PORT to a different base port")]
    PortUnavailable {
        /// First port tried
        start: u16,
        /// Last port tried
        end: u16,
    },

    /// The resolved port leaves no room for the analyzer on port + 1
    #[error("Port {0} leaves no port for the bundle analyzer\n\nHint: Use a base port below 65535")]
    NoAnalyzerPort(u16),

    /// Binding failed for a reason other than the port being taken
    #[error("Failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into `CliError::FileNotFound` for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_unavailable_message() {
        let err = DevServerError::PortUnavailable {
            start: 8080,
            end: 8180,
        };
        let msg = err.to_string();
        assert!(msg.contains("8080"));
        assert!(msg.contains("8180"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let err: CliError = ConfigError::NotFound(PathBuf::from("/srv/app")).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("/srv/app"));
    }

    #[test]
    fn test_cli_error_from_dev_server_error() {
        let err: CliError = DevServerError::NoAnalyzerPort(65535).into();
        assert!(matches!(err, CliError::DevServer(_)));
    }

    #[test]
    fn test_command_failed_message() {
        let err = CliError::CommandFailed {
            command: "webpack".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "Command 'webpack' exited with status 2");

        let killed = CliError::CommandFailed {
            command: "webpack".into(),
            code: None,
        };
        assert!(killed.to_string().ends_with("a signal"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/devpack.config.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from(".")));

        let err = result.with_hint("Create devpack.config.json").unwrap_err();
        assert!(err.to_string().contains("Hint: Create devpack.config.json"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), DevServerError> =
            Err(DevServerError::NoAnalyzerPort(65535));

        let err = result.context("Failed to start").unwrap_err();
        assert!(err.to_string().starts_with("Failed to start: "));
    }
}
