//! devpack CLI - development server bootstrap for bundler configurations.
//!
//! Takes the development configuration produced by `devpack-config`, finds a
//! free port, wires the friendly-errors reporter and the bundle analyzer, and
//! hands the finalized configuration to whatever runs the bundler.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines on stderr
//! - [`dev`] - Port lookup, desktop notifications and the bootstrapper
//! - `commands` - CLI command implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use devpack_cli::dev::create_dev_server;
//! use devpack_config::{build_config, BuildOptions, BundlerConfig, DevEnv};
//!
//! # async fn run() -> devpack_cli::Result<()> {
//! let env = DevEnv::load()?;
//! let config = build_config(&BundlerConfig::default(), &env, &BuildOptions::default());
//! let server = create_dev_server(config, &env).await?;
//! println!("listening on {}", server.port);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, DevServerError, Result, ResultExt};
