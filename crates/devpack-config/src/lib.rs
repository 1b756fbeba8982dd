//! Development-mode bundler configuration.
//!
//! Takes a base bundler configuration and layers the development options on
//! top of it: hot module replacement, history-API fallback routing, an
//! optional API proxy rule and the dev plugin chain.
//!
//! ```
//! use devpack_config::{build_config, BuildOptions, BundlerConfig, DevEnv};
//!
//! let base = BundlerConfig::default();
//! let config = build_config(&base, &DevEnv::default(), &BuildOptions::default());
//!
//! assert_eq!(config.output.public_path.as_deref(), Some("/assets/"));
//! assert_eq!(config.plugins.len(), 5);
//! ```

pub mod config;
pub mod dev;
pub mod discovery;
pub mod env;
pub mod error;
pub mod plugin;

// Re-export main types
pub use config::*;
pub use dev::*;
pub use env::*;
pub use error::*;
pub use plugin::*;

pub use discovery::ConfigDiscovery;
