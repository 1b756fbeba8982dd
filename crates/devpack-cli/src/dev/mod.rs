//! Development server bootstrap.
//!
//! - [`port`] finds a free port starting at the configured base port
//! - [`notifier`] turns compilation errors into desktop notifications
//! - [`bootstrap`] writes the port into the config and appends the
//!   friendly-errors reporter and the bundle analyzer

pub mod bootstrap;
pub mod notifier;
pub mod port;

// Re-exports
pub use bootstrap::{create_dev_server, success_messages, Bootstrapper, DevServer};
pub use notifier::{notifier_callback, DesktopNotifier, Notification, Notifier};
pub use port::{PortFinder, TcpPortFinder};
