//! Free-port lookup.

use std::io::ErrorKind;

use async_trait::async_trait;
use tokio::net::TcpListener;

use crate::error::DevServerError;

/// How many ports past the base port are tried before giving up.
pub const DEFAULT_SCAN_WINDOW: u16 = 100;

/// Resolves a free port for the dev server.
#[async_trait]
pub trait PortFinder: Send + Sync {
    /// Return a port at or above `base_port` that can be bound right now.
    async fn find_port(&self, base_port: u16) -> Result<u16, DevServerError>;
}

/// Finds a port by binding and immediately releasing a TCP listener.
///
/// Ports that are in use or not permitted are skipped. The scan stops
/// below 65535 so the analyzer always has `port + 1`.
#[derive(Debug, Clone)]
pub struct TcpPortFinder {
    host: String,
    window: u16,
}

impl TcpPortFinder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            window: DEFAULT_SCAN_WINDOW,
        }
    }

    pub fn with_window(mut self, window: u16) -> Self {
        self.window = window;
        self
    }
}

#[async_trait]
impl PortFinder for TcpPortFinder {
    async fn find_port(&self, base_port: u16) -> Result<u16, DevServerError> {
        if base_port != 0 && base_port < 1024 {
            tracing::warn!(
                port = base_port,
                "port is in the privileged range and may require root access"
            );
        }

        let end = base_port.saturating_add(self.window).min(u16::MAX - 1);
        for port in base_port..=end {
            match TcpListener::bind((self.host.as_str(), port)).await {
                Ok(listener) => {
                    let bound = listener
                        .local_addr()
                        .map_err(|source| DevServerError::Bind {
                            host: self.host.clone(),
                            port,
                            source,
                        })?
                        .port();
                    if bound != base_port {
                        tracing::info!(
                            requested = base_port,
                            port = bound,
                            "port is busy, using next free port"
                        );
                    }
                    return Ok(bound);
                }
                Err(err)
                    if matches!(err.kind(), ErrorKind::AddrInUse | ErrorKind::PermissionDenied) =>
                {
                    tracing::debug!(port, error = %err, "port unavailable");
                }
                Err(source) => {
                    return Err(DevServerError::Bind {
                        host: self.host.clone(),
                        port,
                        source,
                    })
                }
            }
        }

        Err(DevServerError::PortUnavailable {
            start: base_port,
            end,
        })
    }
}
