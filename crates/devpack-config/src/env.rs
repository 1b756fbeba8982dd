//! Process environment settings for the dev server.
//!
//! Read once at startup from `HOST`, `PORT`, `PROXY_HOST` (or its alias
//! `PROXY`) and `PROXY_PATH`. Empty values count as unset.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROXY_PATH: &str = "/*api/**";

/// Environment-derived dev-server settings.
///
/// Proxying is disabled whenever `proxy_host` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevEnv {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub proxy_host: Option<String>,

    #[serde(default = "default_proxy_path")]
    pub proxy_path: String,
}

impl Default for DevEnv {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            proxy_host: None,
            proxy_path: default_proxy_path(),
        }
    }
}

impl DevEnv {
    /// Load settings from the current process environment.
    pub fn load() -> Result<Self> {
        Ok(Self::from_figment(&Self::figment())?)
    }

    /// The provider chain used by [`DevEnv::load`].
    ///
    /// Variables that are unset or blank are left out, so they fall through
    /// to the defaults. `PROXY` is merged before `PROXY_HOST` so the latter
    /// wins when both carry a value.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(DevEnv::default()))
            .merge(Env::raw().only(&present(&["HOST", "PORT", "PROXY_PATH"])))
            .merge(
                Env::raw()
                    .only(&present(&["PROXY"]))
                    .map(|_| "proxy_host".into()),
            )
            .merge(Env::raw().only(&present(&["PROXY_HOST"])))
    }

    pub fn from_figment(figment: &Figment) -> std::result::Result<Self, figment::Error> {
        let env: DevEnv = figment.extract()?;
        Ok(env.normalized())
    }

    /// Proxy rule as `(path pattern, target host)`, if proxying is enabled.
    pub fn proxy(&self) -> Option<(&str, &str)> {
        self.proxy_host
            .as_deref()
            .map(|host| (self.proxy_path.as_str(), host))
    }

    pub fn url(&self, port: u16) -> String {
        format!("http://{}:{}", self.host, port)
    }

    fn normalized(mut self) -> Self {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.proxy_path.trim().is_empty() {
            self.proxy_path = default_proxy_path();
        }
        self.proxy_host = self.proxy_host.filter(|host| !host.trim().is_empty());
        self
    }
}

/// The subset of `keys` set to a non-blank value.
fn present<'a>(keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|key| std::env::var(key).is_ok_and(|value| !value.trim().is_empty()))
        .collect()
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_proxy_path() -> String {
    DEFAULT_PROXY_PATH.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_is_disabled_without_host() {
        let env = DevEnv::default();
        assert!(env.proxy().is_none());
    }

    #[test]
    fn proxy_pairs_path_with_host() {
        let env = DevEnv {
            proxy_host: Some("http://api.internal:3000".into()),
            ..DevEnv::default()
        };
        assert_eq!(
            env.proxy(),
            Some(("/*api/**", "http://api.internal:3000"))
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let env = DevEnv {
            host: " ".into(),
            port: 9000,
            proxy_host: Some(String::new()),
            proxy_path: String::new(),
        }
        .normalized();

        assert_eq!(env.host, DEFAULT_HOST);
        assert_eq!(env.port, 9000);
        assert!(env.proxy_host.is_none());
        assert_eq!(env.proxy_path, DEFAULT_PROXY_PATH);
    }

    #[test]
    fn url_uses_host_and_port() {
        assert_eq!(DevEnv::default().url(8081), "http://localhost:8081");
    }
}
