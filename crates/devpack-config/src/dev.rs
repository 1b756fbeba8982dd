//! Development server option types.
//!
//! Base configs may use any shape the bundler accepts for these fields
//! (`historyApiFallback: true`, `overlay: false`, proxy rules as objects,
//! a port as a string). The development override always uses the object
//! forms.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::merge_maps;
use crate::env::{DevEnv, DEFAULT_HOST, DEFAULT_PORT};

/// Document served for routes that match no asset.
pub const FALLBACK_INDEX: &str = "/assets/index.html";

/// The `devServer` block of a bundler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    #[serde(default)]
    pub hot: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_api_fallback: Option<HistoryApiFallback>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    #[serde(default)]
    pub overlay: Overlay,

    /// Suppresses the server's own console output. The friendly-errors
    /// plugin owns the console in development.
    #[serde(default)]
    pub quiet: bool,

    /// Path pattern to upstream. Values are a host string or a full rule
    /// object (`target`, `changeOrigin`, ...).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub proxy: IndexMap<String, Value>,

    /// Keys the typed fields do not cover (contentBase, headers, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            hot: false,
            history_api_fallback: None,
            host: default_host(),
            port: default_port(),
            overlay: Overlay::default(),
            quiet: false,
            proxy: IndexMap::new(),
            extra: Map::new(),
        }
    }
}

impl DevServerOptions {
    /// Build the development option block from environment settings.
    pub fn from_env(env: &DevEnv) -> Self {
        let mut proxy = IndexMap::new();
        if let Some((path, host)) = env.proxy() {
            proxy.insert(path.to_string(), Value::String(host.to_string()));
        }

        Self {
            hot: true,
            history_api_fallback: Some(HistoryApiFallback::index(FALLBACK_INDEX)),
            host: env.host.clone(),
            port: env.port,
            overlay: Overlay::errors_only(),
            quiet: true,
            proxy,
            extra: Map::new(),
        }
    }

    /// Layer `other` on top of `self`.
    ///
    /// Typed fields are taken from `other`; proxy rules and untyped keys
    /// are merged so base-only entries survive.
    pub fn merge(&mut self, other: DevServerOptions) {
        let DevServerOptions {
            hot,
            history_api_fallback,
            host,
            port,
            overlay,
            quiet,
            proxy,
            extra,
        } = other;

        self.hot = hot;
        if history_api_fallback.is_some() {
            self.history_api_fallback = history_api_fallback;
        }
        self.host = host;
        self.port = port;
        self.overlay = overlay;
        self.quiet = quiet;
        self.proxy.extend(proxy);
        merge_maps(&mut self.extra, extra);
    }
}

/// `historyApiFallback`: a plain switch or an options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryApiFallback {
    Enabled(bool),
    Options(HistoryApiFallbackOptions),
}

impl HistoryApiFallback {
    /// Fallback that serves `index` for unmatched routes.
    pub fn index(index: impl Into<String>) -> Self {
        HistoryApiFallback::Options(HistoryApiFallbackOptions {
            index: Some(index.into()),
            extra: Map::new(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryApiFallbackOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// rewrites, disableDotRule, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Browser overlay for compiler diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Overlay {
    Enabled(bool),
    Levels(OverlayLevels),
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::Enabled(false)
    }
}

impl Overlay {
    pub fn errors_only() -> Self {
        Overlay::Levels(OverlayLevels {
            warnings: false,
            errors: true,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLevels {
    #[serde(default)]
    pub warnings: bool,

    #[serde(default)]
    pub errors: bool,
}

/// Accepts a port as a number or as a numeric string.
fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid port '{}'", text))),
    }
}

fn default_host() -> String {
    DEFAULT_HOST.into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
