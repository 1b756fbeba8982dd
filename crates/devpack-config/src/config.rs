//! Bundler configuration and the development merge.
//!
//! [`build_config`] layers the development overrides on top of a base
//! configuration. Merge rules follow the bundler's own config-merge
//! convention: objects merge key by key, arrays concatenate (base first),
//! anything else is replaced by the override.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dev::DevServerOptions;
use crate::env::DevEnv;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::plugin::{FriendlyErrorsOptions, HtmlTemplateOptions, Plugin};

pub const DEFAULT_TITLE: &str = "BGOV Dev App";
pub const PUBLIC_PATH: &str = "/assets/";
/// Source-map mode tuned for fast incremental rebuilds.
pub const DEV_TOOL: &str = "cheap-eval-source-map";
pub const TEMPLATE_LOADER: &str = "!!ejs-loader!";
pub const TEMPLATE_FILE: &str = "index.ejs";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,

    #[serde(default)]
    pub plugins: Vec<Plugin>,

    /// Everything else the base supplies (entry, module rules, resolve, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source-map setting: a mode name, or `false` to turn source maps off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Devtool {
    Mode(String),
    Enabled(bool),
}

impl Devtool {
    pub fn as_mode(&self) -> Option<&str> {
        match self {
            Devtool::Mode(mode) => Some(mode.as_str()),
            Devtool::Enabled(_) => None,
        }
    }
}

impl From<&str> for Devtool {
    fn from(mode: &str) -> Self {
        Devtool::Mode(mode.to_string())
    }
}

impl BundlerConfig {
    /// Create from a `serde_json::Value` (base configs supplied programmatically).
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Merge `other` into a copy of `self`. `self` is left untouched.
    pub fn merged(&self, other: BundlerConfig) -> BundlerConfig {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    pub fn merge(&mut self, other: BundlerConfig) {
        let BundlerConfig {
            output,
            devtool,
            dev_server,
            plugins,
            extra,
        } = other;

        self.output.merge(output);
        if devtool.is_some() {
            self.devtool = devtool;
        }
        match (&mut self.dev_server, dev_server) {
            (Some(base), Some(update)) => base.merge(update),
            (slot, update @ Some(_)) => *slot = update,
            (_, None) => {}
        }
        self.plugins.extend(plugins);
        merge_maps(&mut self.extra, extra);
    }

    /// The `devServer` block, created with defaults if the base had none.
    pub fn dev_server_mut(&mut self) -> &mut DevServerOptions {
        self.dev_server.get_or_insert_with(DevServerOptions::default)
    }
}

impl OutputOptions {
    pub fn merge(&mut self, other: OutputOptions) {
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.public_path.is_some() {
            self.public_path = other.public_path;
        }
        if other.filename.is_some() {
            self.filename = other.filename;
        }
        merge_maps(&mut self.extra, other.extra);
    }
}

/// Inputs to the development merge that do not come from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Document title injected by the HTML template plugin.
    pub title: String,

    /// Directory holding `index.ejs`.
    pub template_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            template_dir: PathBuf::from("."),
        }
    }
}

impl BuildOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.template_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Template path with the ejs loader chain in front.
    pub fn template_path(&self) -> String {
        format!(
            "{}{}",
            TEMPLATE_LOADER,
            self.template_dir.join(TEMPLATE_FILE).display()
        )
    }
}

/// The development override object merged over the base.
pub fn dev_overrides(env: &DevEnv, options: &BuildOptions) -> BundlerConfig {
    BundlerConfig {
        output: OutputOptions {
            public_path: Some(PUBLIC_PATH.to_string()),
            ..OutputOptions::default()
        },
        devtool: Some(Devtool::from(DEV_TOOL)),
        dev_server: Some(DevServerOptions::from_env(env)),
        plugins: vec![
            Plugin::HotModuleReplacement,
            Plugin::NamedModules,
            Plugin::NoEmitOnErrors,
            Plugin::HtmlTemplate(HtmlTemplateOptions {
                title: options.title.clone(),
                template: options.template_path(),
            }),
            Plugin::FriendlyErrors(FriendlyErrorsOptions::default()),
        ],
        extra: Map::new(),
    }
}

/// Produce the development configuration for `base`.
pub fn build_config(base: &BundlerConfig, env: &DevEnv, options: &BuildOptions) -> BundlerConfig {
    let config = base.merged(dev_overrides(env, options));
    tracing::debug!(
        plugins = config.plugins.len(),
        title = %options.title,
        "built development config"
    );
    config
}

pub(crate) fn merge_maps(target: &mut Map<String, Value>, update: Map<String, Value>) {
    for (key, value) in update {
        match target.get_mut(&key) {
            Some(slot) => merge_values(slot, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

pub fn merge_values(target: &mut Value, update: Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            merge_maps(target_map, update_map);
        }
        (Value::Array(target_items), Value::Array(update_items)) => {
            target_items.extend(update_items);
        }
        (target_slot, update) => {
            *target_slot = update;
        }
    }
}
