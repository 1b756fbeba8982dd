//! Bundler plugin instances.
//!
//! Plugins serialize as objects tagged with a `plugin` key naming the
//! bundler-side implementation, e.g. `{"plugin": "HtmlWebpackPlugin",
//! "title": "..."}`. Tags that are not modelled here round-trip through
//! [`Plugin::Custom`] so base configurations can carry arbitrary plugins.

use std::fmt;
use std::sync::Arc;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TAG: &str = "plugin";

#[derive(Debug, Clone)]
pub enum Plugin {
    /// Hot module replacement runtime.
    HotModuleReplacement,
    /// Readable module names in HMR logs.
    NamedModules,
    /// Skip emitting assets when compilation fails.
    NoEmitOnErrors,
    HtmlTemplate(HtmlTemplateOptions),
    FriendlyErrors(FriendlyErrorsOptions),
    BundleAnalyzer(BundleAnalyzerOptions),
    /// Any plugin this crate does not model.
    Custom {
        name: String,
        options: Map<String, Value>,
    },
}

impl Plugin {
    /// Bundler-side plugin name, used as the serialized tag.
    pub fn name(&self) -> &str {
        match self {
            Plugin::HotModuleReplacement => "HotModuleReplacementPlugin",
            Plugin::NamedModules => "NamedModulesPlugin",
            Plugin::NoEmitOnErrors => "NoEmitOnErrorsPlugin",
            Plugin::HtmlTemplate(_) => "HtmlWebpackPlugin",
            Plugin::FriendlyErrors(_) => "FriendlyErrorsPlugin",
            Plugin::BundleAnalyzer(_) => "BundleAnalyzerPlugin",
            Plugin::Custom { name, .. } => name,
        }
    }
}

impl Serialize for Plugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = match self {
            Plugin::HtmlTemplate(opts) => to_object(opts),
            Plugin::FriendlyErrors(opts) => to_object(opts),
            Plugin::BundleAnalyzer(opts) => to_object(opts),
            Plugin::Custom { options, .. } => Ok(options.clone()),
            Plugin::HotModuleReplacement | Plugin::NamedModules | Plugin::NoEmitOnErrors => {
                Ok(Map::new())
            }
        }
        .map_err(ser::Error::custom)?;

        map.insert(TAG.to_string(), Value::String(self.name().to_string()));
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Plugin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut options = Map::deserialize(deserializer)?;
        let name = match options.remove(TAG) {
            Some(Value::String(name)) => name,
            Some(_) => return Err(de::Error::custom("plugin tag must be a string")),
            None => return Err(de::Error::missing_field(TAG)),
        };

        let plugin = match name.as_str() {
            "HotModuleReplacementPlugin" => Plugin::HotModuleReplacement,
            "NamedModulesPlugin" => Plugin::NamedModules,
            "NoEmitOnErrorsPlugin" => Plugin::NoEmitOnErrors,
            "HtmlWebpackPlugin" => Plugin::HtmlTemplate(from_object::<_, D::Error>(options)?),
            "FriendlyErrorsPlugin" => Plugin::FriendlyErrors(from_object::<_, D::Error>(options)?),
            "BundleAnalyzerPlugin" => Plugin::BundleAnalyzer(from_object::<_, D::Error>(options)?),
            _ => Plugin::Custom { name, options },
        };

        Ok(plugin)
    }
}

fn from_object<T: DeserializeOwned, E: de::Error>(options: Map<String, Value>) -> Result<T, E> {
    serde_json::from_value(Value::Object(options)).map_err(E::custom)
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Ok(Map::from_iter([("options".to_string(), other)])),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTemplateOptions {
    pub title: String,

    /// Template path, including any loader-chain prefix.
    pub template: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendlyErrorsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compilation_success_info: Option<CompilationSuccessInfo>,

    #[serde(skip)]
    pub on_errors: Option<ErrorHook>,
}

impl FriendlyErrorsOptions {
    /// Forward a compilation result to the `onErrors` hook, if any.
    pub fn report(&self, severity: Severity, errors: &[CompileError]) {
        if let Some(hook) = &self.on_errors {
            hook.call(severity, errors);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationSuccessInfo {
    #[serde(default)]
    pub messages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAnalyzerOptions {
    pub analyzer_port: u16,

    #[serde(default)]
    pub open_analyzer: bool,

    #[serde(default)]
    pub log_level: AnalyzerLogLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerLogLevel {
    #[default]
    Info,
    Warn,
    Error,
    Silent,
}

/// Severity of a compilation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One entry of a failed compilation as reported by the bundler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileError {
    #[serde(default)]
    pub name: Option<String>,

    /// Module identifier, possibly prefixed by a loader chain
    /// (`babel-loader!eslint-loader!src/App.js`).
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl CompileError {
    /// File name of the failing module: the part after the last `!` of the
    /// loader chain, reduced to its final path component.
    ///
    /// Returns `None` when the descriptor has no file or the file part is
    /// empty.
    pub fn file_name(&self) -> Option<&str> {
        self.file
            .as_deref()
            .and_then(|file| file.rsplit('!').next())
            .and_then(|path| path.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty())
    }
}

/// Callback invoked with compilation errors.
pub type ErrorCallback = dyn Fn(Severity, &[CompileError]) + Send + Sync;

#[derive(Clone)]
pub struct ErrorHook(Arc<ErrorCallback>);

impl ErrorHook {
    pub fn new(callback: impl Fn(Severity, &[CompileError]) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self, severity: Severity, errors: &[CompileError]) {
        (self.0)(severity, errors)
    }
}

impl fmt::Debug for ErrorHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHook(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn file_name_strips_loader_chain() {
        let err = CompileError {
            file: Some("babel-loader!eslint-loader!src/components/File.js".into()),
            ..Default::default()
        };
        assert_eq!(err.file_name(), Some("File.js"));
    }

    #[test]
    fn file_name_without_loaders() {
        let err = CompileError {
            file: Some("index.js".into()),
            ..Default::default()
        };
        assert_eq!(err.file_name(), Some("index.js"));
    }

    #[test]
    fn file_name_missing_or_empty() {
        assert_eq!(CompileError::default().file_name(), None);

        let trailing = CompileError {
            file: Some("loader!".into()),
            ..Default::default()
        };
        assert_eq!(trailing.file_name(), None);

        let directory = CompileError {
            file: Some("loader!src/".into()),
            ..Default::default()
        };
        assert_eq!(directory.file_name(), None);
    }

    #[test]
    fn unit_plugins_serialize_as_tag_only() {
        let value = serde_json::to_value(Plugin::HotModuleReplacement).unwrap();
        assert_eq!(value, json!({ "plugin": "HotModuleReplacementPlugin" }));
    }

    #[test]
    fn analyzer_serializes_options_alongside_tag() {
        let plugin = Plugin::BundleAnalyzer(BundleAnalyzerOptions {
            analyzer_port: 8082,
            open_analyzer: false,
            log_level: AnalyzerLogLevel::Silent,
        });
        let value = serde_json::to_value(plugin).unwrap();
        assert_eq!(
            value,
            json!({
                "plugin": "BundleAnalyzerPlugin",
                "analyzerPort": 8082,
                "openAnalyzer": false,
                "logLevel": "silent"
            })
        );
    }

    #[test]
    fn unknown_plugins_round_trip_as_custom() {
        let value = json!({ "plugin": "DefinePlugin", "process.env.NODE_ENV": "\"development\"" });
        let plugin: Plugin = serde_json::from_value(value.clone()).unwrap();

        assert!(matches!(&plugin, Plugin::Custom { name, .. } if name == "DefinePlugin"));
        assert_eq!(serde_json::to_value(&plugin).unwrap(), value);
    }

    #[test]
    fn missing_tag_is_rejected() {
        let result: Result<Plugin, _> = serde_json::from_value(json!({ "title": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn report_invokes_hook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let opts = FriendlyErrorsOptions {
            on_errors: Some(ErrorHook::new(move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        };

        opts.report(Severity::Error, &[]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        FriendlyErrorsOptions::default().report(Severity::Error, &[]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
