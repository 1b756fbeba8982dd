//! Shared utilities for command implementations.

use crate::cli::SourceArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use devpack_config::{
    build_config, BuildOptions, BundlerConfig, ConfigDiscovery, ConfigError, DevEnv,
};
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The working directory for a command: `--cwd` if given, else the process
/// working directory.
pub fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let cwd = match cwd {
        Some(dir) => resolve_path(dir, &current),
        None => current,
    };

    if !cwd.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Working directory is not a directory: {}",
            cwd.display()
        )));
    }

    Ok(cwd)
}

/// Load the base config.
///
/// An explicit `--config` must exist. Without one, discovery runs in `cwd`
/// and an empty base is used when nothing is found.
pub fn load_base(source: &SourceArgs, cwd: &Path) -> Result<BundlerConfig> {
    if let Some(path) = &source.config {
        let path = resolve_path(path, cwd);
        if !path.is_file() {
            return Err(CliError::FileNotFound(path));
        }
        return ConfigDiscovery::load_from(&path)
            .context(format!("Failed to load {}", path.display()));
    }

    match ConfigDiscovery::new(cwd).load() {
        Ok(base) => Ok(base),
        Err(ConfigError::NotFound(root)) => {
            ui::warning(&format!(
                "No base config found in {}, using development defaults only",
                root.display()
            ));
            Ok(BundlerConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Everything a command needs after the merge.
#[derive(Debug)]
pub struct DevSetup {
    pub cwd: PathBuf,
    pub env: DevEnv,
    pub config: BundlerConfig,
}

/// Load the base config and the environment, then apply the development
/// overrides.
pub fn prepare(source: &SourceArgs) -> Result<DevSetup> {
    let cwd = resolve_cwd(source.cwd.as_deref())?;
    let base = load_base(source, &cwd)?;
    let env = DevEnv::load().with_hint("Check HOST, PORT, PROXY_HOST and PROXY_PATH")?;

    let options = BuildOptions::default()
        .with_title(source.title.as_str())
        .with_template_dir(&cwd);
    let config = build_config(&base, &env, &options);

    Ok(DevSetup { cwd, env, config })
}
