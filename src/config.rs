//! Loading of per-environment project configuration.
//!
//! Configuration lives in `config/environment.json`, optionally specialized
//! as `config/environment.<env>.json`; the specialized file wins when both
//! exist. A missing file is not an error: every field has a default.

use std::fs;
use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::resolver::{ModuleConfig, default_module_config};

pub const CONFIG_DIR: &str = "config";
pub const ENVIRONMENT_FILE: &str = "environment.json";
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Overrides the package name as the root of absolute module paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_prefix: Option<String>,
    /// Overrides the default module layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_configuration: Option<ModuleConfig>,
    /// Glob patterns, relative to the project root, excluded from scanning.
    #[serde(default)]
    pub ignores: Vec<String>,
}

impl EnvironmentConfig {
    /// Compiles the ignore globs, failing on the first invalid pattern.
    pub fn compiled_ignores(&self) -> Result<Vec<Pattern>, ProjectError> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ProjectError::InvalidIgnore {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// Loads configuration for an environment from `config_dir`, preferring
/// `environment.<env>.json` over the shared `environment.json`.
pub fn load_environment_config(
    config_dir: &Path,
    environment: &str,
) -> Result<EnvironmentConfig, ProjectError> {
    let candidates = [
        config_dir.join(format!("environment.{environment}.json")),
        config_dir.join(ENVIRONMENT_FILE),
    ];
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path).map_err(|source| ProjectError::Io {
            path: path.clone(),
            source,
        })?;
        let config = serde_json::from_str(&contents)
            .map_err(|source| ProjectError::Json { path, source })?;
        return Ok(config);
    }
    Ok(EnvironmentConfig::default())
}

/// The starter configuration written by `sprig init`, spelling out the
/// default module layout so projects have something concrete to edit.
pub fn starter_config() -> EnvironmentConfig {
    EnvironmentConfig {
        module_prefix: None,
        module_configuration: Some(default_module_config()),
        ignores: Vec::new(),
    }
}
