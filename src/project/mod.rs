//! Project discovery: package metadata, environment configuration and the
//! resolution map scanned from `src/`.

pub mod map;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{self, EnvironmentConfig};
use crate::error::{AnalyzeError, ProjectError};
use crate::resolver::{Resolver, default_module_config};
use crate::specifier;

pub use map::ResolutionMap;

pub const PACKAGE_FILE: &str = "package.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Build environment; `development` when unset.
    pub environment: Option<String>,
    /// Config directory relative to the project root; `config` when unset.
    pub config_dir: Option<PathBuf>,
}

/// A template's resolved identity and source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub specifier: String,
    pub source: String,
}

/// A loaded project: everything analysis needs to resolve and read
/// templates, all gathered up front so analysis itself never touches
/// configuration again.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    environment: String,
    pub pkg: PackageJson,
    pub config: EnvironmentConfig,
    root_name: String,
    map: ResolutionMap,
    resolver: Resolver,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        Self::with_options(root, ProjectOptions::default())
    }

    pub fn with_options(
        root: impl Into<PathBuf>,
        options: ProjectOptions,
    ) -> Result<Self, ProjectError> {
        let root = root.into();
        let pkg = read_package(&root)?;
        let environment = options
            .environment
            .unwrap_or_else(|| config::DEFAULT_ENVIRONMENT.to_string());
        let config_dir = root.join(
            options
                .config_dir
                .unwrap_or_else(|| PathBuf::from(config::CONFIG_DIR)),
        );
        let config = config::load_environment_config(&config_dir, &environment)?;
        let root_name = config
            .module_prefix
            .clone()
            .or_else(|| pkg.name.clone())
            .ok_or(ProjectError::MissingRootName)?;
        let module_config = config
            .module_configuration
            .clone()
            .unwrap_or_else(default_module_config);
        let ignores = config.compiled_ignores()?;
        let map = map::build_resolution_map(&root, &root_name, &module_config, &ignores)?;
        let resolver = Resolver::new(root_name.clone(), module_config, map.keys().cloned());
        Ok(Self {
            root,
            environment,
            pkg,
            config,
            root_name,
            map,
            resolver,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The root of every absolute module path: the configured `modulePrefix`
    /// or, failing that, the package name.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn resolution_map(&self) -> &ResolutionMap {
        &self.map
    }

    /// Resolves a `kind:name` request against the project's modules.
    pub fn identify(&self, request: &str, referrer: Option<&str>) -> Option<String> {
        self.resolver.identify(request, referrer)
    }

    /// The specifier registered for a project-relative file path.
    pub fn specifier_for_path(&self, path: &str) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, file)| file.as_str() == path)
            .map(|(key, _)| key.as_str())
    }

    /// The project-relative file path behind a specifier.
    pub fn path_for_specifier(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Loads the template behind a logical name or absolute module path.
    pub fn template_for(&self, name: &str) -> Result<Template, AnalyzeError> {
        let request = specifier::make("template", name);
        let not_found = || AnalyzeError::TemplateNotFound {
            name: name.to_string(),
        };
        let resolved = self.identify(&request, None).ok_or_else(not_found)?;
        let relative = self.map.get(&resolved).ok_or_else(not_found)?;
        let source = fs::read_to_string(self.root.join(relative)).map_err(|_| not_found())?;
        Ok(Template {
            specifier: resolved,
            source,
        })
    }
}

fn read_package(root: &Path) -> Result<PackageJson, ProjectError> {
    let path = root.join(PACKAGE_FILE);
    if !path.is_file() {
        return Err(ProjectError::MissingPackage(root.to_path_buf()));
    }
    let contents = fs::read_to_string(&path).map_err(|source| ProjectError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ProjectError::Json { path, source })
}
