use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::TemplateDependencies;

// ============================================================
// Parameter Types
// ============================================================

/// Parameters for tools that only need the project.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Absolute path to the project root (the directory holding package.json)
    pub project_root_path: String,
    /// Build environment whose configuration should be loaded (default: development)
    pub environment: Option<String>,
}

/// Parameters for the dependency analysis tools.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParams {
    /// Absolute path to the project root (the directory holding package.json)
    pub project_root_path: String,
    /// Build environment whose configuration should be loaded (default: development)
    pub environment: Option<String>,
    /// Template to analyze, by short name (e.g. "my-app") or absolute module path
    pub template: String,
}

/// Parameters for entry_point_map.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryPointMapParams {
    /// Absolute path to the project root (the directory holding package.json)
    pub project_root_path: String,
    /// Build environment whose configuration should be loaded (default: development)
    pub environment: Option<String>,
    /// Entry-point template the resolution map is filtered to
    pub template: String,
    /// Maximum number of entries to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Number of entries to skip (default 0)
    pub offset: Option<u32>,
}

// ============================================================
// Project Types (get_project)
// ============================================================

/// Result of get_project operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResult {
    /// Root segment of every absolute module path in the project
    pub root_name: String,
    pub environment: String,
    /// `modulePrefix` from the environment configuration, if set
    pub module_prefix: Option<String>,
    /// Number of entries in the full resolution map
    pub module_count: usize,
    /// Resolution map entries per specifier kind
    pub specifier_counts: BTreeMap<String, usize>,
}

// ============================================================
// Dependency Types (template_dependencies, recursive_dependencies)
// ============================================================

/// Result of the dependency analysis operations
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DependenciesResult {
    /// Absolute module path of the analyzed template
    pub path: String,
    /// True when the template invokes `{{component ...}}` with a runtime name,
    /// meaning the component list may be incomplete
    pub has_component_helper: bool,
    pub components: Vec<String>,
    pub helpers: Vec<String>,
}

impl From<TemplateDependencies> for DependenciesResult {
    fn from(deps: TemplateDependencies) -> Self {
        Self {
            path: deps.path,
            has_component_helper: deps.has_component_helper,
            components: deps.components.into_iter().collect(),
            helpers: deps.helpers.into_iter().collect(),
        }
    }
}

// ============================================================
// Entry Point Map Types (entry_point_map)
// ============================================================

/// Result of entry_point_map operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryPointMapResult {
    pub total_count: usize,
    pub entries: Vec<MapEntry>,
    pub pagination: Pagination,
}

/// A single resolution map entry
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    /// Module specifier, e.g. `template:/my-app/components/page-banner`
    pub specifier: String,
    /// Project-relative file path the specifier resolves to
    pub file_path: String,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
