//! Module-layout configuration: which module kinds exist and which source
//! collections they live in. Projects may override this through
//! `moduleConfiguration` in their environment config; most rely on the
//! default Glimmer-style layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Module kinds by name, e.g. `component`, `template`, `helper`.
    pub types: BTreeMap<String, TypeConfig>,
    /// Source collections by directory name, e.g. `components`, `utils`.
    pub collections: BTreeMap<String, CollectionConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConfig {
    /// The collection a bare name of this kind falls back to when no local
    /// match exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitive_collection: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    /// Grouping directory between `src/` and the collection, e.g. `ui`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Module kinds that may live in this collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// The kind assumed for code files whose stem is not itself a type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
    /// Unresolvable collections are never scanned into the resolution map.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unresolvable: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ModuleConfig {
    /// The collection a kind's bare names fall back to.
    pub fn definitive_collection(&self, kind: &str) -> Option<&str> {
        self.types.get(kind)?.definitive_collection.as_deref()
    }
}

/// The layout assumed when a project configures none: components, templates
/// and helpers under `src/ui/components`, application and renderer modules
/// under `src/main`, with styles and utils opaque to resolution.
pub fn default_module_config() -> ModuleConfig {
    let definitive = |collection: &str| TypeConfig {
        definitive_collection: Some(collection.to_string()),
    };
    let types = BTreeMap::from([
        ("application".to_string(), definitive("main")),
        ("component".to_string(), definitive("components")),
        ("helper".to_string(), definitive("components")),
        ("renderer".to_string(), definitive("main")),
        ("template".to_string(), definitive("components")),
        ("util".to_string(), definitive("utils")),
    ]);
    let collections = BTreeMap::from([
        (
            "main".to_string(),
            CollectionConfig {
                types: vec!["application".to_string(), "renderer".to_string()],
                ..CollectionConfig::default()
            },
        ),
        (
            "components".to_string(),
            CollectionConfig {
                group: Some("ui".to_string()),
                types: vec![
                    "component".to_string(),
                    "template".to_string(),
                    "helper".to_string(),
                ],
                default_type: Some("component".to_string()),
                ..CollectionConfig::default()
            },
        ),
        (
            "styles".to_string(),
            CollectionConfig {
                group: Some("ui".to_string()),
                unresolvable: true,
                ..CollectionConfig::default()
            },
        ),
        (
            "utils".to_string(),
            CollectionConfig {
                unresolvable: true,
                ..CollectionConfig::default()
            },
        ),
    ]);
    ModuleConfig { types, collections }
}
