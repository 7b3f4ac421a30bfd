//! The analysis pipeline: per-template dependency extraction, transitive
//! closure, and entry-point filtering of the resolution map.

pub mod closure;
pub mod extract;
pub mod filter;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::BTreeSet;

use serde::Serialize;

pub use closure::recursive_dependencies_for_template;
pub use extract::dependencies_for_template;
pub use filter::{filter_resolution_map, resolution_map_for_entry_point};

/// The dependencies discovered for one template, direct or transitive
/// depending on which operation produced it. Sets are ordered so output is
/// stable run to run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDependencies {
    /// Absolute module path of the analyzed template.
    pub path: String,
    /// True when a dynamic `{{component ...}}` invocation was seen; the
    /// component set is then a lower bound rather than the whole story.
    pub has_component_helper: bool,
    /// Absolute module paths of referenced component templates.
    pub components: BTreeSet<String>,
    /// Absolute module paths of referenced helpers.
    pub helpers: BTreeSet<String>,
}
