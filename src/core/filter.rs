//! Entry-point filtering of the resolution map.
//!
//! Keeps exactly the modules a bundle rooted at one template needs:
//! `component` and `template` entries whose path is the entry or one of its
//! transitive components, and `helper` entries among its transitive helpers.
//! Every other kind is dropped, known or not; anything a template cannot
//! reference has no business in a map keyed to one entry point.

use crate::error::AnalyzeError;
use crate::project::{Project, ResolutionMap};
use crate::specifier;

use super::recursive_dependencies_for_template;

/// The subset of a resolution map reachable from `name`. When `map` is
/// `None` the project's own full map is filtered.
pub fn resolution_map_for_entry_point(
    name: &str,
    project: &Project,
    map: Option<&ResolutionMap>,
) -> Result<ResolutionMap, AnalyzeError> {
    let deps = recursive_dependencies_for_template(name, project)?;
    let mut components = deps.components;
    components.insert(deps.path.clone());
    let helpers = deps.helpers;
    let full = map.unwrap_or_else(|| project.resolution_map());
    Ok(filter_resolution_map(full, |key| {
        let Some((kind, path)) = specifier::parse(key) else {
            return false;
        };
        match kind {
            "component" | "template" => components.contains(path),
            "helper" => helpers.contains(path),
            _ => false,
        }
    }))
}

/// A new map holding only the entries whose specifier passes `keep`.
pub fn filter_resolution_map(map: &ResolutionMap, keep: impl Fn(&str) -> bool) -> ResolutionMap {
    map.iter()
        .filter(|(key, _)| keep(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
