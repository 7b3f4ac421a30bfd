//! Transitive closure of template dependencies.
//!
//! A worklist over per-template extraction: every newly discovered component
//! is analyzed in turn until nothing new appears. Cycles are harmless
//! because membership is checked before queueing, and the entry point is
//! reported only through `path`, never as one of its own components.

use std::collections::BTreeSet;

use crate::error::AnalyzeError;
use crate::project::Project;
use crate::specifier;

use super::{TemplateDependencies, dependencies_for_template};

pub fn recursive_dependencies_for_template(
    name: &str,
    project: &Project,
) -> Result<TemplateDependencies, AnalyzeError> {
    let entry = project.template_for(name)?;
    let entry_path = specifier::path_of(&entry.specifier).to_string();

    let mut components = BTreeSet::from([entry_path.clone()]);
    let mut helpers = BTreeSet::new();
    let mut has_component_helper = false;
    let mut queue = vec![entry_path.clone()];

    while let Some(current) = queue.pop() {
        let deps = dependencies_for_template(&current, project)?;
        has_component_helper = has_component_helper || deps.has_component_helper;
        for component in deps.components {
            if components.insert(component.clone()) {
                queue.push(component);
            }
        }
        helpers.extend(deps.helpers);
    }

    components.remove(&entry_path);
    Ok(TemplateDependencies {
        path: entry_path,
        has_component_helper,
        components,
        helpers,
    })
}
