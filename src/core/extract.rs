//! Single-template dependency extraction.
//!
//! One parse, one walk: element tags and `import` comment names become
//! component candidates, mustache and subexpression heads become helper
//! candidates, and the dynamic `{{component ...}}` form sets a flag instead
//! of naming anything. Candidates that fail to resolve are dropped without
//! comment, since a plain `<div>` is indistinguishable from an unknown
//! component until resolution says so.

use std::collections::BTreeSet;

use crate::error::AnalyzeError;
use crate::project::Project;
use crate::specifier;
use crate::template::ast::{Element, Expression, Mustache, MustacheComment, SubExpression};
use crate::template::{self, Visitor, walk_nodes};

use super::TemplateDependencies;

/// Bare mustache head that invokes a component chosen at runtime.
const COMPONENT_HELPER: &str = "component";
/// Mustache comments starting with this word declare template dependencies
/// the markup itself cannot express.
const IMPORT_DIRECTIVE: &str = "import ";

pub fn dependencies_for_template(
    name: &str,
    project: &Project,
) -> Result<TemplateDependencies, AnalyzeError> {
    let template = project.template_for(name)?;
    let nodes = template::parse(&template.source).map_err(|source| AnalyzeError::Parse {
        specifier: template.specifier.clone(),
        source,
    })?;
    let mut visitor = DependencyVisitor {
        project,
        referrer: &template.specifier,
        components: BTreeSet::new(),
        helpers: BTreeSet::new(),
        has_component_helper: false,
    };
    walk_nodes(&nodes, &mut visitor);
    Ok(TemplateDependencies {
        path: specifier::path_of(&template.specifier).to_string(),
        has_component_helper: visitor.has_component_helper,
        components: visitor.components,
        helpers: visitor.helpers,
    })
}

struct DependencyVisitor<'a> {
    project: &'a Project,
    referrer: &'a str,
    components: BTreeSet<String>,
    helpers: BTreeSet<String>,
    has_component_helper: bool,
}

impl DependencyVisitor<'_> {
    fn record_component(&mut self, name: &str) {
        let request = specifier::make("template", name);
        if let Some(resolved) = self.project.identify(&request, Some(self.referrer)) {
            self.components
                .insert(specifier::path_of(&resolved).to_string());
        }
    }

    /// A mustache or subexpression head either marks the dynamic component
    /// helper or names a helper candidate. Only a bare `component` counts as
    /// the marker; `this.component` and friends are ordinary lookups that
    /// fall out at resolution like any other non-helper head.
    fn record_invocation(&mut self, head: &Expression) {
        let Some(path) = head.as_path() else { return };
        if path.is_bare_var(COMPONENT_HELPER) {
            self.has_component_helper = true;
            return;
        }
        let request = specifier::make("helper", &path.original());
        if let Some(resolved) = self.project.identify(&request, Some(self.referrer)) {
            self.helpers
                .insert(specifier::path_of(&resolved).to_string());
        }
    }
}

impl Visitor for DependencyVisitor<'_> {
    fn element(&mut self, node: &Element) {
        self.record_component(&node.tag);
    }

    fn mustache(&mut self, node: &Mustache) {
        self.record_invocation(&node.path);
    }

    fn sub_expression(&mut self, node: &SubExpression) {
        self.record_invocation(&node.path);
    }

    fn comment(&mut self, node: &MustacheComment) {
        let Some(rest) = node.value.trim().strip_prefix(IMPORT_DIRECTIVE) else {
            return;
        };
        for name in rest.split_whitespace() {
            self.record_component(name);
        }
    }
}
