//! Resolution of logical module names to absolute specifiers.
//!
//! A request like `template:page-banner` is tried in two places: first as a
//! child of the referrer's own namespace
//! (`template:<referrer-path>/page-banner`), then at the root of the kind's
//! definitive collection (`template:/<root>/components/page-banner`). Only
//! specifiers actually present in the project's resolution map resolve;
//! everything else comes back as `None`.

pub mod module_config;

use std::collections::BTreeSet;

use crate::specifier;

pub use module_config::{
    CollectionConfig, ModuleConfig, TypeConfig, default_module_config,
};

#[derive(Debug, Clone)]
pub struct Resolver {
    root_name: String,
    config: ModuleConfig,
    known: BTreeSet<String>,
}

impl Resolver {
    pub fn new(
        root_name: impl Into<String>,
        config: ModuleConfig,
        known: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            root_name: root_name.into(),
            config,
            known: known.into_iter().collect(),
        }
    }

    /// Resolves a `kind:name` request to an absolute specifier, or `None`
    /// when nothing in the project matches.
    ///
    /// Absolute requests only check membership. Relative ones try the
    /// referrer-local name first, so `page-banner` referenced from `my-app`
    /// finds `my-app/page-banner` before any top-level `page-banner`.
    pub fn identify(&self, request: &str, referrer: Option<&str>) -> Option<String> {
        let (kind, name) = specifier::parse(request)?;
        if specifier::is_absolute(name) {
            return self.known.contains(request).then(|| request.to_string());
        }
        if let Some(referrer) = referrer
            && let Some((_, referrer_path)) = specifier::parse(referrer)
        {
            let local = specifier::make(kind, &format!("{referrer_path}/{name}"));
            if self.known.contains(&local) {
                return Some(local);
            }
        }
        let collection = self.config.definitive_collection(kind)?;
        let rooted = specifier::make(kind, &format!("/{}/{collection}/{name}", self.root_name));
        self.known.contains(&rooted).then_some(rooted)
    }
}
