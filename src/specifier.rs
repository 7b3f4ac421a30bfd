//! Module specifiers of the form `kind:path`, e.g.
//! `template:/basic-app/components/my-app`.
//!
//! The `kind` names what a module is (`template`, `component`, `helper`, ...)
//! and the path is either a logical name to be resolved (`page-banner`) or an
//! already-resolved absolute module path rooted at the application name.

/// Joins a kind and a path into a specifier string.
pub fn make(kind: &str, path: &str) -> String {
    format!("{kind}:{path}")
}

/// Splits a specifier into `(kind, path)`. Returns `None` when the string
/// has no `:` separator.
pub fn parse(specifier: &str) -> Option<(&str, &str)> {
    specifier.split_once(':')
}

/// The path component of a specifier, or the whole string when it carries
/// no kind prefix.
pub fn path_of(specifier: &str) -> &str {
    match specifier.split_once(':') {
        Some((_, path)) => path,
        None => specifier,
    }
}

/// Whether a specifier path is absolute (already resolved) rather than a
/// logical name still to be looked up.
pub fn is_absolute(specifier_path: &str) -> bool {
    specifier_path.starts_with('/')
}
