//! Error types shared across the analysis pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::template::ParseError;

/// Errors produced while analyzing templates of an already-loaded project.
///
/// Note that an unresolvable reference inside a template is *not* an error:
/// resolution failures during extraction are silently dropped, since markup
/// like `<div>` produces candidate references that simply resolve to nothing.
/// Only a missing or unparseable entry template is fatal.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The requested template name did not resolve to any module in the
    /// project's resolution map.
    #[error("template `{name}` could not be found")]
    TemplateNotFound { name: String },

    /// A template resolved and loaded, but its source failed to parse.
    #[error("failed to parse `{specifier}`")]
    Parse {
        specifier: String,
        #[source]
        source: ParseError,
    },
}

/// Errors produced while discovering a project on disk: reading
/// `package.json`, loading environment configuration, and scanning `src/`
/// into a resolution map.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no package.json found in `{0}`")]
    MissingPackage(PathBuf),

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("package.json has no `name` and the configuration sets no `modulePrefix`")]
    MissingRootName,

    #[error("invalid glob pattern `{pattern}` in `ignores`")]
    InvalidIgnore {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
