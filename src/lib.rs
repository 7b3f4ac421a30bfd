//! Sprig - static template dependency analysis for Glimmer-style projects
//!
//! Sprig is a CLI tool and library for discovering which components and
//! helpers a template pulls in, directly or transitively, and for carving a
//! project's module resolution map down to what one entry point actually
//! reaches. Bundlers use the filtered map to drop the modules nothing
//! renders.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Per-environment configuration file loading
//! - `core`: Dependency extraction, transitive closure and map filtering
//! - `error`: Analysis and project error types
//! - `mcp`: Model Context Protocol server implementation
//! - `project`: Project loading and the module resolution map
//! - `resolver`: Module specifier resolution rules
//! - `specifier`: `kind:path` module specifier helpers
//! - `template`: Handlebars-style template parser and AST walker

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mcp;
pub mod project;
pub mod resolver;
pub mod specifier;
pub mod template;
