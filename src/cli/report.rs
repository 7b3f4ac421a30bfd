//! Report formatting and printing utilities.
//!
//! Human-readable reports are rendered here so the analysis core stays
//! silent. `--json` output reuses the serde shapes of the underlying data,
//! and parse failures are displayed in cargo-style format with a caret
//! pointing at the offending column.

use std::collections::BTreeSet;
use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::run::{CommandOutcome, ProjectSummary};
use crate::core::TemplateDependencies;
use crate::error::AnalyzeError;
use crate::project::ResolutionMap;
use crate::template::ParseError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print a command outcome to stdout.
pub fn print(outcome: &CommandOutcome, json: bool, verbose: bool) {
    print_to(outcome, json, verbose, &mut io::stdout().lock());
}

/// Print a command outcome to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(outcome: &CommandOutcome, json: bool, verbose: bool, writer: &mut W) {
    if json {
        print_json(outcome, writer);
        return;
    }

    match outcome {
        CommandOutcome::Dependencies {
            project,
            recursive,
            deps,
        } => {
            print_dependencies(project, *recursive, deps, verbose, writer);
        }
        CommandOutcome::Map {
            project,
            template,
            entries,
        } => {
            print_map(project, template, entries, verbose, writer);
        }
        CommandOutcome::Init { path } => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", path.display()).green()
            );
        }
    }
}

/// Print a failed command's error to stderr.
pub fn print_error(error: &anyhow::Error) {
    print_error_to(error, &mut io::stderr().lock());
}

/// Print an error to a custom writer.
pub fn print_error_to<W: Write>(error: &anyhow::Error, writer: &mut W) {
    if let Some(AnalyzeError::Parse { specifier, source }) = error.downcast_ref::<AnalyzeError>() {
        print_parse_error(specifier, source, writer);
        return;
    }
    let _ = writeln!(writer, "{} {:#}", "error:".bold().red(), error);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_json<W: Write>(outcome: &CommandOutcome, writer: &mut W) {
    let payload = match outcome {
        CommandOutcome::Dependencies { deps, .. } => serde_json::to_string_pretty(deps),
        CommandOutcome::Map { entries, .. } => serde_json::to_string_pretty(entries),
        CommandOutcome::Init { path } => serde_json::to_string_pretty(&serde_json::json!({
            "created": path.display().to_string(),
        })),
    };
    match payload {
        Ok(json) => {
            let _ = writeln!(writer, "{json}");
        }
        Err(error) => {
            let _ = writeln!(
                writer,
                "{} failed to serialize output: {error}",
                "error:".bold().red()
            );
        }
    }
}

fn print_dependencies<W: Write>(
    project: &ProjectSummary,
    recursive: bool,
    deps: &TemplateDependencies,
    verbose: bool,
    writer: &mut W,
) {
    let title = if recursive {
        "Transitive dependencies of"
    } else {
        "Dependencies of"
    };
    let _ = writeln!(writer, "{} {}", title.bold(), deps.path.bold());
    if verbose {
        print_project_line(project, writer);
    }
    let _ = writeln!(writer);

    print_section("components", &deps.components, writer);
    print_section("helpers", &deps.helpers, writer);

    if deps.has_component_helper {
        let _ = writeln!(
            writer,
            "\n{} dynamic {} invocation found, the component list may be incomplete",
            "warning:".bold().yellow(),
            "{{component}}".cyan()
        );
    }
}

fn print_section<W: Write>(label: &str, paths: &BTreeSet<String>, writer: &mut W) {
    let _ = writeln!(writer, "  {} ({})", label.bold(), paths.len());
    for path in paths {
        let _ = writeln!(writer, "    {path}");
    }
}

fn print_map<W: Write>(
    project: &ProjectSummary,
    template: &str,
    entries: &ResolutionMap,
    verbose: bool,
    writer: &mut W,
) {
    let _ = writeln!(writer, "{} {}", "Resolution map for".bold(), template.bold());
    if verbose {
        print_project_line(project, writer);
    }
    let _ = writeln!(writer);

    let width = entries
        .keys()
        .map(|specifier| UnicodeWidthStr::width(specifier.as_str()))
        .max()
        .unwrap_or(0);
    for (specifier, file) in entries {
        let padding = width.saturating_sub(UnicodeWidthStr::width(specifier.as_str()));
        let _ = writeln!(
            writer,
            "  {}{} {} {}",
            specifier,
            " ".repeat(padding),
            "->".blue(),
            file.dimmed()
        );
    }

    let _ = writeln!(
        writer,
        "\n{} {} {}",
        SUCCESS_MARK.green(),
        entries.len(),
        if entries.len() == 1 {
            "module"
        } else {
            "modules"
        }
    );
}

fn print_project_line<W: Write>(project: &ProjectSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}",
        format!(
            "  project {}, environment {}, {} {}",
            project.root_name,
            project.environment,
            project.modules,
            if project.modules == 1 {
                "module"
            } else {
                "modules"
            }
        )
        .dimmed()
    );
}

fn print_parse_error<W: Write>(specifier: &str, error: &ParseError, writer: &mut W) {
    let line_width = error.line.to_string().len();

    let _ = writeln!(writer, "{}: {}", "error".bold().red(), error.message);
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        specifier,
        error.line,
        error.column
    );
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = line_width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        error.line.to_string().blue(),
        "|".blue(),
        error.source_line,
        width = line_width
    );

    // Caret pointing to the column (column is 1-based)
    let prefix: String = error
        .source_line
        .chars()
        .take(error.column.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = line_width,
        padding = caret_padding
    );
}

// ============================================================
// Tests
// ============================================================
