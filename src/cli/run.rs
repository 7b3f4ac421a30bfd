//! Command dispatch for the sprig CLI.
//!
//! Each analysis command loads the project once, runs the requested analysis
//! and hands the outcome to the report layer. Analysis failures keep their
//! original error type so the caller can map them to an exit status.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::args::{Arguments, Command, CommonArgs, InitCommand};
use crate::config::{CONFIG_DIR, ENVIRONMENT_FILE, starter_config};
use crate::core::{
    TemplateDependencies, dependencies_for_template, recursive_dependencies_for_template,
    resolution_map_for_entry_point,
};
use crate::project::{Project, ProjectOptions, ResolutionMap};

/// What a command produced, ready for rendering.
#[derive(Debug)]
pub enum CommandOutcome {
    Dependencies {
        project: ProjectSummary,
        recursive: bool,
        deps: TemplateDependencies,
    },
    Map {
        project: ProjectSummary,
        template: String,
        entries: ResolutionMap,
    },
    Init {
        path: PathBuf,
    },
}

/// The loaded project, summarized for verbose reporting.
#[derive(Debug)]
pub struct ProjectSummary {
    pub root_name: String,
    pub environment: String,
    pub modules: usize,
}

impl ProjectSummary {
    fn of(project: &Project) -> Self {
        Self {
            root_name: project.root_name().to_string(),
            environment: project.environment().to_string(),
            modules: project.resolution_map().len(),
        }
    }
}

pub fn run(Arguments { command }: Arguments) -> Result<CommandOutcome> {
    match command {
        Some(Command::Deps(cmd)) => {
            let project = load_project(&cmd.common)?;
            let deps = dependencies_for_template(&cmd.template, &project)?;
            Ok(CommandOutcome::Dependencies {
                project: ProjectSummary::of(&project),
                recursive: false,
                deps,
            })
        }
        Some(Command::Closure(cmd)) => {
            let project = load_project(&cmd.common)?;
            let deps = recursive_dependencies_for_template(&cmd.template, &project)?;
            Ok(CommandOutcome::Dependencies {
                project: ProjectSummary::of(&project),
                recursive: true,
                deps,
            })
        }
        Some(Command::Map(cmd)) => {
            let project = load_project(&cmd.common)?;
            let entries = resolution_map_for_entry_point(&cmd.template, &project, None)?;
            Ok(CommandOutcome::Map {
                project: ProjectSummary::of(&project),
                template: cmd.template,
                entries,
            })
        }
        Some(Command::Init(cmd)) => init(cmd),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("serve should be handled before run()")
        }
        None => {
            anyhow::bail!("no command provided, use --help to see available commands")
        }
    }
}

fn load_project(common: &CommonArgs) -> Result<Project> {
    let options = ProjectOptions {
        environment: common.environment.clone(),
        config_dir: None,
    };
    Project::with_options(&common.project, options)
        .with_context(|| format!("failed to load project at `{}`", common.project.display()))
}

fn init(cmd: InitCommand) -> Result<CommandOutcome> {
    let config_dir = cmd.project.join(CONFIG_DIR);
    let path = config_dir.join(ENVIRONMENT_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create `{}`", config_dir.display()))?;
    let contents = serde_json::to_string_pretty(&starter_config())
        .context("failed to serialize the starter configuration")?;
    fs::write(&path, contents)
        .with_context(|| format!("failed to write `{}`", path.display()))?;

    Ok(CommandOutcome::Init { path })
}
