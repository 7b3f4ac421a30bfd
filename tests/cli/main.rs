use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod deps;
mod init;
mod map;

const BIN_NAME: &str = "sprig";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A small but complete project: nested components, a classic-layout
    /// component, a helper and one module nothing reaches.
    pub fn basic_app() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            "package.json",
            r#"{ "name": "basic-app", "version": "1.0.0" }"#,
        )?;
        test.write_file(
            "src/ui/components/my-app/template.hbs",
            "<page-banner></page-banner>\n<text-editor />\n<span class={{if this.editing \"editing\" \"reading\"}}></span>\n",
        )?;
        test.write_file(
            "src/ui/components/my-app/page-banner/template.hbs",
            "{{! import user-avatar}}\n<h1>{{this.title}}</h1>\n",
        )?;
        test.write_file(
            "src/ui/components/my-app/page-banner/user-avatar/template.hbs",
            "<img src={{this.avatarUrl}}>\n",
        )?;
        test.write_file("src/ui/components/text-editor.hbs", "<textarea></textarea>\n")?;
        test.write_file("src/ui/components/text-editor.ts", "export default class {}\n")?;
        test.write_file(
            "src/ui/components/if/helper.ts",
            "export default function () {}\n",
        )?;
        test.write_file(
            "src/ui/components/titleize.ts",
            "export default function () {}\n",
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn deps_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("deps");
        cmd
    }

    pub fn closure_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("closure");
        cmd
    }

    pub fn map_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("map");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run a command, returning its exit code, stdout and stderr.
pub fn run(cmd: &mut Command) -> Result<(i32, String, String)> {
    let output = cmd.output().context("Failed to run command")?;
    Ok((
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    ))
}

/// Run a command expected to succeed and parse its stdout as JSON.
pub fn run_json(cmd: &mut Command) -> Result<serde_json::Value> {
    let (code, stdout, stderr) = run(cmd)?;
    assert_eq!(code, 0, "command should succeed, stderr: {stderr}");
    serde_json::from_str(&stdout).with_context(|| format!("stdout should be JSON: {stdout}"))
}
