use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates the starter configuration's structure.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(
        parsed.get("moduleConfiguration").is_some(),
        "Config should spell out 'moduleConfiguration'"
    );
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("init"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));

    assert!(test.root().join("config/environment.json").exists());
    let content = test.read_file("config/environment.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("config/environment.json", "{}")?;

    let (code, _, stderr) = run(test.command().arg("init"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("already exists"));

    Ok(())
}

#[test]
fn test_init_respects_project_flag() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, _) = run(test.command().arg("init").arg("--project").arg("nested"))?;
    assert_eq!(code, 0);
    assert!(test.root().join("nested/config/environment.json").exists());

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, _, _) = run(test.command().arg("init"))?;
    assert_eq!(code, 0);

    // The starter file spells out the defaults, so analysis behaves the
    // same as before it existed.
    let (code, stdout, _) = run(test.deps_command().arg("my-app"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("/basic-app/components/text-editor"));

    Ok(())
}
