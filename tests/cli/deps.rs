use anyhow::Result;

use crate::{CliTest, run, run_json};

#[test]
fn test_deps_direct_dependencies() -> Result<()> {
    let test = CliTest::basic_app()?;

    let json = run_json(test.deps_command().arg("my-app").arg("--json"))?;

    assert_eq!(json["path"], "/basic-app/components/my-app");
    assert_eq!(json["hasComponentHelper"], false);
    assert_eq!(
        json["components"],
        serde_json::json!([
            "/basic-app/components/my-app/page-banner",
            "/basic-app/components/text-editor",
        ])
    );
    assert_eq!(
        json["helpers"],
        serde_json::json!(["/basic-app/components/if"])
    );

    Ok(())
}

#[test]
fn test_deps_human_output() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, stdout, _) = run(test.deps_command().arg("my-app"))?;
    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r"
    Dependencies of /basic-app/components/my-app

      components (2)
        /basic-app/components/my-app/page-banner
        /basic-app/components/text-editor
      helpers (1)
        /basic-app/components/if
    ");

    Ok(())
}

#[test]
fn test_deps_accepts_absolute_module_path() -> Result<()> {
    let test = CliTest::basic_app()?;

    let json = run_json(
        test.deps_command()
            .arg("/basic-app/components/my-app")
            .arg("--json"),
    )?;
    assert_eq!(json["path"], "/basic-app/components/my-app");

    Ok(())
}

#[test]
fn test_deps_dynamic_component_warning() -> Result<()> {
    let test = CliTest::basic_app()?;
    test.write_file(
        "src/ui/components/widget-host/template.hbs",
        "{{component this.widgetName}}\n",
    )?;

    let json = run_json(test.deps_command().arg("widget-host").arg("--json"))?;
    assert_eq!(json["hasComponentHelper"], true);
    assert_eq!(json["components"], serde_json::json!([]));

    let (code, stdout, _) = run(test.deps_command().arg("widget-host"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("warning:"));
    assert!(stdout.contains("the component list may be incomplete"));

    Ok(())
}

#[test]
fn test_deps_missing_template_fails() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, _, stderr) = run(test.deps_command().arg("no-such-template"))?;
    assert_eq!(code, 1);
    assert!(stderr.contains("template `no-such-template` could not be found"));

    Ok(())
}

#[test]
fn test_deps_parse_error_shows_location() -> Result<()> {
    let test = CliTest::basic_app()?;
    test.write_file(
        "src/ui/components/broken/template.hbs",
        "<div>\n  {{broken and}\n</div>\n",
    )?;

    let (code, _, stderr) = run(test.deps_command().arg("broken"))?;
    assert_eq!(code, 1);
    assert!(stderr.contains("--> template:/basic-app/components/broken:2:15"));
    assert!(stderr.contains("{{broken and}"));
    assert!(stderr.contains('^'));

    Ok(())
}

#[test]
fn test_deps_outside_project_fails() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.deps_command().arg("my-app"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("failed to load project"));

    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("--help"))?;
    assert_eq!(code, 0);
    for command in ["deps", "closure", "map", "init", "serve"] {
        assert!(stdout.contains(command), "help should mention `{command}`");
    }

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(&mut test.command())?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));

    Ok(())
}
