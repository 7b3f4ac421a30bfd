use anyhow::Result;

use crate::{CliTest, run, run_json};

#[test]
fn test_map_json_is_filtered_to_entry_closure() -> Result<()> {
    let test = CliTest::basic_app()?;

    let json = run_json(test.map_command().arg("my-app").arg("--json"))?;
    let entries = json.as_object().expect("map output should be an object");

    assert_eq!(entries.len(), 6);
    assert_eq!(
        json["template:/basic-app/components/my-app"],
        "src/ui/components/my-app/template.hbs"
    );
    assert_eq!(
        json["template:/basic-app/components/my-app/page-banner"],
        "src/ui/components/my-app/page-banner/template.hbs"
    );
    assert_eq!(
        json["template:/basic-app/components/my-app/page-banner/user-avatar"],
        "src/ui/components/my-app/page-banner/user-avatar/template.hbs"
    );
    assert_eq!(
        json["template:/basic-app/components/text-editor"],
        "src/ui/components/text-editor.hbs"
    );
    assert_eq!(
        json["component:/basic-app/components/text-editor"],
        "src/ui/components/text-editor.ts"
    );
    assert_eq!(
        json["helper:/basic-app/components/if"],
        "src/ui/components/if/helper.ts"
    );
    // `titleize` is in the project but nothing in the closure references it.
    assert!(!entries.contains_key("component:/basic-app/components/titleize"));

    Ok(())
}

#[test]
fn test_map_human_output() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, stdout, _) = run(test.map_command().arg("my-app"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Resolution map for my-app"));
    assert!(stdout.contains("-> src/ui/components/my-app/template.hbs"));
    assert!(stdout.contains("-> src/ui/components/if/helper.ts"));
    assert!(stdout.contains("\u{2713} 6 modules"));
    assert!(!stdout.contains("titleize"));

    Ok(())
}

#[test]
fn test_map_verbose_shows_project_summary() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, stdout, _) = run(test.map_command().arg("my-app").arg("--verbose"))?;
    assert_eq!(code, 0);
    // The summary counts the whole project, not just the filtered entries.
    assert!(stdout.contains("project basic-app, environment development, 7 modules"));

    Ok(())
}

#[test]
fn test_map_environment_flag_selects_config() -> Result<()> {
    let test = CliTest::basic_app()?;
    test.write_file(
        "config/environment.test.json",
        r#"{ "modulePrefix": "renamed-app" }"#,
    )?;

    let json = run_json(
        test.map_command()
            .arg("my-app")
            .arg("--environment")
            .arg("test")
            .arg("--json"),
    )?;
    let entries = json.as_object().expect("map output should be an object");

    assert!(entries.contains_key("template:/renamed-app/components/my-app"));
    assert!(!entries.contains_key("template:/basic-app/components/my-app"));

    Ok(())
}

#[test]
fn test_map_environment_from_env_var() -> Result<()> {
    let test = CliTest::basic_app()?;
    test.write_file(
        "config/environment.test.json",
        r#"{ "modulePrefix": "renamed-app" }"#,
    )?;

    let json = run_json(
        test.map_command()
            .arg("my-app")
            .arg("--json")
            .env("SPRIG_ENV", "test"),
    )?;
    let entries = json.as_object().expect("map output should be an object");

    assert!(entries.contains_key("template:/renamed-app/components/my-app"));

    Ok(())
}

#[test]
fn test_map_missing_entry_point_fails() -> Result<()> {
    let test = CliTest::basic_app()?;

    let (code, _, stderr) = run(test.map_command().arg("no-such-template"))?;
    assert_eq!(code, 1);
    assert!(stderr.contains("could not be found"));

    Ok(())
}
