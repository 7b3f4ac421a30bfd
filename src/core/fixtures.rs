//! Shared on-disk fixture for the analysis tests: `basic-app`, a small
//! Glimmer-style project with nested components, helpers, a dynamic
//! component invocation and a component that never resolves as a helper.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::project::Project;

pub(crate) fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("should create dirs");
    }
    fs::write(path, contents).expect("should write file");
}

/// A project named `basic-app` holding the given files. The returned
/// `TempDir` keeps the tree alive for the duration of the test.
pub(crate) fn app_with(files: &[(&str, &str)]) -> (TempDir, Project) {
    let dir = TempDir::new().expect("should create temp dir");
    write(
        dir.path(),
        "package.json",
        r#"{ "name": "basic-app", "version": "1.0.0" }"#,
    );
    for (relative, contents) in files {
        write(dir.path(), relative, contents);
    }
    let project = Project::new(dir.path()).expect("fixture project should load");
    (dir, project)
}

pub(crate) fn basic_app() -> (TempDir, Project) {
    app_with(&[
        (
            "src/ui/components/my-app/template.hbs",
            "<div>\n  <page-banner></page-banner>\n  <text-editor />\n  <span class={{if this.editing \"editing\" \"reading\"}}>ready</span>\n</div>\n",
        ),
        (
            "src/ui/components/my-app/page-banner/template.hbs",
            "{{! import user-avatar}}\n<header>\n  <h1>{{this.title}}</h1>\n  <p>{{titleize this.category}} - updated {{moment this.updatedAt}}</p>\n</header>\n",
        ),
        (
            "src/ui/components/my-app/page-banner/user-avatar/template.hbs",
            "<ferret-launcher />\n<img src={{this.avatarUrl}}>\n",
        ),
        ("src/ui/components/text-editor.hbs", "<textarea></textarea>\n"),
        ("src/ui/components/text-editor.ts", "export {};\n"),
        (
            "src/ui/components/ferret-launcher/template.hbs",
            "<button>Launch</button>\n",
        ),
        ("src/ui/components/ferret-launcher/component.ts", "export {};\n"),
        ("src/ui/components/if/helper.ts", "export {};\n"),
        ("src/ui/components/moment/helper.ts", "export {};\n"),
        ("src/ui/components/eq/helper.ts", "export {};\n"),
        (
            "src/ui/components/with-component-helper/template.hbs",
            "{{component this.widgetName}}\n",
        ),
        ("src/ui/components/titleize.ts", "export {};\n"),
    ])
}
