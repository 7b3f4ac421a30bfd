use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use sprig::mcp::{SprigMcpServer, types::TemplateParams};

use crate::{McpTestFixture, extract_tool_result_json};

fn template_params(fixture: &McpTestFixture, template: &str) -> Parameters<TemplateParams> {
    Parameters(TemplateParams {
        project_root_path: fixture.root(),
        environment: None,
        template: template.to_string(),
    })
}

// ============================================================================
// template_dependencies tests
// ============================================================================

#[tokio::test]
async fn test_template_dependencies_direct() {
    let fixture = McpTestFixture::basic_app().unwrap();
    let server = SprigMcpServer::new();

    let result = server
        .template_dependencies(template_params(&fixture, "my-app"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["path"], "/basic-app/components/my-app");
    assert_eq!(json_result["hasComponentHelper"], false);
    assert_eq!(
        json_result["components"],
        json!([
            "/basic-app/components/my-app/page-banner",
            "/basic-app/components/text-editor",
        ])
    );
    assert_eq!(json_result["helpers"], json!(["/basic-app/components/if"]));
}

#[tokio::test]
async fn test_template_dependencies_dynamic_component_flag() {
    let fixture = McpTestFixture::basic_app().unwrap();
    fixture
        .write_file(
            "src/ui/components/widget-host/template.hbs",
            "{{component this.widgetName}}\n",
        )
        .unwrap();

    let server = SprigMcpServer::new();

    let result = server
        .template_dependencies(template_params(&fixture, "widget-host"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["hasComponentHelper"], true);
    assert_eq!(json_result["components"], json!([]));
}

#[tokio::test]
async fn test_template_dependencies_unknown_template() {
    let fixture = McpTestFixture::basic_app().unwrap();
    let server = SprigMcpServer::new();

    let result = server
        .template_dependencies(template_params(&fixture, "no-such-template"))
        .await;

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.message.contains("could not be found"));
}

#[tokio::test]
async fn test_template_dependencies_parse_error() {
    let fixture = McpTestFixture::basic_app().unwrap();
    fixture
        .write_file("src/ui/components/broken/template.hbs", "{{oops")
        .unwrap();

    let server = SprigMcpServer::new();

    let result = server
        .template_dependencies(template_params(&fixture, "broken"))
        .await;

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.message.contains("failed to parse"));
    assert!(err.message.contains("/basic-app/components/broken"));
}

// ============================================================================
// recursive_dependencies tests
// ============================================================================

#[tokio::test]
async fn test_recursive_dependencies_follow_imports() {
    let fixture = McpTestFixture::basic_app().unwrap();
    let server = SprigMcpServer::new();

    let result = server
        .recursive_dependencies(template_params(&fixture, "my-app"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    // `user-avatar` only appears two hops down; the entry itself is never
    // listed as a component.
    assert_eq!(
        json_result["components"],
        json!([
            "/basic-app/components/my-app/page-banner",
            "/basic-app/components/my-app/page-banner/user-avatar",
            "/basic-app/components/text-editor",
        ])
    );
    assert_eq!(json_result["helpers"], json!(["/basic-app/components/if"]));
}

#[tokio::test]
async fn test_recursive_dependencies_handle_cycles() {
    let fixture = McpTestFixture::basic_app().unwrap();
    fixture
        .write_file("src/ui/components/ping/template.hbs", "<pong></pong>\n")
        .unwrap();
    fixture
        .write_file("src/ui/components/pong/template.hbs", "<ping></ping>\n")
        .unwrap();

    let server = SprigMcpServer::new();

    let result = server
        .recursive_dependencies(template_params(&fixture, "ping"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["components"],
        json!(["/basic-app/components/pong"])
    );
}
