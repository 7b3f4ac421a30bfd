use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::core::{
    dependencies_for_template, recursive_dependencies_for_template, resolution_map_for_entry_point,
};
use crate::error::AnalyzeError;
use crate::project::{Project, ProjectOptions};
use crate::specifier;

use super::types::{
    DependenciesResult, EntryPointMapParams, EntryPointMapResult, MapEntry, Pagination,
    ProjectParams, ProjectResult, TemplateParams,
};

#[derive(Clone)]
pub struct SprigMcpServer {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SprigMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Load the project and report its resolution metadata
    #[tool(
        description = "Load a Glimmer-style project and return its root name, environment and per-kind module counts. Use this first to confirm the project resolves."
    )]
    pub async fn get_project(
        &self,
        params: Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = load_project(&params.0.project_root_path, params.0.environment.clone())?;

        let mut specifier_counts: BTreeMap<String, usize> = BTreeMap::new();
        for key in project.resolution_map().keys() {
            if let Some((kind, _)) = specifier::parse(key) {
                *specifier_counts.entry(kind.to_string()).or_insert(0) += 1;
            }
        }

        let result = ProjectResult {
            root_name: project.root_name().to_string(),
            environment: project.environment().to_string(),
            module_prefix: project.config.module_prefix.clone(),
            module_count: project.resolution_map().len(),
            specifier_counts,
        };

        to_tool_result(&result)
    }

    /// List the direct dependencies of one template
    #[tool(
        description = "List the components and helpers one template invokes directly. The template can be a short name like `my-app` or an absolute module path."
    )]
    pub async fn template_dependencies(
        &self,
        params: Parameters<TemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = load_project(&params.0.project_root_path, params.0.environment.clone())?;

        let deps =
            dependencies_for_template(&params.0.template, &project).map_err(analysis_error)?;

        to_tool_result(&DependenciesResult::from(deps))
    }

    /// List everything reachable from one template
    #[tool(
        description = "List every component and helper reachable from one template, following component invocations transitively."
    )]
    pub async fn recursive_dependencies(
        &self,
        params: Parameters<TemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = load_project(&params.0.project_root_path, params.0.environment.clone())?;

        let deps = recursive_dependencies_for_template(&params.0.template, &project)
            .map_err(analysis_error)?;

        to_tool_result(&DependenciesResult::from(deps))
    }

    /// Resolution map filtered to one entry point
    #[tool(
        description = "Return the project's resolution map filtered to the modules one entry point actually reaches. Returns paginated list of entries."
    )]
    pub async fn entry_point_map(
        &self,
        params: Parameters<EntryPointMapParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.map(|v| v as usize).unwrap_or(50).min(200);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);

        let project = load_project(&params.0.project_root_path, params.0.environment.clone())?;

        let map = resolution_map_for_entry_point(&params.0.template, &project, None)
            .map_err(analysis_error)?;

        let total_count = map.len();

        // Apply pagination
        let entries: Vec<MapEntry> = map
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(specifier, file_path)| MapEntry {
                specifier,
                file_path,
            })
            .collect();

        let has_more = offset + entries.len() < total_count;

        let result = EntryPointMapResult {
            total_count,
            entries,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        };

        to_tool_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for SprigMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Sprig MCP helps AI agents analyze template dependencies in Glimmer-style projects.\n\n\
                 Available tools:\n\
                 1. get_project - Load a project and confirm its root name and module count\n\
                 2. template_dependencies - Components and helpers one template invokes directly\n\
                 3. recursive_dependencies - Everything reachable from one template, transitively\n\
                 4. entry_point_map - The resolution map filtered to one entry point (paginated)\n\n\
                 Recommended Workflow:\n\
                 1. Use get_project to confirm the project loads and see how many modules it has\n\
                 2. Use template_dependencies or recursive_dependencies to inspect one template\n\
                 3. Use entry_point_map to see which modules a bundle entry point keeps alive\n\n\
                 Templates are addressed by short name (my-app), nested path (my-app/page-banner)\n\
                 or absolute module path (/my-app/components/my-app)."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn load_project(root: &str, environment: Option<String>) -> Result<Project, McpError> {
    let options = ProjectOptions {
        environment,
        config_dir: None,
    };
    Project::with_options(PathBuf::from(root), options)
        .map_err(|e| McpError::internal_error(format!("Failed to load project: {}", e), None))
}

/// Missing templates are the caller's mistake; anything else is the project's.
fn analysis_error(error: AnalyzeError) -> McpError {
    match &error {
        AnalyzeError::TemplateNotFound { .. } => McpError::invalid_params(error.to_string(), None),
        AnalyzeError::Parse { source, .. } => {
            McpError::internal_error(format!("{error}: {source}"), None)
        }
    }
}

fn to_tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = SprigMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
