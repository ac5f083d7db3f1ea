use std::sync::Arc;

use rmcp::{
    ServerHandler,
    ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult,
        Content,
        Implementation,
        ServerCapabilities,
        ServerInfo,
    },
    tool,
    tool_handler,
    tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    assistant::{Assistant, ChatRequest},
    catalog::ProcedureCatalog,
    error,
    router::Reply,
};

#[derive(Clone)]
pub struct TupaMcpServer {
    assistant: Arc<Assistant>,
    tool_router: ToolRouter<Self>,
}

impl TupaMcpServer {
    pub fn new(catalog: Arc<ProcedureCatalog>) -> Self {
        Self {
            assistant: Arc::new(Assistant::new(catalog)),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router(router = tool_router)]
impl TupaMcpServer {
    /// Answer a question about municipal procedures.
    #[tool(
        name = "tupa_chat",
        description = "Ask about a TUPA procedure of the Municipalidad Provincial de Puno (in Spanish). Returns either a procedure detail block or a list of suggested procedure titles."
    )]
    pub async fn tupa_chat(
        &self,
        params: Parameters<ChatParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let request = ChatRequest {
            message: params.0.message,
        };

        let reply = self.assistant.chat(&request).map_err(|e| match e {
            error::Error::InvalidRequest(message) => {
                rmcp::ErrorData::invalid_params(message, None)
            }
            other => mcp_error("chat failed", other),
        })?;

        let structured = serde_json::to_value(&reply)
            .map_err(|e| mcp_error("failed to serialize reply", e))?;

        let mut result = CallToolResult::success(vec![Content::text(format_reply(&reply))]);
        result.structured_content = Some(structured);
        Ok(result)
    }

    /// List every procedure title.
    #[tool(
        name = "tupa_titles",
        description = "List the titles of every procedure in the catalog, sorted alphabetically."
    )]
    pub async fn tupa_titles(&self) -> Result<CallToolResult, rmcp::ErrorData> {
        let titles = self.assistant.titles();
        let summary = if titles.titles.is_empty() {
            "No procedures loaded.".to_string()
        } else {
            titles.titles.join("\n")
        };
        let structured = serde_json::to_value(&titles)
            .map_err(|e| mcp_error("failed to serialize titles", e))?;

        let mut result = CallToolResult::success(vec![Content::text(summary)]);
        result.structured_content = Some(structured);
        Ok(result)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TupaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(
                Implementation::new("tupa", env!("CARGO_PKG_VERSION"))
                    .with_title("TUPA assistant MCP"),
            )
            .with_instructions(
                "Use tupa_chat with the user's question in Spanish. When it returns suggestions, ask the user to pick one and send that title back to tupa_chat. Use tupa_titles to browse the catalog.",
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatParams {
    /// The user's question, in Spanish.
    pub message: Option<String>,
}

/// Plain-text rendering of a reply for MCP clients that ignore structured
/// content.
fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text { response } => response.clone(),
        Reply::Suggestions {
            message,
            suggestions,
        } => {
            let mut lines = Vec::with_capacity(suggestions.len() + 1);
            lines.push(message.clone());
            lines.extend(suggestions.iter().map(|s| format!("- {s}")));
            lines.join("\n")
        }
    }
}

fn mcp_error(message: &str, error: impl std::fmt::Display) -> rmcp::ErrorData {
    rmcp::ErrorData::internal_error(
        message.to_string(),
        Some(json!({ "error": error.to_string() })),
    )
}

pub fn run_mcp(catalog: Arc<ProcedureCatalog>) -> error::Result<()> {
    let server = TupaMcpServer::new(catalog);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error::Error::Config(format!("failed to start tokio runtime: {e}"))
        })?;

    runtime.block_on(async move {
        let transport = rmcp::transport::stdio();
        let running = server.serve(transport).await.map_err(|e| {
            error::Error::Config(format!(
                "MCP server initialization failed: {e}"
            ))
        })?;
        running.waiting().await.map_err(|e| {
            error::Error::Config(format!("MCP server error: {e}"))
        })?;
        Ok(())
    })
}
