//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes representative-sample search to AI assistants over stdio. Tools
//! wrap the same core library the `sample` command uses; they never touch the
//! filesystem, so results come back as JSON text only.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use repsample_core::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_SAMPLE_LENGTH, Document, SampleReport};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `find_representative_sample` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FindSampleParams {
    /// The full text to sample.
    pub text: String,
    /// Target words per sample. Defaults to the server's configured length.
    pub sample_length: Option<usize>,
    /// Whether to strip markdown formatting before sampling.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Include the text of every ranked window, not only the winner.
    #[serde(default)]
    pub include_text: bool,
}

/// MCP server exposing representative-sample search.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    sample_length: usize,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with the built-in sample length and input limit.
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_SAMPLE_LENGTH, Some(DEFAULT_MAX_INPUT_BYTES))
    }

    /// Create a server whose tools fall back to these settings.
    pub fn with_defaults(sample_length: usize, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            sample_length,
            max_input_bytes,
        }
    }

    /// Name, version and default sample length.
    #[tool(description = "Get the server's name, version and default sample length")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        if params.format == "json" {
            return json_result(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "sample_length": self.sample_length,
            }));
        }
        let text = format!(
            "{} {}: {}\ndefault sample length: {} words",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
            self.sample_length,
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Rank every window of a text by how closely it matches the whole.
    #[tool(
        description = "Find the extract of a text whose average word and sentence lengths best match the whole text. Returns a ranked JSON report."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn find_representative_sample(
        &self,
        Parameters(params): Parameters<FindSampleParams>,
    ) -> Result<CallToolResult, McpError> {
        let sample_length = params.sample_length.unwrap_or(self.sample_length);
        tracing::debug!(
            tool = "find_representative_sample",
            sample_length,
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let document = if params.strip_markdown {
            Document::from_markdown(&params.text)
        } else {
            Document::parse(&params.text)
        };
        let sampling = document
            .sample(sample_length)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let report = SampleReport::from_sampling(&sampling, true, params.include_text);

        tracing::info!(
            tool = "find_representative_sample",
            candidates = report.ranked.len(),
            "MCP tool completed"
        );
        json_result(&report)
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    serde_json::to_string_pretty(value)
        .map(|json| CallToolResult::success(vec![Content::text(json)]))
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass a text to find_representative_sample to get the extract that best matches it.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
