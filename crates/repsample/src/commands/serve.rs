//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, instrument};

use repsample_core::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP tools over stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: &Config) -> anyhow::Result<()> {
    let server = ProjectServer::with_defaults(config.sample_length, config.input_limit());
    info!(sample_length = config.sample_length, "starting MCP server on stdio");

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
