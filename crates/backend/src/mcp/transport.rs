//! Streamable HTTP transport for the MCP server, mounted into the axum app

use std::sync::Arc;

use axum::{middleware, Router};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::tower::{
    StreamableHttpServerConfig, StreamableHttpService,
};

use crate::mcp::RoomdeskMcp;
use crate::system::auth::middleware::require_auth;

/// Path MCP clients connect to
pub const MCP_PATH: &str = "/mcp";

fn mcp_service() -> StreamableHttpService<RoomdeskMcp, LocalSessionManager> {
    // One handler per session; all of them share the process-wide database
    StreamableHttpService::new(
        || Ok(RoomdeskMcp::new()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    )
}

/// MCP endpoint, bearer token required like the dashboard routes
pub fn mcp_routes() -> Router {
    Router::new()
        .nest_service(MCP_PATH, mcp_service())
        .route_layer(middleware::from_fn(require_auth))
}
