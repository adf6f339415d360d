pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod mcp;
pub mod shared;
pub mod system;

use axum::http::{header, HeaderName, Method};
use axum::middleware;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use system::auth::middleware::{require_admin, require_auth};
use system::middleware::request_logger::request_logger;

/// Guest-facing and auth routes, no token required
fn public_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route("/api/rooms", get(handlers::a001_room_type::list_available))
        .route(
            "/api/rooms/:id/book",
            post(handlers::a002_booking::book_room),
        )
}

/// Dashboard routes, bearer token required
fn protected_routes() -> Router {
    Router::new()
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        // A001 Room types
        .route(
            "/api/room_type",
            get(handlers::a001_room_type::list_all).post(handlers::a001_room_type::upsert),
        )
        .route(
            "/api/room_type/:id",
            get(handlers::a001_room_type::get_by_id).delete(handlers::a001_room_type::delete),
        )
        // A002 Bookings
        .route("/api/bookings", get(handlers::a002_booking::list_all))
        .route(
            "/api/bookings/:id",
            get(handlers::a002_booking::get_by_id)
                .put(handlers::a002_booking::update)
                .delete(handlers::a002_booking::delete),
        )
        .route(
            "/api/bookings/:id/cancel",
            delete(handlers::a002_booking::cancel),
        )
        // D100 Availability calendar
        .route(
            "/api/d100/availability",
            get(handlers::d100_availability_calendar::get_availability),
        )
        .route_layer(middleware::from_fn(require_auth))
}

/// Maintenance routes, administrator token required
fn admin_routes() -> Router {
    Router::new()
        .route(
            "/api/room_type/testdata",
            post(handlers::a001_room_type::insert_test_data),
        )
        .route_layer(middleware::from_fn(require_admin))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config);

    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::ensure_admin_user_exists(&config.auth.default_admin_password).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("mcp-session-id"),
            HeaderName::from_static("mcp-protocol-version"),
        ])
        .expose_headers([HeaderName::from_static("mcp-session-id")]);

    let mut app = Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .merge(admin_routes());
    if config.mcp.enabled {
        tracing::info!("MCP endpoint enabled at {}", mcp::MCP_PATH);
        app = app.merge(mcp::mcp_routes());
    }
    let app = app
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_assembles_with_auth_layers() {
        let _app: Router = Router::new()
            .merge(public_routes())
            .merge(protected_routes())
            .merge(admin_routes())
            .merge(mcp::mcp_routes());
    }
}
