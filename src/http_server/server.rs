//! # HTTP Server
//!
//! Combines the export endpoint and the health check into one Axum router.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use super::config::HttpServerConfig;
use super::export_routes::{export_routes, ExportState};
use super::observability_routes::health_routes;
use crate::export::Dispatcher;
use crate::observability::{log_event_with_fields, Event};

/// HTTP server for the export endpoint
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server that answers requests with `dispatcher`
    pub fn new(config: HttpServerConfig, dispatcher: Dispatcher) -> Self {
        let router = Self::build_router(dispatcher);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(dispatcher: Dispatcher) -> Router {
        let export_state = Arc::new(ExportState::new(dispatcher));

        Router::new()
            .merge(health_routes())
            .merge(export_routes(export_state))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        log_event_with_fields(Event::Serving, &[("addr", addr.as_str())]);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyGate;
    use crate::db::SqliteProvider;
    use crate::export::RequestDefaults;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            ApiKeyGate::new("unset"),
            Arc::new(SqliteProvider::new("/nonexistent/db.sqlite")),
            RequestDefaults::default(),
        )
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), dispatcher());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(9000), dispatcher());
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(HttpServerConfig::default(), dispatcher());
        let _router = server.router();
    }
}
