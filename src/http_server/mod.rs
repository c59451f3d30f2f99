//! # HTTP Server Module
//!
//! Axum server in front of the export engine.
//!
//! # Endpoints
//!
//! - `/` and `/export` - Key-gated export operations (GET or POST)
//! - `/health` - Health check

pub mod config;
pub mod export_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
