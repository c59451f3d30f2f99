//! sqlexport - export a database's schema and rows as SQL over HTTP
//!
//! Requests are gated by the SHA-256 digest of an API key and answered
//! with JSON: table names, CREATE statements, INSERT statements or a
//! row count.

pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod dump;
pub mod export;
pub mod http_server;
pub mod observability;
