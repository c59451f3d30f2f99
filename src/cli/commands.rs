//! CLI command implementations
//!
//! `serve` and `dump` load configuration, build the connection provider for
//! the configured engine, and drive the async work on a tokio runtime.
//! `hash-key` and `keygen` are offline helpers for producing the
//! `api_key_sha256` configuration value.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::auth::crypto::{generate_api_key, sha256_hex};
use crate::auth::ApiKeyGate;
use crate::config::Config;
use crate::db;
use crate::dump::dump_database;
use crate::export::Dispatcher;
use crate::http_server::HttpServer;
use crate::observability::{log_event_with_fields, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Run the CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::HashKey { key } => hash_key(&key),
        Command::Keygen { length } => keygen(length),
        Command::Dump { config, out, chunk } => dump(&config, &out, chunk),
    }
}

/// Serve the export endpoint until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let gate = ApiKeyGate::new(&config.api_key_sha256);
    if !gate.is_configured() {
        log_event_with_fields(
            Event::KeyHashUnconfigured,
            &[("setting", "api_key_sha256")],
        );
    }

    let dispatcher = Dispatcher::new(
        gate,
        db::provider(&config.database),
        config.request_defaults(),
    );
    let server = HttpServer::new(config.http.clone(), dispatcher);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        log_event_with_fields(Event::ServeFailed, &[("reason", reason.as_str())]);
        CliError::serve_failed(format!("HTTP server failed: {}", reason))
    })
}

/// Print the digest to put in `api_key_sha256`
pub fn hash_key(key: &str) -> CliResult<()> {
    println!("{}", sha256_hex(key));
    Ok(())
}

/// Print a fresh key and its digest
pub fn keygen(length: usize) -> CliResult<()> {
    if length == 0 {
        return Err(CliError::config_error("key length must be > 0"));
    }
    let key = generate_api_key(length);
    println!("key:            {}", key);
    println!("api_key_sha256: {}", sha256_hex(&key));
    Ok(())
}

/// Write a timestamped dump directory under `out`
pub fn dump(config_path: &Path, out: &Path, chunk: u64) -> CliResult<()> {
    let config = load_config(config_path)?;
    let provider = db::provider(&config.database);
    let target = dump_directory(out, &Local::now());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::dump_failed(format!("Failed to create tokio runtime: {}", e)))?;
    let summary = rt.block_on(dump_database(provider.as_ref(), &target, chunk))?;

    println!(
        "wrote {} tables ({} rows) to {}",
        summary.tables,
        summary.rows,
        target.display()
    );
    Ok(())
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load_or_default(config_path)?;

    let path = config_path.display().to_string();
    let source = if config_path.exists() { "file" } else { "defaults" };
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("path", path.as_str()),
            ("source", source),
            ("engine", config.database.engine.as_str()),
        ],
    );
    Ok(config)
}

/// Dump directory named after the minute the run started
fn dump_directory(out: &Path, now: &DateTime<Local>) -> PathBuf {
    out.join(now.format("%Y-%m-%d_%H-%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    use crate::cli::errors::CliErrorCode;

    #[test]
    fn test_dump_directory_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        let dir = dump_directory(Path::new("/backups"), &now);
        assert_eq!(dir, PathBuf::from("/backups/2024-03-09_07-05"));
    }

    #[test]
    fn test_invalid_config_fails_before_serving() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sqlexport.json");
        fs::write(&path, "{ broken").unwrap();

        let err = serve(&path, None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_dump_reports_connection_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sqlexport.json");
        let db_path = temp.path().join("missing").join("site.sqlite");
        fs::write(
            &path,
            serde_json::json!({
                "database": { "engine": "sqlite", "name": db_path.display().to_string() }
            })
            .to_string(),
        )
        .unwrap();

        let err = dump(&path, temp.path(), 100).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::DumpFailed);
    }

    #[test]
    fn test_keygen_rejects_zero_length() {
        let err = keygen(0).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_hash_key_succeeds() {
        assert!(hash_key("secret").is_ok());
    }
}
