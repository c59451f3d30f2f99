//! CLI module for sqlexport
//!
//! Provides command-line interface for:
//! - serve: Run the key-gated export endpoint
//! - hash-key: Print the digest of an API key
//! - keygen: Generate an API key and its digest
//! - dump: Write schema and rows to local .sql files

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{dump, hash_key, keygen, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
