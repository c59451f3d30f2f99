//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlexport serve --config <path> [--port <port>]
//! - sqlexport hash-key <key>
//! - sqlexport keygen [--length <n>]
//! - sqlexport dump --config <path> [--out <dir>] [--chunk <rows>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::auth::crypto::DEFAULT_KEY_LENGTH;
use crate::dump::DEFAULT_CHUNK;

/// sqlexport - export database schema and rows over a key-gated endpoint
#[derive(Parser, Debug)]
#[command(name = "sqlexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the export HTTP endpoint
    Serve {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./sqlexport.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the SHA-256 digest to configure for an API key
    HashKey {
        /// The plaintext API key
        key: String,
    },

    /// Generate a random API key and print it with its digest
    Keygen {
        /// Key length in characters
        #[arg(long, default_value_t = DEFAULT_KEY_LENGTH)]
        length: usize,
    },

    /// Write schema and rows to a timestamped directory of .sql files
    Dump {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./sqlexport.json")]
        config: PathBuf,

        /// Directory the timestamped dump directory is created in
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Rows per INSERT statement
        #[arg(long, default_value_t = DEFAULT_CHUNK, value_parser = clap::value_parser!(u64).range(1..))]
        chunk: u64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
