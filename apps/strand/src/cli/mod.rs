//! # Strand CLI Module
//!
//! This module implements the CLI interface for Strand.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `analyze` - Analyze and store a string
//! - `get` - Show the stored analysis of a string
//! - `list` - List strings matching structured filters
//! - `query` - List strings matching a natural-language phrase
//! - `delete` - Delete a stored string
//! - `status` - Show record count and backend (default)

mod commands;

use crate::config::{Overrides, Settings};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strand_core::StrandError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Strand - string analysis server
///
/// Computes properties of strings, stores them by content hash, and answers
/// structured and natural-language filter queries.
#[derive(Parser, Debug)]
#[command(name = "strand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the record database [default: strand.redb]
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend: "redb" (persistent) or "memory" (volatile) [default: redb]
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to [default: 127.0.0.1]
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to [default: 3000]
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze a string and store the result
    Analyze {
        /// The string to analyze
        value: String,
    },

    /// Show the stored analysis of a string
    Get {
        /// The exact string
        value: String,
    },

    /// List strings matching structured filters
    List {
        /// "true" or "false"
        #[arg(long)]
        is_palindrome: Option<String>,

        /// Minimum length in characters
        #[arg(long)]
        min_length: Option<String>,

        /// Maximum length in characters
        #[arg(long)]
        max_length: Option<String>,

        /// Exact number of words
        #[arg(long)]
        word_count: Option<String>,

        /// A single character the string must contain (case-sensitive)
        #[arg(long)]
        contains_character: Option<String>,
    },

    /// List strings matching a natural-language phrase
    Query {
        /// e.g. "single word palindromes"
        text: String,
    },

    /// Delete a stored string
    Delete {
        /// The exact string
        value: String,
    },

    /// Show record count and backend
    Status,
}

impl Cli {
    /// Command-line values that override environment and config file.
    fn overrides(&self) -> Overrides {
        let (host, port) = match &self.command {
            Some(Commands::Server { host, port }) => (host.clone(), *port),
            _ => (None, None),
        };
        Overrides {
            host,
            port,
            backend: self.backend.clone(),
            database: self.database.clone(),
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), StrandError> {
    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { .. }) => cmd_server(&settings).await,
        Some(Commands::Analyze { value }) => cmd_analyze(&settings, json_mode, &value),
        Some(Commands::Get { value }) => cmd_get(&settings, json_mode, &value),
        Some(Commands::List {
            is_palindrome,
            min_length,
            max_length,
            word_count,
            contains_character,
        }) => {
            let params = list_params([
                is_palindrome,
                min_length,
                max_length,
                word_count,
                contains_character,
            ]);
            cmd_list(&settings, json_mode, &params)
        }
        Some(Commands::Query { text }) => cmd_query(&settings, json_mode, &text),
        Some(Commands::Delete { value }) => cmd_delete(&settings, json_mode, &value),
        Some(Commands::Status) | None => cmd_status(&settings, json_mode),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_status() {
        let cli = Cli::parse_from(["strand"]);
        assert!(cli.command.is_none());
        assert!(cli.database.is_none());
    }

    #[test]
    fn server_flags_become_overrides() {
        let cli = Cli::parse_from([
            "strand", "--backend", "memory", "server", "--host", "0.0.0.0", "--port", "8081",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(overrides.port, Some(8081));
        assert_eq!(overrides.backend.as_deref(), Some("memory"));
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::parse_from(["strand", "list", "--is-palindrome", "true", "--min-length", "5"]);
        match cli.command {
            Some(Commands::List {
                is_palindrome,
                min_length,
                max_length,
                ..
            }) => {
                assert_eq!(is_palindrome.as_deref(), Some("true"));
                assert_eq!(min_length.as_deref(), Some("5"));
                assert!(max_length.is_none());
            }
            other => panic!("expected list, got {other:?}"),
        }
    }
}
