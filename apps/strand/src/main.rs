//! # Strand - String Analysis Server
//!
//! The main binary for the Strand string analysis engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for analysis and filtering
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/strand (THE BINARY)              │
//! │                                                      │
//! │   ┌─────────────┐   ┌─────────────┐   ┌──────────┐   │
//! │   │    CLI      │   │  HTTP API   │   │  Config  │   │
//! │   │   (clap)    │   │   (axum)    │   │  (toml)  │   │
//! │   └──────┬──────┘   └──────┬──────┘   └────┬─────┘   │
//! │          └─────────────────┼───────────────┘         │
//! │                            ▼                         │
//! │                    ┌───────────────┐                 │
//! │                    │  strand-core  │                 │
//! │                    │  (THE LOGIC)  │                 │
//! │                    └───────────────┘                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! strand server --host 0.0.0.0 --port 3000
//!
//! # CLI operations
//! strand analyze "A man, a plan, a canal: Panama"
//! strand list --is-palindrome true --min-length 5
//! strand query "single word palindromes"
//! strand status
//! ```

use clap::Parser;
use strand::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // STRAND_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("STRAND_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "strand=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Strand startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗████████╗██████╗  █████╗ ███╗   ██╗██████╗
  ██╔════╝╚══██╔══╝██╔══██╗██╔══██╗████╗  ██║██╔══██╗
  ███████╗   ██║   ██████╔╝███████║██╔██╗ ██║██║  ██║
  ╚════██║   ██║   ██╔══██╗██╔══██║██║╚██╗██║██║  ██║
  ███████║   ██║   ██║  ██║██║  ██║██║ ╚████║██████╔╝
  ╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═══╝╚═════╝

  String Analysis Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
