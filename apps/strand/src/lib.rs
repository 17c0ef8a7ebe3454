//! # Strand
//!
//! Application layer over `strand-core`: the HTTP API, the CLI and
//! configuration loading. The binary in `main.rs` only sets up logging and
//! dispatches to [`cli::execute`].

pub mod api;
pub mod cli;
pub mod config;
