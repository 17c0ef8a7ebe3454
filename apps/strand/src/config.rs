//! # Configuration
//!
//! Resolves server and storage settings from, in order of precedence:
//! command-line flags, environment variables, a TOML file, then defaults.
//!
//! ## TOML file
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! backend = "redb"   # or "memory"
//! database = "strand.redb"
//! ```
//!
//! ## Environment
//!
//! - `STRAND_HOST`, `PORT`, `STRAND_BACKEND`, `STRAND_DATABASE`
//!
//! HTTP hardening (`STRAND_CORS_ORIGINS`, `STRAND_RATE_LIMIT`,
//! `STRAND_API_KEY`) is read by the API module at router construction.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strand_core::{Analyzer, StrandError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "strand.redb";

// =============================================================================
// BACKEND
// =============================================================================

/// Which record store to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Persistent redb database.
    #[default]
    Redb,
    /// Volatile in-memory store; the database path is ignored.
    Memory,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redb => "redb",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = StrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redb" => Ok(Self::Redb),
            "memory" => Ok(Self::Memory),
            _ => Err(StrandError::validation("backend", "must be redb or memory")),
        }
    }
}

// =============================================================================
// FILE CONFIG
// =============================================================================

/// Contents of a TOML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub backend: Option<String>,
    pub database: Option<PathBuf>,
}

impl FileConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, StrandError> {
        toml::from_str(text).map_err(|e| StrandError::Serialization(format!("Config: {}", e)))
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, StrandError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StrandError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }
}

// =============================================================================
// OVERRIDES & SETTINGS
// =============================================================================

/// Values given on the command line. `None` defers to lower layers.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub backend: Option<String>,
    pub database: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub database: PathBuf,
}

impl Settings {
    /// Resolve settings against the process environment and an optional
    /// config file.
    pub fn load(config_path: Option<&Path>, cli: &Overrides) -> Result<Self, StrandError> {
        let file = match config_path {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, |key| std::env::var(key).ok(), &file)
    }

    /// Resolve settings with an explicit environment lookup.
    pub fn resolve(
        cli: &Overrides,
        env: impl Fn(&str) -> Option<String>,
        file: &FileConfig,
    ) -> Result<Self, StrandError> {
        let env_port = env("PORT")
            .map(|raw| {
                raw.parse::<u16>()
                    .map_err(|_| StrandError::validation("PORT", "must be a port number"))
            })
            .transpose()?;

        let host = cli
            .host
            .clone()
            .or_else(|| env("STRAND_HOST"))
            .or_else(|| file.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli
            .port
            .or(env_port)
            .or(file.server.port)
            .unwrap_or(DEFAULT_PORT);

        let backend = match cli
            .backend
            .clone()
            .or_else(|| env("STRAND_BACKEND"))
            .or_else(|| file.storage.backend.clone())
        {
            Some(name) => name.parse()?,
            None => Backend::default(),
        };

        let database = cli
            .database
            .clone()
            .or_else(|| env("STRAND_DATABASE").map(PathBuf::from))
            .or_else(|| file.storage.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        Ok(Self {
            host,
            port,
            backend,
            database,
        })
    }

    /// `host:port` for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured record store.
    pub fn open_analyzer(&self) -> Result<Analyzer, StrandError> {
        match self.backend {
            Backend::Redb => Analyzer::with_redb(&self.database),
            Backend::Memory => Ok(Analyzer::in_memory()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
