//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command opens the configured store, runs one core operation and
//! prints the result, as text or as the same JSON the HTTP API returns.

use crate::api::{self, ListResponse, NaturalLanguageResponse, RecordResponse, StatusResponse};
use crate::config::Settings;
use serde::Serialize;
use std::collections::BTreeMap;
use strand_core::primitives::STRUCTURED_FILTER_PARAMS;
use strand_core::{Interpreter, StrandError, StringRecord, build_structured_filter};

fn print_json<T: Serialize>(value: &T) -> Result<(), StrandError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| StrandError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_record(record: &StringRecord) {
    let props = record.properties();
    println!("Value:             {:?}", record.value());
    println!("ID:                {}", record.id());
    println!("Length:            {}", props.length);
    println!("Palindrome:        {}", props.is_palindrome);
    println!("Unique characters: {}", props.unique_characters);
    println!("Words:             {}", props.word_count);
    println!("Created:           {}", RecordResponse::from(record).created_at);
}

fn print_records(records: &[StringRecord]) {
    println!("{} matching string(s)", records.len());
    for record in records {
        println!(
            "  {}  len={:<4} words={:<3} palindrome={:<5} {:?}",
            record.id().as_str().get(..12).unwrap_or_default(),
            record.properties().length,
            record.properties().word_count,
            record.properties().is_palindrome,
            record.value()
        );
    }
}

/// Key the structured filter flags by their HTTP query parameter names.
/// `values` follows the order of `STRUCTURED_FILTER_PARAMS`; absent flags
/// are dropped.
pub fn list_params(
    values: [Option<String>; STRUCTURED_FILTER_PARAMS.len()],
) -> BTreeMap<String, String> {
    STRUCTURED_FILTER_PARAMS
        .into_iter()
        .zip(values)
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: &Settings) -> Result<(), StrandError> {
    let analyzer = settings.open_analyzer()?;

    println!("Strand Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", settings.host);
    println!("  Port:     {}", settings.port);
    println!("  Backend:  {}", settings.backend);
    println!("  Database: {:?}", settings.database);
    println!();
    println!("Endpoints:");
    println!("  POST   /strings                                  - Analyze a string");
    println!("  GET    /strings                                  - Filter strings");
    println!("  GET    /strings/filter-by-natural-language?query= - Natural-language filter");
    println!("  GET    /strings/{{string_value}}                   - Fetch a string");
    println!("  DELETE /strings/{{string_value}}                   - Delete a string");
    println!("  GET    /status                                   - Record count");
    println!("  GET    /health                                   - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&settings.addr(), analyzer).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show record count and backend.
pub fn cmd_status(settings: &Settings, json_mode: bool) -> Result<(), StrandError> {
    let analyzer = settings.open_analyzer()?;
    let status = StatusResponse {
        record_count: analyzer.count()?,
        backend: analyzer.backend_name().to_string(),
    };

    if json_mode {
        return print_json(&status);
    }

    println!("Strand Status");
    println!("=============");
    println!("Database: {:?}", settings.database);
    println!("Backend:  {}", status.backend);
    println!();
    println!("Records:  {}", status.record_count);

    Ok(())
}

// =============================================================================
// RECORD COMMANDS
// =============================================================================

/// Analyze and store a string.
pub fn cmd_analyze(settings: &Settings, json_mode: bool, value: &str) -> Result<(), StrandError> {
    let mut analyzer = settings.open_analyzer()?;
    let record = analyzer.analyze(value)?;

    if json_mode {
        return print_json(&RecordResponse::from(&record));
    }

    println!("Analyzed");
    print_record(&record);
    Ok(())
}

/// Show a stored string.
pub fn cmd_get(settings: &Settings, json_mode: bool, value: &str) -> Result<(), StrandError> {
    let analyzer = settings.open_analyzer()?;
    let record = analyzer.get(value)?;

    if json_mode {
        return print_json(&RecordResponse::from(&record));
    }

    print_record(&record);
    Ok(())
}

/// Delete a stored string.
pub fn cmd_delete(settings: &Settings, json_mode: bool, value: &str) -> Result<(), StrandError> {
    let mut analyzer = settings.open_analyzer()?;
    let record = analyzer.delete(value)?;

    if json_mode {
        return print_json(&serde_json::json!({ "deleted": record.id().as_str() }));
    }

    println!("Deleted {:?} ({})", record.value(), record.id());
    Ok(())
}

// =============================================================================
// FILTER COMMANDS
// =============================================================================

/// List strings matching structured filters.
pub fn cmd_list(
    settings: &Settings,
    json_mode: bool,
    params: &BTreeMap<String, String>,
) -> Result<(), StrandError> {
    let filter = build_structured_filter(params)?;
    let analyzer = settings.open_analyzer()?;
    let records = analyzer.list(&filter)?;

    if json_mode {
        return print_json(&ListResponse::new(&records, filter));
    }

    print_records(&records);
    Ok(())
}

/// List strings matching a natural-language phrase.
pub fn cmd_query(settings: &Settings, json_mode: bool, text: &str) -> Result<(), StrandError> {
    let interpreted = Interpreter::new()?.interpret(text)?;
    let analyzer = settings.open_analyzer()?;
    let records = analyzer.list(&interpreted.parsed_filters)?;

    if json_mode {
        return print_json(&NaturalLanguageResponse::new(&records, interpreted));
    }

    let filters = serde_json::to_string(&interpreted.parsed_filters)
        .map_err(|e| StrandError::Serialization(e.to_string()))?;
    println!("Interpreted as: {}", filters);
    print_records(&records);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
