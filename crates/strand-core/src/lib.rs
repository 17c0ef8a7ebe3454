//! # strand-core
//!
//! The string analysis and query-matching engine for Strand - THE LOGIC.
//!
//! This crate:
//! - Computes a fixed set of properties for any string (length, palindrome
//!   check, unique characters, word count, SHA-256, character frequency)
//! - Identifies records by the SHA-256 of their content
//! - Turns structured filter parameters or natural-language phrases into a
//!   canonical `FilterPredicate` and evaluates it against records
//! - Reaches storage only through the `RecordStore` trait
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: NO async, NO network, NO logging
//! - Every failure is a typed `StrandError`; nothing panics

// =============================================================================
// MODULES
// =============================================================================

pub mod analyzer;
pub mod filter;
pub mod identity;
pub mod interpreter;
pub mod predicate;
pub mod primitives;
pub mod properties;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Properties, RecordId, StrandError, StringRecord};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use analyzer::Analyzer;
pub use filter::build_structured_filter;
pub use interpreter::{InterpretedQuery, Interpreter};
pub use predicate::{CharacterMatch, FilterPredicate};
pub use storage::RedbStore;
pub use store::{MemoryStore, RecordStore, StoreBackend};
