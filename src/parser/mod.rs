//! Stub log parsing and schema definitions.
//!
//! This module handles:
//! - Parsing raw JSON stub log documents
//! - Flattening log entries into stub records
//! - Defining the output report schema

pub mod schema;
pub mod stub_log;

// Re-export main types
pub use schema::{OpSummary, RankedStub, StubReport};
pub use stub_log::{parse_stub_log, StubRecord};
