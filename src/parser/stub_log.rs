//! Stub log document parser.
//!
//! Parses the JSON documents a JIT writes when inline-cache stub telemetry
//! is enabled. Each document groups stubs under the bytecode operation they
//! were attached to:
//!
//! ```json
//! { "entries": [ { "op": "GetProp", "stubs": [ { "hash": "...", "call-count": 12 } ] } ] }
//! ```
//!
//! Parsing flattens the entries into a single record list, tagging every
//! stub with the op label of its enclosing entry so the label survives
//! merging across files.

use crate::utils::error::ParseError;
use log::debug;
use serde::Deserialize;

/// A single observed inline-cache stub.
///
/// **Public** - the unit the aggregation pipeline operates on
#[derive(Debug, Clone, PartialEq)]
pub struct StubRecord {
    /// Identity hash of the stub body. Equal hashes mean semantically
    /// identical stubs, even when captured in different JitScripts.
    pub hash: String,

    /// Times the stub was entered during its capture window
    pub call_count: u64,

    /// Bytecode operation the stub services, when known
    pub op: Option<String>,

    /// Share of total calls within the record set, in [0, 1].
    /// None until normalization populates it.
    pub call_ratio: Option<f64>,
}

impl StubRecord {
    /// Create a new record with no op label and no ratio
    ///
    /// **Public** - constructor
    pub fn new(hash: impl Into<String>, call_count: u64) -> Self {
        Self {
            hash: hash.into(),
            call_count,
            op: None,
            call_ratio: None,
        }
    }

    /// Attach a bytecode op label
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }
}

/// Raw stub as it appears in the log document.
/// Telemetry writes more fields than we consume; unknown ones are ignored.
#[derive(Debug, Clone, Deserialize)]
struct RawStub {
    hash: String,

    #[serde(rename = "call-count")]
    call_count: u64,
}

/// One log entry: a bytecode op and the stubs captured for it
#[derive(Debug, Clone, Deserialize)]
struct LogEntry {
    #[serde(default)]
    op: Option<String>,

    stubs: Vec<RawStub>,
}

/// Top-level stub log document
#[derive(Debug, Clone, Deserialize)]
struct StubLogDocument {
    entries: Vec<LogEntry>,
}

/// Parse one stub log document into flat records
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `text` - Full text of one stub log file
///
/// # Returns
/// One record per stub, in document order, each tagged with the op label
/// of its enclosing entry
///
/// # Errors
/// * `ParseError::InvalidFormat` - Empty document
/// * `ParseError::JsonError` - Malformed JSON or missing required fields
pub fn parse_stub_log(text: &str) -> Result<Vec<StubRecord>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::InvalidFormat("empty log document".to_string()));
    }

    let document: StubLogDocument = serde_json::from_str(text)?;
    let records = flatten_entries(document);

    debug!("Parsed {} stub records", records.len());

    Ok(records)
}

/// Flatten entries into records, propagating each entry's op label
///
/// **Private** - internal helper for parse_stub_log
fn flatten_entries(document: StubLogDocument) -> Vec<StubRecord> {
    let mut records = Vec::new();

    for entry in document.entries {
        for stub in entry.stubs {
            records.push(StubRecord {
                hash: stub.hash,
                call_count: stub.call_count,
                op: entry.op.clone(),
                call_ratio: None,
            });
        }
    }

    records
}
