//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// File name markers used to classify stub logs by process type.
// Content is checked first: a name containing both markers is content.
pub const CONTENT_MARKER: &str = "content";
pub const PARENT_MARKER: &str = "parent";

/// Decimal places kept when rounding call ratios
pub const RATIO_DECIMALS: u32 = 3;

/// Default number of ranked stubs kept in reports and summaries
pub const DEFAULT_TOP_STUBS: usize = 20;

/// Upper bound for the --top argument
pub const MAX_TOP_STUBS: usize = 1000;

/// Number of leading stubs echoed to the debug log after ranking
pub const PREVIEW_STUBS: usize = 5;
