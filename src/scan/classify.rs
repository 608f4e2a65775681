//! Process classification for stub log files.
//!
//! A capture run drops one log per browser process into the log directory,
//! and the file name carries the process type. Classification is a
//! substring match on the name; files matching neither marker belong to
//! neither set.

use crate::utils::config::{CONTENT_MARKER, PARENT_MARKER};
use serde::{Deserialize, Serialize};

/// Browser process type a stub log belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    Content,
    Parent,
}

impl ProcessKind {
    /// Classify a log file by its name
    ///
    /// **Public** - used by the scanner to route records
    ///
    /// Returns None when the name carries no process marker. The content
    /// marker takes precedence when a name contains both.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.contains(CONTENT_MARKER) {
            Some(Self::Content)
        } else if name.contains(PARENT_MARKER) {
            Some(Self::Parent)
        } else {
            None
        }
    }

    /// Stable lowercase name, matching the report schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Parent => "parent",
        }
    }

    /// Both kinds, in the order distributions are computed and displayed
    pub fn all() -> [ProcessKind; 2] {
        [Self::Parent, Self::Content]
    }
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "parent" => Ok(Self::Parent),
            other => Err(format!("unknown process kind: {}", other)),
        }
    }
}
