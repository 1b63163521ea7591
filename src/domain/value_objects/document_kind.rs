//! Document kinds a compendium can hold

use std::fmt;

use serde::{Deserialize, Serialize};

/// The document type declared by a compendium
///
/// Extraction and mapping match on this exhaustively; anything the exporter
/// has no dedicated rule for lands in `Other` and gets the generic handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentKind {
    Item,
    Actor,
    JournalEntry,
    Adventure,
    Other(String),
}

impl DocumentKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "Item" => Self::Item,
            "Actor" => Self::Actor,
            "JournalEntry" => Self::JournalEntry,
            "Adventure" => Self::Adventure,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Item => "Item",
            Self::Actor => "Actor",
            Self::JournalEntry => "JournalEntry",
            Self::Adventure => "Adventure",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DocumentKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DocumentKind> for String {
    fn from(kind: DocumentKind) -> String {
        kind.as_str().to_string()
    }
}
