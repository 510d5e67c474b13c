//! Core types for the knowledge base.

use serde::{Deserialize, Serialize};

/// Title used when a corpus segment has no `Title:` header.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Source used when a corpus segment has no `Source:` header.
pub const DEFAULT_SOURCE: &str = "Unknown";

/// One knowledge-base document parsed from the corpus.
///
/// Records are created once at ingestion and never modified; `content` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Stable identifier (`doc_<file>_<segment>`)
    pub id: String,

    /// Document title
    pub title: String,

    /// URL or `file://` reference
    pub source: String,

    /// Body text
    pub content: String,
}

impl DocumentRecord {
    /// Metadata half of the record.
    pub fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            title: self.title.clone(),
            source: self.source.clone(),
        }
    }
}

/// Title and source of a document, as returned by batch queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub source: String,
}

/// A document returned for a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The matched document
    pub document: DocumentRecord,

    /// 1-based position in the ranking
    pub rank: usize,

    /// Cosine similarity to the query
    pub score: f32,
}
