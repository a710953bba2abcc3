//! Source documents and text chunks.
//!
//! A [`Document`] is one file fetched from a repository; a [`Chunk`] is a
//! bounded-size slice of a document's text that inherits the document's
//! source metadata. Both are immutable once created.

use serde::{Deserialize, Serialize};

/// Where a piece of text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File path within the repository (e.g., "src/Main.scala").
    pub path: String,
    /// Repository identifier in "owner/name" form.
    pub repo: String,
    /// Branch the file was read from.
    pub branch: String,
}

/// One file's full text plus its source metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: SourceMetadata,
}

/// A bounded-size contiguous slice of a document's text.
///
/// Neighboring chunks from the same document may overlap by a fixed
/// character count. Metadata is inherited from the parent document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: SourceMetadata,
}
