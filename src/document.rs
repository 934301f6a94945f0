//! Data types for stored files, chunks, and retrieval results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contiguous slice of a source document's text, with its embedding.
///
/// Chunks are exclusively owned by the user identified by `owner_id`;
/// the vector store never returns chunks across owner boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Opaque identifier, unique within the store.
    pub id: String,
    /// Identifier of the user who owns the source file (namespace key).
    pub owner_id: String,
    /// Identifier of the source file this chunk belongs to.
    pub file_id: String,
    /// Zero-based position within the file's chunk sequence.
    pub index: usize,
    /// The chunk's text content (non-empty after trimming).
    pub text: String,
    /// The embedding vector. All chunks compared against each other must
    /// share one fixed dimensionality.
    pub vector: Vec<f32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Metadata for one uploaded document.
///
/// Created once at successful ingestion; `chunk_count` is fixed at
/// creation. Deleting a file cascades to its chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    /// Opaque identifier, unique within the store.
    pub id: String,
    /// Identifier of the owning user.
    pub owner_id: String,
    /// Original filename.
    pub name: String,
    /// Mime type reported at upload.
    pub mime_type: String,
    /// Upload size in bytes.
    pub size_bytes: u64,
    /// Number of chunks produced at ingestion.
    pub chunk_count: usize,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Create a new record with a fresh id and the current timestamp.
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        chunk_count: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            chunk_count,
            created_at: Utc::now(),
        }
    }
}

/// A retrieved chunk paired with its similarity score. Ephemeral, not
/// persisted; produced fresh for each query, ordered by descending score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalResult {
    /// Id of the matched chunk.
    pub chunk_id: String,
    /// Id of the file the chunk belongs to.
    pub file_id: String,
    /// The chunk's text content.
    pub text: String,
    /// Cosine similarity against the query vector. Conceptually in
    /// [-1, 1], typically [0, 1] for non-negative embeddings.
    pub score: f32,
}
