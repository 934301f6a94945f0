//! Error types for the `docrag` crate.

use std::fmt;

use thiserror::Error;

/// The ingestion stage that produced a failure.
///
/// Each stage has a different likely remediation (convert the file format,
/// check provider quota, check store connectivity), so ingestion errors
/// carry the stage they failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    /// Text extraction from the uploaded bytes.
    Extract,
    /// The batched embedding call.
    Embed,
    /// Writing the file record and chunks to the vector store.
    Persist,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IngestStage::Extract => "extraction",
            IngestStage::Embed => "embedding",
            IngestStage::Persist => "storage",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Malformed input to an operation (mismatched chunk/vector counts,
    /// vector dimensionality mismatch).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Extraction cannot handle the given mime type.
    #[error("Unsupported file type: {mime_type}")]
    UnsupportedFormat {
        /// The mime type that was rejected.
        mime_type: String,
    },

    /// A format handler accepted the mime type but could not parse the
    /// document's bytes (corrupt PDF, malformed DOCX archive).
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// An embedding backend failure (rate limit, auth, network). Never
    /// retried by the core.
    #[error("Embedding provider error ({provider}): {message}")]
    Provider {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A persistence failure in the vector store, surfaced unmodified.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An ingestion failure, labelled with the stage that failed.
    #[error("Ingestion failed during {stage}: {source}")]
    Ingest {
        /// The stage the pipeline was in when the failure occurred.
        stage: IngestStage,
        /// The underlying error.
        #[source]
        source: Box<RagError>,
    },

    /// The caller's cancellation signal fired before the pipeline finished.
    #[error("Ingestion cancelled")]
    Cancelled,
}

impl RagError {
    /// Wrap an error with the ingestion stage it occurred in.
    pub(crate) fn during(stage: IngestStage, source: RagError) -> Self {
        RagError::Ingest { stage, source: Box::new(source) }
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
