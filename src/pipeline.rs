//! Upload-time ingestion: extract → chunk → embed → persist.
//!
//! The pipeline is a straight sequential flow with no internal retries or
//! parallel fan-out; embedding is one batched call covering every chunk
//! of the file. All collaborators are injected through trait objects.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{IngestionPipeline, InMemoryVectorStore, StandardExtractor, RagConfig};
//!
//! let pipeline = IngestionPipeline::builder()
//!     .config(RagConfig::default())
//!     .extractor(Arc::new(StandardExtractor::new()))
//!     .embedder(Arc::new(my_embedder))
//!     .store(Arc::new(InMemoryVectorStore::new()))
//!     .build()?;
//!
//! let report = pipeline.ingest("user-1", &bytes, "notes.txt", "text/plain").await?;
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::chunking::{Chunker, TokenChunker};
use crate::config::RagConfig;
use crate::document::FileRecord;
use crate::embedding::EmbeddingProvider;
use crate::error::{IngestStage, RagError, Result};
use crate::extract::TextExtractor;
use crate::store::VectorStore;

/// Upload size ceiling the pipeline assumes has already been enforced at
/// the transport boundary. Not checked here.
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Outcome of one ingestion run.
///
/// `file_id` is `None` when the document's extracted text was empty after
/// trimming: the pipeline reports success with zero chunks and creates no
/// file record. Callers that want to tell trivial uploads apart from real
/// ones must inspect `file_id`; whether such uploads should instead fail
/// loudly is an open product decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Id of the created file record, if any chunks were stored.
    pub file_id: Option<String>,
    /// Number of chunks stored.
    pub chunk_count: usize,
}

/// Best-effort notification of a completed ingestion.
///
/// Invoked at most once, after a successful persist, with no retry; not
/// called for failed or zero-chunk runs. The explicit replacement for
/// fire-and-forget side-effect calls buried in request handlers.
pub trait IngestListener: Send + Sync {
    /// Called once after a document's chunks are persisted.
    fn on_ingested(&self, owner_id: &str, report: &IngestReport);
}

/// The document ingestion pipeline.
///
/// Construct one via [`IngestionPipeline::builder()`].
pub struct IngestionPipeline {
    config: RagConfig,
    extractor: Arc<dyn TextExtractor>,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    listener: Option<Arc<dyn IngestListener>>,
}

impl IngestionPipeline {
    /// Create a new [`IngestionPipelineBuilder`].
    pub fn builder() -> IngestionPipelineBuilder {
        IngestionPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Ingest one uploaded document for `owner_id`.
    ///
    /// Stages: extract text, short-circuit on empty text, chunk, embed
    /// all chunks in one batched call, persist the file record and then
    /// its chunks.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Ingest`] labelled with the failing stage.
    pub async fn ingest(
        &self,
        owner_id: &str,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<IngestReport> {
        self.ingest_with_cancellation(owner_id, bytes, filename, mime_type, &CancellationToken::new())
            .await
    }

    /// Like [`ingest`](IngestionPipeline::ingest), aborting early when
    /// `cancel` fires.
    ///
    /// Cancellation is checked explicitly between stages and raced
    /// against the in-flight embedding call. An abort before the persist
    /// stage leaves no file record behind.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Cancelled`] if the token fires before the
    /// persist stage completes, or [`RagError::Ingest`] on stage failure.
    pub async fn ingest_with_cancellation(
        &self,
        owner_id: &str,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
        cancel: &CancellationToken,
    ) -> Result<IngestReport> {
        // 1. Extract
        let text = self.extractor.extract(bytes, mime_type).await.map_err(|e| {
            error!(owner_id, filename, error = %e, "text extraction failed");
            RagError::during(IngestStage::Extract, e)
        })?;

        // 2. Empty-check: no file record for documents with no usable text
        if text.trim().is_empty() {
            info!(owner_id, filename, skipped = "empty_text", "ingestion produced no chunks");
            return Ok(IngestReport { file_id: None, chunk_count: 0 });
        }

        // 3. Chunk
        let chunks = self.chunker.chunk(&text);
        if chunks.is_empty() {
            info!(owner_id, filename, skipped = "empty_text", "ingestion produced no chunks");
            return Ok(IngestReport { file_id: None, chunk_count: 0 });
        }

        // 4. Embed, one batched call for the whole file
        if cancel.is_cancelled() {
            return Err(RagError::Cancelled);
        }
        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = tokio::select! {
            () = cancel.cancelled() => return Err(RagError::Cancelled),
            result = self.embedder.embed_batch(&texts) => result.map_err(|e| {
                error!(owner_id, filename, error = %e, "embedding failed during ingestion");
                RagError::during(IngestStage::Embed, e)
            })?,
        };
        if vectors.len() != chunks.len() {
            return Err(RagError::during(
                IngestStage::Embed,
                RagError::Validation(format!(
                    "embedder returned {} vectors for {} chunks",
                    vectors.len(),
                    chunks.len()
                )),
            ));
        }

        // 5. Persist: file record first, then its chunks
        if cancel.is_cancelled() {
            return Err(RagError::Cancelled);
        }
        let file =
            FileRecord::new(owner_id, filename, mime_type, bytes.len() as u64, chunks.len());
        self.store.create_file(&file).await.map_err(|e| {
            error!(owner_id, file_id = %file.id, error = %e, "failed to store file record");
            RagError::during(IngestStage::Persist, e)
        })?;
        self.store.put_chunks(owner_id, &file.id, &chunks, &vectors).await.map_err(|e| {
            error!(owner_id, file_id = %file.id, error = %e, "failed to store chunks");
            RagError::during(IngestStage::Persist, e)
        })?;

        info!(owner_id, file_id = %file.id, chunk_count = chunks.len(), "ingested document");

        let report = IngestReport { file_id: Some(file.id), chunk_count: chunks.len() };
        if let Some(listener) = &self.listener {
            listener.on_ingested(owner_id, &report);
        }
        Ok(report)
    }
}

/// Builder for constructing an [`IngestionPipeline`].
///
/// `extractor`, `embedder`, and `store` are required. The config defaults
/// to [`RagConfig::default()`] and the chunker to a [`TokenChunker`]
/// sized from the config.
#[derive(Default)]
pub struct IngestionPipelineBuilder {
    config: Option<RagConfig>,
    extractor: Option<Arc<dyn TextExtractor>>,
    chunker: Option<Arc<dyn Chunker>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    store: Option<Arc<dyn VectorStore>>,
    listener: Option<Arc<dyn IngestListener>>,
}

impl IngestionPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the text extractor.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Override the chunker built from the config.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set an optional best-effort ingest listener.
    pub fn listener(mut self, listener: Arc<dyn IngestListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Build the [`IngestionPipeline`], validating required fields and
    /// the chunking parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if a required collaborator is missing
    /// or the config's chunk/overlap sizes are inconsistent.
    pub fn build(self) -> Result<IngestionPipeline> {
        let config = self.config.unwrap_or_default();
        let extractor = self
            .extractor
            .ok_or_else(|| RagError::Config("extractor is required".to_string()))?;
        let embedder =
            self.embedder.ok_or_else(|| RagError::Config("embedder is required".to_string()))?;
        let store = self.store.ok_or_else(|| RagError::Config("store is required".to_string()))?;
        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(TokenChunker::new(config.chunk_tokens, config.overlap_tokens)?),
        };

        Ok(IngestionPipeline {
            config,
            extractor,
            chunker,
            embedder,
            store,
            listener: self.listener,
        })
    }
}
