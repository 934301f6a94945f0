//! # docrag
//!
//! The retrieval-augmented generation core of a document-aware chat
//! product: ingestion of uploaded documents (extract → chunk → embed →
//! store) and query-time retrieval (embed → similarity search → context
//! assembly) over a per-user vector store.
//!
//! ## Overview
//!
//! - [`TokenChunker`] — overlapping, sentence-aware text windows
//! - [`EmbeddingProvider`] — injected embedding backend
//!   ([`openai::OpenAIEmbeddingProvider`] with the `openai` feature)
//! - [`VectorStore`] / [`InMemoryVectorStore`] — per-owner chunk storage
//!   with brute-force cosine search
//! - [`Retriever`] — fail-open query-time retrieval
//! - [`assemble_context`] — turns results into a system [`ChatMessage`]
//! - [`IngestionPipeline`] — the upload-time flow
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{
//!     IngestionPipeline, InMemoryVectorStore, Retriever, StandardExtractor,
//!     assemble_context, prepend_context,
//! };
//!
//! let store = Arc::new(InMemoryVectorStore::new());
//! let embedder = Arc::new(my_embedder);
//!
//! let pipeline = IngestionPipeline::builder()
//!     .extractor(Arc::new(StandardExtractor::new()))
//!     .embedder(embedder.clone())
//!     .store(store.clone())
//!     .build()?;
//! pipeline.ingest("user-1", &bytes, "notes.txt", "text/plain").await?;
//!
//! let retriever = Retriever::new(embedder, store);
//! let results = retriever.retrieve("user-1", "what did my notes say?", 6, &[]).await;
//! if let Some(context) = assemble_context(&results) {
//!     messages = prepend_context(context, messages);
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod inmemory;
pub mod message;
#[cfg(feature = "openai")]
pub mod openai;
pub mod pipeline;
pub mod retriever;
pub mod store;

pub use chunking::{Chunker, TokenChunker, count_tokens};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{assemble_context, prepend_context};
pub use document::{Chunk, FileRecord, RetrievalResult};
pub use embedding::EmbeddingProvider;
pub use error::{IngestStage, RagError, Result};
pub use extract::{StandardExtractor, TextExtractor};
pub use inmemory::InMemoryVectorStore;
pub use message::{ChatMessage, Role};
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
pub use pipeline::{
    IngestListener, IngestReport, IngestionPipeline, IngestionPipelineBuilder, MAX_UPLOAD_BYTES,
};
pub use retriever::{DEFAULT_TOP_K, Retriever};
pub use store::{MAX_TOP_K, MIN_TOP_K, VectorStore, cosine_similarity};
