//! Embedding provider trait for mapping text to dense vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-length embedding vectors.
///
/// The core treats embedding as an injected capability, not owned logic.
/// Input and output sequences of [`embed_batch`](EmbeddingProvider::embed_batch)
/// have equal length and corresponding order. Provider failures (rate
/// limit, auth, network) surface as [`RagError::Provider`](crate::RagError::Provider)
/// and are never retried by the core.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially. Backends with native batching should override it; the
    /// ingestion pipeline embeds all chunks of a file in one call.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// The fixed dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;
}
