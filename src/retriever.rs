//! Query-time retrieval: embed the query, search the store, fail open.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::document::RetrievalResult;
use crate::embedding::EmbeddingProvider;
use crate::store::VectorStore;

/// Default number of results requested per retrieval.
pub const DEFAULT_TOP_K: usize = 6;

/// Embeds a chat query and runs a similarity search over the owner's
/// stored chunks.
///
/// Retrieval is an enhancement, not a required dependency of chat, so
/// this is the one fail-open component in the system: an empty query, an
/// embedding failure, or a store failure all degrade to an empty result
/// list instead of an error. Every call re-embeds the query; there is no
/// result caching.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a retriever over the given embedder and store.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Retrieve up to `top_k` chunks relevant to `query_text`, optionally
    /// restricted to the given file ids. Results are ordered by
    /// descending similarity.
    pub async fn retrieve(
        &self,
        owner_id: &str,
        query_text: &str,
        top_k: usize,
        file_ids: &[String],
    ) -> Vec<RetrievalResult> {
        if query_text.trim().is_empty() {
            return Vec::new();
        }

        let query_vector = match self.embedder.embed(query_text).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "query embedding failed, continuing without context");
                return Vec::new();
            }
        };

        match self.store.query(owner_id, &query_vector, top_k, file_ids).await {
            Ok(results) => {
                debug!(result_count = results.len(), "retrieval completed");
                results
            }
            Err(e) => {
                warn!(error = %e, "similarity search failed, continuing without context");
                Vec::new()
            }
        }
    }
}
