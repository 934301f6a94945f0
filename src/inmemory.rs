//! In-memory vector store.
//!
//! Brute-force linear scan over per-owner chunk lists. Adequate for the
//! tens-to-low-hundreds of chunks a single user's document collection
//! holds; larger scale needs an indexed nearest-neighbor backend behind
//! the same [`VectorStore`] trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{Chunk, FileRecord, RetrievalResult};
use crate::error::{RagError, Result};
use crate::store::{VectorStore, clamp_top_k, cosine_similarity};

#[derive(Debug, Default)]
struct OwnerState {
    files: HashMap<String, FileRecord>,
    chunks: Vec<Chunk>,
}

/// A [`VectorStore`] backed by process memory.
///
/// State is namespaced per owner and guarded by a `tokio::sync::RwLock`,
/// so concurrent ingestions and queries are safe.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.put_chunks("user-1", "file-1", &texts, &vectors).await?;
/// let results = store.query("user-1", &query_vector, 6, &[]).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    owners: RwLock<HashMap<String, OwnerState>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks currently stored for an owner.
    pub async fn chunk_count(&self, owner_id: &str) -> usize {
        let owners = self.owners.read().await;
        owners.get(owner_id).map_or(0, |state| state.chunks.len())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_file(&self, file: &FileRecord) -> Result<()> {
        let mut owners = self.owners.write().await;
        let state = owners.entry(file.owner_id.clone()).or_default();
        state.files.insert(file.id.clone(), file.clone());
        Ok(())
    }

    async fn put_chunks(
        &self,
        owner_id: &str,
        file_id: &str,
        texts: &[String],
        vectors: &[Vec<f32>],
    ) -> Result<Vec<String>> {
        if texts.is_empty() || vectors.is_empty() {
            return Err(RagError::Validation(
                "chunks and vectors must both be non-empty".to_string(),
            ));
        }
        if texts.len() != vectors.len() {
            return Err(RagError::Validation(format!(
                "chunks and vectors must have the same length ({} vs {})",
                texts.len(),
                vectors.len()
            )));
        }

        let mut owners = self.owners.write().await;
        let state = owners.entry(owner_id.to_string()).or_default();

        // Best-effort sequential inserts, index preserved in input order.
        let now = Utc::now();
        let mut ids = Vec::with_capacity(texts.len());
        for (index, (text, vector)) in texts.iter().zip(vectors.iter()).enumerate() {
            let id = Uuid::new_v4().to_string();
            state.chunks.push(Chunk {
                id: id.clone(),
                owner_id: owner_id.to_string(),
                file_id: file_id.to_string(),
                index,
                text: text.clone(),
                vector: vector.clone(),
                created_at: now,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn query(
        &self,
        owner_id: &str,
        query_vector: &[f32],
        top_k: usize,
        file_ids: &[String],
    ) -> Result<Vec<RetrievalResult>> {
        let top_k = clamp_top_k(top_k);

        let owners = self.owners.read().await;
        let Some(state) = owners.get(owner_id) else {
            return Ok(Vec::new());
        };

        // Pre-filter by file before any scoring happens.
        let candidates = state
            .chunks
            .iter()
            .filter(|chunk| file_ids.is_empty() || file_ids.contains(&chunk.file_id));

        let mut results = Vec::new();
        for chunk in candidates {
            let score = cosine_similarity(&chunk.vector, query_vector)?;
            results.push(RetrievalResult {
                chunk_id: chunk.id.clone(),
                file_id: chunk.file_id.clone(),
                text: chunk.text.clone(),
                score,
            });
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }

    async fn delete_file(&self, owner_id: &str, file_id: &str) -> Result<()> {
        let mut owners = self.owners.write().await;
        if let Some(state) = owners.get_mut(owner_id) {
            state.chunks.retain(|chunk| chunk.file_id != file_id);
            state.files.remove(file_id);
        }
        Ok(())
    }

    async fn list_files(&self, owner_id: &str) -> Result<Vec<FileRecord>> {
        let owners = self.owners.read().await;
        let mut files: Vec<FileRecord> = owners
            .get(owner_id)
            .map(|state| state.files.values().cloned().collect())
            .unwrap_or_default();
        files.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(files)
    }
}
