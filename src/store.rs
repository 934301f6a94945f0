//! Vector store trait and similarity scoring.

use async_trait::async_trait;

use crate::document::{FileRecord, RetrievalResult};
use crate::error::{RagError, Result};

/// Smallest accepted `top_k` for a similarity query.
pub const MIN_TOP_K: usize = 1;
/// Largest accepted `top_k` for a similarity query.
pub const MAX_TOP_K: usize = 20;

/// Clamp a caller-supplied `top_k` into [`MIN_TOP_K`, `MAX_TOP_K`].
pub fn clamp_top_k(top_k: usize) -> usize {
    top_k.clamp(MIN_TOP_K, MAX_TOP_K)
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude, so a degenerate
/// vector never injects NaN into ranking.
///
/// # Errors
///
/// Returns [`RagError::Validation`] when the vectors have different
/// lengths. Mixed dimensionality is never truncated or zero-padded.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RagError::Validation(format!(
            "vector dimensionality mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

/// Persistent storage for file records and chunk embeddings, namespaced
/// by owner and source file.
///
/// Implementations surface persistence-layer errors unmodified and never
/// retry internally; callers decide retry policy. Writes only insert new
/// records or delete by file, so the store is safe under concurrent
/// writers scoped to different `owner_id`/`file_id` pairs.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store a file metadata record.
    async fn create_file(&self, file: &FileRecord) -> Result<()>;

    /// Store chunks with their vectors for one file, assigning positional
    /// indexes in input order. Returns the new chunk ids.
    ///
    /// Writes are best-effort sequential, not transactional: a failure
    /// at chunk N of M may leave the first N-1 chunks persisted.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if `texts` and `vectors` differ in
    /// length or either is empty.
    async fn put_chunks(
        &self,
        owner_id: &str,
        file_id: &str,
        texts: &[String],
        vectors: &[Vec<f32>],
    ) -> Result<Vec<String>>;

    /// Return the `top_k` most similar chunks for the owner, ordered by
    /// descending cosine similarity.
    ///
    /// `top_k` is clamped to [`MIN_TOP_K`, `MAX_TOP_K`] regardless of the
    /// caller's input. A non-empty `file_ids` restricts the candidate set
    /// before scoring; non-matching chunks are never scored. An owner
    /// with no stored chunks yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if a stored vector's
    /// dimensionality differs from the query vector's.
    async fn query(
        &self,
        owner_id: &str,
        query_vector: &[f32],
        top_k: usize,
        file_ids: &[String],
    ) -> Result<Vec<RetrievalResult>>;

    /// Remove a file record and all chunks belonging to it. Idempotent:
    /// deleting a nonexistent file is not an error.
    async fn delete_file(&self, owner_id: &str, file_id: &str) -> Result<()>;

    /// List all file records for an owner.
    async fn list_files(&self, owner_id: &str) -> Result<Vec<FileRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_vector_with_itself_is_one() {
        let v = [0.3f32, -1.2, 4.5, 0.01];
        let score = cosine_similarity(&v, &v).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let v = [1.0f32, 2.0, 3.0];
        let zero = [0.0f32, 0.0, 0.0];
        assert_eq!(cosine_similarity(&v, &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = [0.5f32, 1.5, -2.0];
        let b = [1.0f32, 0.0, 0.25];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), cosine_similarity(&b, &a).unwrap());
    }

    #[test]
    fn cosine_rejects_mismatched_dimensions() {
        let a = [1.0f32, 2.0];
        let b = [1.0f32, 2.0, 3.0];
        assert!(matches!(cosine_similarity(&a, &b), Err(RagError::Validation(_))));
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        assert!(cosine_similarity(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn top_k_is_clamped_to_range() {
        assert_eq!(clamp_top_k(0), 1);
        assert_eq!(clamp_top_k(6), 6);
        assert_eq!(clamp_top_k(100), 20);
    }
}
