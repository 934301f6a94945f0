//! Behavior and property tests for the in-memory vector store.

use docrag::{FileRecord, InMemoryVectorStore, RagError, VectorStore};
use proptest::prelude::*;

const OWNER: &str = "user-1";

fn texts(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("chunk {i}")).collect()
}

/// Generate a non-zero L2-normalized vector of the given dimension.
fn arb_normalized_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map("non-zero vector", |mut v| {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < 1e-8 {
            return None;
        }
        for val in &mut v {
            *val /= norm;
        }
        Some(v)
    })
}

#[tokio::test]
async fn nearest_chunk_wins_with_score_near_one() {
    let store = InMemoryVectorStore::new();
    store
        .put_chunks(OWNER, "file-1", &texts(2), &[vec![1.0, 0.0], vec![0.0, 1.0]])
        .await
        .unwrap();

    let results = store.query(OWNER, &[1.0, 0.0], 1, &[]).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "chunk 0");
    assert!((results[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn query_on_empty_owner_returns_nothing() {
    let store = InMemoryVectorStore::new();
    let results = store.query("nobody", &[1.0, 0.0], 6, &[]).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn file_filter_is_applied_before_scoring() {
    let store = InMemoryVectorStore::new();
    store.put_chunks(OWNER, "file-1", &texts(1), &[vec![1.0, 0.0]]).await.unwrap();
    store.put_chunks(OWNER, "file-2", &texts(1), &[vec![1.0, 0.0]]).await.unwrap();

    let only_one = vec!["file-1".to_string()];
    let results = store.query(OWNER, &[1.0, 0.0], 10, &only_one).await.unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.file_id == "file-1"));
}

#[tokio::test]
async fn owners_are_isolated() {
    let store = InMemoryVectorStore::new();
    store.put_chunks("alice", "file-1", &texts(1), &[vec![1.0, 0.0]]).await.unwrap();

    let results = store.query("bob", &[1.0, 0.0], 6, &[]).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn top_k_is_clamped_to_twenty() {
    let store = InMemoryVectorStore::new();
    store
        .put_chunks(OWNER, "file-1", &texts(25), &vec![vec![1.0, 0.0]; 25])
        .await
        .unwrap();

    let results = store.query(OWNER, &[1.0, 0.0], 100, &[]).await.unwrap();
    assert_eq!(results.len(), 20);

    // Zero is bumped up to one rather than rejected.
    let results = store.query(OWNER, &[1.0, 0.0], 0, &[]).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn mismatched_chunk_and_vector_counts_are_rejected() {
    let store = InMemoryVectorStore::new();

    let err = store
        .put_chunks(OWNER, "file-1", &texts(2), &[vec![1.0, 0.0]])
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::Validation(_)));

    let err = store.put_chunks(OWNER, "file-1", &[], &[]).await.unwrap_err();
    assert!(matches!(err, RagError::Validation(_)));
}

#[tokio::test]
async fn mixed_dimensionality_fails_the_query() {
    let store = InMemoryVectorStore::new();
    store.put_chunks(OWNER, "file-1", &texts(1), &[vec![1.0, 0.0]]).await.unwrap();

    let err = store.query(OWNER, &[1.0, 0.0, 0.0], 6, &[]).await.unwrap_err();
    assert!(matches!(err, RagError::Validation(_)));
}

#[tokio::test]
async fn chunk_indexes_preserve_input_order() {
    let store = InMemoryVectorStore::new();
    let ids = store
        .put_chunks(OWNER, "file-1", &texts(3), &vec![vec![1.0, 0.0]; 3])
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);

    // All three score identically; the query still returns all of them.
    let results = store.query(OWNER, &[1.0, 0.0], 20, &[]).await.unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn delete_file_cascades_and_is_idempotent() {
    let store = InMemoryVectorStore::new();
    let file = FileRecord::new(OWNER, "notes.txt", "text/plain", 42, 2);
    store.create_file(&file).await.unwrap();
    store.put_chunks(OWNER, &file.id, &texts(2), &vec![vec![1.0, 0.0]; 2]).await.unwrap();

    store.delete_file(OWNER, &file.id).await.unwrap();
    let results = store.query(OWNER, &[1.0, 0.0], 6, &[]).await.unwrap();
    assert!(results.is_empty());
    assert!(store.list_files(OWNER).await.unwrap().is_empty());

    // Deleting again is not an error.
    store.delete_file(OWNER, &file.id).await.unwrap();
    store.delete_file(OWNER, "never-existed").await.unwrap();
}

#[tokio::test]
async fn list_files_returns_owner_records() {
    let store = InMemoryVectorStore::new();
    let file = FileRecord::new(OWNER, "notes.txt", "text/plain", 42, 1);
    store.create_file(&file).await.unwrap();

    let files = store.list_files(OWNER).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "notes.txt");
    assert_eq!(files[0].chunk_count, 1);
    assert!(store.list_files("someone-else").await.unwrap().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any stored vectors and any query, results come back ordered by
    /// descending score and bounded by both the clamped top-k and the
    /// number of stored chunks.
    #[test]
    fn results_ordered_descending_and_bounded(
        vectors in proptest::collection::vec(arb_normalized_vector(8), 1..30),
        query in arb_normalized_vector(8),
        top_k in 0usize..30,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let results = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            store
                .put_chunks(OWNER, "file-1", &texts(vectors.len()), &vectors)
                .await
                .unwrap();
            store.query(OWNER, &query, top_k, &[]).await.unwrap()
        });

        prop_assert!(results.len() <= top_k.clamp(1, 20));
        prop_assert!(results.len() <= vectors.len());

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}
