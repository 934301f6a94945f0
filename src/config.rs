//! Configuration for ingestion and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters for the ingestion pipeline and retrieval defaults.
///
/// The defaults favor retrieval granularity over ingestion cost: windows
/// of 500 tokens with 50 tokens of overlap, smaller than the chunker's
/// general-purpose 2000/200.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in approximate tokens.
    pub chunk_tokens: usize,
    /// Overlap between consecutive chunks in approximate tokens.
    pub overlap_tokens: usize,
    /// Number of top results requested per retrieval.
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self { chunk_tokens: 500, overlap_tokens: 50, top_k: 6 }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a validated [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in tokens.
    pub fn chunk_tokens(mut self, tokens: usize) -> Self {
        self.config.chunk_tokens = tokens;
        self
    }

    /// Set the overlap between consecutive chunks in tokens.
    pub fn overlap_tokens(mut self, tokens: usize) -> Self {
        self.config.overlap_tokens = tokens;
        self
    }

    /// Set the number of top results requested per retrieval.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `overlap_tokens >= chunk_tokens`
    /// or `top_k == 0`.
    pub fn build(self) -> Result<RagConfig> {
        if self.config.overlap_tokens >= self.config.chunk_tokens {
            return Err(RagError::Config(format!(
                "overlap_tokens ({}) must be less than chunk_tokens ({})",
                self.config.overlap_tokens, self.config.chunk_tokens
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RagConfig::builder().build().unwrap();
        assert_eq!(config, RagConfig::default());
    }

    #[test]
    fn overlap_at_least_chunk_size_is_rejected() {
        let err = RagConfig::builder().chunk_tokens(100).overlap_tokens(100).build();
        assert!(matches!(err, Err(RagError::Config(_))));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = RagConfig::builder().top_k(0).build();
        assert!(matches!(err, Err(RagError::Config(_))));
    }
}
