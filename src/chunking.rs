//! Text chunking for embedding and retrieval.
//!
//! Splits extracted document text into overlapping, bounded-size segments.
//! Sizes are expressed in approximate tokens (4 characters per token, no
//! real tokenizer dependency).

use crate::error::{RagError, Result};

/// Approximate characters per token for GPT-family models.
const CHARS_PER_TOKEN: usize = 4;

/// Approximate token count of a text (4 characters per token, rounded up).
pub fn count_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// A strategy for splitting extracted text into chunks.
///
/// Implementations are pure: the same input and parameters always produce
/// the same chunk sequence.
pub trait Chunker: Send + Sync {
    /// Split text into chunks. Returns an empty `Vec` for empty input.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Splits text into overlapping windows sized in approximate tokens.
///
/// Each window is at most `max_tokens * 4` characters. The window end is
/// moved back to the last sentence boundary ('.', '!' or '?' followed by
/// whitespace) when one exists past the step, so chunks avoid splitting
/// mid-sentence. The walk always advances by
/// `(max_tokens - overlap_tokens) * 4` characters, so consecutive chunks
/// overlap. A boundary cut never pulls the window end before the next
/// window's start, so every character of the source lands in at least one
/// chunk. Chunks are trimmed; empty results are dropped.
#[derive(Debug, Clone)]
pub struct TokenChunker {
    max_tokens: usize,
    overlap_tokens: usize,
}

impl TokenChunker {
    /// General-purpose default window size in tokens.
    pub const DEFAULT_MAX_TOKENS: usize = 2000;
    /// General-purpose default overlap in tokens.
    pub const DEFAULT_OVERLAP_TOKENS: usize = 200;

    /// Create a chunker with the given window and overlap sizes in tokens.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `max_tokens` is zero or
    /// `overlap_tokens >= max_tokens` (the walk would never advance).
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(RagError::Config("max_tokens must be greater than zero".to_string()));
        }
        if overlap_tokens >= max_tokens {
            return Err(RagError::Config(format!(
                "overlap_tokens ({overlap_tokens}) must be less than max_tokens ({max_tokens})"
            )));
        }
        Ok(Self { max_tokens, overlap_tokens })
    }
}

impl Default for TokenChunker {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            overlap_tokens: Self::DEFAULT_OVERLAP_TOKENS,
        }
    }
}

/// Index of the last sentence-ending punctuation char that is followed by
/// whitespace, within the window.
fn last_sentence_boundary(window: &[char]) -> Option<usize> {
    window
        .windows(2)
        .enumerate()
        .rev()
        .find(|(_, pair)| matches!(pair[0], '.' | '!' | '?') && pair[1].is_whitespace())
        .map(|(i, _)| i)
}

impl Chunker for TokenChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let char_size = self.max_tokens * CHARS_PER_TOKEN;
        let step = (self.max_tokens - self.overlap_tokens) * CHARS_PER_TOKEN;

        // Indexing by char keeps window math safe for multi-byte text.
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let window_end = (start + char_size).min(chars.len());
            let mut end = window_end;

            // Prefer a sentence boundary, but only past the step: a cut
            // before the next window's start would leave the characters in
            // between out of every chunk.
            if window_end < chars.len() {
                if let Some(boundary) = last_sentence_boundary(&chars[start..window_end]) {
                    if boundary > step {
                        end = start + boundary + 1;
                    }
                }
            }

            let chunk: String = chars[start..end].iter().collect();
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            start += step;
        }

        chunks
    }
}
