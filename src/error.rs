//! Failure taxonomy for tree generation.

use thiserror::Error;

/// The only hard failure mode: running out of memory while growing one of the
/// two big buffers. Everything else (bad weights, unbalanced brackets, zero
/// tessellation counts) is absorbed silently so that malformed grammars still
/// produce *something*.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// The sentence buffer could not grow during grammar expansion.
    ///
    /// `sentence_len` is the sentence length at the time of failure; retry
    /// with fewer generations or less explosive rules.
    #[error("grammar expansion out of memory at sentence length {sentence_len}")]
    Expansion { sentence_len: usize },

    /// The vertex buffer could not grow during geometry emission.
    ///
    /// `vertex_count` is the number of vertices emitted so far; retry with
    /// tighter pruning or lower tessellation.
    #[error("geometry emission out of memory at {vertex_count} vertices")]
    Emission { vertex_count: usize },
}
