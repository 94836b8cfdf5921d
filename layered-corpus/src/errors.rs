//! Error types for corpus extraction.
//!
//! Configuration problems are fatal and surface when the extractor is
//! built. Problems with the alignment data of a single document are logged
//! and never reach the caller.

use layered_alignment::AlignmentError;
use layered_constructions::RuleError;
use thiserror::Error;

/// Errors that can occur while reading a corpus or writing results.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Error in the rule table, or a language/construction it lacks.
    #[error(transparent)]
    Rules(#[from] RuleError),

    /// Error in alignment data.
    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    /// Error reading a corpus file or directory.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// Error parsing a corpus or alignment file.
    #[error("malformed XML in {path}: {message}")]
    Xml { path: String, message: String },

    /// Error writing results.
    #[error("failed to write results: {message}")]
    Write { message: String },

    /// Error from a translation lookup service.
    #[error("translation lookup failed: {message}")]
    Lookup { message: String },
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
