//! Error types for alignment parsing and resolution.

use thiserror::Error;

/// Errors that can occur while reading or resolving alignments.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignmentError {
    /// An alignment link without the `sources;targets` separator.
    #[error("malformed alignment targets {value:?}")]
    MalformedTargets { value: String },

    /// A certainty attribute that is not a number.
    #[error("invalid alignment certainty {value:?}")]
    InvalidCertainty { value: String },

    /// A segment identifier that cannot occur in an alignment.
    #[error("malformed segment identifier {id:?}")]
    MalformedSegment { id: String },

    /// No alignments were loaded for this language pair.
    #[error("no alignments between {from} and {to}")]
    MissingPair { from: String, to: String },
}

/// Result type for alignment operations.
pub type AlignmentResult<T> = Result<T, AlignmentError>;
