//! Error types for rule loading and matcher construction.

use thiserror::Error;

/// Errors that can occur while loading or querying the rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Error reading a rule file or lexicon from disk.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// Error parsing the rule table.
    #[error("failed to parse rule table {path}: {message}")]
    Parse { path: String, message: String },

    /// The rule table has no section for the requested language.
    #[error("no rules for language {language}")]
    UnknownLanguage { language: String },

    /// The language section exists but does not configure this construction type.
    #[error("no {construction} rules for language {language}")]
    MissingConstruction {
        language: String,
        construction: &'static str,
    },

    /// A word pattern is not a valid regular expression.
    #[error("invalid pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },
}

/// Result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
