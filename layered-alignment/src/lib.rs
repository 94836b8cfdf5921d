#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Sentence alignment resolution for parallel corpora.
//!
//! ## Overview
//!
//! Parallel corpora ship sentence alignments per language pair. This crate
//! models those alignments and answers "which sentences in language B
//! translate sentence X of language A", directly or through a pivot
//! language. Alignment certainty drives the ranking of documents.
//!
//! ```
//! use layered_alignment::{Alignment, AlignmentResolver, AlignmentSet, LanguagePair};
//!
//! let sets = vec![AlignmentSet::new(LanguagePair::new("en", "nl"))
//!     .with(Alignment::from_targets("1;1").unwrap())
//!     .with(Alignment::from_targets("2;2 3").unwrap())];
//!
//! let resolution = AlignmentResolver::new().resolve(&sets, "en", "nl", "2");
//! assert_eq!(resolution.targets, vec!["2", "3"]);
//! assert_eq!(resolution.label, "1=>2");
//! ```
//!
//! ## Modules
//!
//! - [`alignment`] - Alignments, language pairs and per-document alignment sets
//! - [`resolver`] - Direct and pivot resolution with cardinality labels
//! - [`certainty`] - Average alignment certainty per document
//! - [`selection`] - Size filter, certainty ordering and limit for document lists
//! - [`segment_index`] - Lazy identifier index over the segments of a document
//! - [`errors`] - Error types

pub mod alignment;
pub mod certainty;
pub mod errors;
pub mod resolver;
pub mod segment_index;
pub mod selection;

pub use alignment::{parse_certainty, Alignment, AlignmentSet, LanguagePair, Side};
pub use certainty::{average_certainty, document_certainty};
pub use errors::{AlignmentError, AlignmentResult};
pub use resolver::{AlignmentResolver, LabelStyle, Resolution};
pub use segment_index::SegmentIndex;
pub use selection::FileSelection;
