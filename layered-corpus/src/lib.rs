#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Construction extraction over OPUS-style and DPC parallel corpora.
//!
//! ## Overview
//!
//! The [`Extractor`] reads the tagged documents of a source language,
//! finds constructions with [`layered_constructions::Matcher`], and looks up
//! the aligned sentences in the target languages with
//! [`layered_alignment::AlignmentResolver`]. Every match becomes a
//! [`ResultRow`], written as `;`-separated values by [`ResultWriter`].
//!
//! ```no_run
//! use std::path::Path;
//!
//! use layered_constructions::{ConstructionType, RuleTable};
//! use layered_corpus::{Extractor, ExtractorConfig, ResultWriter};
//!
//! let table = RuleTable::load(Path::new("rules.toml"))?;
//! let config = ExtractorConfig::new("en")
//!     .with_targets(["nl"])
//!     .with_construction(ConstructionType::Perfect);
//!
//! let mut extractor = Extractor::new(&table, config)?;
//! let mut writer = ResultWriter::create(Path::new("europarl-en.csv"))?;
//! extractor.process_folder(Path::new("europarl/en"), &mut writer)?;
//! writer.finish()?;
//! # Ok::<(), layered_corpus::CorpusError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Extraction options
//! - [`extractor`] - File selection and the per-document pipeline
//! - [`layout`] - Where documents, translations and alignment files live
//! - [`counter`] - Verb lemma frequencies
//! - [`xml`] - Reading and writing sentence XML
//! - [`links`] - Alignment files and their per-run cache
//! - [`document`] - Documents and their alignment data
//! - [`output`] - Result rows and CSV output
//! - [`translation`] - Cross-validation of translated lemmata
//! - [`errors`] - Error types

pub mod config;
pub mod counter;
pub mod document;
pub mod errors;
pub mod extractor;
pub mod layout;
pub mod links;
pub mod output;
pub mod translation;
pub mod xml;

pub use config::{ExtractorConfig, OutputMode};
pub use counter::{LemmaCount, VerbCounter};
pub use document::{Document, DocumentAlignments};
pub use errors::{CorpusError, CorpusResult};
pub use extractor::Extractor;
pub use layout::{list_filenames, CorpusLayout};
pub use links::{AlignmentFile, AlignmentStore, LinkGroup};
pub use output::{header, ResultRow, ResultWriter, TranslationColumns};
pub use translation::{check_translated, TranslationCheck, TranslationLookup};
pub use xml::{parse_sentences, read_sentences, sentence_to_xml};
