#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Rule-driven detection of multi-word verb constructions.
//!
//! This crate finds perfects (present and past, passive, continuous),
//! recent past periphrases, continuous constructions, "since" durations and
//! typed articles in sentences that were already part-of-speech tagged.
//! A [`PosQuery`] selects single words or token ranges by tag and pattern.
//!
//! ## Usage
//!
//! ```
//! use layered_constructions::{ConstructionType, Matcher, RuleTable, Sentence};
//!
//! let table = RuleTable::from_toml_str(r#"
//! [languages.en]
//! stop_tags = ["V"]
//!
//! [languages.en.perfect]
//! anchor = { tags = ["VHZ"], lemmata = ["have"] }
//! perfect_tags = ["VVN"]
//! "#).unwrap();
//!
//! let sentence = Sentence::from_tagged(
//!     &table.corpus,
//!     "1",
//!     "She|she|PP has|have|VHZ always|always|RB loved|love|VVN it|it|PP",
//! );
//!
//! let matcher = Matcher::new(&table, "en").unwrap();
//! let found = matcher.find_all(ConstructionType::Perfect, &sentence);
//! assert_eq!(found[0].construction_to_string(), "has loved");
//! assert_eq!(found[0].perfect_lemma(), "love");
//! ```
//!
//! ## Modules
//!
//! - [`rules`] - The typed per-language rule table, read from TOML
//! - [`sentence`] - Tokens and sentences as read from a corpus
//! - [`construction`] - The construction model built up during a match
//! - [`matcher`] - Anchor selection and dispatch to the construction variants
//! - [`tense`] - Naive sentence tense classification
//! - [`display`] - Debug rendering of constructions under their sentence

mod article;
mod continuous;
mod perfect;
mod pos;
mod recent_past;
mod since_duration;
mod walk;

pub mod construction;
pub mod display;
pub mod errors;
pub mod lemmata;
pub mod matcher;
pub mod rules;
pub mod sentence;
pub mod tense;

pub use construction::{Construction, ConstructionType, Word, MARKUP};
pub use display::ConstructionDisplay;
pub use errors::{RuleError, RuleResult};
pub use lemmata::LemmaFilter;
pub use matcher::{Matcher, PerfectMode};
pub use pos::PosQuery;
pub use rules::{
    AnchorRule, ArticleRules, ContinuousRules, CorpusAttrs, LanguageRules, PerfectRules,
    RecentPastRules, RuleTable, SinceDurationRules, Tense, TokenFields,
};
pub use sentence::{is_punctuation, Direction, Sentence, Token, PUNCTUATION};
pub use tense::{sentence_tense, SentenceTense, VerbForm};

#[cfg(test)]
mod tests {
    mod perfect;
    mod properties;
}
