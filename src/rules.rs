//! The per-language rule table.
//!
//! Rules are read once from a TOML document into strongly typed records.
//! Matchers only ever look at these records; there is no string-keyed
//! lookup at match time.
//!
//! ```toml
//! [corpus]
//! id = "id"
//! lemma = "lem"
//! pos = "tree"
//!
//! [languages.en]
//! stop_tags = ["V", "MD"]
//!
//! [languages.en.perfect]
//! anchor = { tags = ["VBZ", "VBP"], lemmata = ["have"] }
//! anchor_past = { tags = ["VBD"], lemmata = ["have"] }
//! perfect_tags = ["VBN"]
//! passive = true
//! passive_lemma = "be"
//! continuous = true
//! continuous_tags = ["VBG"]
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{RuleError, RuleResult};
use crate::sentence::Token;

/// Tense of a perfect construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    #[default]
    Present,
    Past,
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Present => f.write_str("present"),
            Tense::Past => f.write_str("past"),
        }
    }
}

/// Corpus-wide attribute and element names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusAttrs {
    /// Attribute holding token identifiers
    pub id: String,
    /// Attribute holding sentence identifiers (`n` in TEI documents)
    pub sentence_id: String,
    /// Attribute holding the lemma
    pub lemma: String,
    /// Default attribute holding the part-of-speech tag
    pub pos: String,
    /// Element name of sentences
    pub sentence_tag: String,
    /// Element name of words
    pub word_tag: String,
}

impl Default for CorpusAttrs {
    fn default() -> Self {
        CorpusAttrs {
            id: "id".into(),
            sentence_id: "id".into(),
            lemma: "lem".into(),
            pos: "pos".into(),
            sentence_tag: "s".into(),
            word_tag: "w".into(),
        }
    }
}

/// Predicate selecting candidate anchors by tag and lemma.
///
/// An empty list admits everything for that field. Ambiguous lemmata such as
/// `suivre|être` match when any alternative is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorRule {
    pub tags: Vec<String>,
    pub lemmata: Vec<String>,
}

impl AnchorRule {
    pub fn admits(&self, pos: &str, lemma: &str) -> bool {
        (self.tags.is_empty() || self.tags.iter().any(|t| t == pos))
            && (self.lemmata.is_empty()
                || lemma
                    .split('|')
                    .any(|alt| self.lemmata.iter().any(|l| l == alt)))
    }
}

/// Rules for (present/past) perfects, passive perfects and perfect continuous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfectRules {
    /// Candidate auxiliaries for the present tense
    pub anchor: AnchorRule,
    /// Candidate auxiliaries for the past tense, falls back to `anchor`
    pub anchor_past: Option<AnchorRule>,
    /// Permitted lowercase auxiliary forms; empty permits every form
    pub aux_words: Vec<String>,
    /// Permitted past tense auxiliary forms, falls back to `aux_words`
    pub aux_words_past: Option<Vec<String>>,
    /// Tags completing the construction (past participles)
    pub perfect_tags: Vec<String>,
    /// Whether passive perfects are searched for
    pub passive: bool,
    /// Lemma of the participle that may start a passive continuation ("be")
    pub passive_lemma: Option<String>,
    /// Whether perfect continuous is searched for
    pub continuous: bool,
    /// Tags completing a continuous continuation (gerunds)
    pub continuous_tags: Vec<String>,
    /// Whether a participle may precede its auxiliary
    pub allow_reversed: bool,
    /// Alternate auxiliary lemma whose perfects are lexically bound ("être", "zijn")
    pub lexical_bound: Option<String>,
    /// Participle lemmata that combine with the alternate auxiliary
    pub aux_be: Vec<String>,
    /// Lexicon file with more `aux_be` lemmata, relative to the rule file
    pub aux_be_file: Option<PathBuf>,
    /// Reflexive pronoun lemmata ("se", "me", ...)
    pub reflexive_lemmata: Vec<String>,
    /// Reflexive lemmata that are also subject pronouns ("nous", "vous")
    pub reflexive_ambiguous: Vec<String>,
    /// Tag a subject pronoun must carry before an ambiguous reflexive
    pub reflexive_subject_tag: Option<String>,
}

impl PerfectRules {
    pub fn anchor_for(&self, tense: Tense) -> &AnchorRule {
        match tense {
            Tense::Past => self.anchor_past.as_ref().unwrap_or(&self.anchor),
            Tense::Present => &self.anchor,
        }
    }

    pub fn aux_words_for(&self, tense: Tense) -> &[String] {
        match tense {
            Tense::Past => self.aux_words_past.as_deref().unwrap_or(self.aux_words.as_slice()),
            Tense::Present => &self.aux_words,
        }
    }

    pub fn is_perfect_tag(&self, pos: &str) -> bool {
        self.perfect_tags.iter().any(|t| t == pos)
    }

    pub fn is_continuous_tag(&self, pos: &str) -> bool {
        self.continuous_tags.iter().any(|t| t == pos)
    }

    pub fn is_passive_lemma(&self, lemma: &str) -> bool {
        self.passive_lemma.as_deref() == Some(lemma)
    }
}

/// Rules for the recent past periphrasis ("venir de" + infinitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentPastRules {
    pub anchor: AnchorRule,
    pub preposition_tags: Vec<String>,
    pub preposition_lemma: String,
    pub infinitive_tag: String,
    pub label: String,
}

impl Default for RecentPastRules {
    fn default() -> Self {
        RecentPastRules {
            anchor: AnchorRule::default(),
            preposition_tags: Vec::new(),
            preposition_lemma: String::new(),
            infinitive_tag: String::new(),
            label: "passé récent".into(),
        }
    }
}

/// Rules for continuous constructions (auxiliary + gerund).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousRules {
    pub anchor: AnchorRule,
    pub gerund_tags: Vec<String>,
    pub label: String,
}

impl Default for ContinuousRules {
    fn default() -> Self {
        ContinuousRules {
            anchor: AnchorRule::default(),
            gerund_tags: Vec::new(),
            label: "present continuous".into(),
        }
    }
}

/// Rules for "since" + number + unit of time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinceDurationRules {
    pub since_lemmata: Vec<String>,
    pub number_tags: Vec<String>,
    pub time_units: Vec<String>,
}

impl SinceDurationRules {
    pub fn is_since(&self, lemma: &str) -> bool {
        self.since_lemmata.iter().any(|l| l == lemma)
    }

    pub fn is_number_tag(&self, pos: &str) -> bool {
        self.number_tags.iter().any(|t| t == pos)
    }

    pub fn is_time_unit(&self, lemma: &str) -> bool {
        self.time_units.iter().any(|l| l == lemma)
    }
}

/// Rules for article typing (definite / indefinite / partitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRules {
    pub tags: Vec<String>,
    /// Article lemmata; empty means `definite` and `indefinite` only
    pub lemmata: Vec<String>,
    pub definite: String,
    pub indefinite: String,
    pub particles: Vec<String>,
    /// Surface form that is both indefinite and partitive ("des")
    pub ambiguous_form: Option<String>,
}

impl Default for ArticleRules {
    fn default() -> Self {
        ArticleRules {
            tags: Vec::new(),
            lemmata: Vec::new(),
            definite: "le".into(),
            indefinite: "un".into(),
            particles: Vec::new(),
            ambiguous_form: None,
        }
    }
}

impl ArticleRules {
    pub fn is_article(&self, pos: &str, lemma: &str) -> bool {
        let tagged = self.tags.is_empty() || self.tags.iter().any(|t| t == pos);
        let known = if self.lemmata.is_empty() {
            lemma == self.definite || lemma == self.indefinite
        } else {
            self.lemmata.iter().any(|l| l == lemma)
        };
        tagged && known
    }

    pub fn is_particle(&self, lemma: &str) -> bool {
        self.particles.iter().any(|p| p == lemma)
    }
}

/// All rules of one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRules {
    /// Part-of-speech attribute override for this language
    pub pos: Option<String>,
    /// Tag prefixes that end a sibling walk
    pub stop_tags: Vec<String>,
    pub perfect: Option<PerfectRules>,
    pub recent_past: Option<RecentPastRules>,
    pub continuous: Option<ContinuousRules>,
    pub since_duration: Option<SinceDurationRules>,
    pub article: Option<ArticleRules>,
}

impl LanguageRules {
    /// Returns true if `pos` starts with one of the stop tag prefixes.
    pub fn is_stop_tag(&self, pos: &str) -> bool {
        !pos.is_empty() && self.stop_tags.iter().any(|t| pos.starts_with(t.as_str()))
    }
}

/// The complete rule table: corpus attributes plus rules per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTable {
    pub corpus: CorpusAttrs,
    pub languages: BTreeMap<String, LanguageRules>,
}

impl RuleTable {
    /// Parse a rule table from TOML.
    ///
    /// Lexicon files (`aux_be_file`) are not read; use [`RuleTable::load`]
    /// for rule files that reference lexicons.
    pub fn from_toml_str(content: &str) -> RuleResult<Self> {
        toml::from_str(content).map_err(|e| RuleError::Parse {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Load a rule table from a TOML file, reading the lexicons it references.
    pub fn load(path: &Path) -> RuleResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RuleError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut table: RuleTable = toml::from_str(&content).map_err(|e| RuleError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        table.read_lexicons(base)?;
        Ok(table)
    }

    fn read_lexicons(&mut self, base: &Path) -> RuleResult<()> {
        for (language, rules) in self.languages.iter_mut() {
            let Some(perfect) = rules.perfect.as_mut() else {
                continue;
            };
            let Some(file) = perfect.aux_be_file.as_ref() else {
                continue;
            };

            let path = base.join(file);
            let lexicon = fs::read_to_string(&path).map_err(|e| RuleError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let before = perfect.aux_be.len();
            perfect
                .aux_be
                .extend(lexicon.split_whitespace().map(str::to_string));
            tracing::debug!(
                "Read {} lexically bound lemmata for {} from {}",
                perfect.aux_be.len() - before,
                language,
                path.display()
            );
        }
        Ok(())
    }

    /// Rules of a language, or an error if the table has no such section.
    pub fn language(&self, language: &str) -> RuleResult<&LanguageRules> {
        self.languages
            .get(language)
            .ok_or_else(|| RuleError::UnknownLanguage {
                language: language.to_string(),
            })
    }

    /// Field accessors for tokens of the given language.
    pub fn fields(&self, language: &str) -> TokenFields<'_> {
        let pos = self
            .languages
            .get(language)
            .and_then(|l| l.pos.as_deref())
            .unwrap_or(self.corpus.pos.as_str());
        TokenFields {
            id: &self.corpus.id,
            lemma: &self.corpus.lemma,
            pos,
        }
    }
}

/// Language-aware token field accessors.
///
/// Missing attributes read as `"?"`.
#[derive(Debug, Clone, Copy)]
pub struct TokenFields<'r> {
    id: &'r str,
    lemma: &'r str,
    pos: &'r str,
}

impl<'r> TokenFields<'r> {
    pub fn text<'t>(&self, token: &'t Token) -> &'t str {
        &token.text
    }

    pub fn lemma<'t>(&self, token: &'t Token) -> &'t str {
        token.attr(self.lemma).unwrap_or("?")
    }

    pub fn pos<'t>(&self, token: &'t Token) -> &'t str {
        token.attr(self.pos).unwrap_or("?")
    }

    pub fn id<'t>(&self, token: &'t Token) -> &'t str {
        token.attr(self.id).unwrap_or("?")
    }

    /// Name of the attribute read by [`TokenFields::pos`].
    pub fn pos_attr(&self) -> &'r str {
        self.pos
    }
}
