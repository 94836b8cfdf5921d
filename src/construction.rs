//! The construction model: a multi-word expression accumulated during a match.
//!
//! A [`Construction`] is seeded with its anchor and grows as the sibling walk
//! discovers words. Words flagged `in_construction` form the reported span;
//! the others are intervening context only.

use std::fmt;

use crate::rules::{Tense, TokenFields};
use crate::sentence::{Sentence, Token};

/// Markup wrapped around construction words in a marked sentence.
pub const MARKUP: (&str, &str) = ("**", "**");

/// The closed set of construction types the matcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructionType {
    /// Auxiliary + past participle, with passive and continuous continuations
    Perfect,
    /// "venir de" + infinitive
    RecentPast,
    /// Auxiliary + gerund
    Continuous,
    /// "since" + number + unit of time
    SinceDuration,
    /// (particle +) article
    Article,
    /// Words selected by tag, pattern or token range
    PoS,
}

impl ConstructionType {
    pub fn name(self) -> &'static str {
        match self {
            ConstructionType::Perfect => "perfect",
            ConstructionType::RecentPast => "recent_past",
            ConstructionType::Continuous => "continuous",
            ConstructionType::SinceDuration => "since_duration",
            ConstructionType::Article => "article",
            ConstructionType::PoS => "pos",
        }
    }
}

impl fmt::Display for ConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A word copied from a token into a construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Trimmed surface text, `" "` when empty
    pub text: String,
    /// Trimmed lemma, `"?"` when empty
    pub lemma: String,
    pub pos: String,
    pub id: String,
    /// Index of the token in its sentence
    pub position: usize,
    pub in_construction: bool,
}

impl Word {
    pub fn new(
        text: &str,
        lemma: &str,
        pos: &str,
        id: &str,
        position: usize,
        in_construction: bool,
    ) -> Self {
        let text = text.trim();
        let lemma = lemma.trim();
        Word {
            text: if text.is_empty() { " ".into() } else { text.into() },
            lemma: if lemma.is_empty() { "?".into() } else { lemma.into() },
            pos: pos.to_string(),
            id: id.to_string(),
            position,
            in_construction,
        }
    }

    pub fn from_token(
        fields: &TokenFields<'_>,
        position: usize,
        token: &Token,
        in_construction: bool,
    ) -> Self {
        Word::new(
            fields.text(token),
            fields.lemma(token),
            fields.pos(token),
            fields.id(token),
            position,
            in_construction,
        )
    }
}

/// A (candidate) construction within one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction<'s> {
    kind: ConstructionType,
    tense: Tense,
    sentence: &'s Sentence,
    words: Vec<Word>,
    label: Option<String>,
    pub is_passive: bool,
    pub is_continuous: bool,
    pub is_reflexive: bool,
}

impl<'s> Construction<'s> {
    /// Start a construction at its anchor word.
    pub fn new(kind: ConstructionType, sentence: &'s Sentence, anchor: Word) -> Self {
        Construction {
            kind,
            tense: Tense::Present,
            sentence,
            words: vec![anchor],
            label: None,
            is_passive: false,
            is_continuous: false,
            is_reflexive: false,
        }
    }

    /// Takes self, sets the tense
    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = tense;
        self
    }

    /// Takes self, sets a fixed type label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(&self) -> ConstructionType {
        self.kind
    }

    pub fn tense(&self) -> Tense {
        self.tense
    }

    pub fn sentence(&self) -> &'s Sentence {
        self.sentence
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    pub fn prepend_word(&mut self, word: Word) {
        self.words.insert(0, word);
    }

    /// Splice a passive or continuous continuation into this construction.
    ///
    /// The first word of `other` is the participle already present here and
    /// is skipped.
    pub fn extend(&mut self, other: Construction<'_>) {
        self.words.extend(other.words.into_iter().skip(1));
        self.is_passive = !other.is_continuous;
        self.is_continuous = other.is_continuous;
    }

    /// Texts of the in-construction words, in order.
    pub fn construction(&self) -> Vec<&str> {
        self.in_construction().map(|w| w.text.as_str()).collect()
    }

    pub fn construction_to_string(&self) -> String {
        self.construction().join(" ")
    }

    /// Identifiers of the in-construction words, space separated.
    pub fn construction_ids(&self) -> String {
        self.in_construction()
            .map(|w| w.id.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total number of intervening words.
    pub fn words_between(&self) -> usize {
        self.words.iter().filter(|w| !w.in_construction).count()
    }

    /// Number of intervening words before each in-construction word.
    pub fn words_between_construction(&self) -> Vec<usize> {
        let mut result = Vec::new();
        let mut current = 0;
        for word in &self.words {
            if word.in_construction {
                result.push(current);
                current = 0;
            } else {
                current += 1;
            }
        }
        result
    }

    /// Lemma of the last word of the construction.
    pub fn perfect_lemma(&self) -> &str {
        self.words.last().map_or("?", |w| w.lemma.as_str())
    }

    /// Human readable type, e.g. `"present perfect passive"`.
    pub fn type_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        let mut result = format!("{} perfect", self.tense);
        if self.is_passive {
            result.push_str(" passive");
        }
        if self.is_continuous {
            result.push_str(" continuous");
        }
        result
    }

    pub fn sentence_id(&self) -> &str {
        &self.sentence.id
    }

    /// Plain text of the enclosing sentence.
    pub fn sentence_words(&self) -> String {
        self.sentence.words()
    }

    /// The sentence text with the construction words marked up.
    ///
    /// When all words belong to the construction the whole span is marked at
    /// once; otherwise every construction word is marked on its own.
    pub fn mark_sentence(&self) -> String {
        let span = self
            .words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let marked = if self.words_between() == 0 {
            format!("{}{}{}", MARKUP.0, span, MARKUP.1)
        } else {
            self.words
                .iter()
                .map(|w| {
                    if w.in_construction {
                        format!("{}{}{}", MARKUP.0, w.text, MARKUP.1)
                    } else {
                        w.text.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        self.sentence.words().replace(&span, &marked)
    }

    fn in_construction(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|w| w.in_construction)
    }
}
