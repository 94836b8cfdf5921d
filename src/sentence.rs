//! Tagged sentences as read from a corpus.
//!
//! A [`Sentence`] owns its [`Token`]s in document order. Tokens carry their
//! surface text plus the raw attributes of the corpus element (identifier,
//! lemma, part-of-speech tag, ...). Which attribute holds which field is
//! decided by the rule table, see [`crate::TokenFields`].

use std::collections::BTreeMap;

use crate::rules::CorpusAttrs;

/// ASCII punctuation characters.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Returns true if `text` counts as punctuation for the sibling walk.
///
/// The check is a substring test against [`PUNCTUATION`], so an empty text
/// also counts as punctuation.
pub fn is_punctuation(text: &str) -> bool {
    PUNCTUATION.contains(text)
}

/// A single word element of a sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    /// Surface text as found in the corpus (untrimmed)
    pub text: String,
    /// Element attributes, keyed by attribute name
    pub attrs: BTreeMap<String, String>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Takes self, sets an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Walk direction through the siblings of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the sentence
    Following,
    /// Towards the start of the sentence, nearest sibling first
    Preceding,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Following => Direction::Preceding,
            Direction::Preceding => Direction::Following,
        }
    }
}

/// A sentence element with its tokens in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    /// Corpus-native sentence identifier (e.g. `"17"` or `"p1.s3"`)
    pub id: String,
    /// Sentence element attributes other than the identifier
    pub attrs: BTreeMap<String, String>,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(id: impl Into<String>) -> Self {
        Sentence {
            id: id.into(),
            attrs: BTreeMap::new(),
            tokens: Vec::new(),
        }
    }

    /// Build a sentence from a compact `text|lemma|TAG` notation.
    ///
    /// Tokens are separated by whitespace; each token is `text|lemma|TAG`.
    /// Token identifiers are generated as `w{sentence}.{n}` (1-based).
    /// A token without `|` separators gets only its text.
    ///
    /// ```
    /// use layered_constructions::{CorpusAttrs, Sentence};
    ///
    /// let attrs = CorpusAttrs::default();
    /// let s = Sentence::from_tagged(&attrs, "4", "He|he|PP has|have|VBZ left|leave|VBN");
    /// assert_eq!(s.tokens.len(), 3);
    /// assert_eq!(s.tokens[1].attr("id"), Some("w4.2"));
    /// ```
    pub fn from_tagged(attrs: &CorpusAttrs, id: &str, tagged: &str) -> Self {
        let mut sentence = Sentence::new(id);
        for (n, part) in tagged.split_whitespace().enumerate() {
            let mut pieces = part.splitn(3, '|');
            let text = pieces.next().unwrap_or_default();
            let mut token = Token::new(text).with_attr(&attrs.id, format!("w{}.{}", id, n + 1));
            if let (Some(lemma), Some(pos)) = (pieces.next(), pieces.next()) {
                token = token
                    .with_attr(&attrs.lemma, lemma)
                    .with_attr(&attrs.pos, pos);
            }
            sentence.tokens.push(token);
        }
        sentence
    }

    pub fn token(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    /// Siblings of the token at `idx`, excluding the token itself.
    ///
    /// Each call yields a fresh iterator; the walk is scoped to this sentence.
    pub fn siblings(&self, idx: usize, direction: Direction) -> Siblings<'_> {
        let next = match direction {
            Direction::Following => Some(idx + 1),
            Direction::Preceding => idx.checked_sub(1),
        };
        Siblings {
            sentence: self,
            next,
            direction,
        }
    }

    /// Surface words of the sentence joined by single spaces.
    ///
    /// Texts are trimmed; an empty text is rendered as a single space.
    pub fn words(&self) -> String {
        self.tokens
            .iter()
            .map(|t| {
                let text = t.text.trim();
                if text.is_empty() {
                    " "
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Iterator over the siblings of a token, see [`Sentence::siblings`].
#[derive(Debug, Clone)]
pub struct Siblings<'s> {
    sentence: &'s Sentence,
    next: Option<usize>,
    direction: Direction,
}

impl<'s> Iterator for Siblings<'s> {
    type Item = (usize, &'s Token);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let token = self.sentence.tokens.get(idx)?;
        self.next = match self.direction {
            Direction::Following => Some(idx + 1),
            Direction::Preceding => idx.checked_sub(1),
        };
        Some((idx, token))
    }
}
