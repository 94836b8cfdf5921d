//! Sentence alignments between the two languages of a pair.
//!
//! An [`Alignment`] links one or more segments on the first side of a
//! [`LanguagePair`] to one or more segments on the second side. Which
//! language owns which side is decided by the pair, never by the alignment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AlignmentError, AlignmentResult};

/// One line of a sentence alignment table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Segment identifiers on the first side of the pair
    pub sources: Vec<String>,
    /// Segment identifiers on the second side of the pair
    pub targets: Vec<String>,
    pub certainty: Option<f64>,
    /// Corpus-supplied cardinality label such as `"1-2"`
    pub kind: Option<String>,
}

impl Alignment {
    pub fn new<I, J>(sources: I, targets: J) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Alignment {
            sources: sources.into_iter().map(Into::into).collect(),
            targets: targets.into_iter().map(Into::into).collect(),
            certainty: None,
            kind: None,
        }
    }

    /// Parse a `"1 2;3"` style link, sides separated by `;` and
    /// identifiers by whitespace. Either side may be empty.
    pub fn from_targets(value: &str) -> AlignmentResult<Self> {
        let (sources, targets) = value
            .split_once(';')
            .ok_or_else(|| AlignmentError::MalformedTargets {
                value: value.to_string(),
            })?;
        Ok(Alignment::new(sources.split_whitespace(), targets.split_whitespace()))
    }

    /// Takes self, sets the certainty
    pub fn with_certainty(mut self, certainty: Option<f64>) -> Self {
        self.certainty = certainty;
        self
    }

    /// Takes self, sets the cardinality label
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Certainty used for averaging; a missing value counts as 0.
    pub fn certainty_or_zero(&self) -> f64 {
        self.certainty.unwrap_or(0.0)
    }
}

/// Parse an optional certainty attribute. Empty values count as missing.
pub fn parse_certainty(value: Option<&str>) -> AlignmentResult<Option<f64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AlignmentError::InvalidCertainty {
                value: value.to_string(),
            }),
    }
}

/// Side of a [`LanguagePair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

/// An oriented pair of languages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    first: String,
    second: String,
}

impl LanguagePair {
    /// The alphabetical orientation, as used by OPUS alignment files.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            LanguagePair { first: a, second: b }
        } else {
            LanguagePair { first: b, second: a }
        }
    }

    /// A fixed orientation with `first` on the source side.
    pub fn ordered(first: impl Into<String>, second: impl Into<String>) -> Self {
        LanguagePair {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn side(&self, language: &str) -> Option<Side> {
        if self.first == language {
            Some(Side::First)
        } else if self.second == language {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Whether this pair links `a` and `b`, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }

    /// File stem of the alignment file, e.g. `"en-nl"`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.first, self.second)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// All alignments of one document for one language pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentSet {
    pair: LanguagePair,
    alignments: Vec<Alignment>,
}

impl AlignmentSet {
    pub fn new(pair: LanguagePair) -> Self {
        AlignmentSet {
            pair,
            alignments: Vec::new(),
        }
    }

    /// Takes self, adds an alignment
    pub fn with(mut self, alignment: Alignment) -> Self {
        self.push(alignment);
        self
    }

    pub fn push(&mut self, alignment: Alignment) {
        self.alignments.push(alignment);
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    /// The first alignment with `id` on the side of `language`.
    ///
    /// Returns the alignment plus the segments of `language` and of the other
    /// language, in that order.
    pub fn find(&self, language: &str, id: &str) -> Option<(&Alignment, &[String], &[String])> {
        let side = self.pair.side(language)?;
        self.alignments.iter().find_map(|a| {
            let (own, other) = match side {
                Side::First => (&a.sources, &a.targets),
                Side::Second => (&a.targets, &a.sources),
            };
            own.iter()
                .any(|s| s == id)
                .then_some((a, own.as_slice(), other.as_slice()))
        })
    }
}

impl<'a> IntoIterator for &'a AlignmentSet {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_targets() {
        let a = Alignment::from_targets("2;2 3").unwrap();
        assert_eq!(a.sources, vec!["2"]);
        assert_eq!(a.targets, vec!["2", "3"]);

        let dpc = Alignment::from_targets("p1.s9; p1.s9 p1.s10").unwrap();
        assert_eq!(dpc.targets, vec!["p1.s9", "p1.s10"]);
    }

    #[test]
    fn test_from_targets_empty_side() {
        let a = Alignment::from_targets("5;").unwrap();
        assert_eq!(a.sources, vec!["5"]);
        assert!(a.targets.is_empty());
    }

    #[test]
    fn test_from_targets_without_separator() {
        let err = Alignment::from_targets("1 2").unwrap_err();
        assert_eq!(err.to_string(), "malformed alignment targets \"1 2\"");
    }

    #[test]
    fn test_parse_certainty() {
        assert_eq!(parse_certainty(None), Ok(None));
        assert_eq!(parse_certainty(Some("")), Ok(None));
        assert_eq!(parse_certainty(Some("0.25")), Ok(Some(0.25)));
        assert!(parse_certainty(Some("high")).is_err());
    }

    #[test]
    fn test_language_pair_orientation() {
        let pair = LanguagePair::new("nl", "en");
        assert_eq!(pair.first(), "en");
        assert_eq!(pair.file_stem(), "en-nl");
        assert_eq!(pair.side("nl"), Some(Side::Second));
        assert!(pair.connects("nl", "en"));

        let fixed = LanguagePair::ordered("nl", "en");
        assert_eq!(fixed.first(), "nl");
        assert_eq!(fixed, LanguagePair::ordered("nl", "en"));
        assert_ne!(fixed, pair);
    }

    #[test]
    fn test_find() {
        let set = AlignmentSet::new(LanguagePair::new("en", "nl"))
            .with(Alignment::new(["1"], ["1"]))
            .with(Alignment::new(["2", "3"], ["2"]));

        let (_, own, other) = set.find("nl", "2").unwrap();
        assert_eq!(own, ["2"]);
        assert_eq!(other, ["2", "3"]);
        assert!(set.find("en", "4").is_none());
        assert!(set.find("fr", "1").is_none());
    }
}
