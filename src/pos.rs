//! Free queries on single words: part-of-speech tags, surface patterns and
//! token ranges.
//!
//! Unlike the other variants a query is not read from the rule table; it is
//! supplied per run. Every predicate that is set must hold for the anchor:
//!
//! - its identifier starts a configured token range,
//! - its lemma passes the matcher's lemma filter,
//! - its tag is one of the configured tags,
//! - its text matches one of the patterns, ignoring case.
//!
//! An empty query admits every word. A token range extends the construction
//! up to and including its end token.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use crate::construction::{Construction, ConstructionType, Word};
use crate::errors::{RuleError, RuleResult};
use crate::matcher::Matcher;
use crate::sentence::{Direction, Sentence, Token};

/// Part-of-speech, pattern and token-range predicates.
#[derive(Debug, Clone, Default)]
pub struct PosQuery {
    tags: Vec<String>,
    patterns: Vec<String>,
    pattern: Option<Regex>,
    /// Start token id to end token id
    ranges: BTreeMap<String, String>,
}

impl PosQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes self, restricts anchors to these tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Takes self, restricts anchors to words matching any of `patterns`
    ///
    /// Fails when a pattern is not a valid regular expression.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> RuleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self.pattern = if self.patterns.is_empty() {
            None
        } else {
            let combined = self
                .patterns
                .iter()
                .map(|p| format!("(?:{})", p))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&combined)
                .case_insensitive(true)
                .build()
                .map_err(|e| RuleError::Pattern {
                    pattern: combined.clone(),
                    message: e.to_string(),
                })?;
            Some(regex)
        };
        Ok(self)
    }

    /// Takes self, adds a token range from `start` to `end` (identifiers)
    pub fn with_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.ranges.insert(start.into(), end.into());
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.pattern.is_none() && self.ranges.is_empty()
    }

    /// Whether `token` satisfies every configured predicate.
    pub fn admits(&self, matcher: &Matcher<'_>, token: &Token) -> bool {
        let fields = matcher.fields();
        (self.ranges.is_empty() || self.ranges.contains_key(fields.id(token)))
            && matcher.lemmata().allows(fields.lemma(token))
            && (self.tags.is_empty() || self.tags.iter().any(|t| t == fields.pos(token)))
            && self
                .pattern
                .as_ref()
                .map_or(true, |p| p.is_match(fields.text(token)))
    }
}

pub(crate) fn check_pos<'s>(
    matcher: &Matcher<'_>,
    query: &PosQuery,
    sentence: &'s Sentence,
    anchor: usize,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let token = sentence.token(anchor)?;
    if !query.admits(matcher, token) {
        return None;
    }

    let mut construction = Construction::new(
        ConstructionType::PoS,
        sentence,
        Word::from_token(&fields, anchor, token, true),
    )
    .with_label(fields.pos(token));

    let Some(end) = query.ranges.get(fields.id(token)) else {
        return Some(construction);
    };

    for (idx, sibling) in sentence.siblings(anchor, Direction::Following) {
        construction.add_word(Word::from_token(&fields, idx, sibling, true));
        if fields.id(sibling) == end {
            return Some(construction);
        }
    }

    tracing::warn!(
        "End token {} not found in sentence {}, skipping range from {}",
        end,
        sentence.id,
        fields.id(token)
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemmata::LemmaFilter;
    use crate::rules::RuleTable;

    fn table() -> RuleTable {
        RuleTable::from_toml_str("[languages.en]\nstop_tags = [\"V\"]\n").unwrap()
    }

    fn sentence(table: &RuleTable) -> Sentence {
        Sentence::from_tagged(
            &table.corpus,
            "3",
            "The|the|DT Council|council|NP has|have|VHZ ,|,|, however|however|RB decided|decide|VVN .|.|SENT",
        )
    }

    fn found(matcher: &Matcher<'_>, sentence: &Sentence) -> Vec<String> {
        matcher
            .find_all(ConstructionType::PoS, sentence)
            .iter()
            .map(|c| format!("{} ({})", c.construction_to_string(), c.type_label()))
            .collect()
    }

    #[test]
    fn test_tags() {
        let table = table();
        let s = sentence(&table);
        let matcher = Matcher::new(&table, "en")
            .unwrap()
            .with_query(PosQuery::new().with_tags(["VHZ", "VVN"]));
        assert_eq!(found(&matcher, &s), vec!["has (VHZ)", "decided (VVN)"]);
    }

    #[test]
    fn test_patterns_ignore_case() {
        let table = table();
        let s = sentence(&table);
        let query = PosQuery::new().with_patterns(["^the$", "cil$"]).unwrap();
        let matcher = Matcher::new(&table, "en").unwrap().with_query(query);
        assert_eq!(found(&matcher, &s), vec!["The (DT)", "Council (NP)"]);
    }

    #[test]
    fn test_lemma_filter_restricts_anchor() {
        let table = table();
        let s = sentence(&table);
        let matcher = Matcher::new(&table, "en")
            .unwrap()
            .with_lemmata(LemmaFilter::from_lemmata(["decide"]));
        assert_eq!(found(&matcher, &s), vec!["decided (VVN)"]);
    }

    #[test]
    fn test_empty_query_admits_every_word() {
        let table = table();
        let s = sentence(&table);
        let matcher = Matcher::new(&table, "en").unwrap();
        assert_eq!(matcher.find_all(ConstructionType::PoS, &s).len(), s.tokens.len());
    }

    #[test]
    fn test_token_range_crosses_punctuation() {
        let table = table();
        let s = sentence(&table);
        let matcher = Matcher::new(&table, "en")
            .unwrap()
            .with_query(PosQuery::new().with_range("w3.3", "w3.6"));

        let found = matcher.find_all(ConstructionType::PoS, &s);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].construction_to_string(), "has , however decided");
        assert_eq!(found[0].construction_ids(), "w3.3 w3.4 w3.5 w3.6");
        assert_eq!(found[0].words_between(), 0);
    }

    #[test]
    fn test_token_range_without_end() {
        let table = table();
        let s = sentence(&table);
        let matcher = Matcher::new(&table, "en")
            .unwrap()
            .with_query(PosQuery::new().with_range("w3.3", "w3.1"));
        assert!(matcher.find_all(ConstructionType::PoS, &s).is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PosQuery::new().with_patterns(["(unclosed"]).unwrap_err();
        assert!(err.to_string().starts_with("invalid pattern (?:(unclosed)"));
    }
}
