//! Lemma filter restricting which completing words are reported.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::errors::{RuleError, RuleResult};

/// An optional set of lemmata; an empty filter admits every lemma.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaFilter {
    lemmata: BTreeSet<String>,
}

impl LemmaFilter {
    /// A filter that admits every lemma.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn from_lemmata<I, S>(lemmata: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LemmaFilter {
            lemmata: lemmata.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a whitespace separated lemma list (e.g. `config/en_lemmata.txt`).
    pub fn from_file(path: &Path) -> RuleResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RuleError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_lemmata(content.split_whitespace()))
    }

    pub fn allows(&self, lemma: &str) -> bool {
        self.lemmata.is_empty() || self.lemmata.contains(lemma)
    }

    pub fn is_empty(&self) -> bool {
        self.lemmata.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lemmata.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_allows_all() {
        let filter = LemmaFilter::any();
        assert!(filter.allows("love"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter() {
        let filter = LemmaFilter::from_lemmata(["être", "avoir"]);
        assert!(filter.allows("être"));
        assert!(!filter.allows("dire"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_lemmata.txt");
        fs::write(&path, "say\ntell  mention\n").unwrap();

        let filter = LemmaFilter::from_file(&path).unwrap();
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec!["mention", "say", "tell"]);
    }
}
