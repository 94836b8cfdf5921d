//! The alignment resolver.
//!
//! Maps a segment identifier in one language to the aligned segments in
//! another. Without a pivot language every query is answered from the set
//! that connects the two languages. With a pivot, queries between two
//! non-pivot languages go through the pivot in two hops:
//!
//! ```text
//! en:17 ──(en-nl)──▶ nl:15 nl:16 ──(nl-fr)──▶ fr:14 fr:15
//!        label "1=>2"                           label "1=>2"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::alignment::AlignmentSet;
use crate::errors::{AlignmentError, AlignmentResult};

/// How cardinality labels are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// `"2=>1"`
    #[default]
    Compact,
    /// `"2 => 1"`
    Spaced,
}

impl LabelStyle {
    pub fn arrow(self) -> &'static str {
        match self {
            LabelStyle::Compact => "=>",
            LabelStyle::Spaced => " => ",
        }
    }

    /// Cardinality label for `from` segments aligned to `to` segments.
    pub fn label(self, from: usize, to: usize) -> String {
        format!("{}{}{}", from, self.arrow(), to)
    }
}

/// The segments aligned to a queried segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// All segments on the queried side of the matching alignment
    pub sources: Vec<String>,
    /// The aligned segments in the target language, without duplicates
    pub targets: Vec<String>,
    /// Cardinality label, empty when nothing was aligned
    pub label: String,
    pub certainty: Option<f64>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Resolves aligned segments, optionally through a pivot language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentResolver {
    pivot: Option<String>,
    style: LabelStyle,
}

impl AlignmentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes self, routes queries between non-pivot languages through `pivot`
    pub fn with_pivot(mut self, pivot: impl Into<String>) -> Self {
        self.pivot = Some(pivot.into());
        self
    }

    /// Takes self, sets the label style
    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn pivot(&self) -> Option<&str> {
        self.pivot.as_deref()
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    /// Whether a query from `from` to `to` needs two hops.
    pub fn is_transitive(&self, from: &str, to: &str) -> bool {
        self.pivot
            .as_deref()
            .is_some_and(|pivot| from != pivot && to != pivot)
    }

    /// Resolve `id`, treating every failure as "not aligned".
    pub fn resolve(&self, sets: &[AlignmentSet], from: &str, to: &str, id: &str) -> Resolution {
        match self.try_resolve(sets, from, to, id) {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::debug!("Could not resolve {} from {} to {}: {}", id, from, to, e);
                Resolution::default()
            }
        }
    }

    /// Resolve `id` in language `from` to the aligned segments in `to`.
    ///
    /// An unaligned segment yields an empty [`Resolution`]. A malformed
    /// identifier or a missing language pair is an error.
    pub fn try_resolve(
        &self,
        sets: &[AlignmentSet],
        from: &str,
        to: &str,
        id: &str,
    ) -> AlignmentResult<Resolution> {
        match self.pivot.as_deref() {
            Some(pivot) if from != pivot && to != pivot => {
                self.resolve_transitive(sets, from, pivot, to, id)
            }
            _ => self.resolve_direct(sets, from, to, id),
        }
    }

    fn resolve_direct(
        &self,
        sets: &[AlignmentSet],
        from: &str,
        to: &str,
        id: &str,
    ) -> AlignmentResult<Resolution> {
        Ok(self.direct(sets, from, to, id)?.0)
    }

    /// The direct resolution and the queried side of its cardinality.
    fn direct(
        &self,
        sets: &[AlignmentSet],
        from: &str,
        to: &str,
        id: &str,
    ) -> AlignmentResult<(Resolution, String)> {
        check_segment(id)?;

        let set = sets
            .iter()
            .find(|set| set.pair().connects(from, to))
            .ok_or_else(|| AlignmentError::MissingPair {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        let Some((alignment, own, other)) = set.find(from, id) else {
            return Ok((Resolution::default(), String::new()));
        };
        if other.is_empty() {
            return Ok((Resolution::default(), String::new()));
        }

        let (label, prefix) = match &alignment.kind {
            Some(kind) => {
                // "1-2" reads from the first side of the pair
                let kind = if set.pair().first() == from {
                    kind.clone()
                } else {
                    kind.chars().rev().collect::<String>()
                };
                let prefix = kind.split('-').next().unwrap_or_default().to_string();
                (kind.replace('-', self.style.arrow()), prefix)
            }
            None => (self.style.label(own.len(), other.len()), own.len().to_string()),
        };

        let resolution = Resolution {
            sources: own.to_vec(),
            targets: unique(other.iter().cloned()),
            label,
            certainty: alignment.certainty,
        };
        Ok((resolution, prefix))
    }

    fn resolve_transitive(
        &self,
        sets: &[AlignmentSet],
        from: &str,
        pivot: &str,
        to: &str,
        id: &str,
    ) -> AlignmentResult<Resolution> {
        let (first, prefix) = self.direct(sets, from, pivot, id)?;
        if first.is_empty() {
            return Ok(Resolution::default());
        }

        let mut targets = Vec::new();
        for pivot_id in &first.targets {
            targets.extend(self.resolve_direct(sets, pivot, to, pivot_id)?.targets);
        }
        let targets = unique(targets);
        if targets.is_empty() {
            return Ok(Resolution::default());
        }

        let label = format!("{}{}{}", prefix, self.style.arrow(), targets.len());

        Ok(Resolution {
            sources: first.sources,
            targets,
            label,
            certainty: None,
        })
    }
}

/// Segment identifiers are non-empty and contain no whitespace.
fn check_segment(id: &str) -> AlignmentResult<()> {
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(AlignmentError::MalformedSegment { id: id.to_string() });
    }
    Ok(())
}

/// Removes duplicates, keeping the first occurrence.
fn unique(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_style() {
        assert_eq!(LabelStyle::Compact.label(2, 1), "2=>1");
        assert_eq!(LabelStyle::Spaced.label(1, 2), "1 => 2");
    }

    #[test]
    fn test_transitive_prefix_follows_first_hop_kind() {
        use crate::alignment::{Alignment, LanguagePair};

        // the kind counts three nl segments where only one is listed
        let sets = [
            AlignmentSet::new(LanguagePair::ordered("nl", "en"))
                .with(Alignment::new(["p1.s1"], ["p1.s1"]).with_kind("1-3")),
            AlignmentSet::new(LanguagePair::ordered("nl", "fr"))
                .with(Alignment::new(["p1.s1"], ["p1.s1", "p1.s2"])),
        ];

        let compact = AlignmentResolver::new().with_pivot("nl");
        let resolution = compact.resolve(&sets, "en", "fr", "p1.s1");
        assert_eq!(resolution.targets, vec!["p1.s1", "p1.s2"]);
        assert_eq!(resolution.label, "3=>2");

        let spaced = compact.with_style(LabelStyle::Spaced);
        assert_eq!(spaced.resolve(&sets, "en", "fr", "p1.s1").label, "3 => 2");
    }

    #[test]
    fn test_check_segment() {
        assert!(check_segment("p1.s3").is_ok());
        assert!(check_segment("").is_err());
        assert!(check_segment("1 2").is_err());
    }

    #[test]
    fn test_unique_keeps_order() {
        let ids = ["3", "1", "3", "2"].into_iter().map(String::from);
        assert_eq!(unique(ids), vec!["3", "1", "2"]);
    }
}
