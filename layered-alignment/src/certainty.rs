//! Alignment certainty scoring for corpus ranking.

use crate::alignment::AlignmentSet;

/// Mean certainty over all alignments of all given sets.
///
/// Alignments without a certainty count as 0; no alignments at all score 0.
pub fn average_certainty<'a, I>(sets: I) -> f64
where
    I: IntoIterator<Item = &'a AlignmentSet>,
{
    let (sum, len) = sets
        .into_iter()
        .flat_map(|set| set.alignments())
        .fold((0.0, 0usize), |(sum, len), a| (sum + a.certainty_or_zero(), len + 1));

    if len > 0 {
        sum / len as f64
    } else {
        0.0
    }
}

/// Ranking score of a document aligned from `source` to every language in
/// `targets`.
///
/// `None` when a target language has no alignments for this document; such
/// documents are left out of a certainty ranking.
pub fn document_certainty(sets: &[AlignmentSet], source: &str, targets: &[String]) -> Option<f64> {
    let mut used = Vec::with_capacity(targets.len());
    for target in targets {
        let set = sets.iter().find(|set| set.pair().connects(source, target))?;
        used.push(set);
    }
    Some(average_certainty(used))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{Alignment, LanguagePair};

    fn set(a: &str, b: &str, certainties: &[Option<f64>]) -> AlignmentSet {
        certainties.iter().enumerate().fold(
            AlignmentSet::new(LanguagePair::new(a, b)),
            |set, (n, certainty)| {
                let id = (n + 1).to_string();
                set.with(Alignment::new([id.clone()], [id]).with_certainty(*certainty))
            },
        )
    }

    #[test]
    fn test_average_certainty() {
        let en_nl = set("en", "nl", &[Some(0.5), Some(1.0)]);
        assert_eq!(average_certainty([&en_nl]), 0.75);
    }

    #[test]
    fn test_missing_certainty_counts_as_zero() {
        let en_nl = set("en", "nl", &[Some(0.6), None, Some(0.3)]);
        assert!((average_certainty([&en_nl]) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_average_is_pooled_across_languages() {
        let en_nl = set("en", "nl", &[Some(1.0)]);
        let de_en = set("de", "en", &[Some(0.4), Some(0.4), Some(0.4)]);
        assert!((average_certainty([&en_nl, &de_en]) - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(average_certainty(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_document_missing_a_target_is_unranked() {
        let sets = vec![set("en", "nl", &[Some(0.9)])];
        let targets = vec!["nl".to_string(), "de".to_string()];
        assert_eq!(document_certainty(&sets, "en", &targets), None);
        assert_eq!(document_certainty(&sets, "en", &targets[..1]), Some(0.9));
    }
}
