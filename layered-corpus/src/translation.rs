//! Cross-validation of translated constructions.
//!
//! A [`TranslationLookup`] knows the translations of a lemma, for example
//! through an online dictionary. Lookups are best effort: a failing lookup
//! marks the comparison as unknown and never fails the run.

use std::fmt;

use layered_constructions::Construction;

use crate::errors::CorpusResult;

/// Source of lemma translations.
pub trait TranslationLookup {
    /// Translations of `lemma` from language `from` into language `to`.
    fn translations(&self, lemma: &str, from: &str, to: &str) -> CorpusResult<Vec<String>>;
}

/// Outcome of comparing a construction with its translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationCheck {
    /// The translated lemma is a known translation
    Yes,
    Unknown,
}

impl fmt::Display for TranslationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationCheck::Yes => f.write_str("yes"),
            TranslationCheck::Unknown => f.write_str("unknown"),
        }
    }
}

/// Compare the lemma of `source` with the lemma of every translated
/// construction found.
///
/// Translations without a construction are skipped. The lookup is made at
/// most once.
pub fn check_translated(
    lookup: &dyn TranslationLookup,
    source: &Construction<'_>,
    translated: &[Option<Construction<'_>>],
    from: &str,
    to: &str,
) -> Vec<TranslationCheck> {
    let found: Vec<&Construction<'_>> = translated.iter().flatten().collect();
    if found.is_empty() {
        return Vec::new();
    }

    let translations = match lookup.translations(source.perfect_lemma(), from, to) {
        Ok(translations) => translations,
        Err(e) => {
            tracing::debug!("No translations for {}: {}", source.perfect_lemma(), e);
            Vec::new()
        }
    };

    found
        .into_iter()
        .map(|construction| {
            if translations.iter().any(|t| t == construction.perfect_lemma()) {
                TranslationCheck::Yes
            } else {
                TranslationCheck::Unknown
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CorpusError;
    use layered_constructions::{ConstructionType, Matcher, RuleTable, Sentence};

    struct Dictionary;

    impl TranslationLookup for Dictionary {
        fn translations(&self, lemma: &str, _from: &str, _to: &str) -> CorpusResult<Vec<String>> {
            match lemma {
                "leave" => Ok(vec!["vertrekken".into(), "verlaten".into()]),
                _ => Err(CorpusError::Lookup {
                    message: "connection refused".into(),
                }),
            }
        }
    }

    const RULES: &str = r#"
[languages.en.perfect]
anchor = { tags = ["VHZ"] }
perfect_tags = ["VVN"]

[languages.nl.perfect]
anchor = { tags = ["verbpressg"] }
perfect_tags = ["verbpapa"]
"#;

    #[test]
    fn test_check_translated() {
        let table = RuleTable::from_toml_str(RULES).unwrap();
        let en = Sentence::from_tagged(&table.corpus, "1", "She|she|PP has|have|VHZ left|leave|VVN");
        let nl = Sentence::from_tagged(
            &table.corpus,
            "1",
            "Ze|ze|pron is|zijn|verbpressg vertrokken|vertrekken|verbpapa",
        );
        let other = Sentence::from_tagged(
            &table.corpus,
            "2",
            "Ze|ze|pron is|zijn|verbpressg gebleven|blijven|verbpapa",
        );
        let plain = Sentence::from_tagged(&table.corpus, "3", "Weg|weg|adv");

        let found = Matcher::new(&table, "en").unwrap().find_all(ConstructionType::Perfect, &en);
        let nl_matcher = Matcher::new(&table, "nl").unwrap();
        let translated = vec![
            nl_matcher.find(ConstructionType::Perfect, &nl, 1),
            nl_matcher.find(ConstructionType::Perfect, &plain, 0),
            nl_matcher.find(ConstructionType::Perfect, &other, 1),
        ];

        let checks = check_translated(&Dictionary, &found[0], &translated, "en", "nl");
        assert_eq!(checks, vec![TranslationCheck::Yes, TranslationCheck::Unknown]);
    }

    #[test]
    fn test_failed_lookup_is_unknown() {
        let table = RuleTable::from_toml_str(RULES).unwrap();
        let en = Sentence::from_tagged(&table.corpus, "1", "She|she|PP has|have|VHZ gone|go|VVN");
        let nl = Sentence::from_tagged(&table.corpus, "1", "Ze|ze|pron is|zijn|verbpressg weg|weg|verbpapa");

        let found = Matcher::new(&table, "en").unwrap().find_all(ConstructionType::Perfect, &en);
        let translated = vec![Matcher::new(&table, "nl").unwrap().find(ConstructionType::Perfect, &nl, 1)];

        let checks = check_translated(&Dictionary, &found[0], &translated, "en", "nl");
        assert_eq!(checks.iter().map(|c| c.to_string()).collect::<Vec<_>>(), vec!["unknown"]);
    }
}
