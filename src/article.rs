//! French article typing: definite, indefinite or partitive.
//!
//! A particle directly before the article ("de", "du") is prepended and
//! makes the construction partitive.

use crate::construction::{Construction, ConstructionType, Word};
use crate::matcher::Matcher;
use crate::rules::ArticleRules;
use crate::sentence::Sentence;

pub(crate) fn check_article<'s>(
    matcher: &Matcher<'_>,
    rules: &ArticleRules,
    sentence: &'s Sentence,
    anchor: usize,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let article = sentence.token(anchor)?;
    if !rules.is_article(fields.pos(article), fields.lemma(article)) {
        return None;
    }

    let mut words = Vec::with_capacity(2);
    if let Some(prev) = anchor.checked_sub(1).and_then(|idx| sentence.token(idx)) {
        if rules.is_particle(fields.lemma(prev)) {
            words.push(Word::from_token(&fields, anchor - 1, prev, true));
        }
    }
    words.push(Word::from_token(&fields, anchor, article, true));

    let label = article_type(rules, &words);
    let mut words = words.into_iter();
    let first = words.next()?;
    let mut construction =
        Construction::new(ConstructionType::Article, sentence, first).with_label(label);
    for word in words {
        construction.add_word(word);
    }
    Some(construction)
}

fn article_type(rules: &ArticleRules, words: &[Word]) -> String {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return String::new();
    };

    if rules.ambiguous_form.as_deref() == Some(first.text.as_str()) {
        return "indefinite/partitive".into();
    }

    let mut result = String::new();
    if last.lemma == rules.definite {
        result.push_str("definite");
    } else if last.lemma == rules.indefinite {
        result.push_str("indefinite");
    }

    if rules.is_particle(&first.lemma) {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str("partitive");
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::construction::ConstructionType;
    use crate::matcher::Matcher;
    use crate::rules::RuleTable;
    use crate::sentence::Sentence;

    const RULES: &str = r#"
[languages.fr.article]
tags = ["DET:ART", "PRP:det"]
lemmata = ["le", "un", "du"]
particles = ["de", "du"]
ambiguous_form = "des"
"#;

    fn types(tagged: &str) -> Vec<String> {
        let table = RuleTable::from_toml_str(RULES).unwrap();
        let matcher = Matcher::new(&table, "fr").unwrap();
        let s = Sentence::from_tagged(&table.corpus, "1", tagged);
        matcher
            .find_all(ConstructionType::Article, &s)
            .iter()
            .map(|c| format!("{} = {}", c.construction_to_string(), c.type_label()))
            .collect()
    }

    #[test]
    fn test_article_types() {
        insta::assert_debug_snapshot!(
            types("le|le|DET:ART chat|chat|NOM mange|manger|VER:pres une|un|DET:ART souris|souris|NOM"),
            @r###"
        [
            "le = definite",
            "une = indefinite",
        ]
        "###
        );
    }

    #[test]
    fn test_partitive() {
        insta::assert_debug_snapshot!(
            types("il|il|PRO:PER boit|boire|VER:pres de|de|PRP la|le|DET:ART bière|bière|NOM et|et|KON du|du|PRP:det vin|vin|NOM"),
            @r###"
        [
            "de la = definite partitive",
            "du = partitive",
        ]
        "###
        );
    }

    #[test]
    fn test_ambiguous_form() {
        assert_eq!(
            types("il|il|PRO:PER mange|manger|VER:pres des|du|PRP:det pommes|pomme|NOM"),
            vec!["des = indefinite/partitive"]
        );
    }
}
