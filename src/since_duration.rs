//! "since" + number + unit of time, e.g. German "seit drei Jahren".
//!
//! All three words are adjacent; the construction is labelled with the tag
//! of its first word.

use crate::construction::{Construction, ConstructionType, Word};
use crate::matcher::Matcher;
use crate::rules::SinceDurationRules;
use crate::sentence::Sentence;

pub(crate) fn check_since_duration<'s>(
    matcher: &Matcher<'_>,
    rules: &SinceDurationRules,
    sentence: &'s Sentence,
    anchor: usize,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let since = sentence.token(anchor)?;
    if !rules.is_since(fields.lemma(since)) {
        return None;
    }

    let number = sentence.token(anchor + 1)?;
    if !rules.is_number_tag(fields.pos(number)) {
        return None;
    }

    let unit = sentence.token(anchor + 2)?;
    if !rules.is_time_unit(fields.lemma(unit)) {
        return None;
    }

    let mut construction = Construction::new(
        ConstructionType::SinceDuration,
        sentence,
        Word::from_token(&fields, anchor, since, true),
    )
    .with_label(fields.pos(since));
    construction.add_word(Word::from_token(&fields, anchor + 1, number, true));
    construction.add_word(Word::from_token(&fields, anchor + 2, unit, true));
    Some(construction)
}

#[cfg(test)]
mod tests {
    use crate::construction::ConstructionType;
    use crate::matcher::Matcher;
    use crate::rules::RuleTable;
    use crate::sentence::Sentence;

    const RULES: &str = r#"
[languages.de.since_duration]
since_lemmata = ["seit"]
number_tags = ["CARD"]
time_units = ["Jahr", "Monat", "Woche", "Tag"]
"#;

    #[test]
    fn test_since_duration() {
        let table = RuleTable::from_toml_str(RULES).unwrap();
        let matcher = Matcher::new(&table, "de").unwrap();
        let s = Sentence::from_tagged(
            &table.corpus,
            "1",
            "Ich|ich|PPER wohne|wohnen|VVFIN seit|seit|APPR drei|drei|CARD Jahren|Jahr|NN hier|hier|ADV",
        );

        let found = matcher.find_all(ConstructionType::SinceDuration, &s);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].construction_to_string(), "seit drei Jahren");
        assert_eq!(found[0].type_label(), "APPR");
    }

    #[test]
    fn test_requires_time_unit() {
        let table = RuleTable::from_toml_str(RULES).unwrap();
        let matcher = Matcher::new(&table, "de").unwrap();
        let s = Sentence::from_tagged(
            &table.corpus,
            "1",
            "seit|seit|APPR drei|drei|CARD Leuten|Leute|NN",
        );
        assert!(matcher.find(ConstructionType::SinceDuration, &s, 0).is_none());
    }
}
