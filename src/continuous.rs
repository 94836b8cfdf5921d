//! Continuous constructions: an auxiliary followed by a gerund.

use crate::construction::{Construction, ConstructionType, Word};
use crate::matcher::Matcher;
use crate::rules::ContinuousRules;
use crate::sentence::{Direction, Sentence};
use crate::walk::{walk_siblings, Step};

pub(crate) fn check_continuous<'s>(
    matcher: &Matcher<'_>,
    rules: &ContinuousRules,
    sentence: &'s Sentence,
    anchor: usize,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let auxiliary = sentence.token(anchor)?;

    let mut construction = Construction::new(
        ConstructionType::Continuous,
        sentence,
        Word::from_token(&fields, anchor, auxiliary, true),
    )
    .with_label(rules.label.as_str());

    let found = walk_siblings(
        &mut construction,
        &fields,
        matcher.rules(),
        anchor,
        Direction::Following,
        |c, idx, sibling| {
            if rules.gerund_tags.iter().any(|t| t == fields.pos(sibling)) {
                c.add_word(Word::from_token(&fields, idx, sibling, true));
                Step::Done(true)
            } else {
                Step::Pass
            }
        },
    );

    found.then_some(construction)
}
