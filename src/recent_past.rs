//! The recent past periphrasis: "venir" + "de" + infinitive.

use crate::construction::{Construction, ConstructionType, Word};
use crate::matcher::Matcher;
use crate::rules::RecentPastRules;
use crate::sentence::{Direction, Sentence};
use crate::walk::{walk_siblings, Step};

pub(crate) fn check_recent_past<'s>(
    matcher: &Matcher<'_>,
    rules: &RecentPastRules,
    sentence: &'s Sentence,
    anchor: usize,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let verb = sentence.token(anchor)?;

    let (pre_idx, preposition) = sentence.siblings(anchor, Direction::Following).next()?;
    let is_preposition = rules.preposition_tags.iter().any(|t| t == fields.pos(preposition))
        && fields.lemma(preposition) == rules.preposition_lemma;
    if !is_preposition {
        return None;
    }

    let mut rp = Construction::new(
        ConstructionType::RecentPast,
        sentence,
        Word::from_token(&fields, anchor, verb, true),
    )
    .with_label(rules.label.as_str());
    rp.add_word(Word::from_token(&fields, pre_idx, preposition, true));

    let passive = matcher.rules().perfect.as_ref().filter(|p| p.passive);
    let found = walk_siblings(
        &mut rp,
        &fields,
        matcher.rules(),
        pre_idx,
        Direction::Following,
        |rp, idx, sibling| {
            if fields.pos(sibling) != rules.infinitive_tag {
                return Step::Pass;
            }
            rp.add_word(Word::from_token(&fields, idx, sibling, true));

            // "vient d'être publié"
            if let Some(perfect) = passive {
                if perfect.is_passive_lemma(fields.lemma(sibling)) {
                    if let Some(next) = sentence.token(idx + 1) {
                        if perfect.is_perfect_tag(fields.pos(next)) {
                            rp.add_word(Word::from_token(&fields, idx + 1, next, true));
                        }
                    }
                }
            }
            Step::Done(true)
        },
    );

    found.then_some(rp)
}
