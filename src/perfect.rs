//! Perfects, passive perfects and perfect continuous.
//!
//! A perfect starts at an auxiliary and is completed by the first sibling
//! carrying a participle tag. When that participle has the passive lemma
//! (English "been"), the match recurses once from the participle to pick up
//! a passive or continuous continuation.
//!
//! ```text
//! has  always  been  loved
//! ╰──────────────────────╯ present perfect passive
//! ```

use crate::construction::{Construction, ConstructionType, Word};
use crate::matcher::Matcher;
use crate::rules::{PerfectRules, TokenFields};
use crate::sentence::{Direction, Sentence, Token};
use crate::walk::{walk_siblings, Step};

/// Mode flags of a single perfect match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfectMode {
    /// Look for passive continuations and check lexical binding
    pub check_passive: bool,
    /// Accept a continuous (gerund) completion
    pub check_continuous: bool,
    /// Walk towards the start of the sentence
    pub check_preceding: bool,
}

impl Default for PerfectMode {
    fn default() -> Self {
        PerfectMode {
            check_passive: true,
            check_continuous: false,
            check_preceding: false,
        }
    }
}

impl PerfectMode {
    fn direction(self) -> Direction {
        if self.check_preceding {
            Direction::Preceding
        } else {
            Direction::Following
        }
    }
}

pub(crate) fn check_perfect<'s>(
    matcher: &Matcher<'_>,
    rules: &PerfectRules,
    sentence: &'s Sentence,
    anchor: usize,
    mode: PerfectMode,
) -> Option<Construction<'s>> {
    let fields = matcher.fields();
    let auxiliary = sentence.token(anchor)?;
    let check_passive = mode.check_passive && rules.passive;
    let check_continuous = mode.check_continuous && rules.continuous;

    let aux_words = rules.aux_words_for(matcher.tense());
    let aux_text = fields.text(auxiliary).to_lowercase();
    if !aux_words.is_empty() && !aux_words.iter().any(|w| *w == aux_text) {
        return None;
    }

    let mut pp = Construction::new(
        ConstructionType::Perfect,
        sentence,
        Word::from_token(&fields, anchor, auxiliary, true),
    )
    .with_tense(matcher.tense());

    let direction = mode.direction();
    let found = walk_siblings(
        &mut pp,
        &fields,
        matcher.rules(),
        anchor,
        direction,
        |pp, idx, sibling| {
            let pos = fields.pos(sibling);
            let lemma = fields.lemma(sibling);

            if rules.is_perfect_tag(pos) {
                if check_passive
                    && !is_lexically_bound(&fields, rules, pp, anchor, sibling, direction.opposite())
                {
                    return Step::Done(false);
                }

                let in_lemmata = matcher.lemmata().allows(lemma);
                let passive_trigger = check_passive && rules.is_passive_lemma(lemma);
                if !in_lemmata && !passive_trigger {
                    return Step::Done(false);
                }

                pp.add_word(Word::from_token(&fields, idx, sibling, true));

                let mut found = true;
                if passive_trigger {
                    let continuation = PerfectMode {
                        check_passive: false,
                        check_continuous: true,
                        check_preceding: mode.check_preceding,
                    };
                    match check_perfect(matcher, rules, sentence, idx, continuation) {
                        Some(child) => pp.extend(child),
                        None if !in_lemmata => found = false,
                        None => {}
                    }
                }
                Step::Done(found)
            } else if check_continuous
                && rules.is_continuous_tag(pos)
                && matcher.lemmata().allows(lemma)
            {
                pp.add_word(Word::from_token(&fields, idx, sibling, true));
                pp.is_continuous = true;
                Step::Done(true)
            } else {
                Step::Pass
            }
        },
    );

    if found {
        return Some(pp);
    }

    // A participle may precede its auxiliary
    if rules.allow_reversed && !mode.check_preceding {
        let reversed = PerfectMode {
            check_passive: mode.check_passive,
            check_continuous: false,
            check_preceding: true,
        };
        return check_perfect(matcher, rules, sentence, anchor, reversed);
    }

    None
}

/// Whether the participle may combine with the auxiliary at `anchor`.
///
/// Only the alternate auxiliary (`lexical_bound`) restricts its participles.
/// A reflexive pronoun before the auxiliary lifts the restriction and is
/// prepended to the construction.
fn is_lexically_bound<'s>(
    fields: &TokenFields<'_>,
    rules: &PerfectRules,
    pp: &mut Construction<'s>,
    anchor: usize,
    participle: &Token,
    before: Direction,
) -> bool {
    let sentence = pp.sentence();
    let Some(auxiliary) = sentence.token(anchor) else {
        return true;
    };

    // Ambiguous lemmata come as e.g. "suivre|être"
    let bound = rules.lexical_bound.as_deref().unwrap_or_default();
    if bound.is_empty() || !fields.lemma(auxiliary).contains(bound) {
        return true;
    }

    let before: Vec<(usize, &'s Token)> = sentence.siblings(anchor, before).take(2).collect();
    if is_reflexive(fields, rules, &before) {
        let (idx, pronoun) = before[0];
        pp.prepend_word(Word::from_token(fields, idx, pronoun, true));
        pp.is_reflexive = true;
        return true;
    }

    let lemma = fields.lemma(participle);
    rules.aux_be.iter().any(|l| l == lemma)
}

/// Reflexive pronoun directly before the auxiliary.
///
/// Pronouns that double as subjects ("nous", "vous") only count when they are
/// themselves preceded by a subject pronoun.
fn is_reflexive(fields: &TokenFields<'_>, rules: &PerfectRules, before: &[(usize, &Token)]) -> bool {
    if rules.reflexive_lemmata.is_empty() || before.len() < 2 {
        return false;
    }

    let lemma = fields.lemma(before[0].1);
    if !rules.reflexive_lemmata.iter().any(|l| l == lemma) {
        return false;
    }

    !rules.reflexive_ambiguous.iter().any(|l| l == lemma)
        || rules.reflexive_subject_tag.as_deref() == Some(fields.pos(before[1].1))
}
