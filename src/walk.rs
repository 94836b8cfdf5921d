//! The sibling walk shared by all construction variants.
//!
//! Each variant supplies a slot function that is consulted for every sibling
//! before the common stop rules apply.

use crate::construction::{Construction, Word};
use crate::rules::{LanguageRules, TokenFields};
use crate::sentence::{is_punctuation, Direction, Token};

/// Outcome of offering a sibling to a slot function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The slot handled the sibling; end the walk with this result
    Done(bool),
    /// The sibling does not fill the slot
    Pass,
}

/// Walk the siblings of the token at `from` in `direction`.
///
/// A sibling the slot passes on ends the walk without success when it is
/// punctuation or carries a stop tag, and is otherwise appended as an
/// intervening word.
pub(crate) fn walk_siblings<'s, F>(
    construction: &mut Construction<'s>,
    fields: &TokenFields<'_>,
    rules: &LanguageRules,
    from: usize,
    direction: Direction,
    mut slot: F,
) -> bool
where
    F: FnMut(&mut Construction<'s>, usize, &'s Token) -> Step,
{
    let sentence = construction.sentence();
    for (idx, token) in sentence.siblings(from, direction) {
        if let Step::Done(found) = slot(construction, idx, token) {
            return found;
        }

        if is_punctuation(fields.text(token)) || rules.is_stop_tag(fields.pos(token)) {
            return false;
        }

        construction.add_word(Word::from_token(fields, idx, token, false));
    }
    false
}
