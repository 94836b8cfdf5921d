//! Debug rendering of constructions under their sentence.
//!
//! ```text
//! She  has  always  loved  it  .
//!      ╰────┄┄┄┄┄┄──────╯ present perfect
//! ```

use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::construction::Construction;
use crate::sentence::Sentence;

pub struct ConstructionDisplay<'a> {
    sentence: &'a Sentence,
    include: Vec<&'a Construction<'a>>,
}

// 0,   1,   2,      3,     4,  5 - token indexes
// 0,   5,   10,     18,    25, 29 - display start indexes
// She  has  always  loved  it  .
//      ╰────┄┄┄┄┄┄──────╯ present perfect
impl<'a> fmt::Display for ConstructionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();

        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for token in self.sentence.tokens.iter() {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }

                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                let text = token.text.trim();
                opening_line.push_str(if text.is_empty() { " " } else { text });
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }

        f.write_str(&opening_line)?;

        for construction in self.include.iter() {
            let words = construction.words();
            let (Some(first), Some(last)) = (
                words.iter().map(|w| w.position).min(),
                words.iter().map(|w| w.position).max(),
            ) else {
                continue;
            };
            let (Some(&start_char_idx), Some(&end_char_idx)) = (
                token_idx_to_start_display_char_idx.get(first),
                token_idx_to_end_display_char_idx.get(last),
            ) else {
                continue;
            };

            f.write_char('\n')?;
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            // intervening words are drawn dotted
            for char_idx in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                let in_gap = words.iter().any(|w| {
                    !w.in_construction
                        && token_idx_to_start_display_char_idx[w.position] <= char_idx
                        && char_idx < token_idx_to_end_display_char_idx[w.position]
                });
                f.write_char(if in_gap { '┄' } else { '─' })?;
            }

            if end_char_idx - start_char_idx > 1 {
                f.write_char('╯')?;
            }

            write!(f, " {}", construction.type_label())?;
        }

        Ok(())
    }
}

impl<'a> ConstructionDisplay<'a> {
    pub fn new(sentence: &'a Sentence) -> Self {
        ConstructionDisplay {
            sentence,
            include: Vec::new(),
        }
    }

    /// Constructions of other sentences are skipped.
    pub fn include(&mut self, construction: &'a Construction<'a>) {
        if std::ptr::eq(construction.sentence(), self.sentence) {
            self.include.push(construction);
        }
    }

    /// Takes self
    pub fn with(mut self, construction: &'a Construction<'a>) -> Self {
        self.include(construction);
        self
    }
}
