//! Naive sentence tense classification.
//!
//! Works on the verb tags of the Penn Treebank and BNC tagsets. Used to
//! label sentences that have no construction when one result per sentence
//! is requested.

use std::collections::BTreeSet;
use std::fmt;

/// Form of a single verb, derived from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerbForm {
    Present,
    Past,
    Participle,
    Gerund,
    Infinitive,
    Modal,
}

impl VerbForm {
    /// Classify a tag, `None` for tags that are not verbs.
    pub fn from_tag(pos: &str) -> Option<Self> {
        if pos.starts_with('V') && pos.chars().count() == 3 {
            return match pos.chars().last() {
                Some('B' | 'P' | 'Z') => Some(VerbForm::Present),
                Some('D') => Some(VerbForm::Past),
                Some('N') => Some(VerbForm::Participle),
                Some('G') => Some(VerbForm::Gerund),
                Some('I') => Some(VerbForm::Infinitive),
                _ if pos == "VM0" => Some(VerbForm::Modal),
                _ => None,
            };
        }
        match pos {
            "MD" => Some(VerbForm::Modal),
            "BES" => Some(VerbForm::Present),
            "VB" => Some(VerbForm::Infinitive),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VerbForm::Present => "present",
            VerbForm::Past => "past",
            VerbForm::Participle => "participle",
            VerbForm::Gerund => "gerund",
            VerbForm::Infinitive => "infinitive",
            VerbForm::Modal => "modal",
        }
    }
}

impl fmt::Display for VerbForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tense assigned to a whole sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceTense {
    /// No verbs found
    None,
    /// A mix of verb forms without a clear tense
    Other,
    Form(VerbForm),
}

impl fmt::Display for SentenceTense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceTense::None => f.write_str("none"),
            SentenceTense::Other => f.write_str("other"),
            SentenceTense::Form(form) => form.fmt(f),
        }
    }
}

/// The sentence tense plus the form of each verb, in sentence order.
pub fn sentence_tense<'a, I>(tags: I) -> (SentenceTense, Vec<VerbForm>)
where
    I: IntoIterator<Item = &'a str>,
{
    use VerbForm::*;

    let forms: Vec<VerbForm> = tags.into_iter().filter_map(VerbForm::from_tag).collect();
    let set: BTreeSet<VerbForm> = forms.iter().copied().collect();
    let set: Vec<VerbForm> = set.into_iter().collect();

    let tense = match set.as_slice() {
        [] => SentenceTense::None,
        [form] => SentenceTense::Form(*form),
        [Present, Gerund] | [Present, Infinitive] | [Present, Gerund, Infinitive] => {
            SentenceTense::Form(Present)
        }
        [Past, Gerund] | [Past, Infinitive] | [Past, Gerund, Infinitive] => SentenceTense::Form(Past),
        [Infinitive, Modal] => SentenceTense::Form(Modal),
        _ => SentenceTense::Other,
    };
    (tense, forms)
}
