//! The construction matcher.
//!
//! A [`Matcher`] binds one language's rules, a tense and an optional lemma
//! filter. Candidate anchors are selected with [`Matcher::is_anchor`] and
//! each candidate is checked with [`Matcher::find`], which dispatches to the
//! state machine of the requested [`ConstructionType`].

use crate::construction::{Construction, ConstructionType};
use crate::errors::{RuleError, RuleResult};
use crate::lemmata::LemmaFilter;
use crate::pos::{self, PosQuery};
use crate::rules::{LanguageRules, RuleTable, Tense, TokenFields};
use crate::sentence::{Sentence, Token};
use crate::{article, continuous, perfect, recent_past, since_duration};

pub use crate::perfect::PerfectMode;

/// Matches constructions in sentences of one language.
#[derive(Debug, Clone)]
pub struct Matcher<'r> {
    language: String,
    rules: &'r LanguageRules,
    fields: TokenFields<'r>,
    tense: Tense,
    lemmata: LemmaFilter,
    query: PosQuery,
}

impl<'r> Matcher<'r> {
    /// Fails if the rule table has no section for `language`.
    pub fn new(table: &'r RuleTable, language: &str) -> RuleResult<Self> {
        let rules = table.language(language)?;
        Ok(Matcher {
            language: language.to_string(),
            rules,
            fields: table.fields(language),
            tense: Tense::default(),
            lemmata: LemmaFilter::any(),
            query: PosQuery::new(),
        })
    }

    /// Takes self, sets the tense of perfect anchors
    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = tense;
        self
    }

    /// Takes self, restricts completing words to `lemmata`
    pub fn with_lemmata(mut self, lemmata: LemmaFilter) -> Self {
        self.lemmata = lemmata;
        self
    }

    /// Takes self, sets the query for [`ConstructionType::PoS`]
    pub fn with_query(mut self, query: PosQuery) -> Self {
        self.query = query;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn rules(&self) -> &'r LanguageRules {
        self.rules
    }

    pub fn fields(&self) -> TokenFields<'r> {
        self.fields
    }

    pub fn tense(&self) -> Tense {
        self.tense
    }

    pub fn lemmata(&self) -> &LemmaFilter {
        &self.lemmata
    }

    pub fn query(&self) -> &PosQuery {
        &self.query
    }

    /// Fails if this language has no rules for `kind`. Queries need none.
    pub fn require(&self, kind: ConstructionType) -> RuleResult<()> {
        let configured = match kind {
            ConstructionType::Perfect => self.rules.perfect.is_some(),
            ConstructionType::RecentPast => self.rules.recent_past.is_some(),
            ConstructionType::Continuous => self.rules.continuous.is_some(),
            ConstructionType::SinceDuration => self.rules.since_duration.is_some(),
            ConstructionType::Article => self.rules.article.is_some(),
            ConstructionType::PoS => true,
        };
        if configured {
            Ok(())
        } else {
            Err(RuleError::MissingConstruction {
                language: self.language.clone(),
                construction: kind.name(),
            })
        }
    }

    /// Whether `token` may start a construction of type `kind`.
    pub fn is_anchor(&self, kind: ConstructionType, token: &Token) -> bool {
        let pos = self.fields.pos(token);
        let lemma = self.fields.lemma(token);
        match kind {
            ConstructionType::Perfect => self
                .rules
                .perfect
                .as_ref()
                .is_some_and(|r| r.anchor_for(self.tense).admits(pos, lemma)),
            ConstructionType::RecentPast => self
                .rules
                .recent_past
                .as_ref()
                .is_some_and(|r| r.anchor.admits(pos, lemma)),
            ConstructionType::Continuous => self
                .rules
                .continuous
                .as_ref()
                .is_some_and(|r| r.anchor.admits(pos, lemma)),
            ConstructionType::SinceDuration => self
                .rules
                .since_duration
                .as_ref()
                .is_some_and(|r| r.is_since(lemma)),
            ConstructionType::Article => self
                .rules
                .article
                .as_ref()
                .is_some_and(|r| r.is_article(pos, lemma)),
            ConstructionType::PoS => self.query.admits(self, token),
        }
    }

    /// Indexes of the candidate anchors of `kind` in `sentence`.
    pub fn anchors(&self, kind: ConstructionType, sentence: &Sentence) -> Vec<usize> {
        sentence
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| self.is_anchor(kind, token))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Check whether the token at `anchor` starts a construction of type `kind`.
    ///
    /// Returns `None` when there is no match, or when the language has no
    /// rules for `kind`.
    pub fn find<'s>(
        &self,
        kind: ConstructionType,
        sentence: &'s Sentence,
        anchor: usize,
    ) -> Option<Construction<'s>> {
        match kind {
            ConstructionType::Perfect => self.find_perfect(sentence, anchor, PerfectMode::default()),
            ConstructionType::RecentPast => {
                recent_past::check_recent_past(self, self.rules.recent_past.as_ref()?, sentence, anchor)
            }
            ConstructionType::Continuous => {
                continuous::check_continuous(self, self.rules.continuous.as_ref()?, sentence, anchor)
            }
            ConstructionType::SinceDuration => since_duration::check_since_duration(
                self,
                self.rules.since_duration.as_ref()?,
                sentence,
                anchor,
            ),
            ConstructionType::Article => {
                article::check_article(self, self.rules.article.as_ref()?, sentence, anchor)
            }
            ConstructionType::PoS => pos::check_pos(self, &self.query, sentence, anchor),
        }
    }

    /// Check for a perfect with explicit mode flags.
    pub fn find_perfect<'s>(
        &self,
        sentence: &'s Sentence,
        anchor: usize,
        mode: PerfectMode,
    ) -> Option<Construction<'s>> {
        perfect::check_perfect(self, self.rules.perfect.as_ref()?, sentence, anchor, mode)
    }

    /// All constructions of type `kind` in `sentence`, in anchor order.
    pub fn find_all<'s>(&self, kind: ConstructionType, sentence: &'s Sentence) -> Vec<Construction<'s>> {
        self.anchors(kind, sentence)
            .into_iter()
            .filter_map(|anchor| self.find(kind, sentence, anchor))
            .collect()
    }
}
