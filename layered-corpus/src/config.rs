//! Extraction options.

use layered_alignment::{FileSelection, LabelStyle};
use layered_constructions::{ConstructionType, LemmaFilter, PosQuery, Tense};

use crate::layout::CorpusLayout;

/// How sentences are rendered in the result columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Plain text with the construction marked up
    #[default]
    Text,
    /// The sentence element as XML
    Xml,
}

/// Options of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Language of the documents that are searched
    pub source: String,
    /// Languages whose aligned translations are added to each result
    pub targets: Vec<String>,
    /// Construction to search for; `None` reports every sentence
    pub construction: Option<ConstructionType>,
    pub tense: Tense,
    /// Restricts the completing words of a construction
    pub lemmata: LemmaFilter,
    /// Tags, patterns and token ranges for [`ConstructionType::PoS`]
    pub query: PosQuery,
    /// Only search sentences with these identifiers; empty searches all
    pub sentence_ids: Vec<String>,
    /// Only report anchors whose identifier ends in `.<position>`
    pub position: Option<usize>,
    /// Report one line per sentence, classified by tense when nothing matched
    pub one_per_sentence: bool,
    pub output: OutputMode,
    /// Also search the translations for a perfect and mark it
    pub search_in_target: bool,
    /// Language through which translations are resolved when there is no
    /// direct alignment
    pub pivot: Option<String>,
    pub label_style: LabelStyle,
    pub selection: FileSelection,
    /// Only process these files of the source directory
    pub file_names: Vec<String>,
    pub layout: CorpusLayout,
}

impl ExtractorConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Options for a Dutch Parallel Corpus run from `source`.
    ///
    /// Translations between two non-Dutch languages go through Dutch, and
    /// labels are written `"1=>2"`.
    pub fn dpc(source: impl Into<String>) -> Self {
        Self::new(source)
            .with_layout(CorpusLayout::Dpc)
            .with_label_style(LabelStyle::Compact)
    }

    /// Takes self, sets the target languages
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Takes self, sets the construction to search for
    pub fn with_construction(mut self, construction: ConstructionType) -> Self {
        self.construction = Some(construction);
        self
    }

    /// Takes self, sets the tense
    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = tense;
        self
    }

    /// Takes self, sets the lemma filter
    pub fn with_lemmata(mut self, lemmata: LemmaFilter) -> Self {
        self.lemmata = lemmata;
        self
    }

    /// Takes self, sets the query for [`ConstructionType::PoS`]
    pub fn with_query(mut self, query: PosQuery) -> Self {
        self.query = query;
        self
    }

    /// Takes self, sets the sentence filter
    pub fn with_sentence_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sentence_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Takes self, sets the anchor position filter
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Takes self, enables one line per sentence
    pub fn one_per_sentence(mut self) -> Self {
        self.one_per_sentence = true;
        self
    }

    /// Takes self, sets the output mode
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Takes self, enables searching in the translations
    pub fn searching_in_target(mut self) -> Self {
        self.search_in_target = true;
        self
    }

    /// Takes self, sets the pivot language
    pub fn with_pivot(mut self, pivot: impl Into<String>) -> Self {
        self.pivot = Some(pivot.into());
        self
    }

    /// Takes self, sets the alignment label style
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Takes self, sets the file selection
    pub fn with_selection(mut self, selection: FileSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Takes self, restricts the run to these file names
    pub fn with_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Takes self, sets the corpus layout
    pub fn with_layout(mut self, layout: CorpusLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Whether `id` passes the position filter.
    pub fn admits_position(&self, id: &str) -> bool {
        match self.position {
            Some(position) => id.ends_with(&format!(".{}", position)),
            None => true,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            targets: Vec::new(),
            construction: None,
            tense: Tense::default(),
            lemmata: LemmaFilter::any(),
            query: PosQuery::new(),
            sentence_ids: Vec::new(),
            position: None,
            one_per_sentence: false,
            output: OutputMode::default(),
            search_in_target: false,
            pivot: None,
            // OPUS alignment labels are written "1 => 2"
            label_style: LabelStyle::Spaced,
            selection: FileSelection::default(),
            file_names: Vec::new(),
            layout: CorpusLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ExtractorConfig::new("fr")
            .with_targets(["nl", "en"])
            .with_construction(ConstructionType::RecentPast)
            .with_position(1)
            .one_per_sentence();

        assert_eq!(config.source, "fr");
        assert_eq!(config.targets, vec!["nl", "en"]);
        assert_eq!(config.construction, Some(ConstructionType::RecentPast));
        assert!(config.one_per_sentence);
        assert_eq!(config.label_style, LabelStyle::Spaced);
    }

    #[test]
    fn test_dpc() {
        let config = ExtractorConfig::dpc("en").with_targets(["fr"]);
        assert_eq!(config.layout, CorpusLayout::Dpc);
        assert_eq!(config.label_style, LabelStyle::Compact);
        // the pivot comes from the layout unless set
        assert_eq!(config.pivot, None);
    }

    #[test]
    fn test_position_filter() {
        let config = ExtractorConfig::new("en").with_position(1);
        assert!(config.admits_position("w3.1"));
        assert!(!config.admits_position("w3.11"));
        assert!(ExtractorConfig::new("en").admits_position("w3.11"));
    }
}
