//! Corpus documents and the alignment data loaded for them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use layered_alignment::{AlignmentSet, SegmentIndex};
use layered_constructions::{CorpusAttrs, Sentence};

use crate::errors::CorpusResult;
use crate::xml::read_sentences;

/// A document of one language, e.g. `<data>/en/ep-00-12-15.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn read(path: &Path, attrs: &CorpusAttrs) -> CorpusResult<Self> {
        Ok(Document {
            path: path.to_path_buf(),
            sentences: read_sentences(path, attrs)?,
        })
    }

    /// File name, e.g. `"ep-00-12-15.xml"`.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    /// The corpus root holding the language directories and alignment files.
    pub fn data_folder(&self) -> PathBuf {
        data_folder(&self.path)
    }

    /// Keep only the sentences whose identifier is listed. An empty list keeps all.
    pub fn retain_sentences(&mut self, ids: &[String]) {
        if !ids.is_empty() {
            self.sentences.retain(|s| ids.contains(&s.id));
        }
    }

    /// Lazy identifier index over the sentences of this document.
    pub fn index(&self) -> SegmentIndex<'_, Sentence> {
        SegmentIndex::new(&self.sentences, |s| s.id.as_str())
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn data_folder(path: &Path) -> PathBuf {
    path.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Alignment sets and translated documents for one source document.
#[derive(Debug, Default)]
pub struct DocumentAlignments {
    /// One set per language pair, including pivot hops
    pub sets: Vec<AlignmentSet>,
    /// Translated document per target language
    pub translations: BTreeMap<String, Document>,
    /// Target languages with complete alignment data
    pub linked: Vec<String>,
}

impl DocumentAlignments {
    /// Add `set` unless a set for its pair is present already.
    pub fn add_set(&mut self, set: AlignmentSet) {
        if !self.sets.iter().any(|s| s.pair() == set.pair()) {
            self.sets.push(set);
        }
    }

    /// Whether every target language has alignment data.
    pub fn is_complete(&self, targets: &[String]) -> bool {
        targets.iter().all(|t| self.linked.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_alignment::{Alignment, LanguagePair};

    #[test]
    fn test_paths() {
        let doc = Document {
            path: PathBuf::from("data/europarl/en/ep-00-12-15.xml"),
            sentences: Vec::new(),
        };
        assert_eq!(doc.name(), "ep-00-12-15.xml");
        assert_eq!(doc.data_folder(), PathBuf::from("data/europarl"));
    }

    #[test]
    fn test_retain_sentences() {
        let mut doc = Document {
            path: PathBuf::from("en/a.xml"),
            sentences: vec![Sentence::new("1"), Sentence::new("2"), Sentence::new("3")],
        };
        doc.retain_sentences(&[]);
        assert_eq!(doc.sentences.len(), 3);

        doc.retain_sentences(&["3".to_string(), "1".to_string()]);
        let ids: Vec<_> = doc.sentences.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(doc.index().get("3").map(|s| s.id.as_str()), Some("3"));
    }

    #[test]
    fn test_sets_are_unique_per_pair() {
        let mut alignments = DocumentAlignments::default();
        let pair = LanguagePair::new("en", "nl");
        alignments.add_set(AlignmentSet::new(pair.clone()).with(Alignment::new(["1"], ["1"])));
        alignments.add_set(AlignmentSet::new(pair));
        assert_eq!(alignments.sets.len(), 1);
        assert_eq!(alignments.sets[0].len(), 1);

        alignments.linked.push("nl".into());
        assert!(alignments.is_complete(&["nl".to_string()]));
        assert!(!alignments.is_complete(&["nl".to_string(), "de".to_string()]));
    }
}
