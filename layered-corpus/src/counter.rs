//! Verb lemma frequencies per document.
//!
//! Words whose tag starts with `V` count as verbs. Results list the lemmata
//! of each document from most to least frequent, ties in order of first
//! occurrence.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use layered_constructions::{RuleTable, TokenFields};

use crate::document::Document;
use crate::errors::CorpusResult;
use crate::layout::CorpusLayout;
use crate::output::ResultWriter;

/// Lemma of a word without one.
const NO_LEMMA: &str = "-";

/// Number of verbs with one lemma in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaCount {
    pub document: String,
    pub lemma: String,
    pub count: usize,
}

impl LemmaCount {
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.document.clone(),
            self.lemma.clone(),
            self.count.to_string(),
        ]
    }
}

/// Counts verb lemmata in the documents of one language.
pub struct VerbCounter<'r> {
    table: &'r RuleTable,
    source: String,
    fields: TokenFields<'r>,
    layout: CorpusLayout,
    tag_prefix: String,
}

impl<'r> VerbCounter<'r> {
    /// Fails when the rule table lacks `source`.
    pub fn new(table: &'r RuleTable, source: impl Into<String>) -> CorpusResult<Self> {
        let source = source.into();
        table.language(&source)?;
        Ok(VerbCounter {
            table,
            fields: table.fields(&source),
            source,
            layout: CorpusLayout::default(),
            tag_prefix: "V".to_string(),
        })
    }

    /// Takes self, sets the corpus layout
    pub fn with_layout(mut self, layout: CorpusLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Takes self, sets the tag prefix of verbs
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    pub fn header(&self) -> Vec<String> {
        vec!["document".into(), "lemma".into(), "count".into()]
    }

    /// Count the verbs of the documents in `dir_name` and write the results.
    ///
    /// Returns the number of rows written.
    pub fn process_folder<W: Write>(
        &self,
        dir_name: &Path,
        writer: &mut ResultWriter<W>,
    ) -> CorpusResult<usize> {
        writer.write_header(&self.header())?;

        let mut written = 0;
        for path in self.layout.list_filenames(dir_name, &self.source)? {
            let counts = self.process_file(&path)?;
            for count in &counts {
                writer.write_record(count.to_record())?;
            }
            written += counts.len();
        }
        Ok(written)
    }

    /// Verb lemma counts of a single document.
    pub fn process_file(&self, path: &Path) -> CorpusResult<Vec<LemmaCount>> {
        let document = Document::read(path, &self.table.corpus)?;
        let name = self.layout.document_name(path, &self.source);
        let lemma_attr = self.table.corpus.lemma.as_str();

        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for token in document.sentences.iter().flat_map(|s| &s.tokens) {
            if !self.fields.pos(token).starts_with(self.tag_prefix.as_str()) {
                continue;
            }
            let lemma = token.attr(lemma_attr).unwrap_or(NO_LEMMA);
            let position = *positions.entry(lemma).or_insert_with(|| {
                counts.push((lemma, 0));
                counts.len() - 1
            });
            counts[position].1 += 1;
        }
        // stable, so ties keep their first occurrence
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        tracing::debug!("Counted {} verb lemmata in {}", counts.len(), name);
        Ok(counts
            .into_iter()
            .map(|(lemma, count)| LemmaCount {
                document: name.clone(),
                lemma: lemma.to_string(),
                count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RULES: &str = "[languages.en]\nstop_tags = [\"V\"]\n";

    const DOCUMENT: &str = r#"<text>
<s id="1">
  <w id="w1.1" lem="it" pos="PP">It</w>
  <w id="w1.2" lem="have" pos="VHZ">has</w>
  <w id="w1.3" lem="rain" pos="VVN">rained</w>
</s>
<s id="2">
  <w id="w2.1" lem="we" pos="PP">We</w>
  <w id="w2.2" lem="have" pos="VHP">have</w>
  <w id="w2.3" lem="be" pos="VBN">been</w>
  <w id="w2.4" pos="VVN">wowed</w>
  <w id="w2.5" lem="have" pos="VHD">had</w>
</s>
</text>"#;

    fn table() -> RuleTable {
        RuleTable::from_toml_str(RULES).unwrap()
    }

    #[test]
    fn test_counts_most_common_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ep-00-12-15.xml");
        fs::write(&path, DOCUMENT).unwrap();

        let table = table();
        let counts = VerbCounter::new(&table, "en").unwrap().process_file(&path).unwrap();
        let counts: Vec<_> = counts
            .iter()
            .map(|c| (c.document.as_str(), c.lemma.as_str(), c.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("ep-00-12-15.xml", "have", 3),
                ("ep-00-12-15.xml", "rain", 1),
                ("ep-00-12-15.xml", "be", 1),
                ("ep-00-12-15.xml", "-", 1),
            ]
        );
    }

    #[test]
    fn test_tag_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.xml");
        fs::write(&path, DOCUMENT).unwrap();

        let table = table();
        let counter = VerbCounter::new(&table, "en").unwrap().with_tag_prefix("VH");
        let counts = counter.process_file(&path).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 3);
    }

    #[test]
    fn test_process_folder() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xml"), DOCUMENT).unwrap();
        fs::write(dir.path().join("a.xml"), "<text><s id=\"1\"><w lem=\"go\" pos=\"VVZ\">goes</w></s></text>").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

        let table = table();
        let mut writer = ResultWriter::new(Vec::new()).unwrap();
        let written = VerbCounter::new(&table, "en")
            .unwrap()
            .process_folder(dir.path(), &mut writer)
            .unwrap();
        assert_eq!(written, 5);

        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        insta::assert_snapshot!(text.trim_start_matches('\u{feff}').trim_end(), @r###"
        document;lemma;count
        a.xml;go;1
        b.xml;have;3
        b.xml;rain;1
        b.xml;be;1
        b.xml;-;1
        "###);
    }

    #[test]
    fn test_unknown_language() {
        let table = table();
        assert!(VerbCounter::new(&table, "de").is_err());
    }
}
