//! Result rows and their CSV output.
//!
//! Rows are written with `;` as delimiter, after a UTF-8 byte order mark so
//! spreadsheet applications pick up the encoding.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::{CorpusError, CorpusResult};

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Alignment label and rendered translation for one target language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationColumns {
    pub label: String,
    pub text: String,
}

/// One line of output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    pub document: String,
    pub sentence: String,
    /// Construction type, or the sentence tense in one-per-sentence mode
    pub kind: String,
    /// Construction words, or the verb forms in one-per-sentence mode
    pub words: String,
    /// Identifiers of the construction words
    pub ids: String,
    /// The rendered source sentence
    pub text: String,
    /// One entry per target language, in configuration order
    pub translations: Vec<TranslationColumns>,
}

impl ResultRow {
    /// The row as output fields.
    pub fn to_record(&self) -> Vec<&str> {
        let mut record = vec![
            self.document.as_str(),
            self.sentence.as_str(),
            self.kind.as_str(),
            self.words.as_str(),
            self.ids.as_str(),
            self.text.as_str(),
        ];
        for columns in &self.translations {
            record.push(&columns.label);
            record.push(&columns.text);
        }
        record
    }
}

/// Header matching [`ResultRow::to_record`].
pub fn header(source: &str, targets: &[String]) -> Vec<String> {
    let mut header = vec![
        "document".to_string(),
        "sentence".to_string(),
        format!("type {}", source),
        format!("words {}", source),
        format!("ids {}", source),
        source.to_string(),
    ];
    for target in targets {
        header.push("alignment type".to_string());
        header.push(target.clone());
    }
    header
}

/// Writes result rows as `;`-separated values.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ResultWriter<File> {
    pub fn create(path: &Path) -> CorpusResult<Self> {
        let file = File::create(path).map_err(|e| CorpusError::Write {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::new(file)
    }
}

impl<W: Write> ResultWriter<W> {
    pub fn new(mut inner: W) -> CorpusResult<Self> {
        inner.write_all(BOM).map_err(write_error)?;
        let writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(inner);
        Ok(ResultWriter { writer })
    }

    pub fn write_header(&mut self, header: &[String]) -> CorpusResult<()> {
        self.writer.write_record(header).map_err(write_error)
    }

    /// Write any record, such as a [`crate::LemmaCount`].
    pub fn write_record<I, T>(&mut self, record: I) -> CorpusResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(record).map_err(write_error)
    }

    pub fn write_rows(&mut self, rows: &[ResultRow]) -> CorpusResult<()> {
        for row in rows {
            self.writer.write_record(row.to_record()).map_err(write_error)?;
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(self) -> CorpusResult<W> {
        self.writer.into_inner().map_err(write_error)
    }
}

fn write_error(e: impl std::fmt::Display) -> CorpusError {
    CorpusError::Write {
        message: e.to_string(),
    }
}
