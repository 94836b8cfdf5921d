//! Where documents, translations and alignment files live.
//!
//! OPUS corpora keep one directory per language and one alignment file per
//! language pair at the corpus root:
//!
//! ```text
//! europarl/
//!   en/ep-00-12-15.xml
//!   nl/ep-00-12-15.xml
//!   en-nl.xml
//! ```
//!
//! The Dutch Parallel Corpus keeps every file of a document in one
//! directory. Documents share a prefix that ends in a digit, and every
//! alignment file pairs Dutch with one other language:
//!
//! ```text
//! dpc-bal-001236-en-tei.xml
//! dpc-bal-001236-nl-tei.xml
//! dpc-bal-001236-nl-en-tei.xml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use layered_alignment::LanguagePair;

use crate::document::file_name;
use crate::errors::{CorpusError, CorpusResult};

const TEI: &str = "-tei.xml";

/// The file layout of a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CorpusLayout {
    /// Language directories with pair-wide alignment files
    #[default]
    Opus,
    /// Dutch Parallel Corpus TEI files, aligned through Dutch
    Dpc,
}

impl CorpusLayout {
    /// The language every alignment file of this layout includes.
    pub fn default_pivot(self) -> Option<&'static str> {
        match self {
            CorpusLayout::Opus => None,
            CorpusLayout::Dpc => Some("nl"),
        }
    }

    /// Sorted documents of `language` in `dir_name`.
    pub fn list_filenames(self, dir_name: &Path, language: &str) -> CorpusResult<Vec<PathBuf>> {
        match self {
            CorpusLayout::Opus => list_filenames(dir_name),
            CorpusLayout::Dpc => {
                let mut file_names = read_dir(dir_name)?;
                file_names.retain(|path| dpc_prefix(path, language).is_some());
                tracing::debug!(
                    "Found {} {} documents in {}",
                    file_names.len(),
                    language,
                    file_name(dir_name)
                );
                Ok(file_names)
            }
        }
    }

    /// The name reported for the document at `path`.
    ///
    /// OPUS documents go by their file name, DPC documents by their prefix.
    pub fn document_name(self, path: &Path, language: &str) -> String {
        match self {
            CorpusLayout::Dpc => match dpc_prefix(path, language) {
                Some(prefix) => prefix.to_string(),
                None => file_name(path),
            },
            CorpusLayout::Opus => file_name(path),
        }
    }
}

/// The document prefix of a DPC file name, e.g. `"dpc-bal-001236"` for
/// `dpc-bal-001236-en-tei.xml` in `en`.
pub fn dpc_prefix<'p>(path: &'p Path, language: &str) -> Option<&'p str> {
    let name = path.file_name()?.to_str()?;
    let prefix = name.strip_suffix(TEI)?.strip_suffix(language)?.strip_suffix('-')?;
    prefix
        .ends_with(|c: char| c.is_ascii_digit())
        .then_some(prefix)
}

/// The translation of the DPC document at `path` into `language`.
pub fn dpc_translation(path: &Path, prefix: &str, language: &str) -> PathBuf {
    path.with_file_name(format!("{}-{}{}", prefix, language, TEI))
}

/// The alignment file of the DPC document at `path` for `pair`, written in
/// pair order (`nl-en`).
pub fn dpc_alignment(path: &Path, prefix: &str, pair: &LanguagePair) -> PathBuf {
    path.with_file_name(format!(
        "{}-{}-{}{}",
        prefix,
        pair.first(),
        pair.second(),
        TEI
    ))
}

/// Sorted `*.xml` files of a directory.
pub fn list_filenames(dir_name: &Path) -> CorpusResult<Vec<PathBuf>> {
    let mut file_names = read_dir(dir_name)?;
    file_names.retain(|path| path.extension().map_or(false, |e| e == "xml"));

    tracing::debug!(
        "Found {} documents in {}",
        file_names.len(),
        file_name(dir_name)
    );
    Ok(file_names)
}

/// Sorted files of a directory.
fn read_dir(dir_name: &Path) -> CorpusResult<Vec<PathBuf>> {
    let read_error = |e: std::io::Error| CorpusError::Read {
        path: dir_name.display().to_string(),
        message: e.to_string(),
    };

    let mut file_names = Vec::new();
    for entry in fs::read_dir(dir_name).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() {
            file_names.push(path);
        }
    }
    file_names.sort();
    Ok(file_names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpc_prefix() {
        let path = Path::new("dpc/dpc-bal-001236-en-tei.xml");
        assert_eq!(dpc_prefix(path, "en"), Some("dpc-bal-001236"));
        assert_eq!(dpc_prefix(path, "nl"), None);

        // alignment files do not end in a digit before the language
        assert_eq!(dpc_prefix(Path::new("dpc-bal-001236-nl-en-tei.xml"), "en"), None);
        assert_eq!(dpc_prefix(Path::new("dpc-bal-001236-en.xml"), "en"), None);
    }

    #[test]
    fn test_dpc_paths() {
        let path = Path::new("dpc/dpc-bal-001236-en-tei.xml");
        assert_eq!(
            dpc_translation(path, "dpc-bal-001236", "fr"),
            PathBuf::from("dpc/dpc-bal-001236-fr-tei.xml")
        );
        assert_eq!(
            dpc_alignment(path, "dpc-bal-001236", &LanguagePair::ordered("nl", "en")),
            PathBuf::from("dpc/dpc-bal-001236-nl-en-tei.xml")
        );
    }

    #[test]
    fn test_document_name() {
        let path = Path::new("dpc/dpc-bal-001236-en-tei.xml");
        assert_eq!(CorpusLayout::Dpc.document_name(path, "en"), "dpc-bal-001236");
        assert_eq!(
            CorpusLayout::Opus.document_name(path, "en"),
            "dpc-bal-001236-en-tei.xml"
        );
    }

    #[test]
    fn test_list_dpc_documents() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "dpc-bal-000002-en-tei.xml",
            "dpc-bal-000001-en-tei.xml",
            "dpc-bal-000001-nl-tei.xml",
            "dpc-bal-000001-nl-en-tei.xml",
            "dpc-bal-000001-en-mtd.xml",
        ] {
            fs::write(dir.path().join(name), "<TEI/>").unwrap();
        }

        let names: Vec<_> = CorpusLayout::Dpc
            .list_filenames(dir.path(), "en")
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, vec!["dpc-bal-000001-en-tei.xml", "dpc-bal-000002-en-tei.xml"]);

        assert_eq!(CorpusLayout::Opus.list_filenames(dir.path(), "en").unwrap().len(), 5);
    }
}
