//! OPUS alignment files.
//!
//! One file per language pair, named after the sorted pair (`en-nl.xml`)
//! and stored next to the language directories. It holds one link group
//! per aligned document pair:
//!
//! ```xml
//! <linkGrp targType="s" fromDoc="en/ep-00-01-17.xml.gz" toDoc="nl/ep-00-01-17.xml.gz">
//!   <link xtargets="1;1" certainty="0.8" />
//!   <link xtargets="2;2 3" />
//! </linkGrp>
//! ```
//!
//! `fromDoc` belongs to the language that sorts first. Document paths may
//! carry a `.gz` suffix; both forms are accepted.
//!
//! TEI alignment files of the Dutch Parallel Corpus align a single document
//! pair and may list their links without a group. Those links form one group
//! without document names.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use layered_alignment::{parse_certainty, Alignment, AlignmentSet, LanguagePair, Side};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{CorpusError, CorpusResult};
use crate::xml::xml_error;

const GZ: &str = ".gz";

/// The alignments of one document pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGroup {
    /// Document of the first language, as written in the file
    pub from_doc: String,
    /// Document of the second language, as written in the file
    pub to_doc: String,
    pub alignments: Vec<Alignment>,
}

impl LinkGroup {
    /// The document of `side`, without a `.gz` suffix.
    pub fn document(&self, side: Side) -> &str {
        let doc = match side {
            Side::First => &self.from_doc,
            Side::Second => &self.to_doc,
        };
        doc.strip_suffix(GZ).unwrap_or(doc)
    }

    fn links(&self, side: Side, document: &str) -> bool {
        let doc = match side {
            Side::First => &self.from_doc,
            Side::Second => &self.to_doc,
        };
        doc == document || doc.strip_suffix(GZ) == Some(document)
    }
}

/// A parsed alignment file.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentFile {
    pair: LanguagePair,
    groups: Vec<LinkGroup>,
}

impl AlignmentFile {
    /// Read the alignment file at `path` for `pair`.
    pub fn read(path: &Path, pair: LanguagePair) -> CorpusResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| CorpusError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, pair, &path.display().to_string())
    }

    /// Parse an alignment file. `source` names the file in errors.
    ///
    /// Links carry their segments in `xtargets` (OPUS) or `targets` (TEI),
    /// an optional `certainty`, and an optional `type` such as `"A: 1-2"`.
    pub fn parse(content: &str, pair: LanguagePair, source: &str) -> CorpusResult<Self> {
        let mut reader = Reader::from_str(content);
        let mut groups = Vec::new();
        let mut current: Option<LinkGroup> = None;
        let mut loose = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                xml_error(
                    source,
                    format!("at position {}: {}", reader.buffer_position(), e),
                )
            })?;

            match event {
                Event::Start(e) if e.name().as_ref() == b"linkGrp" => {
                    current = Some(LinkGroup {
                        from_doc: attribute(&e, b"fromDoc", source)?.unwrap_or_default(),
                        to_doc: attribute(&e, b"toDoc", source)?.unwrap_or_default(),
                        alignments: Vec::new(),
                    });
                }
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"link" => {
                    let alignment = link(&e, source)?;
                    match current.as_mut() {
                        Some(group) => group.alignments.push(alignment),
                        None => loose.push(alignment),
                    }
                }
                Event::End(e) if e.name().as_ref() == b"linkGrp" => {
                    groups.extend(current.take());
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !loose.is_empty() {
            groups.push(LinkGroup {
                from_doc: String::new(),
                to_doc: String::new(),
                alignments: loose,
            });
        }

        Ok(AlignmentFile { pair, groups })
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    pub fn groups(&self) -> &[LinkGroup] {
        &self.groups
    }

    /// Groups that align `document` (e.g. `"en/ep-00-12-15.xml"`) of `language`.
    pub fn groups_for(&self, language: &str, document: &str) -> Vec<&LinkGroup> {
        let Some(side) = self.pair.side(language) else {
            return Vec::new();
        };
        self.groups
            .iter()
            .filter(|group| group.links(side, document))
            .collect()
    }

    /// The alignments of `group` as a set for this file's pair.
    pub fn alignment_set(&self, group: &LinkGroup) -> AlignmentSet {
        group
            .alignments
            .iter()
            .cloned()
            .fold(AlignmentSet::new(self.pair.clone()), AlignmentSet::with)
    }

    /// The alignments of every group as one set.
    pub fn combined_set(&self) -> AlignmentSet {
        self.groups
            .iter()
            .flat_map(|group| group.alignments.iter().cloned())
            .fold(AlignmentSet::new(self.pair.clone()), AlignmentSet::with)
    }
}

fn link(e: &BytesStart<'_>, source: &str) -> CorpusResult<Alignment> {
    let targets = match attribute(e, b"xtargets", source)? {
        Some(targets) => targets,
        None => attribute(e, b"targets", source)?.unwrap_or_default(),
    };
    let certainty = attribute(e, b"certainty", source)?;

    let mut alignment = Alignment::from_targets(&targets)?
        .with_certainty(parse_certainty(certainty.as_deref())?);
    if let Some(kind) = attribute(e, b"type", source)? {
        // "A: 1-2" carries the cardinality after the category
        let kind = kind.rsplit(": ").next().unwrap_or_default().to_string();
        alignment = alignment.with_kind(kind);
    }
    Ok(alignment)
}

fn attribute(e: &BytesStart<'_>, name: &[u8], source: &str) -> CorpusResult<Option<String>> {
    let Some(attr) = e.try_get_attribute(name).map_err(|e| xml_error(source, e))? else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(|e| xml_error(source, e))?;
    Ok(Some(value.into_owned()))
}

/// Alignment files of one run, read on first use.
///
/// A file that is missing or unreadable is remembered as such, so the
/// warning is logged once per run.
#[derive(Debug, Default)]
pub struct AlignmentStore {
    files: HashMap<PathBuf, Option<AlignmentFile>>,
}

impl AlignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the alignment file for `pair` in `data_folder`.
    pub fn path(data_folder: &Path, pair: &LanguagePair) -> PathBuf {
        data_folder.join(format!("{}.xml", pair.file_stem()))
    }

    /// The alignment file for `pair`, or `None` when there is none.
    pub fn file(&mut self, data_folder: &Path, pair: &LanguagePair) -> Option<&AlignmentFile> {
        self.file_at(Self::path(data_folder, pair), pair)
    }

    /// The alignment file at `path`, read as `pair`.
    pub fn file_at(&mut self, path: PathBuf, pair: &LanguagePair) -> Option<&AlignmentFile> {
        self.files
            .entry(path)
            .or_insert_with_key(|path| {
                if !path.is_file() {
                    tracing::warn!("No alignment file found for {} ({})", pair, path.display());
                    return None;
                }
                match AlignmentFile::read(path, pair.clone()) {
                    Ok(file) => {
                        tracing::debug!(
                            "Read {} link groups from {}",
                            file.groups.len(),
                            path.display()
                        );
                        Some(file)
                    }
                    Err(e) => {
                        tracing::warn!("Skipping alignments for {}: {}", pair, e);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Number of files looked up so far, found or not.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPUS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE cesAlign PUBLIC "-//CES//DTD XML cesAlign//EN" "">
<cesAlign version="1.0">
<linkGrp targType="s" fromDoc="en/ep-00-12-15.xml.gz" toDoc="nl/ep-00-12-15.xml.gz">
<link xtargets="1;1" certainty="0.9" />
<link xtargets="2;2 3" />
<link xtargets="4;" />
</linkGrp>
<linkGrp targType="s" fromDoc="en/ep-01-01-01.xml" toDoc="nl/ep-01-01-01.xml">
<link xtargets="1;1" />
</linkGrp>
</cesAlign>
"#;

    fn file() -> AlignmentFile {
        AlignmentFile::parse(OPUS, LanguagePair::new("en", "nl"), "en-nl.xml").unwrap()
    }

    #[test]
    fn test_parse_link_groups() {
        let file = file();
        assert_eq!(file.groups().len(), 2);

        let group = &file.groups()[0];
        assert_eq!(group.alignments.len(), 3);
        assert_eq!(group.alignments[0].certainty, Some(0.9));
        assert_eq!(group.alignments[1].targets, vec!["2", "3"]);
        assert!(group.alignments[2].targets.is_empty());
    }

    #[test]
    fn test_groups_for_accepts_gz() {
        let file = file();
        let groups = file.groups_for("en", "en/ep-00-12-15.xml");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].document(Side::Second), "nl/ep-00-12-15.xml");

        assert_eq!(file.groups_for("nl", "nl/ep-01-01-01.xml").len(), 1);
        assert!(file.groups_for("nl", "en/ep-01-01-01.xml").is_empty());
        assert!(file.groups_for("fr", "fr/ep-01-01-01.xml").is_empty());
    }

    #[test]
    fn test_tei_links() {
        let tei = r#"<linkGrp fromDoc="nl/doc.xml" toDoc="en/doc.xml">
            <link type="A: 1-2" targets="p1.s9; p1.s9 p1.s10"/>
        </linkGrp>"#;
        let file = AlignmentFile::parse(tei, LanguagePair::ordered("nl", "en"), "tei").unwrap();
        let alignment = &file.groups()[0].alignments[0];
        assert_eq!(alignment.kind.as_deref(), Some("1-2"));
        assert_eq!(alignment.targets, vec!["p1.s9", "p1.s10"]);
    }

    #[test]
    fn test_links_without_group() {
        let tei = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><body>
            <link type="A: 1-1" targets="p1.s1; p1.s1"/>
            <link type="B: 2-1" targets="p1.s2 p1.s3; p1.s2"/>
        </body></text></TEI>"#;
        let file = AlignmentFile::parse(tei, LanguagePair::ordered("nl", "en"), "tei").unwrap();
        assert_eq!(file.groups().len(), 1);
        assert_eq!(file.groups()[0].document(Side::First), "");

        let set = file.combined_set();
        assert_eq!(set.len(), 2);
        let (alignment, own, other) = set.find("en", "p1.s2").unwrap();
        assert_eq!(alignment.kind.as_deref(), Some("2-1"));
        assert_eq!(own, ["p1.s2"]);
        assert_eq!(other, ["p1.s2", "p1.s3"]);
    }

    #[test]
    fn test_invalid_certainty() {
        let bad = r#"<linkGrp fromDoc="en/a.xml" toDoc="nl/a.xml"><link xtargets="1;1" certainty="high"/></linkGrp>"#;
        let err = AlignmentFile::parse(bad, LanguagePair::new("en", "nl"), "bad").unwrap_err();
        assert_eq!(err.to_string(), "invalid alignment certainty \"high\"");
    }

    #[test]
    fn test_store_remembers_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en-nl.xml"), OPUS).unwrap();

        let mut store = AlignmentStore::new();
        let pair = LanguagePair::new("nl", "en");
        assert_eq!(store.file(dir.path(), &pair).map(|f| f.groups().len()), Some(2));
        assert!(store.file(dir.path(), &LanguagePair::new("en", "de")).is_none());
        assert_eq!(store.len(), 2);

        // cached, the file is not read again
        fs::remove_file(dir.path().join("en-nl.xml")).unwrap();
        assert!(store.file(dir.path(), &pair).is_some());
    }
}
