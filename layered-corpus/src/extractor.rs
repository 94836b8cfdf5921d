//! The extraction pipeline.
//!
//! Documents, translations and alignment files are found according to the
//! configured [`CorpusLayout`]. The [`Extractor`] searches the documents of the source language for
//! constructions and adds, for every result, the aligned sentences in each
//! target language.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use layered_alignment::{
    average_certainty, document_certainty, AlignmentResolver, AlignmentSet, LanguagePair,
    SegmentIndex,
};
use layered_constructions::{
    sentence_tense, Construction, ConstructionType, Matcher, RuleTable, Sentence,
};

use crate::config::{ExtractorConfig, OutputMode};
use crate::document::{Document, DocumentAlignments};
use crate::errors::CorpusResult;
use crate::layout::{dpc_alignment, dpc_prefix, dpc_translation, CorpusLayout};
use crate::links::AlignmentStore;
use crate::output::{header, ResultRow, ResultWriter, TranslationColumns};
use crate::xml::sentence_to_xml;

/// Link group of one document in an alignment file.
struct Linked {
    set: AlignmentSet,
    /// The aligned document, relative to the data folder
    other: String,
}

/// Candidate file during file selection.
struct Candidate {
    path: PathBuf,
    size: usize,
    certainty: Option<f64>,
}

/// Extracts constructions and their aligned translations.
pub struct Extractor<'r> {
    config: ExtractorConfig,
    table: &'r RuleTable,
    matcher: Matcher<'r>,
    /// Perfect matchers for the translations, when searching in them
    target_matchers: BTreeMap<String, Matcher<'r>>,
    resolver: AlignmentResolver,
    alignments: AlignmentStore,
}

impl<'r> Extractor<'r> {
    /// Fails when the rule table lacks the source language or the requested
    /// construction, or lacks perfect rules for a target language that is
    /// searched.
    pub fn new(table: &'r RuleTable, config: ExtractorConfig) -> CorpusResult<Self> {
        let matcher = Matcher::new(table, &config.source)?
            .with_tense(config.tense)
            .with_lemmata(config.lemmata.clone())
            .with_query(config.query.clone());
        if let Some(kind) = config.construction {
            matcher.require(kind)?;
        }

        let mut target_matchers = BTreeMap::new();
        if config.search_in_target {
            for target in &config.targets {
                let target_matcher = Matcher::new(table, target)?;
                target_matcher.require(ConstructionType::Perfect)?;
                target_matchers.insert(target.clone(), target_matcher);
            }
        }

        let mut resolver = AlignmentResolver::new().with_style(config.label_style);
        let pivot = config
            .pivot
            .clone()
            .or_else(|| config.layout.default_pivot().map(String::from));
        if let Some(pivot) = pivot {
            resolver = resolver.with_pivot(pivot);
        }

        Ok(Extractor {
            config,
            table,
            matcher,
            target_matchers,
            resolver,
            alignments: AlignmentStore::new(),
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Header of the result file.
    pub fn header(&self) -> Vec<String> {
        header(&self.config.source, &self.config.targets)
    }

    /// Process all selected files of `dir_name` and write the results.
    ///
    /// Returns the number of rows written.
    pub fn process_folder<W: Write>(
        &mut self,
        dir_name: &Path,
        writer: &mut ResultWriter<W>,
    ) -> CorpusResult<usize> {
        let file_names = self.collect_file_names(dir_name)?;
        writer.write_header(&self.header())?;

        let mut written = 0;
        for (n, file_name) in file_names.iter().enumerate() {
            let rows = self.process_file(file_name)?;
            writer.write_rows(&rows)?;
            written += rows.len();
            tracing::debug!("Processed {} of {} files", n + 1, file_names.len());
        }
        Ok(written)
    }

    /// The files of `dir_name` to process.
    ///
    /// Explicit file names, or else every document of the source language in
    /// sorted order; then
    /// the configured size filter, certainty ordering and limit.
    pub fn collect_file_names(&mut self, dir_name: &Path) -> CorpusResult<Vec<PathBuf>> {
        tracing::info!("Collecting file names...");

        let file_names = if self.config.file_names.is_empty() {
            self.config.layout.list_filenames(dir_name, &self.config.source)?
        } else {
            self.config
                .file_names
                .iter()
                .map(|name| dir_name.join(name))
                .collect()
        };

        let selection = self.config.selection.clone();
        let mut candidates = Vec::with_capacity(file_names.len());
        for path in file_names {
            let size = if selection.filters_size() {
                Document::read(&path, &self.table.corpus)?.sentences.len()
            } else {
                0
            };
            candidates.push(Candidate {
                path,
                size,
                certainty: None,
            });
        }

        if selection.sort_by_certainty {
            for candidate in candidates
                .iter_mut()
                .filter(|c| selection.admits_size(c.size))
            {
                candidate.certainty = self.alignment_certainty(&candidate.path);
            }
        }

        let file_names: Vec<PathBuf> = selection
            .apply(candidates, |c| c.size, |c| c.certainty)
            .into_iter()
            .map(|c| c.path)
            .collect();

        tracing::info!("Finished collecting file names, starting processing...");
        Ok(file_names)
    }

    /// Process the given files, or all selected files of `dir_name`.
    pub fn generate_results(
        &mut self,
        dir_name: &Path,
        file_names: Option<Vec<PathBuf>>,
    ) -> CorpusResult<Vec<ResultRow>> {
        let file_names = match file_names {
            Some(file_names) => file_names,
            None => self.collect_file_names(dir_name)?,
        };

        let mut results = Vec::new();
        for file_name in &file_names {
            results.extend(self.process_file(file_name)?);
        }
        Ok(results)
    }

    /// Process a single document.
    pub fn process_file(&mut self, path: &Path) -> CorpusResult<Vec<ResultRow>> {
        let t0 = Instant::now();
        tracing::info!("Now processing {}...", path.display());

        let mut document = Document::read(path, &self.table.corpus)?;
        document.retain_sentences(&self.config.sentence_ids);
        let alignments = self.load_alignments(&document, true);

        tracing::info!(
            "Finished parsing trees, took {:.3} seconds",
            t0.elapsed().as_secs_f64()
        );
        let t1 = Instant::now();

        // The indexes live as long as this document is processed
        let indexes: BTreeMap<&str, SegmentIndex<'_, Sentence>> = alignments
            .translations
            .iter()
            .map(|(language, translation)| (language.as_str(), translation.index()))
            .collect();

        let results = self.fetch_results(&document, &alignments, &indexes)?;

        tracing::info!(
            "Finished fetching results, took {:.3} seconds",
            t1.elapsed().as_secs_f64()
        );
        Ok(results)
    }

    fn fetch_results(
        &self,
        document: &Document,
        alignments: &DocumentAlignments,
        indexes: &BTreeMap<&str, SegmentIndex<'_, Sentence>>,
    ) -> CorpusResult<Vec<ResultRow>> {
        let name = self
            .config
            .layout
            .document_name(&document.path, &self.config.source);
        let mut results = Vec::new();

        for sentence in &document.sentences {
            let Some(kind) = self.config.construction else {
                let mut row = self.sentence_row(&name, sentence)?;
                row.translations = self.generate_translations(alignments, indexes, sentence)?;
                results.push(row);
                continue;
            };

            let mut found = false;
            for anchor in self.matcher.anchors(kind, sentence) {
                let Some(construction) = self.matcher.find(kind, sentence, anchor) else {
                    continue;
                };

                let id = self.matcher.fields().id(&sentence.tokens[anchor]);
                if !self.config.admits_position(id) {
                    tracing::debug!("Skipping {} at {}, outside position filter", kind, id);
                    continue;
                }

                let mut row = self.construction_row(&name, &construction)?;
                row.translations = self.generate_translations(alignments, indexes, sentence)?;
                results.push(row);
                found = true;

                if self.config.one_per_sentence {
                    break;
                }
            }

            if self.config.one_per_sentence && !found {
                let mut row = self.tense_row(&name, sentence);
                row.translations = self.generate_translations(alignments, indexes, sentence)?;
                results.push(row);
            }
        }

        Ok(results)
    }

    fn construction_row(&self, name: &str, construction: &Construction<'_>) -> CorpusResult<ResultRow> {
        let text = match self.config.output {
            OutputMode::Text => construction.mark_sentence(),
            OutputMode::Xml => sentence_to_xml(construction.sentence(), &self.table.corpus)?,
        };
        Ok(ResultRow {
            document: name.to_string(),
            sentence: construction.sentence_id().to_string(),
            kind: construction.type_label(),
            words: construction.construction_to_string(),
            ids: construction.construction_ids(),
            text,
            translations: Vec::new(),
        })
    }

    fn sentence_row(&self, name: &str, sentence: &Sentence) -> CorpusResult<ResultRow> {
        let text = match self.config.output {
            OutputMode::Text => sentence.words(),
            OutputMode::Xml => sentence_to_xml(sentence, &self.table.corpus)?,
        };
        Ok(ResultRow {
            document: name.to_string(),
            sentence: sentence.id.clone(),
            text,
            ..ResultRow::default()
        })
    }

    /// Row for a sentence without a construction, classified by tense.
    fn tense_row(&self, name: &str, sentence: &Sentence) -> ResultRow {
        let fields = self.matcher.fields();
        let (tense, forms) = sentence_tense(sentence.tokens.iter().map(|t| fields.pos(t)));
        ResultRow {
            document: name.to_string(),
            sentence: sentence.id.clone(),
            kind: tense.to_string(),
            words: forms
                .iter()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(","),
            ids: String::new(),
            text: sentence.words(),
            translations: Vec::new(),
        }
    }

    /// Alignment label and rendered translation per target language.
    fn generate_translations(
        &self,
        alignments: &DocumentAlignments,
        indexes: &BTreeMap<&str, SegmentIndex<'_, Sentence>>,
        sentence: &Sentence,
    ) -> CorpusResult<Vec<TranslationColumns>> {
        let mut result = Vec::with_capacity(self.config.targets.len());

        for target in &self.config.targets {
            let Some(index) = indexes.get(target.as_str()) else {
                result.push(TranslationColumns::default());
                continue;
            };

            let resolution =
                self.resolver
                    .resolve(&alignments.sets, &self.config.source, target, &sentence.id);
            let translated: Vec<&Sentence> = resolution
                .targets
                .iter()
                .filter_map(|id| {
                    let line = index.get(id);
                    if line.is_none() {
                        tracing::debug!("Segment {} not found in {} translation", id, target);
                    }
                    line
                })
                .collect();

            let text = match self.config.output {
                OutputMode::Xml if translated.is_empty() => String::new(),
                OutputMode::Xml => {
                    let lines = translated
                        .iter()
                        .map(|s| sentence_to_xml(s, &self.table.corpus))
                        .collect::<CorpusResult<Vec<_>>>()?;
                    format!("<root>{}</root>", lines.join("\n"))
                }
                OutputMode::Text => translated
                    .iter()
                    .map(|s| self.render_translation(target, s))
                    .collect::<Vec<_>>()
                    .join("\n"),
            };

            result.push(TranslationColumns {
                label: resolution.label,
                text,
            });
        }

        Ok(result)
    }

    /// The translated sentence, with its first perfect marked when searching
    /// in the translations.
    fn render_translation(&self, language: &str, sentence: &Sentence) -> String {
        self.find_translated(language, sentence)
            .map(|perfect| perfect.mark_sentence())
            .unwrap_or_else(|| sentence.words())
    }

    /// The perfect found in a translated sentence, if searching in translations.
    pub fn find_translated<'s>(&self, language: &str, sentence: &'s Sentence) -> Option<Construction<'s>> {
        self.target_matchers
            .get(language)?
            .find_all(ConstructionType::Perfect, sentence)
            .into_iter()
            .next()
    }

    /// Average alignment certainty of the document at `path`, or `None` when
    /// a target language has no alignment data.
    pub fn alignment_certainty(&mut self, path: &Path) -> Option<f64> {
        let document = Document {
            path: path.to_path_buf(),
            sentences: Vec::new(),
        };
        let alignments = self.load_alignments(&document, false);

        if self.resolver.pivot().is_none() {
            document_certainty(&alignments.sets, &self.config.source, &self.config.targets)
        } else if alignments.is_complete(&self.config.targets) {
            Some(average_certainty(&alignments.sets))
        } else {
            None
        }
    }

    /// Alignment sets and, with `include_translations`, translated documents
    /// for every target language.
    fn load_alignments(&mut self, document: &Document, include_translations: bool) -> DocumentAlignments {
        match self.config.layout {
            CorpusLayout::Opus => self.load_opus_alignments(document, include_translations),
            CorpusLayout::Dpc => self.load_dpc_alignments(document, include_translations),
        }
    }

    fn load_opus_alignments(&mut self, document: &Document, include_translations: bool) -> DocumentAlignments {
        let data_folder = document.data_folder();
        let source = self.config.source.clone();
        let own = format!("{}/{}", source, document.name());
        let mut result = DocumentAlignments::default();

        for target in self.config.targets.clone() {
            let linked = match self.resolver.pivot().map(str::to_string) {
                Some(pivot) if self.resolver.is_transitive(&source, &target) => {
                    let Some(first) = self.link(&data_folder, &source, &pivot, &own, include_translations) else {
                        continue;
                    };
                    let Some(second) =
                        self.link(&data_folder, &pivot, &target, &first.other, include_translations)
                    else {
                        continue;
                    };
                    result.add_set(first.set);
                    second
                }
                _ => {
                    let Some(direct) = self.link(&data_folder, &source, &target, &own, include_translations) else {
                        continue;
                    };
                    direct
                }
            };

            if include_translations {
                let path = data_folder.join(&linked.other);
                match Document::read(&path, &self.table.corpus) {
                    Ok(translation) => {
                        result.translations.insert(target.clone(), translation);
                    }
                    Err(e) => {
                        tracing::warn!("No translation for {} to {}: {}", own, target, e);
                        continue;
                    }
                }
            }

            result.add_set(linked.set);
            result.linked.push(target);
        }

        result
    }

    /// Every alignment file of a DPC document pairs the pivot with one other
    /// language, so a target needs one file, or two when going through the
    /// pivot.
    fn load_dpc_alignments(&mut self, document: &Document, include_translations: bool) -> DocumentAlignments {
        let source = self.config.source.clone();
        let mut result = DocumentAlignments::default();
        let Some(pivot) = self.resolver.pivot().map(str::to_string) else {
            return result;
        };
        let Some(prefix) = dpc_prefix(&document.path, &source).map(str::to_string) else {
            tracing::warn!("{} is not a DPC document", document.path.display());
            return result;
        };

        for target in self.config.targets.clone() {
            let others = if self.resolver.is_transitive(&source, &target) {
                vec![source.clone(), target.clone()]
            } else if target == pivot {
                vec![source.clone()]
            } else {
                vec![target.clone()]
            };

            let mut sets = Vec::with_capacity(others.len());
            for other in &others {
                let pair = LanguagePair::ordered(pivot.clone(), other.clone());
                let path = dpc_alignment(&document.path, &prefix, &pair);
                if let Some(file) = self.alignments.file_at(path, &pair) {
                    sets.push(file.combined_set());
                }
            }
            if sets.len() < others.len() {
                continue;
            }

            if include_translations {
                let path = dpc_translation(&document.path, &prefix, &target);
                match Document::read(&path, &self.table.corpus) {
                    Ok(translation) => {
                        result.translations.insert(target.clone(), translation);
                    }
                    Err(e) => {
                        tracing::warn!("No translation for {} to {}: {}", prefix, target, e);
                        continue;
                    }
                }
            }

            for set in sets {
                result.add_set(set);
            }
            result.linked.push(target);
        }

        result
    }

    /// The link group aligning `document` of language `from` to language `to`.
    fn link(
        &mut self,
        data_folder: &Path,
        from: &str,
        to: &str,
        document: &str,
        log: bool,
    ) -> Option<Linked> {
        let pair = LanguagePair::new(from, to);
        let file = self.alignments.file(data_folder, &pair)?;

        let groups = file.groups_for(from, document);
        match groups.as_slice() {
            [] => {
                if log {
                    tracing::warn!("No translation found for {} to {}", document, to);
                }
                None
            }
            [group] => {
                let side = pair.side(to)?;
                Some(Linked {
                    set: file.alignment_set(group),
                    other: group.document(side).to_string(),
                })
            }
            _ => {
                if log {
                    tracing::warn!("Multiple translations found for {} to {}", document, to);
                }
                None
            }
        }
    }
}
