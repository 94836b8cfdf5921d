//! Selection of candidate documents by size and alignment certainty.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Size filter, certainty ordering and limit, applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSelection {
    /// Minimum number of sentences, inclusive
    pub min_size: Option<usize>,
    /// Maximum number of sentences, inclusive
    pub max_size: Option<usize>,
    /// Order by descending average alignment certainty
    pub sort_by_certainty: bool,
    /// Keep at most this many documents
    pub limit: Option<usize>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes self, sets the size range
    pub fn with_size(mut self, min_size: Option<usize>, max_size: Option<usize>) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Takes self, enables ordering by certainty
    pub fn sorted_by_certainty(mut self) -> Self {
        self.sort_by_certainty = true;
        self
    }

    /// Takes self, sets the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters_size(&self) -> bool {
        self.min_size.is_some() || self.max_size.is_some()
    }

    /// Whether a document of `size` sentences passes the size filter.
    pub fn admits_size(&self, size: usize) -> bool {
        self.min_size.unwrap_or(0) <= size && size <= self.max_size.unwrap_or(usize::MAX)
    }

    /// Select from `files`.
    ///
    /// `size` is only called when a size bound is set and `certainty` only
    /// when ordering by certainty. Documents without a certainty score are
    /// dropped from an ordered selection.
    pub fn apply<T, S, C>(&self, files: Vec<T>, mut size: S, mut certainty: C) -> Vec<T>
    where
        S: FnMut(&T) -> usize,
        C: FnMut(&T) -> Option<f64>,
    {
        let mut files = files;

        if self.filters_size() {
            files.retain(|file| self.admits_size(size(file)));
        }

        if self.sort_by_certainty {
            let mut scored: Vec<(T, f64)> = files
                .into_iter()
                .filter_map(|file| {
                    let score = certainty(&file)?;
                    Some((file, score))
                })
                .collect();
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            files = scored.into_iter().map(|(file, _)| file).collect();
        }

        if let Some(limit) = self.limit {
            files.truncate(limit);
        }

        files
    }
}
