//! Lazy lookup of segments by identifier within one document.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;

/// Read-through index from segment identifier to segment.
///
/// The index is built on the first lookup and lives as long as the borrowed
/// document; create one per document and drop it when the document is done.
pub struct SegmentIndex<'d, T> {
    segments: &'d [T],
    key: fn(&T) -> &str,
    index: OnceCell<HashMap<&'d str, usize>>,
}

impl<'d, T> SegmentIndex<'d, T> {
    pub fn new(segments: &'d [T], key: fn(&T) -> &str) -> Self {
        SegmentIndex {
            segments,
            key,
            index: OnceCell::new(),
        }
    }

    /// The segment with identifier `id`. On duplicate identifiers the last
    /// segment wins.
    pub fn get(&self, id: &str) -> Option<&'d T> {
        let segments = self.segments;
        let index = self.index.get_or_init(|| {
            tracing::debug!("Indexing {} segments", segments.len());
            segments
                .iter()
                .enumerate()
                .map(|(n, segment)| ((self.key)(segment), n))
                .collect()
        });
        index.get(id).map(|&n| &segments[n])
    }

    /// Whether the index was built already.
    pub fn is_built(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
