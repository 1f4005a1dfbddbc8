// Identity Extractor
// Turns scraped timeline labels into entries keyed by `course::exercise`.

use tracing::debug;

use crate::types::entry::{compose_key, Entry, RawEntry};

/// UI noise the timeline prepends to the course label of pending submissions.
pub const SUBMISSION_PREFIX: &str = "יש להגיש את 'מטלה' · ";

/// Extracts a stable identity from one scraped item.
///
/// Returns `None` when either label is missing. Both labels are trimmed and
/// the first exact occurrence of [`SUBMISSION_PREFIX`] is removed from the
/// course label.
pub fn extract(raw: &RawEntry) -> Option<Entry> {
    let course = raw.course_label.as_deref()?.trim();
    let exercise = raw.exercise_label.as_deref()?.trim();
    let course = course.replacen(SUBMISSION_PREFIX, "", 1);

    Some(Entry {
        unique_key: compose_key(&course, exercise),
        course_name: course,
        exercise_name: exercise.to_string(),
        node_id: raw.node_id.clone(),
    })
}

/// Extracted entries paired with the raw positions they came from.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub entries: Vec<Entry>,
    /// `positions[i]` is the index in the raw input of `entries[i]`.
    pub positions: Vec<usize>,
    pub skipped: usize,
}

impl Extraction {
    /// Index into `entries` for a raw position, if that item was extractable.
    pub fn entry_index(&self, raw_position: usize) -> Option<usize> {
        self.positions.binary_search(&raw_position).ok()
    }

    /// Number of raw items the extraction was run over.
    pub fn raw_len(&self) -> usize {
        self.entries.len() + self.skipped
    }
}

/// Extracts every item, preserving input order and skipping malformed ones.
pub fn extract_all(raw_entries: &[RawEntry]) -> Extraction {
    let mut extraction = Extraction::default();
    for (position, raw) in raw_entries.iter().enumerate() {
        match extract(raw) {
            Some(entry) => {
                extraction.entries.push(entry);
                extraction.positions.push(position);
            }
            None => extraction.skipped += 1,
        }
    }
    if extraction.skipped > 0 {
        debug!(
            skipped = extraction.skipped,
            extracted = extraction.entries.len(),
            "Skipped partially rendered timeline items"
        );
    }
    extraction
}
