// Date-Group Aggregator
// A date header is shown iff at least one entry under it is shown.

use crate::services::identity_extractor::Extraction;
use crate::types::timeline::{DateGroup, HeaderVisibility};
use crate::types::visibility::{Decision, DecisionMap};

/// Derives header visibility for every group.
///
/// Children refer to raw positions. An item that did not extract to an entry
/// is never hidden, so it counts as visible; out-of-range positions do not
/// count. A header with no visible children is hidden, including one with no
/// children at all.
pub fn derive(groups: &[DateGroup], extraction: &Extraction, decisions: &DecisionMap) -> Vec<HeaderVisibility> {
    groups
        .iter()
        .map(|group| HeaderVisibility {
            header_id: group.header_id.clone(),
            visible: group
                .children
                .iter()
                .any(|&position| child_visible(position, extraction, decisions)),
        })
        .collect()
}

fn child_visible(position: usize, extraction: &Extraction, decisions: &DecisionMap) -> bool {
    if position >= extraction.raw_len() {
        return false;
    }
    match extraction.entry_index(position) {
        Some(i) => decisions
            .get(&extraction.entries[i].unique_key)
            .is_some_and(|d| *d == Decision::Visible),
        None => true,
    }
}
