use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::visibility::DecisionMap;

/// A date header and the positions of the raw entries rendered beneath it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateGroup {
    pub header_id: String,
    pub children: Vec<usize>,
}

/// Derived visibility of one date header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderVisibility {
    pub header_id: String,
    pub visible: bool,
}

/// Everything the page layer needs to apply after a reconcile or toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenderPlan {
    pub entries: Vec<Entry>,
    pub decisions: DecisionMap,
    pub headers: Vec<HeaderVisibility>,
}

impl RenderPlan {
    /// Keys hidden in this plan, in key order.
    pub fn hidden_keys(&self) -> Vec<&str> {
        self.decisions
            .iter()
            .filter(|(_, d)| !d.is_visible())
            .map(|(k, _)| k.as_str())
            .collect()
    }
}
