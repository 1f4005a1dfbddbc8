use serde::{Deserialize, Serialize};

/// Separator between course and exercise name inside a unique key.
pub const KEY_SEPARATOR: &str = "::";

/// One timeline item as scraped by the page layer, before any cleanup.
///
/// Either label may be missing when the item is only partially rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawEntry {
    pub course_label: Option<String>,
    pub exercise_label: Option<String>,
    /// Opaque handle owned by the page layer, echoed back in render plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl RawEntry {
    pub fn new(course_label: &str, exercise_label: &str) -> Self {
        Self {
            course_label: Some(course_label.to_string()),
            exercise_label: Some(exercise_label.to_string()),
            node_id: None,
        }
    }
}

/// A timeline item with a stable identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub course_name: String,
    pub exercise_name: String,
    pub unique_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl Entry {
    /// Builds an entry from already-cleaned names.
    pub fn new(course_name: &str, exercise_name: &str) -> Self {
        Self {
            course_name: course_name.to_string(),
            exercise_name: exercise_name.to_string(),
            unique_key: compose_key(course_name, exercise_name),
            node_id: None,
        }
    }
}

/// Joins course and exercise names into the key used for persistence.
pub fn compose_key(course_name: &str, exercise_name: &str) -> String {
    format!("{}{}{}", course_name, KEY_SEPARATOR, exercise_name)
}
