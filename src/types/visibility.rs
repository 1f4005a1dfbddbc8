use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Render decision for a single entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Visible,
    Hidden,
}

impl Decision {
    pub fn is_visible(self) -> bool {
        self == Decision::Visible
    }
}

/// Decisions for one render pass, keyed by unique key.
pub type DecisionMap = BTreeMap<String, Decision>;

/// Persisted hide decisions.
///
/// Stored as a JSON object whose values are always `false`. A key that is
/// absent means the entry is visible; un-hiding removes the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    hidden: BTreeSet<String>,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    pub fn decision(&self, key: &str) -> Decision {
        if self.is_hidden(key) {
            Decision::Hidden
        } else {
            Decision::Visible
        }
    }

    /// Records an explicit hide. Returns `true` if the key was not hidden before.
    pub fn hide(&mut self, key: &str) -> bool {
        self.hidden.insert(key.to_string())
    }

    /// Drops the key. Returns `true` if it was hidden before.
    pub fn show(&mut self, key: &str) -> bool {
        self.hidden.remove(key)
    }

    /// Keeps only keys contained in `active`. Returns how many keys were dropped.
    pub fn retain_active(&mut self, active: &HashSet<&str>) -> usize {
        let before = self.hidden.len();
        self.hidden.retain(|key| active.contains(key.as_str()));
        before - self.hidden.len()
    }

    pub fn hidden_keys(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for VisibilityState {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            hidden: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl Serialize for VisibilityState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.hidden.len()))?;
        for key in &self.hidden {
            map.serialize_entry(key, &false)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VisibilityState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StateVisitor)
    }
}

struct StateVisitor;

impl<'de> Visitor<'de> for StateVisitor {
    type Value = VisibilityState;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of unique keys to false")
    }

    // Anything other than an explicit `false` means visible and is dropped.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut state = VisibilityState::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            if value == serde_json::Value::Bool(false) {
                state.hidden.insert(key);
            }
        }
        Ok(state)
    }
}
