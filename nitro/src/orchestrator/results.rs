//! The ordered run result map.

use crate::core::StageOutcome;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Stage name → last recorded outcome, in first-insertion order.
///
/// Doubles as the dependency oracle: a dependency is met as soon as its name
/// has any entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResults {
    entries: Vec<(String, StageOutcome)>,
    index: HashMap<String, usize>,
}

impl RunResults {
    /// Creates an empty result map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome. Re-recording a name keeps its original position.
    pub fn insert(&mut self, stage: impl Into<String>, outcome: StageOutcome) {
        let stage = stage.into();
        if let Some(&i) = self.index.get(&stage) {
            self.entries[i].1 = outcome;
        } else {
            self.index.insert(stage.clone(), self.entries.len());
            self.entries.push((stage, outcome));
        }
    }

    /// Returns the outcome recorded for `stage`.
    #[must_use]
    pub fn get(&self, stage: &str) -> Option<&StageOutcome> {
        self.index.get(stage).map(|&i| &self.entries[i].1)
    }

    /// Returns true if `stage` has any recorded outcome.
    #[must_use]
    pub fn contains(&self, stage: &str) -> bool {
        self.index.contains_key(stage)
    }

    /// Returns the number of recorded stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(stage, outcome)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StageOutcome)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the recorded stage names in order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl Serialize for RunResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (stage, outcome) in &self.entries {
            map.serialize_entry(stage, outcome)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_get() {
        let mut results = RunResults::new();
        assert!(results.is_empty());

        results.insert("http_get", StageOutcome::completed(json!(true)));
        results.insert("metrics_stage", StageOutcome::skipped("metrics_stage", "x"));

        assert_eq!(results.len(), 2);
        assert!(results.contains("http_get"));
        assert!(!results.contains("sleep_2s"));
        assert_eq!(results.get("http_get"), Some(&StageOutcome::completed(json!(true))));
        assert_eq!(results.stage_names(), vec!["http_get", "metrics_stage"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut results = RunResults::new();
        results.insert("a", StageOutcome::completed(json!(1)));
        results.insert("b", StageOutcome::completed(json!(2)));
        results.insert("a", StageOutcome::failed("boom"));

        let pairs: Vec<_> = results.iter().map(|(k, v)| (k, v.to_string())).collect();
        assert_eq!(pairs, vec![("a", "Failed: boom".to_string()), ("b", "2".to_string())]);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let mut results = RunResults::new();
        results.insert("z", StageOutcome::unknown("graph"));
        results.insert("a", StageOutcome::completed(json!("ok")));

        let json = serde_json::to_string(&results).unwrap();
        assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());
    }

    #[test]
    fn test_clear() {
        let mut results = RunResults::new();
        results.insert("a", StageOutcome::completed(json!(1)));
        results.clear();
        assert!(results.is_empty());
        assert!(!results.contains("a"));
    }
}
