//! Comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! caller can persist or ship a comparison result as JSON.

use serde::{Deserialize, Serialize};

/// One reported discrepancy for a matched record pair and criterion.
///
/// `property_path` is always one of the criteria the comparison was run with,
/// and `diff_strings` is never empty for records produced by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffRecord {
    /// Name of the matched record (taken from the target side)
    pub name: String,
    /// Namespace of the matched record (taken from the source side)
    pub namespace: String,
    /// The criterion (dotted path) that differed
    pub property_path: String,
    /// One human-readable line per discrepant leaf
    pub diff_strings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_message: Option<String>,
}

impl DiffRecord {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        property_path: impl Into<String>,
        diff_strings: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            property_path: property_path.into(),
            diff_strings,
            ..Self::default()
        }
    }
}

/// Which side of the comparison a skipped resolution failed on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

/// A criterion that could not be compared for one matched pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedCriterion {
    pub name: String,
    pub criterion: String,
    /// First path segment that did not resolve
    pub segment: String,
    pub side: Side,
}

/// How much the engine says while comparing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Only the returned records
    #[default]
    Quiet,
    /// Per-step progress narration
    Narrate,
    /// Narration plus the rendered report
    Report,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Narrate,
            _ => Verbosity::Report,
        }
    }
}

/// Everything one comparison call produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonOutcome {
    /// Kind tag of the collections (e.g. `DeploymentList`, or `unknown`)
    pub kind: String,
    pub source_count: usize,
    pub target_count: usize,
    /// Names present in the source but not the target, in source order
    pub only_in_source: Vec<String>,
    /// Names present in the target but not the source, in target order
    pub only_in_target: Vec<String>,
    pub records: Vec<DiffRecord>,
    pub skipped: Vec<SkippedCriterion>,
    /// Non-fatal discrepancy notices (count mismatch, unrecognized shape)
    pub notices: Vec<String>,
    /// Progress lines; empty at [`Verbosity::Quiet`]
    pub narration: Vec<String>,
    /// Rendered report; present at [`Verbosity::Report`]
    pub report: Option<String>,
}

impl ComparisonOutcome {
    /// True when nothing at all differs between the two collections.
    pub fn is_clean(&self) -> bool {
        self.source_count == self.target_count
            && self.only_in_source.is_empty()
            && self.only_in_target.is_empty()
            && self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_level() {
        assert_eq!(Verbosity::from(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from(1), Verbosity::Narrate);
        assert_eq!(Verbosity::from(2), Verbosity::Report);
        assert_eq!(Verbosity::from(9), Verbosity::Report);
        assert!(Verbosity::Report > Verbosity::Narrate);
    }

    #[test]
    fn test_diff_record_json_omits_absent_messages() {
        let record = DiffRecord::new("svc1", "", "Annotations", vec!["map[x]: 1 != 2".into()]);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("message_heading").is_none());
        let back: DiffRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
