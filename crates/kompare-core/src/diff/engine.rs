//! Diff record builder.
//!
//! The core entry point is [`Comparator::compare_detailed`], which takes two
//! collections and a list of criteria and produces a [`ComparisonOutcome`].
//! [`compare`] and [`compare_to`] wrap it for callers that only want the
//! records and the printed narration.

use std::io::Write;
use std::time::Instant;

use serde_json::Value;

use crate::collection::view::{record_name, record_namespace};
use crate::collection::{CollectionView, ShapeRegistry};
use crate::diff::deep::DeepDiffer;
use crate::diff::human_summary::{count_message, only_in_message, render};
use crate::diff::model::{ComparisonOutcome, DiffRecord, Side, SkippedCriterion, Verbosity};
use crate::errors::{ExError, ExErrorKind, KompareError};
use crate::kinds::human_readable_kind;
use crate::kompare_core_types::schema::{
    EVENT_COUNT_MISMATCH, EVENT_CRITERION_SKIPPED, EVENT_SHAPE_UNRECOGNIZED,
};
use crate::matcher::{match_by_name, matched_pairs, MatchedPair};
use crate::path::{resolve, FieldPath};
use crate::{log_op_end, log_op_error, log_op_start};

const OP_COMPARE: &str = "compare";

/// Compares two collections with a shape registry and a deep differ.
///
/// Holds no per-call state; one comparator may serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    registry: ShapeRegistry,
    differ: DeepDiffer,
}

impl Comparator {
    pub fn new(registry: ShapeRegistry, differ: DeepDiffer) -> Self {
        Self { registry, differ }
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn differ(&self) -> &DeepDiffer {
        &self.differ
    }

    /// Compare `source` against `target` on every criterion.
    ///
    /// Count mismatches, "only in" names and unresolvable criteria are all
    /// reported in the outcome; none of them fails the call.
    ///
    /// # Errors
    ///
    /// `Structural` when neither collection has a recognized shape.
    pub fn compare_detailed<S: AsRef<str>>(
        &self,
        source: &Value,
        target: &Value,
        criteria: &[S],
        verbosity: Verbosity,
    ) -> Result<ComparisonOutcome, ExError> {
        let source_view = self.registry.classify(source);
        let target_view = self.registry.classify(target);
        log_op_start!(
            OP_COMPARE,
            source_len = source_view.len(),
            target_len = target_view.len()
        );
        let start = Instant::now();

        let outcome = self
            .compare_views(&source_view, &target_view, criteria, verbosity)
            .map_err(|e| {
                log_op_error!(
                    OP_COMPARE,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                ExError::from(e)
            })?;

        log_op_end!(
            OP_COMPARE,
            duration_ms = start.elapsed().as_millis() as u64,
            records_len = outcome.records.len(),
            skipped_len = outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Like [`compare_detailed`](Self::compare_detailed), but writes the
    /// narration (and the report at [`Verbosity::Report`]) to `out` and
    /// returns only the records.
    ///
    /// # Errors
    ///
    /// `Structural` as for `compare_detailed`; `Io` when writing fails.
    pub fn compare_to<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        source: &Value,
        target: &Value,
        criteria: &[S],
        verbosity: Verbosity,
    ) -> Result<Vec<DiffRecord>, ExError> {
        let outcome = self.compare_detailed(source, target, criteria, verbosity)?;
        write_outcome(out, &outcome).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op(OP_COMPARE)
                .with_message(format!("failed to write comparison output: {e}"))
        })?;
        Ok(outcome.records)
    }

    fn compare_views<S: AsRef<str>>(
        &self,
        source: &CollectionView<'_>,
        target: &CollectionView<'_>,
        criteria: &[S],
        verbosity: Verbosity,
    ) -> Result<ComparisonOutcome, KompareError> {
        let mut notices = Vec::new();
        match (source.is_recognized(), target.is_recognized()) {
            (false, false) => return Err(KompareError::BothCollectionsUnrecognized),
            (false, true) => notices.push(unrecognized_notice(Side::Source)),
            (true, false) => notices.push(unrecognized_notice(Side::Target)),
            (true, true) => {}
        }

        let kind = if source.is_recognized() {
            source.kind()
        } else {
            target.kind()
        }
        .to_string();
        let mut narration = Narration::new(verbosity, &kind);

        let (source_count, target_count) = (source.len(), target.len());
        if source_count != target_count {
            tracing::warn!(
                op = OP_COMPARE,
                event = EVENT_COUNT_MISMATCH,
                kind = %kind,
                source_len = source_count,
                target_len = target_count,
                "collections differ in size"
            );
            let message = count_message(&kind, source_count, target_count);
            narration.count_mismatch(&message);
            notices.push(message);
        }

        narration.rule();
        let only_in_source = match_by_name(source, target);
        narration.only_in(Side::Source, &only_in_source);
        let only_in_target = match_by_name(target, source);
        narration.only_in(Side::Target, &only_in_target);

        let mut records = Vec::new();
        let mut skipped = Vec::new();
        for pair in matched_pairs(source, target) {
            for criterion in criteria {
                match self.compare_pair(&pair, criterion.as_ref()) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => {}
                    Err(skip) => skipped.push(skip),
                }
            }
        }

        let report = (verbosity >= Verbosity::Report).then(|| render(&records));
        Ok(ComparisonOutcome {
            kind,
            source_count,
            target_count,
            only_in_source,
            only_in_target,
            records,
            skipped,
            notices,
            narration: narration.finish(),
            report,
        })
    }

    /// Diff one criterion on one matched pair. `Ok(None)` when equal,
    /// `Err` when the criterion does not resolve on one side.
    fn compare_pair(
        &self,
        pair: &MatchedPair<'_>,
        criterion: &str,
    ) -> Result<Option<DiffRecord>, SkippedCriterion> {
        let path = FieldPath::parse(criterion);
        let name = record_name(pair.target);

        let left = resolve_side(pair.source, &path, Side::Source, &name)?;
        let right = resolve_side(pair.target, &path, Side::Target, &name)?;

        let diff_strings = self.differ.diff(left, right);
        if diff_strings.is_empty() {
            return Ok(None);
        }
        Ok(Some(DiffRecord::new(
            name,
            record_namespace(pair.source),
            criterion,
            diff_strings,
        )))
    }
}

fn resolve_side<'a>(
    record: &'a Value,
    path: &FieldPath,
    side: Side,
    name: &str,
) -> Result<&'a Value, SkippedCriterion> {
    resolve(record, path).map_err(|err| {
        let segment = match &err {
            KompareError::FieldNotFound { segment, .. } => segment.clone(),
            other => other.to_string(),
        };
        let error = ExError::from(err).with_record_name(name);
        tracing::warn!(
            op = OP_COMPARE,
            event = EVENT_CRITERION_SKIPPED,
            err_code = error.code(),
            error = %error,
            record_name = %name,
            criterion = %path,
            segment = %segment,
            side = side.as_str(),
            "criterion skipped"
        );
        SkippedCriterion {
            name: name.to_string(),
            criterion: path.as_str().to_string(),
            segment,
            side,
        }
    })
}

fn unrecognized_notice(side: Side) -> String {
    tracing::warn!(
        op = OP_COMPARE,
        event = EVENT_SHAPE_UNRECOGNIZED,
        side = side.as_str(),
        "collection shape not recognized, treating it as empty"
    );
    let err = KompareError::UnrecognizedCollectionShape {
        side: side.as_str().to_string(),
    };
    format!("{err}; treating it as empty.")
}

fn write_outcome<W: Write>(out: &mut W, outcome: &ComparisonOutcome) -> std::io::Result<()> {
    for line in &outcome.narration {
        writeln!(out, "{line}")?;
    }
    if let Some(report) = &outcome.report {
        writeln!(out, "{report}")?;
    }
    out.flush()
}

/// Progress lines collected at [`Verbosity::Narrate`] and above.
struct Narration {
    enabled: bool,
    kind: String,
    readable_kind: String,
    heading: String,
    lines: Vec<String>,
}

impl Narration {
    fn new(verbosity: Verbosity, kind: &str) -> Self {
        let readable_kind = human_readable_kind(kind);
        let heading = format!(
            "* These two collections do not have the same number of {readable_kind}, please check it manually! *"
        );
        Self {
            enabled: verbosity >= Verbosity::Narrate,
            kind: kind.to_string(),
            readable_kind,
            heading,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: String) {
        if self.enabled {
            self.lines.push(line);
        }
    }

    fn rule(&mut self) {
        self.push("*".repeat(self.heading.len()));
    }

    fn count_mismatch(&mut self, message: &str) {
        self.rule();
        self.push(self.heading.clone());
        self.rule();
        self.push(message.to_string());
    }

    fn only_in(&mut self, side: Side, names: &[String]) {
        for name in names {
            let line = only_in_message(side, &self.kind, name);
            self.push(line);
        }
        if names.is_empty() {
            let (from, to) = match side {
                Side::Source => ("source", "target"),
                Side::Target => ("target", "source"),
            };
            self.push(format!(
                "Done comparing {from} versus {to} {}",
                self.readable_kind
            ));
        } else {
            self.rule();
        }
    }

    fn finish(self) -> Vec<String> {
        self.lines
    }
}

/// Compare with a default [`Comparator`].
///
/// # Errors
///
/// See [`Comparator::compare_detailed`].
pub fn compare_detailed<S: AsRef<str>>(
    source: &Value,
    target: &Value,
    criteria: &[S],
    verbosity: Verbosity,
) -> Result<ComparisonOutcome, ExError> {
    Comparator::default().compare_detailed(source, target, criteria, verbosity)
}

/// Compare with a default [`Comparator`], narrating to `out`.
///
/// # Errors
///
/// See [`Comparator::compare_to`].
pub fn compare_to<W: Write, S: AsRef<str>>(
    out: &mut W,
    source: &Value,
    target: &Value,
    criteria: &[S],
    verbosity: Verbosity,
) -> Result<Vec<DiffRecord>, ExError> {
    Comparator::default().compare_to(out, source, target, criteria, verbosity)
}

/// Compare with a default [`Comparator`], narrating to stdout.
///
/// # Errors
///
/// See [`Comparator::compare_to`].
pub fn compare<S: AsRef<str>>(
    source: &Value,
    target: &Value,
    criteria: &[S],
    verbosity: Verbosity,
) -> Result<Vec<DiffRecord>, ExError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    compare_to(&mut handle, source, target, criteria, verbosity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NO_CRITERIA: &[&str] = &[];

    #[test]
    fn test_annotation_difference_produces_one_record() {
        let source = json!([{"Name": "svc1", "Annotations": {"x": "1"}}]);
        let target = json!([{"Name": "svc1", "Annotations": {"x": "2"}}]);
        let outcome =
            compare_detailed(&source, &target, &["Annotations"], Verbosity::Quiet).unwrap();

        assert_eq!(
            outcome.records,
            vec![DiffRecord::new(
                "svc1",
                "",
                "Annotations",
                vec!["map[x]: 1 != 2".to_string()]
            )]
        );
        assert!(outcome.narration.is_empty());
        assert!(outcome.report.is_none());
    }

    #[test]
    fn test_only_in_source() {
        let source = json!([{"Name": "a"}, {"Name": "b"}]);
        let target = json!([{"Name": "a"}]);
        let outcome = compare_detailed(&source, &target, &["Name"], Verbosity::Quiet).unwrap();

        assert_eq!(outcome.only_in_source, vec!["b"]);
        assert!(outcome.only_in_target.is_empty());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.notices.len(), 1);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_equal_criteria_emit_nothing() {
        let source = json!([{"Name": "a", "Spec": {"replicas": 3}}]);
        let outcome = compare_detailed(&source, &source, &["Spec", "Name"], Verbosity::Quiet)
            .unwrap();
        assert!(outcome.is_clean());
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn test_missing_criterion_is_skipped_not_fatal() {
        let source = json!([{"Name": "a", "Spec": {"x": 1}, "Data": {"k": "1"}}]);
        let target = json!([{"Name": "a", "Data": {"k": "2"}}]);
        let outcome =
            compare_detailed(&source, &target, &["Spec", "Data"], Verbosity::Quiet).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].property_path, "Data");
        assert_eq!(
            outcome.skipped,
            vec![SkippedCriterion {
                name: "a".into(),
                criterion: "Spec".into(),
                segment: "Spec".into(),
                side: Side::Target,
            }]
        );
    }

    #[test]
    fn test_record_takes_namespace_from_source() {
        let source = json!({"kind": "ConfigMapList", "items": [
            {"metadata": {"name": "cfg", "namespace": "staging"}, "data": {"k": "1"}}
        ]});
        let target = json!({"kind": "ConfigMapList", "items": [
            {"metadata": {"name": "cfg", "namespace": "prod"}, "data": {"k": "2"}}
        ]});
        let outcome = compare_detailed(&source, &target, &["Data"], Verbosity::Quiet).unwrap();
        assert_eq!(outcome.kind, "ConfigMapList");
        assert_eq!(outcome.records[0].name, "cfg");
        assert_eq!(outcome.records[0].namespace, "staging");
        assert_eq!(outcome.records[0].diff_strings, vec!["map[k]: 1 != 2"]);
    }

    #[test]
    fn test_both_unrecognized_is_structural() {
        let err = compare_detailed(&json!(1), &json!("x"), NO_CRITERIA, Verbosity::Quiet)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Structural);
        assert_eq!(err.code(), "ERR_STRUCTURAL");
    }

    #[test]
    fn test_one_unrecognized_side_is_treated_as_empty() {
        let source = json!([{"Name": "a"}]);
        let outcome =
            compare_detailed(&source, &json!(null), NO_CRITERIA, Verbosity::Quiet).unwrap();
        assert_eq!(outcome.target_count, 0);
        assert_eq!(outcome.only_in_source, vec!["a"]);
        assert!(outcome.notices[0].contains("target side"));
    }

    #[test]
    fn test_narration_and_report_follow_verbosity() {
        let source = json!({"kind": "DeploymentList", "items": [
            {"metadata": {"name": "web"}, "spec": {"replicas": 3}},
            {"metadata": {"name": "old"}}
        ]});
        let target = json!({"kind": "DeploymentList", "items": [
            {"metadata": {"name": "web"}, "spec": {"replicas": 5}}
        ]});

        let narrated = compare_detailed(&source, &target, &["Spec"], Verbosity::Narrate).unwrap();
        assert!(narrated.report.is_none());
        assert!(narrated
            .narration
            .iter()
            .any(|l| l == "- Source has Deployment in the list: old, but it's not in the target"));
        assert!(narrated
            .narration
            .iter()
            .any(|l| l == "Done comparing target versus source Deployment in the list"));
        assert!(narrated.narration.iter().any(|l| l.contains("do not have the same number")));

        let reported = compare_detailed(&source, &target, &["Spec"], Verbosity::Report).unwrap();
        let report = reported.report.unwrap();
        assert!(report.contains("Object Name: web\n"));
        assert!(report.contains("- replicas: 3 != 5\n"));
    }

    #[test]
    fn test_compare_to_writes_narration() {
        let source = json!([{"Name": "a"}]);
        let target = json!([{"Name": "b"}]);
        let mut out = Vec::new();
        let records =
            compare_to(&mut out, &source, &target, &["Name"], Verbosity::Narrate).unwrap();
        assert!(records.is_empty());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("- Source has Record in the list: a, but it's not in the target\n"));
        assert!(text.contains("- Target has Record in the list: b, but it's not in the source\n"));
    }

    #[test]
    fn test_quiet_compare_to_writes_nothing() {
        let source = json!([{"Name": "a", "v": 1}]);
        let target = json!([{"Name": "a", "v": 2}]);
        let mut out = Vec::new();
        let records = compare_to(&mut out, &source, &target, &["v"], Verbosity::Quiet).unwrap();
        assert_eq!(records.len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_custom_differ_options_apply() {
        use crate::diff::deep::DifferOptions;
        let comparator = Comparator::new(
            ShapeRegistry::builtin(),
            DeepDiffer::new(DifferOptions {
                max_diff: 1,
                ..DifferOptions::default()
            }),
        );
        let source = json!([{"Name": "a", "Spec": {"x": 1, "y": 1}}]);
        let target = json!([{"Name": "a", "Spec": {"x": 2, "y": 2}}]);
        let outcome = comparator
            .compare_detailed(&source, &target, &["Spec"], Verbosity::Quiet)
            .unwrap();
        assert_eq!(outcome.records[0].diff_strings, vec!["map[x]: 1 != 2"]);
    }
}
