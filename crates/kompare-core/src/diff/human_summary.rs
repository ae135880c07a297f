//! Human-readable report renderer for diff records.

use crate::diff::grammar::{self, DiffTriple};
use crate::diff::model::{ComparisonOutcome, DiffRecord, Side};
use crate::errors::{KompareError, Result};
use crate::kinds::human_readable_kind;

/// Render the records that carry at least one diff string.
///
/// Each record gets a header (property, object name and namespace, each
/// only when non-empty), its optional messages, then `Differences:` and one
/// entry per diff string. Records are separated by a blank line.
pub fn render(records: &[DiffRecord]) -> String {
    let mut out = String::new();
    for record in records.iter().filter(|r| !r.diff_strings.is_empty()) {
        render_record(&mut out, record);
    }
    out
}

/// Render a whole comparison: notices, "only in" lines, then [`render`].
pub fn render_outcome(outcome: &ComparisonOutcome) -> String {
    let mut out = String::new();

    for notice in &outcome.notices {
        out.push_str(notice);
        out.push('\n');
    }
    for name in &outcome.only_in_source {
        out.push_str(&only_in_message(Side::Source, &outcome.kind, name));
        out.push('\n');
    }
    for name in &outcome.only_in_target {
        out.push_str(&only_in_message(Side::Target, &outcome.kind, name));
        out.push('\n');
    }
    if !out.is_empty() && !outcome.records.is_empty() {
        out.push('\n');
    }

    out.push_str(&render(&outcome.records));
    out
}

/// `- Source has <kind>: <name>, but it's not in the target`, and the
/// mirror image for the target side.
pub fn only_in_message(side: Side, kind_tag: &str, name: &str) -> String {
    let (here, there) = match side {
        Side::Source => ("Source", "target"),
        Side::Target => ("Target", "source"),
    };
    format!(
        "- {here} has {}: {name}, but it's not in the {there}",
        human_readable_kind(kind_tag)
    )
}

/// Sentence comparing the two collection sizes.
pub fn count_message(kind_tag: &str, source_count: usize, target_count: usize) -> String {
    format!(
        "The number of {} in the source is {source_count} and there are {target_count} in the target.",
        human_readable_kind(kind_tag)
    )
}

/// Pretty-print one side of a diff string when it is a JSON document.
///
/// Text that does not start like a JSON object or array comes back
/// unchanged.
///
/// # Errors
///
/// `JsonPrettify` when the text starts like JSON but does not parse.
pub fn prettify_side(side: Side, text: &str) -> Result<String> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Ok(text.to_string());
    }
    let json_err = |e: serde_json::Error| KompareError::JsonPrettify {
        side: side.as_str().to_string(),
        message: e.to_string(),
    };
    let value: serde_json::Value = serde_json::from_str(trimmed).map_err(json_err)?;
    serde_json::to_string_pretty(&value).map_err(json_err)
}

fn render_record(out: &mut String, record: &DiffRecord) {
    push_labelled(out, "Property", &record.property_path);
    push_labelled(out, "Object Name", &record.name);
    push_labelled(out, "Namespace", &record.namespace);
    for message in [
        &record.message_heading,
        &record.source_message,
        &record.target_message,
    ]
    .into_iter()
    .flatten()
    .filter(|m| !m.is_empty())
    {
        out.push_str(message);
        out.push('\n');
    }

    out.push_str("Differences:\n");
    for line in &record.diff_strings {
        render_diff_line(out, line);
    }
    out.push('\n');
}

fn push_labelled(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{label}: {value}\n"));
    }
}

fn render_diff_line(out: &mut String, line: &str) {
    match grammar::parse(line) {
        Some(triple) if triple.is_multiline() => render_block(out, &triple),
        Some(DiffTriple { key, left, right }) => {
            out.push_str(&format!("- {key}: {left} != {right}\n"));
        }
        None => out.push_str(&format!("- {line}\n")),
    }
}

fn render_block(out: &mut String, triple: &DiffTriple<'_>) {
    out.push_str(&format!("- {}:\n", triple.key));
    push_side(out, Side::Source, triple.left);
    out.push_str(" !=\n");
    push_side(out, Side::Target, triple.right);
}

fn push_side(out: &mut String, side: Side, text: &str) {
    match prettify_side(side, text) {
        Ok(pretty) => out.push_str(&pretty),
        Err(err) => {
            tracing::debug!(side = side.as_str(), error = %err, "keeping raw diff side");
            out.push_str(&format!("({err})\n"));
            out.push_str(text);
        }
    }
    out.push('\n');
}
