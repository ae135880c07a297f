//! Dotted field-path resolution over nested records.
//!
//! Records are `serde_json::Value` property bags. A path such as
//! `Spec.Template.Spec` is a fold over "get field by name", stopping at the
//! first segment that does not exist.
//!
//! Segment lookup on an object tries, in order:
//!
//! 1. the segment verbatim (`Spec`),
//! 2. the segment with its leading capitals lower-cased (`spec`, `tls` for
//!    `TLS`, `ipFamilies` for `IPFamilies`), then with only its first
//!    character lower-cased,
//! 3. the same two keys inside an embedded metadata section
//!    ([`PROMOTED_SECTIONS`]), one level deep.
//!
//! Step 3 is the single-level indirection: `Name` resolves on a Kubernetes
//! object through `metadata.name`, the way typed Kubernetes clients expose
//! the fields of an embedded `ObjectMeta`.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

use crate::errors::{KompareError, Result};

/// Sections whose fields are reachable as if declared on the enclosing record.
pub const PROMOTED_SECTIONS: &[&str] = &["metadata", "ObjectMeta"];

/// A parsed dotted path. Segments are plain field names; there are no
/// wildcards or array indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path. Empty segments are kept and simply never resolve.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        FieldPath::parse(raw)
    }
}

/// Resolve `path` on `record`, returning the leaf value.
///
/// # Errors
///
/// `FieldNotFound` naming the first segment that does not exist on the
/// structure reached so far.
pub fn resolve<'a>(record: &'a Value, path: &FieldPath) -> Result<&'a Value> {
    path.segments()
        .iter()
        .try_fold(record, |current, segment| {
            lookup(current, segment).ok_or_else(|| KompareError::FieldNotFound {
                segment: segment.clone(),
                path: path.as_str().to_string(),
            })
        })
}

/// Convenience wrapper that parses `dotted` first.
pub fn resolve_str<'a>(record: &'a Value, dotted: &str) -> Result<&'a Value> {
    resolve(record, &FieldPath::parse(dotted))
}

/// Resolve a string-valued field, yielding `""` when the field is missing or
/// not a string.
pub fn resolve_string(record: &Value, dotted: &str) -> String {
    resolve_str(record, dotted)
        .ok()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Look up one segment on `value`. `None` for non-objects, including `null`.
fn lookup<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    let object = value.as_object()?;
    direct(object, segment).or_else(|| {
        PROMOTED_SECTIONS
            .iter()
            .filter_map(|section| object.get(*section).and_then(Value::as_object))
            .find_map(|embedded| direct(embedded, segment))
    })
}

fn direct<'a>(object: &'a Map<String, Value>, segment: &str) -> Option<&'a Value> {
    if segment.is_empty() {
        return None;
    }
    object.get(segment).or_else(|| {
        [lower_camel(segment), lower_first(segment)]
            .into_iter()
            .filter(|key| key != segment)
            .find_map(|key| object.get(&*key))
    })
}

/// JSON key for an upper-camel field name. A leading run of capitals is
/// an acronym: it is lower-cased whole, except for the capital that starts
/// the next word (`APIVersion` becomes `apiVersion`).
fn lower_camel(segment: &str) -> Cow<'_, str> {
    let chars: Vec<char> = segment.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();
    if run == 0 {
        return Cow::Borrowed(segment);
    }
    let lowered = if run > 1 && chars.get(run).is_some_and(|c| c.is_lowercase()) {
        run - 1
    } else {
        run
    };
    let mut key = String::with_capacity(segment.len());
    for (index, c) in chars.iter().enumerate() {
        if index < lowered {
            key.extend(c.to_lowercase());
        } else {
            key.push(*c);
        }
    }
    Cow::Owned(key)
}

fn lower_first(segment: &str) -> Cow<'_, str> {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            Cow::Owned(first.to_lowercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(segment),
    }
}
