//! Deep equality with human-oriented diff output.
//!
//! Two values that are structurally equal produce no output. Otherwise one
//! string is produced per discrepant leaf, shaped as
//!
//! ```text
//! <path>: <left> != <right>
//! ```
//!
//! where `<path>` is built from `map[key]` (object entry) and `slice[i]`
//! (array element) steps joined with `.`. A top-level scalar mismatch has no
//! path and renders as `<left> != <right>`. The report renderer re-parses
//! this text (see [`crate::diff::grammar`]); both sides must change together.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Placeholder for an object key present on one side only.
pub const NO_KEY: &str = "<does not have key>";
/// Placeholder for an array element present on one side only.
pub const NO_VALUE: &str = "<no value>";
/// Rendering of JSON `null`.
pub const NIL: &str = "<nil>";

/// Tunables for [`DeepDiffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferOptions {
    /// Stop after this many diff strings; 0 means unlimited.
    pub max_diff: usize,
    /// Stop descending below this depth; 0 means unlimited.
    pub max_depth: usize,
    /// Decimal places considered when comparing non-integer numbers.
    pub float_precision: u32,
}

impl Default for DifferOptions {
    fn default() -> Self {
        Self {
            max_diff: 10,
            max_depth: 0,
            float_precision: 10,
        }
    }
}

/// Recursive structural differ over `serde_json::Value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepDiffer {
    options: DifferOptions,
}

impl DeepDiffer {
    pub fn new(options: DifferOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DifferOptions {
        &self.options
    }

    /// Compare `left` against `right`; empty when deeply equal.
    pub fn diff(&self, left: &Value, right: &Value) -> Vec<String> {
        let mut walk = Walk {
            options: &self.options,
            path: Vec::new(),
            out: Vec::new(),
        };
        walk.values(left, right, 0);
        walk.out
    }
}

/// Diff with default options.
pub fn diff(left: &Value, right: &Value) -> Vec<String> {
    DeepDiffer::default().diff(left, right)
}

struct Walk<'o> {
    options: &'o DifferOptions,
    path: Vec<String>,
    out: Vec<String>,
}

impl Walk<'_> {
    fn full(&self) -> bool {
        self.options.max_diff != 0 && self.out.len() >= self.options.max_diff
    }

    fn save(&mut self, left: String, right: String) {
        if self.full() {
            return;
        }
        let line = if self.path.is_empty() {
            format!("{left} != {right}")
        } else {
            format!("{}: {left} != {right}", self.path.join("."))
        };
        self.out.push(line);
    }

    fn values(&mut self, left: &Value, right: &Value, depth: usize) {
        if self.full() {
            return;
        }
        if self.options.max_depth != 0 && depth > self.options.max_depth {
            if !values_equal(left, right, self.options.float_precision) {
                self.save(render_leaf(left), render_leaf(right));
            }
            return;
        }
        match (left, right) {
            (Value::Object(l), Value::Object(r)) => {
                let mut keys: Vec<&String> = l.keys().collect();
                keys.sort();
                for key in keys {
                    let lv = &l[key.as_str()];
                    self.path.push(format!("map[{key}]"));
                    match r.get(key) {
                        Some(rv) => self.values(lv, rv, depth + 1),
                        None => self.save(render_leaf(lv), NO_KEY.to_string()),
                    }
                    self.path.pop();
                }
                let mut extra: Vec<(&String, &Value)> =
                    r.iter().filter(|(k, _)| !l.contains_key(*k)).collect();
                extra.sort_by(|a, b| a.0.cmp(b.0));
                for (key, rv) in extra {
                    self.path.push(format!("map[{key}]"));
                    self.save(NO_KEY.to_string(), render_leaf(rv));
                    self.path.pop();
                }
            }
            (Value::Array(l), Value::Array(r)) => {
                for index in 0..l.len().max(r.len()) {
                    self.path.push(format!("slice[{index}]"));
                    match (l.get(index), r.get(index)) {
                        (Some(lv), Some(rv)) => self.values(lv, rv, depth + 1),
                        (Some(lv), None) => self.save(render_leaf(lv), NO_VALUE.to_string()),
                        (None, Some(rv)) => self.save(NO_VALUE.to_string(), render_leaf(rv)),
                        (None, None) => {}
                    }
                    self.path.pop();
                }
            }
            (Value::Number(l), Value::Number(r)) => {
                if !numbers_equal(l, r, self.options.float_precision) {
                    self.save(render_leaf(left), render_leaf(right));
                }
            }
            _ => {
                if left != right {
                    self.save(render_leaf(left), render_leaf(right));
                }
            }
        }
    }
}

/// Deep equality under the same number rules as the walk, without output.
fn values_equal(left: &Value, right: &Value, precision: u32) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => numbers_equal(l, r, precision),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(lv, rv)| values_equal(lv, rv, precision))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter().all(|(key, lv)| {
                    r.get(key).is_some_and(|rv| values_equal(lv, rv, precision))
                })
        }
        _ => left == right,
    }
}

/// Integers compare exactly. Once either side is a float, both are printed
/// with `precision` decimals and the texts compared.
fn numbers_equal(left: &Number, right: &Number, precision: u32) -> bool {
    if left == right {
        return true;
    }
    if !(left.is_f64() || right.is_f64()) {
        return false;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => {
            let precision = precision as usize;
            format!("{l:.precision$}") == format!("{r:.precision$}")
        }
        _ => false,
    }
}

/// Render a value for one side of a diff string.
///
/// Strings are emitted raw so that embedded JSON or multi-line text survives
/// into the report untouched.
pub fn render_leaf(value: &Value) -> String {
    match value {
        Value::Null => NIL.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        composite => composite.to_string(),
    }
}
