//! Structural diff engine.
//!
//! Compares two record collections and reports field-level differences for
//! records matched by name.
//!
//! ## Entry point
//!
//! ```
//! use kompare_core::diff::{compare_detailed, render, Verbosity};
//! use serde_json::json;
//!
//! let source = json!([{"Name": "svc1", "Annotations": {"x": "1"}}]);
//! let target = json!([{"Name": "svc1", "Annotations": {"x": "2"}}]);
//! let outcome = compare_detailed(&source, &target, &["Annotations"], Verbosity::Quiet)?;
//! assert_eq!(outcome.records[0].diff_strings, vec!["map[x]: 1 != 2"]);
//! let report = render(&outcome.records);
//! assert!(report.contains("- x: 1 != 2"));
//! # Ok::<(), kompare_core::errors::ExError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical records, in the same order.
//! - **Containment**: every record's `property_path` is one of the criteria.
//! - **Graceful degradation**: unresolvable criteria, count mismatches and one
//!   unrecognized side are reported in the outcome; only two unrecognized
//!   collections fail the call.

pub mod deep;
pub mod engine;
pub mod grammar;
pub mod human_summary;
pub mod model;

pub use deep::{DeepDiffer, DifferOptions};
pub use engine::{compare, compare_detailed, compare_to, Comparator};
pub use human_summary::{render, render_outcome};
pub use model::{ComparisonOutcome, DiffRecord, Side, SkippedCriterion, Verbosity};
