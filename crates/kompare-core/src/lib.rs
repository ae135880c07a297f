//! Kompare Core - structural diff engine for record collections
//!
//! This crate compares two collections of Kubernetes-style records and
//! reports field-level differences for records matched by name, including:
//! - Shape registry that turns list objects, `Items` dumps and bare arrays
//!   into one uniform view
//! - Dotted-path field resolution with upper-camel keys and promoted metadata
//! - Deep differ producing `map[key]: left != right` diff strings
//! - Report renderer with multi-line and embedded-JSON handling
//! - Resource-kind catalog with default comparison criteria
//! - YAML configuration and file/in-memory collection providers

pub mod collection;
pub mod config;
pub mod diff;
pub mod errors;
pub mod kinds;
pub mod logging_facility;
pub mod matcher;
pub mod path;
pub mod provider;

#[doc(hidden)]
pub use tracing as __tracing;

pub use kompare_core_types;

// Re-export commonly used types
pub use collection::{CollectionView, ShapeEntry, ShapeRegistry};
pub use config::CompareConfig;
pub use diff::{
    compare, compare_detailed, compare_to, render, render_outcome, Comparator, ComparisonOutcome,
    DiffRecord, Verbosity,
};
pub use errors::{ExError, ExErrorKind, KompareError, Result};
pub use kinds::{human_readable_kind, parse_criteria, validate_kinds, ResourceKind};
pub use path::{resolve, FieldPath};
pub use provider::{
    compare_from_providers, CollectionProvider, InMemoryProvider, JsonFileProvider,
};
