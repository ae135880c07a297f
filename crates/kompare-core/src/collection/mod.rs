//! Uniform view over heterogeneous collection shapes.
//!
//! A collection arrives as an opaque `serde_json::Value`: a Kubernetes
//! `...List` object, a struct dump with an `Items` array, or a bare array of
//! records. [`ShapeRegistry::classify`] turns any of these into a
//! [`CollectionView`]; anything unrecognized becomes an empty view of kind
//! `unknown`.

pub mod registry;
pub mod view;

pub use registry::{ShapeEntry, ShapeRegistry, UNKNOWN_KIND};
pub use view::CollectionView;
