//! Collection providers: where the two collections come from.
//!
//! The engine never fetches anything itself. A [`CollectionProvider`] hands
//! it a ready collection for a `(kind, scope)` pair, where `scope` is
//! typically a namespace and may be empty for cluster-wide kinds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::diff::engine::Comparator;
use crate::diff::model::{ComparisonOutcome, Verbosity};
use crate::errors::{ExError, KompareError, Result};

/// Source of record collections.
pub trait CollectionProvider {
    /// Fetch the collection of `kind` within `scope`.
    ///
    /// # Errors
    ///
    /// Whatever the backing store reports; providers in this crate use `Io`
    /// and `Serialization`.
    fn fetch(&self, kind: &str, scope: &str) -> Result<Value>;
}

/// Serves fixtures held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    collections: HashMap<(String, String), Value>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, kind: &str, scope: &str, collection: Value) -> Self {
        self.insert(kind, scope, collection);
        self
    }

    pub fn insert(&mut self, kind: &str, scope: &str, collection: Value) {
        self.collections
            .insert((kind.to_string(), scope.to_string()), collection);
    }
}

impl CollectionProvider for InMemoryProvider {
    fn fetch(&self, kind: &str, scope: &str) -> Result<Value> {
        self.collections
            .get(&(kind.to_string(), scope.to_string()))
            .cloned()
            .ok_or_else(|| KompareError::Io {
                path: location(kind, scope),
                message: "no such collection".to_string(),
            })
    }
}

/// Reads exported JSON collections from a directory tree:
/// `<root>/<scope>/<kind>.json`, or `<root>/<kind>.json` for an empty scope.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    root: PathBuf,
}

impl JsonFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a `(kind, scope)` pair is read from.
    pub fn path_for(&self, kind: &str, scope: &str) -> PathBuf {
        let file = format!("{kind}.json");
        if scope.is_empty() {
            self.root.join(file)
        } else {
            self.root.join(scope).join(file)
        }
    }
}

impl CollectionProvider for JsonFileProvider {
    fn fetch(&self, kind: &str, scope: &str) -> Result<Value> {
        load_json_file(self.path_for(kind, scope))
    }
}

/// Read one JSON document from disk.
///
/// # Errors
///
/// `Io` when the file cannot be read, `Serialization` when it is not JSON.
pub fn load_json_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| KompareError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| KompareError::Serialization {
        message: format!("{}: {e}", path.display()),
    })
}

/// Fetch `kind` in `scope` from both providers and compare the results.
///
/// # Errors
///
/// Fetch failures as reported by the providers (tagged with op `fetch`),
/// otherwise as [`Comparator::compare_detailed`].
pub fn compare_from_providers<S: AsRef<str>>(
    comparator: &Comparator,
    source: &dyn CollectionProvider,
    target: &dyn CollectionProvider,
    kind: &str,
    scope: &str,
    criteria: &[S],
    verbosity: Verbosity,
) -> std::result::Result<ComparisonOutcome, ExError> {
    let fetch = |provider: &dyn CollectionProvider| {
        provider
            .fetch(kind, scope)
            .map_err(|e| ExError::from(e).with_op("fetch"))
    };
    let source_collection = fetch(source)?;
    let target_collection = fetch(target)?;
    comparator.compare_detailed(&source_collection, &target_collection, criteria, verbosity)
}

fn location(kind: &str, scope: &str) -> String {
    if scope.is_empty() {
        kind.to_string()
    } else {
        format!("{scope}/{kind}")
    }
}
