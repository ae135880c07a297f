use serde_json::Value;

use crate::path::resolve_string;

/// Field holding a record's identity.
pub const NAME_FIELD: &str = "Name";
/// Field holding a record's namespace.
pub const NAMESPACE_FIELD: &str = "Namespace";

/// A classified collection: its shape tag, kind tag and ordered items.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView<'a> {
    shape: &'static str,
    kind: String,
    items: Option<&'a [Value]>,
}

impl<'a> CollectionView<'a> {
    pub fn new(shape: &'static str, kind: impl Into<String>, items: Option<&'a [Value]>) -> Self {
        Self {
            shape,
            kind: kind.into(),
            items,
        }
    }

    /// The empty view given to unrecognized input.
    pub fn unknown() -> Self {
        Self::new(super::UNKNOWN_KIND, super::UNKNOWN_KIND, None)
    }

    /// Tag of the registry entry that recognized the collection.
    pub fn shape(&self) -> &'static str {
        self.shape
    }

    /// Kind tag, e.g. `DeploymentList`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_recognized(&self) -> bool {
        self.shape != super::UNKNOWN_KIND
    }

    /// Whether the collection exposes an ordered items sequence at all.
    pub fn has_items(&self) -> bool {
        self.items.is_some()
    }

    /// The ordered items; empty when there are none.
    pub fn items(&self) -> &'a [Value] {
        self.items.unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Name of every item, in order. Items without a resolvable string name
    /// contribute `""`.
    pub fn names(&self) -> Vec<String> {
        self.items().iter().map(record_name).collect()
    }
}

/// Resolve a record's name, `""` when absent.
pub fn record_name(record: &Value) -> String {
    resolve_string(record, NAME_FIELD)
}

/// Resolve a record's namespace, `""` when absent.
pub fn record_namespace(record: &Value) -> String {
    resolve_string(record, NAMESPACE_FIELD)
}
