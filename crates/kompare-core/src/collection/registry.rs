use serde_json::Value;

use super::view::CollectionView;

/// Kind and shape tag given to collections no entry recognizes.
pub const UNKNOWN_KIND: &str = "unknown";

/// Decides whether an entry applies to a value.
pub type ShapePredicate = fn(&Value) -> bool;
/// Pulls `(kind, items)` out of a value the predicate accepted.
pub type ShapeExtractor = fn(&Value) -> (String, Option<&[Value]>);

/// One recognized collection shape.
#[derive(Clone, Copy)]
pub struct ShapeEntry {
    pub tag: &'static str,
    pub predicate: ShapePredicate,
    pub extractor: ShapeExtractor,
}

impl std::fmt::Debug for ShapeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeEntry").field("tag", &self.tag).finish()
    }
}

/// Ordered table of collection shapes, probed first to last.
///
/// New shapes are added with [`register`](Self::register); dispatch itself
/// never changes.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    entries: Vec<ShapeEntry>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ShapeRegistry {
    /// A registry that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Kubernetes list objects, `Items` struct dumps and bare record arrays.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ShapeEntry {
            tag: "kubernetes-list",
            predicate: is_kubernetes_list,
            extractor: extract_kubernetes_list,
        });
        registry.register(ShapeEntry {
            tag: "items-object",
            predicate: is_items_object,
            extractor: extract_items_object,
        });
        registry.register(ShapeEntry {
            tag: "record-array",
            predicate: Value::is_array,
            extractor: extract_record_array,
        });
        registry
    }

    /// Add a shape, or replace the entry already registered under its tag
    /// (keeping that entry's probe position).
    pub fn register(&mut self, entry: ShapeEntry) {
        match self.entries.iter_mut().find(|e| e.tag == entry.tag) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Registered tags in probe order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.tag).collect()
    }

    /// Classify `collection` with the first entry whose predicate accepts it.
    pub fn classify<'a>(&self, collection: &'a Value) -> CollectionView<'a> {
        self.entries
            .iter()
            .find(|entry| (entry.predicate)(collection))
            .map(|entry| {
                let (kind, items) = (entry.extractor)(collection);
                CollectionView::new(entry.tag, kind, items)
            })
            .unwrap_or_else(CollectionView::unknown)
    }

    /// Number of items; 0 when unrecognized or without an items sequence.
    pub fn count_elements(&self, collection: &Value) -> usize {
        self.classify(collection).len()
    }

    /// Item names in order; `""` for items without a resolvable name.
    pub fn iterate_names(&self, collection: &Value) -> Vec<String> {
        self.classify(collection).names()
    }
}

fn kind_field(value: &Value) -> Option<&str> {
    value.get("kind").and_then(Value::as_str)
}

fn is_kubernetes_list(value: &Value) -> bool {
    value.is_object() && kind_field(value).is_some_and(|kind| kind.ends_with("List"))
}

fn extract_kubernetes_list(value: &Value) -> (String, Option<&[Value]>) {
    let kind = kind_field(value).unwrap_or(UNKNOWN_KIND).to_string();
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice);
    (kind, items)
}

fn items_key(value: &Value) -> Option<&Value> {
    value.get("Items").or_else(|| value.get("items"))
}

fn is_items_object(value: &Value) -> bool {
    value.is_object() && items_key(value).is_some()
}

fn extract_items_object(value: &Value) -> (String, Option<&[Value]>) {
    let items = items_key(value)
        .and_then(Value::as_array)
        .map(Vec::as_slice);
    let kind = kind_field(value)
        .map(str::to_string)
        .or_else(|| items.and_then(item_list_kind))
        .unwrap_or_else(|| "RecordList".to_string());
    (kind, items)
}

fn extract_record_array(value: &Value) -> (String, Option<&[Value]>) {
    let items = value.as_array().map(Vec::as_slice);
    let kind = items
        .and_then(item_list_kind)
        .unwrap_or_else(|| "RecordList".to_string());
    (kind, items)
}

/// `<Kind>List` from the first item's `kind`, when it has one.
fn item_list_kind(items: &[Value]) -> Option<String> {
    items
        .first()
        .and_then(kind_field)
        .map(|kind| format!("{kind}List"))
}
