//! Identity matching of records across two collections.
//!
//! Records are paired by `Name` equality alone. Matching is a plain nested
//! scan, O(n·m) in the two collection sizes. An index-based replacement must
//! keep the "only in" names, their order and the pairs identical.

use serde_json::Value;

use crate::collection::view::record_name;
use crate::collection::CollectionView;

/// A record in `first` that has a same-named record in `second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPair<'a> {
    pub source: &'a Value,
    pub target: &'a Value,
}

/// Names of `first`'s items that have no same-named item in `second`, in
/// `first`'s order.
///
/// Duplicates in `first` are each reported. An item whose name cannot be
/// resolved carries the name `""`, which only ever matches another `""`.
pub fn match_by_name(first: &CollectionView<'_>, second: &CollectionView<'_>) -> Vec<String> {
    first
        .items()
        .iter()
        .map(record_name)
        .filter(|name| !contains_name(second.items(), name))
        .collect()
}

/// Whether any of `items` is named `name`. Stops at the first hit.
pub fn contains_name(items: &[Value], name: &str) -> bool {
    items.iter().any(|item| record_name(item) == name)
}

/// Pairs of same-named records, in source order.
///
/// Each source record binds to the first target record of the same name
/// that no earlier source record has claimed. Duplicate names therefore pair
/// up positionally, and surplus duplicates on either side stay unpaired.
/// Empty names never pair.
pub fn matched_pairs<'a>(
    source: &CollectionView<'a>,
    target: &CollectionView<'a>,
) -> Vec<MatchedPair<'a>> {
    let target_items = target.items();
    let target_names: Vec<String> = target_items.iter().map(record_name).collect();
    let mut claimed = vec![false; target_items.len()];
    let mut pairs = Vec::new();
    for source_item in source.items() {
        let source_name = record_name(source_item);
        if source_name.is_empty() {
            continue;
        }
        let hit = target_names
            .iter()
            .enumerate()
            .find(|(index, name)| !claimed[*index] && **name == source_name)
            .map(|(index, _)| index);
        if let Some(index) = hit {
            claimed[index] = true;
            pairs.push(MatchedPair {
                source: source_item,
                target: &target_items[index],
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ShapeRegistry;
    use serde_json::json;

    #[test]
    fn test_only_in_is_one_directional() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"Name": "a"}, {"Name": "b"}]);
        let b = json!([{"Name": "a"}]);
        let (va, vb) = (registry.classify(&a), registry.classify(&b));

        assert_eq!(match_by_name(&va, &vb), vec!["b"]);
        assert!(match_by_name(&vb, &va).is_empty());
    }

    #[test]
    fn test_duplicates_in_first_are_each_reported() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"Name": "x"}, {"Name": "x"}]);
        let b = json!([{"Name": "y"}]);
        assert_eq!(
            match_by_name(&registry.classify(&a), &registry.classify(&b)),
            vec!["x", "x"]
        );
    }

    #[test]
    fn test_unnamed_items_report_empty_name() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"spec": {}}]);
        let b = json!([{"Name": "a"}]);
        assert_eq!(
            match_by_name(&registry.classify(&a), &registry.classify(&b)),
            vec![""]
        );
    }

    #[test]
    fn test_matched_pairs_skip_empty_names_and_take_first_match() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"Name": "web", "v": 1}, {"v": 2}, {"Name": "db"}]);
        let b = json!([{"Name": "web", "v": 3}, {"v": 4}, {"Name": "web", "v": 5}]);
        let (va, vb) = (registry.classify(&a), registry.classify(&b));

        let pairs = matched_pairs(&va, &vb);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].source["v"], json!(1));
        assert_eq!(pairs[0].target["v"], json!(3));
    }

    #[test]
    fn test_duplicate_names_pair_positionally() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"Name": "x", "v": 1}, {"Name": "x", "v": 2}, {"Name": "x", "v": 3}]);
        let b = json!([{"Name": "x", "v": 1}, {"Name": "x", "v": 2}]);
        let (va, vb) = (registry.classify(&a), registry.classify(&b));

        let pairs = matched_pairs(&va, &vb);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.source["v"] == p.target["v"]));
    }

    #[test]
    fn test_unknown_collections_match_nothing() {
        let registry = ShapeRegistry::builtin();
        let a = json!([{"Name": "a"}]);
        let unknown = json!(7);
        let (va, vu) = (registry.classify(&a), registry.classify(&unknown));
        assert_eq!(match_by_name(&va, &vu), vec!["a"]);
        assert!(match_by_name(&vu, &va).is_empty());
        assert!(matched_pairs(&va, &vu).is_empty());
    }
}
