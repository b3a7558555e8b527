//! Depth-first lookup of an anomaly by id

use crate::config::ForestSearch;
use thirdeye_core::{AnomalyNode, AnomalyTree};
use tracing::warn;

/// Pre-order depth-first search of a single tree.
/// Trees are assumed acyclic; the first node (in pre-order) whose id matches wins.
pub fn find_anomaly(id: i64, node: &AnomalyNode) -> Option<&AnomalyNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_anomaly(id, child))
}

/// Search every root of the input according to the forest policy
pub fn find_in_tree(id: i64, tree: &AnomalyTree, policy: ForestSearch) -> Option<&AnomalyNode> {
    let roots = tree.roots();

    match policy {
        ForestSearch::FirstMatch => roots.iter().find_map(|root| find_anomaly(id, root)),
        ForestSearch::LastRoot => {
            // each root overwrites the previous result, so only the last root counts
            let mut found = None;
            for root in roots {
                found = find_anomaly(id, root);
            }

            if found.is_none() && roots.iter().any(|root| find_anomaly(id, root).is_some()) {
                warn!(id, "anomaly exists in an earlier root but last-root search discarded it");
            }
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> AnomalyNode {
        serde_json::from_value(json!({
            "id": 1,
            "children": [
                { "id": 2, "children": [] },
                { "id": 3, "children": [ { "id": 4, "children": [] } ] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_nested_node() {
        let root = tree();
        let found = find_anomaly(4, &root).unwrap();
        assert_eq!(found.id, 4);
    }

    #[test]
    fn test_find_root_itself() {
        let root = tree();
        assert_eq!(find_anomaly(1, &root).unwrap().id, 1);
    }

    #[test]
    fn test_missing_id_is_none() {
        let root = tree();
        assert!(find_anomaly(99, &root).is_none());
    }

    #[test]
    fn test_forest_first_match_short_circuits() {
        let forest = AnomalyTree::Forest(vec![tree(), AnomalyNode { id: 10, ..Default::default() }]);
        let found = find_in_tree(3, &forest, ForestSearch::FirstMatch).unwrap();
        assert_eq!(found.id, 3);
    }

    #[test]
    fn test_forest_last_root_discards_earlier_matches() {
        let forest = AnomalyTree::Forest(vec![tree(), AnomalyNode { id: 10, ..Default::default() }]);
        assert!(find_in_tree(3, &forest, ForestSearch::LastRoot).is_none());
        assert_eq!(find_in_tree(10, &forest, ForestSearch::LastRoot).unwrap().id, 10);
    }

    #[test]
    fn test_subtree_input() {
        let subtree = AnomalyTree::from(tree());
        assert_eq!(find_in_tree(2, &subtree, ForestSearch::LastRoot).unwrap().id, 2);
    }
}
