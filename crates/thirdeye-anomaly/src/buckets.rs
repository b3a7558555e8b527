//! Classification of an anomaly's children into metric, group and entity buckets
//!
//! - children carrying a metric land in the single metrics bucket
//! - children produced by a summarize grouper land in a groups bucket per subEntityName
//! - everything else lands in an entities bucket per subEntityName

use crate::config::{ClassificationKind, ClassifierConfig};
use indexmap::IndexMap;
use thirdeye_core::{AnomalyNode, GroupRow, MetricRow};
use tracing::debug;

/// How a single node is treated by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Metric,
    GroupSummary,
    Composite,
}

impl NodeKind {
    pub fn of(node: &AnomalyNode, config: &ClassifierConfig) -> Self {
        if node.is_metric_leaf() {
            NodeKind::Metric
        } else if node
            .detector_component_name()
            .contains(config.summarize_marker.as_str())
        {
            NodeKind::GroupSummary
        } else {
            NodeKind::Composite
        }
    }

    pub fn classification(&self) -> ClassificationKind {
        match self {
            NodeKind::Metric => ClassificationKind::Metrics,
            NodeKind::GroupSummary => ClassificationKind::Groups,
            NodeKind::Composite => ClassificationKind::Entities,
        }
    }
}

/// One bucket entry: the table it will become, before formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<T> {
    pub component_path: String,
    pub title: String,
    pub data: Vec<T>,
}

impl<T> Bucket<T> {
    fn new(component_path: &str, title: String, first: T) -> Self {
        Self {
            component_path: component_path.to_string(),
            title,
            data: vec![first],
        }
    }
}

/// The classification of one node's children
/// Group and entity buckets are keyed by subEntityName in first-seen order;
/// a missing subEntityName is keyed by the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<'a> {
    pub metrics: Option<Bucket<MetricRow>>,
    pub groups: IndexMap<String, Bucket<GroupRow>>,
    pub entities: IndexMap<String, Bucket<&'a AnomalyNode>>,
}

impl Default for Buckets<'_> {
    fn default() -> Self {
        Self {
            metrics: None,
            groups: IndexMap::new(),
            entities: IndexMap::new(),
        }
    }
}

impl<'a> Buckets<'a> {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_none() && self.groups.is_empty() && self.entities.is_empty()
    }

    /// Fold one child into the buckets
    pub fn push(mut self, child: &'a AnomalyNode, config: &ClassifierConfig) -> Self {
        let classifications = &config.classifications;

        match NodeKind::of(child, config) {
            NodeKind::Metric => {
                let row = MetricRow::from_node(child);
                match self.metrics.as_mut() {
                    Some(bucket) => bucket.data.push(row),
                    None => {
                        let c = classifications.get(ClassificationKind::Metrics);
                        self.metrics = Some(Bucket::new(&c.component_path, c.default_title.clone(), row));
                    }
                }
            }
            NodeKind::GroupSummary => {
                let row = GroupRow::from_node(child);
                let key = child.sub_entity_name().unwrap_or("");
                match self.groups.get_mut(key) {
                    Some(bucket) => bucket.data.push(row),
                    None => {
                        let c = classifications.get(ClassificationKind::Groups);
                        let title = format!("{}{}", c.default_title, key);
                        self.groups
                            .insert(key.to_string(), Bucket::new(&c.component_path, title, row));
                    }
                }
            }
            NodeKind::Composite => {
                let key = child.sub_entity_name().unwrap_or("");
                match self.entities.get_mut(key) {
                    Some(bucket) => bucket.data.push(child),
                    None => {
                        let c = classifications.get(ClassificationKind::Entities);
                        let title = if key.is_empty() {
                            c.default_title.clone()
                        } else {
                            key.to_string()
                        };
                        self.entities
                            .insert(key.to_string(), Bucket::new(&c.component_path, title, child));
                    }
                }
            }
        }
        self
    }
}

/// Classify the direct children of `node`
pub fn generate_buckets<'a>(node: &'a AnomalyNode, config: &ClassifierConfig) -> Buckets<'a> {
    let buckets = node
        .children
        .iter()
        .fold(Buckets::default(), |buckets, child| buckets.push(child, config));

    debug!(
        id = node.id,
        kind = NodeKind::of(node, config).classification().key(),
        metrics = buckets.metrics.as_ref().map_or(0, |b| b.data.len()),
        groups = buckets.groups.len(),
        entities = buckets.entities.len(),
        "classified children"
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> AnomalyNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_metric_wins_over_marker() {
        let config = ClassifierConfig::default();
        let child = node(json!({
            "metric": "m1",
            "properties": { "detectorComponentName": "g:ANOMALY_SUMMARIZE" }
        }));
        assert_eq!(NodeKind::of(&child, &config), NodeKind::Metric);
    }

    #[test]
    fn test_missing_properties_is_composite() {
        let config = ClassifierConfig::default();
        assert_eq!(NodeKind::of(&AnomalyNode::default(), &config), NodeKind::Composite);
    }

    #[test]
    fn test_custom_marker() {
        let config = ClassifierConfig {
            summarize_marker: "GROUPER".to_string(),
            ..Default::default()
        };
        let child = node(json!({ "properties": { "detectorComponentName": "x:GROUPER" } }));
        assert_eq!(NodeKind::of(&child, &config), NodeKind::GroupSummary);
        assert_eq!(
            NodeKind::of(&child, &config).classification(),
            ClassificationKind::Groups
        );
    }

    #[test]
    fn test_metric_children_share_one_bucket() {
        let parent = node(json!({
            "id": 1,
            "children": [
                { "id": 2, "metric": "m1", "avgCurrentVal": 5.0, "avgBaselineVal": 4.0 },
                { "id": 3, "metric": "m2" }
            ]
        }));
        let buckets = generate_buckets(&parent, &ClassifierConfig::default());

        let metrics = buckets.metrics.unwrap();
        assert_eq!(metrics.component_path, "entity-metrics");
        assert_eq!(metrics.title, "Metric Anomalies");
        let ids: Vec<i64> = metrics.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(metrics.data[0].current, Some(5.0));
        assert_eq!(metrics.data[0].predicted, Some(4.0));
        assert!(buckets.groups.is_empty());
        assert!(buckets.entities.is_empty());
    }

    #[test]
    fn test_group_children_keyed_by_sub_entity() {
        let summarize = "grouper:ANOMALY_SUMMARIZE";
        let parent = node(json!({
            "id": 1,
            "children": [
                { "id": 2, "properties": { "detectorComponentName": summarize, "subEntityName": "a", "groupKey": "g1", "groupScore": 0.9 } },
                { "id": 3, "properties": { "detectorComponentName": summarize, "subEntityName": "b", "groupKey": "g2" } },
                { "id": 4, "properties": { "detectorComponentName": summarize, "subEntityName": "a", "groupKey": "g3" } }
            ]
        }));
        let buckets = generate_buckets(&parent, &ClassifierConfig::default());

        let keys: Vec<&str> = buckets.groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let a = &buckets.groups["a"];
        assert_eq!(a.title, "ENTITY:a");
        assert_eq!(a.component_path, "entity-groups");
        let ids: Vec<i64> = a.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(a.data[0].group_name.as_deref(), Some("g1"));
        assert_eq!(a.data[0].criticality, Some(0.9));
    }

    #[test]
    fn test_unnamed_groups_share_empty_key() {
        let summarize = "grouper:ANOMALY_SUMMARIZE";
        let parent = node(json!({
            "id": 1,
            "children": [
                { "id": 2, "properties": { "detectorComponentName": summarize } },
                { "id": 3, "properties": { "detectorComponentName": summarize, "subEntityName": "" } }
            ]
        }));
        let buckets = generate_buckets(&parent, &ClassifierConfig::default());

        assert_eq!(buckets.groups.len(), 1);
        let unnamed = &buckets.groups[""];
        assert_eq!(unnamed.title, "ENTITY:");
        let ids: Vec<i64> = unnamed.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(unnamed.data[0].group_name, None);
        assert!(buckets.entities.is_empty());
    }

    #[test]
    fn test_entity_titles() {
        let parent = node(json!({
            "id": 1,
            "children": [
                { "id": 2 },
                { "id": 3, "properties": { "subEntityName": "checkout" } },
                { "id": 4, "properties": { "subEntityName": "" } }
            ]
        }));
        let buckets = generate_buckets(&parent, &ClassifierConfig::default());

        assert_eq!(buckets.entities.len(), 2);
        let unnamed = &buckets.entities[""];
        assert_eq!(unnamed.title, "Entity");
        assert_eq!(unnamed.component_path, "parent-anomalies");
        let ids: Vec<i64> = unnamed.data.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(buckets.entities["checkout"].title, "checkout");
    }

    #[test]
    fn test_leaf_has_empty_buckets() {
        let leaf = AnomalyNode::default();
        assert!(generate_buckets(&leaf, &ClassifierConfig::default()).is_empty());
    }
}
