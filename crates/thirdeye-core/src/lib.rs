//! Core types for the anomaly tree explorer
//! this crate contains the shared data structures the classifier, the CLI and the auth plumbing pass around.
pub mod error;
pub mod view;

pub use error::TreeError;
pub use view::{
    BreadcrumbInfo, GroupConstituentRow, GroupRow, MetricRow, ParentRow, ParsedView, Row, Table,
};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tally key the UI receives for a child carrying neither a metric nor a subEntityName
pub const UNDEFINED_TALLY_KEY: &str = "undefined";

// NODE PROPERTIES //

/// Detector-provided properties attached to an anomaly
/// Only the recognised keys are typed, everything else rides along in `extra`

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    #[serde(default)]
    pub detector_component_name: Option<String>,

    #[serde(default)]
    pub sub_entity_name: Option<String>,

    #[serde(default)]
    pub group_key: Option<String>,

    // backend sends this either as a number or a numeric string
    #[serde(default, deserialize_with = "number_or_string")]
    pub group_score: Option<f64>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

// ANOMALY NODE //

/// A node of the anomaly tree as produced by the detection backend
/// Every field defaults when absent so partially populated nodes still classify

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyNode {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub start_time: i64, // epoch millis

    #[serde(default)]
    pub end_time: i64, // epoch millis

    #[serde(default)]
    pub metric: Option<String>, // set only on metric anomalies

    #[serde(default)]
    pub feedback: Option<Value>, // opaque, passed through to the UI

    #[serde(default)]
    pub avg_current_val: Option<f64>,

    #[serde(default)]
    pub avg_baseline_val: Option<f64>,

    #[serde(default)]
    pub dimensions: Option<Value>,

    #[serde(default)]
    pub properties: Option<NodeProperties>,

    #[serde(default)]
    pub children: Vec<AnomalyNode>,
}

impl AnomalyNode {
    /// The metric name, if this node is a metric anomaly (empty strings count as absent)
    pub fn metric_name(&self) -> Option<&str> {
        self.metric.as_deref().filter(|m| !m.is_empty())
    }

    pub fn is_metric_leaf(&self) -> bool {
        self.metric_name().is_some()
    }

    /// Detector component name, `""` when the node carries no properties
    pub fn detector_component_name(&self) -> &str {
        self.properties
            .as_ref()
            .and_then(|p| p.detector_component_name.as_deref())
            .unwrap_or("")
    }

    pub fn sub_entity_name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.sub_entity_name.as_deref())
    }

    pub fn group_key(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.group_key.as_deref())
    }

    pub fn group_score(&self) -> Option<f64> {
        self.properties.as_ref().and_then(|p| p.group_score)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Key under which this node is counted in its parent's details:
    /// the metric if present, otherwise the subEntityName
    pub fn tally_key(&self) -> &str {
        match self.metric_name() {
            Some(metric) => metric,
            None => self.sub_entity_name().unwrap_or(UNDEFINED_TALLY_KEY),
        }
    }

    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_time)
    }
}

// ANOMALY TREE (what the backend returns) //

/// Input handed to the classifier
/// The full exploration arrives as an array of roots, a drilled-into subtree as a single object

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnomalyTree {
    Forest(Vec<AnomalyNode>),
    Subtree(Box<AnomalyNode>),
}

impl AnomalyTree {
    /// Parse a tree from the backend's JSON
    pub fn from_json(raw: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_forest(&self) -> bool {
        matches!(self, AnomalyTree::Forest(_))
    }

    /// The root nodes of the tree, a subtree counts as a single root
    pub fn roots(&self) -> &[AnomalyNode] {
        match self {
            AnomalyTree::Forest(nodes) => nodes,
            AnomalyTree::Subtree(node) => std::slice::from_ref(node.as_ref()),
        }
    }
}

impl From<Vec<AnomalyNode>> for AnomalyTree {
    fn from(nodes: Vec<AnomalyNode>) -> Self {
        AnomalyTree::Forest(nodes)
    }
}

impl From<AnomalyNode> for AnomalyTree {
    fn from(node: AnomalyNode) -> Self {
        AnomalyTree::Subtree(Box::new(node))
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
