//! Output shapes consumed by the UI tables
//! Every table carries the component path the UI uses to pick a renderer.

use crate::AnomalyNode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

// BREADCRUMB //

/// Navigation context for the node currently being viewed

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbInfo {
    pub id: i64,
    pub title: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_root: bool,
}

// TABLE ROWS //

/// Row of the entity-metrics table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub metric: Option<String>,
    pub feedback: Option<Value>,
    pub current: Option<f64>,
    pub predicted: Option<f64>,
}

impl MetricRow {
    pub fn from_node(node: &AnomalyNode) -> Self {
        Self {
            id: node.id,
            start_time: node.start_time,
            end_time: node.end_time,
            metric: node.metric.clone(),
            feedback: node.feedback.clone(),
            current: node.avg_current_val,
            predicted: node.avg_baseline_val,
        }
    }
}

/// Row of the entity-groups table, one per group constituent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRow {
    pub id: i64,
    pub group_name: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub feedback: Option<Value>,
    pub criticality: Option<f64>,
    pub current: Option<f64>,
    pub predicted: Option<f64>,
}

impl GroupRow {
    pub fn from_node(node: &AnomalyNode) -> Self {
        Self {
            id: node.id,
            group_name: node.group_key().map(str::to_string),
            start_time: node.start_time,
            end_time: node.end_time,
            feedback: node.feedback.clone(),
            criticality: node.group_score(),
            current: node.avg_current_val,
            predicted: node.avg_baseline_val,
        }
    }
}

/// Row shown after drilling into a single group: the metric anomalies it summarizes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConstituentRow {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub feedback: Option<Value>,
    pub metric: Option<String>,
    pub dimensions: Option<Value>,
    pub current: Option<f64>,
    pub predicted: Option<f64>,
}

impl GroupConstituentRow {
    pub fn from_node(node: &AnomalyNode) -> Self {
        Self {
            id: node.id,
            start_time: node.start_time,
            end_time: node.end_time,
            feedback: node.feedback.clone(),
            metric: node.metric.clone(),
            dimensions: node.dimensions.clone(),
            current: node.avg_current_val,
            predicted: node.avg_baseline_val,
        }
    }
}

/// Row of the parent-anomalies table
/// `details` counts the direct children per metric (or entity) name, in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRow {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub feedback: Option<Value>,
    pub details: IndexMap<String, usize>,
}

impl ParentRow {
    /// Total number of children tallied into this row
    pub fn child_count(&self) -> usize {
        self.details.values().sum()
    }
}

/// A table row; serialize-only, the row shapes overlap too much to read back untagged
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Row {
    Metric(MetricRow),
    Group(GroupRow),
    Constituent(GroupConstituentRow),
    Parent(ParentRow),
}

impl Row {
    pub fn id(&self) -> i64 {
        match self {
            Row::Metric(r) => r.id,
            Row::Group(r) => r.id,
            Row::Constituent(r) => r.id,
            Row::Parent(r) => r.id,
        }
    }
}

// TABLES //

/// One table handed to the UI component registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub component_path: String,
    pub title: String,
    pub data: Vec<Row>,
}

/// Result of parsing the tree for one view: breadcrumb plus the tables to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedView {
    pub breadcrumb_info: BreadcrumbInfo,
    pub output: Vec<Table>,
}
