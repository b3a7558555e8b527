//! Root and drill-down views over an anomaly tree

use crate::breadcrumb::format_breadcrumb_time;
use crate::buckets::{NodeKind, generate_buckets};
use crate::config::{ClassificationKind, ClassifierConfig};
use crate::search::find_in_tree;
use crate::tables::{
    parse_entities_bucket, parse_groups_bucket, parse_metrics_bucket,
    populate_parent_anomalies_table,
};
use thirdeye_core::{
    AnomalyNode, AnomalyTree, BreadcrumbInfo, GroupConstituentRow, MetricRow, ParsedView, Row,
    Table, TreeError,
};
use tracing::{debug, warn};

/// Turns an anomaly tree into the breadcrumb and tables for one view
#[derive(Debug, Clone, Default)]
pub struct AnomalyTreeClassifier {
    config: ClassifierConfig,
}

impl AnomalyTreeClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Top level of an exploration: one parent-anomalies table built from the roots.
    /// A single subtree yields the breadcrumb only.
    pub fn parse_root(&self, exploration_id: i64, tree: &AnomalyTree) -> ParsedView {
        let breadcrumb_info = BreadcrumbInfo {
            id: exploration_id,
            title: self.config.root_title.clone(),
            is_root: true,
        };

        let mut output = Vec::new();
        if let AnomalyTree::Forest(roots) = tree {
            let entities = self.config.classifications.get(ClassificationKind::Entities);
            output.push(Table {
                component_path: entities.component_path.clone(),
                title: entities.default_title.clone(),
                data: populate_parent_anomalies_table(roots)
                    .into_iter()
                    .map(Row::Parent)
                    .collect(),
            });
        }

        ParsedView {
            breadcrumb_info,
            output,
        }
    }

    /// Drill into the anomaly with the given id
    pub fn parse_subtree(&self, id: i64, tree: &AnomalyTree) -> Result<ParsedView, TreeError> {
        let Some(anomaly) = find_in_tree(id, tree, self.config.forest_search) else {
            warn!(id, "drill-down target not found");
            return Err(TreeError::AnomalyNotFound(id));
        };

        let kind = NodeKind::of(anomaly, &self.config);
        debug!(id, ?kind, children = anomaly.children.len(), "drilling into anomaly");

        Ok(match kind {
            NodeKind::GroupSummary => self.parse_group_anomaly(anomaly),
            NodeKind::Composite => self.parse_composite_anomaly(anomaly),
            NodeKind::Metric => self.parse_metric_anomaly(anomaly),
        })
    }

    /// A summarize-grouper anomaly lists its constituents as they are
    pub fn parse_group_anomaly(&self, anomaly: &AnomalyNode) -> ParsedView {
        let groups = self.config.classifications.get(ClassificationKind::Groups);
        let breadcrumb_info = BreadcrumbInfo {
            id: anomaly.id,
            title: format!(
                "{}/{}",
                anomaly.sub_entity_name().unwrap_or(""),
                anomaly.group_key().unwrap_or("")
            ),
            is_root: false,
        };

        let data = anomaly
            .children
            .iter()
            .map(|child| Row::Constituent(GroupConstituentRow::from_node(child)))
            .collect();

        ParsedView {
            breadcrumb_info,
            output: vec![Table {
                component_path: groups.component_path.clone(),
                title: groups.default_title.clone(),
                data,
            }],
        }
    }

    /// A composite anomaly classifies its children; tables come out metrics, groups, then entities
    pub fn parse_composite_anomaly(&self, anomaly: &AnomalyNode) -> ParsedView {
        let buckets = generate_buckets(anomaly, &self.config);

        let mut output = Vec::new();
        if let Some(metrics) = buckets.metrics {
            output.extend(parse_metrics_bucket(metrics));
        }
        output.extend(parse_groups_bucket(buckets.groups));
        output.extend(parse_entities_bucket(buckets.entities));

        ParsedView {
            breadcrumb_info: self.time_breadcrumb(anomaly),
            output,
        }
    }

    /// A metric anomaly has nothing below it to classify, so it shows itself as a single row
    pub fn parse_metric_anomaly(&self, anomaly: &AnomalyNode) -> ParsedView {
        let metrics = self.config.classifications.get(ClassificationKind::Metrics);

        ParsedView {
            breadcrumb_info: self.time_breadcrumb(anomaly),
            output: vec![Table {
                component_path: metrics.component_path.clone(),
                title: metrics.default_title.clone(),
                data: vec![Row::Metric(MetricRow::from_node(anomaly))],
            }],
        }
    }

    fn time_breadcrumb(&self, anomaly: &AnomalyNode) -> BreadcrumbInfo {
        BreadcrumbInfo {
            id: anomaly.id,
            title: format_breadcrumb_time(anomaly.start_time, &self.config.breadcrumb),
            is_root: false,
        }
    }
}

/// Root view with the default configuration
pub fn parse_root(exploration_id: i64, tree: &AnomalyTree) -> ParsedView {
    AnomalyTreeClassifier::default().parse_root(exploration_id, tree)
}

/// Drill-down view with the default configuration
pub fn parse_subtree(id: i64, tree: &AnomalyTree) -> Result<ParsedView, TreeError> {
    AnomalyTreeClassifier::default().parse_subtree(id, tree)
}
