//! Formatting of buckets into the tables the UI components consume

use crate::buckets::Bucket;
use indexmap::IndexMap;
use thirdeye_core::{AnomalyNode, MetricRow, GroupRow, ParentRow, Row, Table};

fn into_table<T>(bucket: Bucket<T>, row: impl Fn(T) -> Row) -> Table {
    Table {
        component_path: bucket.component_path,
        title: bucket.title,
        data: bucket.data.into_iter().map(row).collect(),
    }
}

/// Metric anomalies render as one table
pub fn parse_metrics_bucket(bucket: Bucket<MetricRow>) -> Vec<Table> {
    vec![into_table(bucket, Row::Metric)]
}

/// One entity-groups table per subEntityName, in the order the entities were first seen
pub fn parse_groups_bucket(buckets: IndexMap<String, Bucket<GroupRow>>) -> Vec<Table> {
    buckets
        .into_values()
        .map(|bucket| into_table(bucket, Row::Group))
        .collect()
}

/// One parent-anomalies table per subEntityName
/// Anomalies without children of their own are left out of the table.
pub fn parse_entities_bucket(buckets: IndexMap<String, Bucket<&AnomalyNode>>) -> Vec<Table> {
    buckets
        .into_values()
        .map(|bucket| Table {
            component_path: bucket.component_path,
            title: bucket.title,
            data: populate_parent_anomalies_table(bucket.data)
                .into_iter()
                .map(Row::Parent)
                .collect(),
        })
        .collect()
}

/// Summarize each anomaly by counting its direct children per metric (or entity) name
/// Anomalies with no children produce no row.
pub fn populate_parent_anomalies_table<'a, I>(anomalies: I) -> Vec<ParentRow>
where
    I: IntoIterator<Item = &'a AnomalyNode>,
{
    anomalies
        .into_iter()
        .filter(|anomaly| anomaly.has_children())
        .map(|anomaly| {
            let mut details: IndexMap<String, usize> = IndexMap::new();
            for child in &anomaly.children {
                *details.entry(child.tally_key().to_string()).or_insert(0) += 1;
            }

            ParentRow {
                id: anomaly.id,
                start_time: anomaly.start_time,
                end_time: anomaly.end_time,
                feedback: anomaly.feedback.clone(),
                details,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes(value: serde_json::Value) -> Vec<AnomalyNode> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parent_table_tallies_direct_children() {
        let input = nodes(json!([
            {
                "id": 1,
                "startTime": 100,
                "endTime": 200,
                "feedback": { "feedbackType": "ANOMALY" },
                "children": [
                    { "metric": "m1", "children": [ { "metric": "deep" } ] },
                    { "metric": "m2" },
                    { "metric": "m1" },
                    { "properties": { "subEntityName": "e1" } }
                ]
            }
        ]));

        let rows = populate_parent_anomalies_table(&input);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.feedback, Some(json!({ "feedbackType": "ANOMALY" })));
        let details: Vec<(&str, usize)> = row.details.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(details, vec![("m1", 2), ("m2", 1), ("e1", 1)]);
        assert_eq!(row.child_count(), 4);
    }

    #[test]
    fn test_parent_table_skips_childless() {
        let input = nodes(json!([
            { "id": 1, "children": [] },
            { "id": 2, "children": [ { "metric": "m1" } ] }
        ]));
        let rows = populate_parent_anomalies_table(&input);
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_metrics_bucket_wraps_single_table() {
        let bucket = Bucket {
            component_path: "entity-metrics".to_string(),
            title: "Metric Anomalies".to_string(),
            data: vec![MetricRow::from_node(&AnomalyNode { id: 7, ..Default::default() })],
        };
        let tables = parse_metrics_bucket(bucket);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].data[0].id(), 7);
    }

    #[test]
    fn test_entities_bucket_may_yield_empty_table() {
        let childless = AnomalyNode { id: 3, ..Default::default() };
        let mut buckets = IndexMap::new();
        buckets.insert(
            "svc".to_string(),
            Bucket {
                component_path: "parent-anomalies".to_string(),
                title: "svc".to_string(),
                data: vec![&childless],
            },
        );
        let tables = parse_entities_bucket(buckets);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "svc");
        assert!(tables[0].data.is_empty());
    }
}
