//! ThirdEye anomaly tree classification & drill-down views

pub mod config;
pub mod search;
pub mod buckets;
pub mod tables;
pub mod breadcrumb;
pub mod drilldown;

pub use config::{ClassifierConfig, ForestSearch, BreadcrumbZone, load_config};
pub use search::{find_anomaly, find_in_tree};
pub use buckets::{Bucket, Buckets, NodeKind, generate_buckets};
pub use breadcrumb::format_breadcrumb_time;
pub use drilldown::{AnomalyTreeClassifier, parse_root, parse_subtree};
