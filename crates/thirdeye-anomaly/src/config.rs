//! Configuration for the anomaly tree classifier

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thirdeye_core::TreeError;

// Main config structure
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    // substring of detectorComponentName that marks a summarize grouper
    #[serde(default = "default_summarize_marker")]
    pub summarize_marker: String,

    // breadcrumb title of the root view
    #[serde(default = "default_root_title")]
    pub root_title: String,

    // how a forest is searched for a drill-down target
    #[serde(default)]
    pub forest_search: ForestSearch,

    #[serde(default)]
    pub breadcrumb: BreadcrumbZone,

    #[serde(default)]
    pub classifications: Classifications,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            summarize_marker: default_summarize_marker(),
            root_title: default_root_title(),
            forest_search: ForestSearch::default(),
            breadcrumb: BreadcrumbZone::default(),
            classifications: Classifications::default(),
        }
    }
}

// Buckets a child anomaly can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
    Metrics,
    Groups,
    Entities,
}

impl ClassificationKind {
    pub fn key(&self) -> &'static str {
        match self {
            ClassificationKind::Metrics => "metrics",
            ClassificationKind::Groups => "groups",
            ClassificationKind::Entities => "entities",
        }
    }
}

// component routing key and fallback title for one kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub component_path: String,
    pub default_title: String,
}

impl Classification {
    fn new(component_path: &str, default_title: &str) -> Self {
        Self {
            component_path: component_path.to_string(),
            default_title: default_title.to_string(),
        }
    }
}

// immutable table of classifications keyed by kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classifications {
    #[serde(default = "default_metrics")]
    pub metrics: Classification,

    #[serde(default = "default_groups")]
    pub groups: Classification,

    #[serde(default = "default_entities")]
    pub entities: Classification,
}

impl Classifications {
    pub fn get(&self, kind: ClassificationKind) -> &Classification {
        match kind {
            ClassificationKind::Metrics => &self.metrics,
            ClassificationKind::Groups => &self.groups,
            ClassificationKind::Entities => &self.entities,
        }
    }
}

impl Default for Classifications {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            groups: default_groups(),
            entities: default_entities(),
        }
    }
}

// Search policy when the input holds several root trees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestSearch {
    // stop at the first root containing the id
    #[default]
    FirstMatch,
    // search every root and keep only the last root's result
    LastRoot,
}

// Time zone used to render breadcrumb timestamps
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BreadcrumbZone {
    Fixed {
        offset_minutes: i32,
        abbreviation: String,
    },
    // IANA zone name, e.g. "America/New_York"
    Named {
        zone: String,
    },
    // zone guessed from TZ or the host configuration
    Local {
        local: bool,
    },
}

impl Default for BreadcrumbZone {
    fn default() -> Self {
        BreadcrumbZone::Local { local: true }
    }
}

impl BreadcrumbZone {
    pub fn utc() -> Self {
        BreadcrumbZone::Fixed {
            offset_minutes: 0,
            abbreviation: "UTC".to_string(),
        }
    }
}

// default value helpers for serde
fn default_summarize_marker() -> String {
    "ANOMALY_SUMMARIZE".to_string()
}

fn default_root_title() -> String {
    "Alert Anomalies".to_string()
}

fn default_metrics() -> Classification {
    Classification::new("entity-metrics", "Metric Anomalies")
}

fn default_groups() -> Classification {
    Classification::new("entity-groups", "ENTITY:")
}

fn default_entities() -> Classification {
    Classification::new("parent-anomalies", "Entity")
}

// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClassifierConfig, TreeError> {
    let content = fs::read_to_string(path)?;
    let config: ClassifierConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ClassifierConfig = toml::from_str("").unwrap();
        assert_eq!(config.summarize_marker, "ANOMALY_SUMMARIZE");
        assert_eq!(config.root_title, "Alert Anomalies");
        assert_eq!(config.forest_search, ForestSearch::FirstMatch);
        assert_eq!(config.breadcrumb, BreadcrumbZone::Local { local: true });
        assert_eq!(config.classifications, Classifications::default());
    }

    #[test]
    fn test_load_config() {
        let toml_content = r#"
summarize_marker = "GROUPER"
forest_search = "last_root"

[breadcrumb]
offset_minutes = -300
abbreviation = "EST"

[classifications.entities]
component_path = "parent-anomalies"
default_title = "Service"
"#;
        let config: ClassifierConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.summarize_marker, "GROUPER");
        assert_eq!(config.forest_search, ForestSearch::LastRoot);
        assert_eq!(
            config.breadcrumb,
            BreadcrumbZone::Fixed {
                offset_minutes: -300,
                abbreviation: "EST".to_string()
            }
        );
        let entities = config.classifications.get(ClassificationKind::Entities);
        assert_eq!(entities.default_title, "Service");
        // untouched kinds keep their defaults
        let metrics = config.classifications.get(ClassificationKind::Metrics);
        assert_eq!(metrics.component_path, "entity-metrics");
    }

    #[test]
    fn test_named_zone() {
        let config: ClassifierConfig = toml::from_str(
            r#"
[breadcrumb]
zone = "America/New_York"
"#,
        )
        .unwrap();
        assert_eq!(
            config.breadcrumb,
            BreadcrumbZone::Named {
                zone: "America/New_York".to_string()
            }
        );
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(ClassificationKind::Metrics.key(), "metrics");
        assert_eq!(ClassificationKind::Groups.key(), "groups");
        assert_eq!(ClassificationKind::Entities.key(), "entities");
    }
}
