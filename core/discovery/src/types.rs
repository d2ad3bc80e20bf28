use serde::{Deserialize, Serialize};

/// Everything discovery learns about one MSK cluster before shaping:
/// identity, the broker endpoint hosts in listing order, and the two
/// broker-level open monitoring toggles. Rebuilt from scratch on every
/// discovery cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDetail {
    pub name: String,
    pub arn: String,
    pub brokers: Vec<String>,
    pub jmx_exporter: bool,
    pub node_exporter: bool,
}

/// One static config entry in the Prometheus file_sd/http_sd format.
/// Targets are expected to provide a `/metrics` endpoint. The serialized
/// field names and nesting are part of the scrape contract and must not
/// change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrometheusSdEntry {
    pub targets: Vec<String>,
    pub labels: SdLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdLabels {
    pub job: String,
    pub cluster_name: String,
    pub cluster_arn: String,
}
