use crate::types::{ClusterDetail, PrometheusSdEntry, SdLabels};

/// Ports the MSK open monitoring exporters listen on. Fixed by the managed
/// service, not configurable.
pub const JMX_EXPORTER_PORT: u16 = 11001;
pub const NODE_EXPORTER_PORT: u16 = 11002;

/// Shape one cluster into a target group entry. Brokers are walked in their
/// enumerated order; each contributes its JMX target and then its node
/// exporter target, for whichever of the two is enabled. A cluster where
/// neither exporter is enabled contributes nothing to the feed.
pub fn sd_entry(job_prefix: &str, cluster: &ClusterDetail) -> Option<PrometheusSdEntry> {
    let mut targets = Vec::new();
    for broker in &cluster.brokers {
        if cluster.jmx_exporter {
            targets.push(format!("{broker}:{JMX_EXPORTER_PORT}"));
        }
        if cluster.node_exporter {
            targets.push(format!("{broker}:{NODE_EXPORTER_PORT}"));
        }
    }

    if targets.is_empty() {
        return None;
    }

    Some(PrometheusSdEntry {
        targets,
        labels: SdLabels {
            job: format!("{job_prefix}-{}", cluster.name),
            cluster_name: cluster.name.clone(),
            cluster_arn: cluster.arn.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(brokers: &[&str], jmx: bool, node: bool) -> ClusterDetail {
        ClusterDetail {
            name: "orders".to_string(),
            arn: "arn:aws:kafka:us-east-1:111111111111:cluster/orders/abc".to_string(),
            brokers: brokers.iter().map(|broker| broker.to_string()).collect(),
            jmx_exporter: jmx,
            node_exporter: node,
        }
    }

    #[test]
    fn no_exporters_means_no_entry() {
        assert_eq!(sd_entry("msk", &cluster(&["b1", "b2", "b3"], false, false)), None);
    }

    #[test]
    fn no_brokers_means_no_entry() {
        assert_eq!(sd_entry("msk", &cluster(&[], true, true)), None);
    }

    #[test]
    fn jmx_only_yields_one_target_per_broker() {
        let entry = sd_entry("msk", &cluster(&["b1.example.com", "b2.example.com"], true, false))
            .unwrap();
        assert_eq!(
            entry.targets,
            vec!["b1.example.com:11001", "b2.example.com:11001"]
        );
    }

    #[test]
    fn node_only_yields_one_target_per_broker() {
        let entry = sd_entry("msk", &cluster(&["b1.example.com"], false, true)).unwrap();
        assert_eq!(entry.targets, vec!["b1.example.com:11002"]);
    }

    #[test]
    fn both_exporters_interleave_in_broker_order() {
        let entry = sd_entry("msk", &cluster(&["b1.example.com", "b2.example.com"], true, true))
            .unwrap();
        assert_eq!(
            entry.targets,
            vec![
                "b1.example.com:11001",
                "b1.example.com:11002",
                "b2.example.com:11001",
                "b2.example.com:11002",
            ]
        );
        assert_eq!(entry.labels.job, "msk-orders");
        assert_eq!(entry.labels.cluster_name, "orders");
        assert_eq!(
            entry.labels.cluster_arn,
            "arn:aws:kafka:us-east-1:111111111111:cluster/orders/abc"
        );
    }

    #[test]
    fn job_label_joins_prefix_and_name_with_a_hyphen() {
        let mut detail = cluster(&["b1"], true, false);
        detail.name = "orders-prod-eu".to_string();
        let entry = sd_entry("my-prefix", &detail).unwrap();
        assert_eq!(entry.labels.job, "my-prefix-orders-prod-eu");
    }

    #[test]
    fn serializes_to_the_file_sd_wire_shape() {
        let entries = vec![sd_entry("msk", &cluster(&["b1.example.com"], true, true)).unwrap()];
        let yaml = serde_yaml::to_string(&entries).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value[0]["targets"][0], "b1.example.com:11001");
        assert_eq!(value[0]["targets"][1], "b1.example.com:11002");
        assert_eq!(value[0]["labels"]["job"], "msk-orders");
        assert_eq!(value[0]["labels"]["cluster_name"], "orders");
        assert_eq!(
            value[0]["labels"]["cluster_arn"],
            "arn:aws:kafka:us-east-1:111111111111:cluster/orders/abc"
        );
    }
}
