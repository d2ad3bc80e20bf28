use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kafka::Client;

/// Summary of one cluster as returned by the regional listing call. The
/// exporter flags come from the cluster's open monitoring configuration;
/// a cluster without one has both exporters disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSummary {
    pub name: String,
    pub arn: String,
    pub jmx_exporter: bool,
    pub node_exporter: bool,
}

/// One page of the cluster listing.
#[derive(Debug, Default)]
pub struct ClusterPage {
    pub clusters: Vec<ClusterSummary>,
    pub next_token: Option<String>,
}

/// One page of the node listing for a single cluster. Brokers are endpoint
/// hosts without ports; a node exposing several endpoints contributes all
/// of them, in listing order.
#[derive(Debug, Default)]
pub struct NodePage {
    pub brokers: Vec<String>,
    pub next_token: Option<String>,
}

/// Narrow capability view over a single region's MSK API. Discovery only
/// ever needs these two paginated listing calls, so tests can drive the
/// whole pipeline with a scripted implementation instead of a live client.
#[async_trait]
pub trait KafkaApi {
    async fn list_clusters(&self, next_token: Option<String>) -> Result<ClusterPage>;
    async fn list_nodes(
        &self,
        cluster_arn: &str,
        next_token: Option<String>,
    ) -> Result<NodePage>;
}

/// Live adapter over the AWS SDK client, bound to one region.
pub struct KafkaClient {
    inner: Client,
}

impl KafkaClient {
    /// Resolve credentials from the default provider chain and bind a
    /// client to the given region.
    pub async fn connect(region: String) -> Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        Ok(Self {
            inner: Client::new(&config),
        })
    }
}

#[async_trait]
impl KafkaApi for KafkaClient {
    async fn list_clusters(&self, next_token: Option<String>) -> Result<ClusterPage> {
        let mut request = self.inner.list_clusters();
        if let Some(token) = next_token {
            request = request.next_token(token);
        }
        let output = request.send().await.context("ListClusters request failed")?;

        let clusters = output
            .cluster_info_list
            .unwrap_or_default()
            .into_iter()
            .map(|info| {
                let prometheus = info
                    .open_monitoring
                    .and_then(|monitoring| monitoring.prometheus);
                let (jmx_exporter, node_exporter) = match prometheus {
                    Some(prometheus) => (
                        prometheus
                            .jmx_exporter
                            .and_then(|exporter| exporter.enabled_in_broker)
                            .unwrap_or(false),
                        prometheus
                            .node_exporter
                            .and_then(|exporter| exporter.enabled_in_broker)
                            .unwrap_or(false),
                    ),
                    None => (false, false),
                };

                ClusterSummary {
                    name: info.cluster_name.unwrap_or_default(),
                    arn: info.cluster_arn.unwrap_or_default(),
                    jmx_exporter,
                    node_exporter,
                }
            })
            .collect();

        Ok(ClusterPage {
            clusters,
            next_token: output.next_token,
        })
    }

    async fn list_nodes(
        &self,
        cluster_arn: &str,
        next_token: Option<String>,
    ) -> Result<NodePage> {
        let mut request = self.inner.list_nodes().cluster_arn(cluster_arn);
        if let Some(token) = next_token {
            request = request.next_token(token);
        }
        let output = request.send().await.context("ListNodes request failed")?;

        let brokers = output
            .node_info_list
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| node.broker_node_info)
            .flat_map(|broker| broker.endpoints.unwrap_or_default())
            .collect();

        Ok(NodePage {
            brokers,
            next_token: output.next_token,
        })
    }
}
