pub mod client;
pub mod error;
pub mod targets;
pub mod types;

use std::future::Future;

use anyhow::{Context, Result};
use tracing::debug;

use crate::client::{ClusterSummary, KafkaApi, KafkaClient};
use crate::error::DiscoveryFailure;
use crate::targets::sd_entry;
use crate::types::{ClusterDetail, PrometheusSdEntry};

/// Discovery settings shared by both drivers. Built once at startup from the
/// parsed arguments and passed down by value, there is no ambient global
/// configuration.
#[derive(Debug, Clone)]
pub struct SdClient {
    pub job_prefix: String,
    pub regions: Vec<String>,
}

impl SdClient {
    pub fn new(job_prefix: impl Into<String>, regions: Vec<String>) -> Self {
        Self {
            job_prefix: job_prefix.into(),
            regions,
        }
    }

    /// Run discovery over every configured region, in order, against the
    /// live AWS API, and concatenate the shaped entries.
    pub async fn discover_all_regions(&self) -> Result<Vec<PrometheusSdEntry>, DiscoveryFailure> {
        self.discover_with(KafkaClient::connect).await
    }

    /// The region loop, generic over how a regional client is produced so
    /// the whole pipeline can be exercised with scripted clients. Regions
    /// are processed strictly sequentially; the first failure (client
    /// construction or enumeration) aborts the run, returning the entries
    /// accumulated from fully completed prior regions inside the error.
    pub async fn discover_with<C, F, Fut>(
        &self,
        connect: F,
    ) -> Result<Vec<PrometheusSdEntry>, DiscoveryFailure>
    where
        C: KafkaApi,
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<C>>,
    {
        let mut entries = Vec::new();

        for region in &self.regions {
            let client = match connect(region.clone()).await {
                Ok(client) => client,
                Err(err) => return Err(DiscoveryFailure::new(region, entries, err)),
            };

            let clusters = match discover_region(&client).await {
                Ok(clusters) => clusters,
                Err(err) => return Err(DiscoveryFailure::new(region, entries, err)),
            };

            debug!(region = %region, clusters = clusters.len(), "enumerated region");
            entries.extend(
                clusters
                    .iter()
                    .filter_map(|cluster| sd_entry(&self.job_prefix, cluster)),
            );
        }

        Ok(entries)
    }
}

/// Enumerate every cluster in one region together with its broker hosts.
/// Pagination is drained fully for both listings; the first failed page
/// call aborts the region and whatever was gathered for it is dropped.
pub async fn discover_region<C: KafkaApi>(client: &C) -> Result<Vec<ClusterDetail>> {
    let clusters = list_all_clusters(client).await?;

    let mut details = Vec::with_capacity(clusters.len());
    for summary in clusters {
        let brokers = list_broker_hosts(client, &summary.arn)
            .await
            .with_context(|| format!("listing nodes for cluster {}", summary.arn))?;

        details.push(ClusterDetail {
            name: summary.name,
            arn: summary.arn,
            brokers,
            jmx_exporter: summary.jmx_exporter,
            node_exporter: summary.node_exporter,
        });
    }

    Ok(details)
}

async fn list_all_clusters<C: KafkaApi>(client: &C) -> Result<Vec<ClusterSummary>> {
    let mut clusters = Vec::new();
    let mut token = None;
    loop {
        let page = client.list_clusters(token).await.context("listing clusters")?;
        clusters.extend(page.clusters);
        token = page.next_token;
        if token.is_none() {
            break;
        }
    }
    Ok(clusters)
}

async fn list_broker_hosts<C: KafkaApi>(client: &C, cluster_arn: &str) -> Result<Vec<String>> {
    let mut brokers = Vec::new();
    let mut token = None;
    loop {
        let page = client.list_nodes(cluster_arn, token).await?;
        brokers.extend(page.brokers);
        token = page.next_token;
        if token.is_none() {
            break;
        }
    }
    Ok(brokers)
}
