use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use msk_discovery::types::PrometheusSdEntry;
use msk_discovery::SdClient;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

/// Rediscover on an interval and overwrite the file_sd output. The first
/// cycle runs immediately on startup so the collector never has to wait a
/// full interval for its first target list.
pub async fn exec(client: SdClient, output: PathBuf, interval: Duration) -> Result<()> {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        debug!(interval = ?interval, "starting discovery cycle");

        let entries = match client.discover_all_regions().await {
            Ok(entries) => entries,
            Err(err) => {
                // Leave the previous file contents in place and wait for
                // the next tick.
                error!(region = %err.region, error = %err, "discovery failed, skipping write");
                continue;
            },
        };

        info!(
            outfile = %output.display(),
            "writing {} discovered exporters to output file",
            entries.len()
        );
        if let Err(err) = write_entries(&output, &entries) {
            error!(error = %err, "failed to write discovery output");
        }
    }
}

pub(crate) fn write_entries(path: &Path, entries: &[PrometheusSdEntry]) -> Result<()> {
    let yaml = serde_yaml::to_string(entries)?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use msk_discovery::types::{PrometheusSdEntry, SdLabels};

    use super::write_entries;

    #[test]
    fn written_file_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msk_file_sd.yml");
        let entries = vec![PrometheusSdEntry {
            targets: vec![
                "b1.example.com:11001".to_string(),
                "b1.example.com:11002".to_string(),
            ],
            labels: SdLabels {
                job: "msk-orders".to_string(),
                cluster_name: "orders".to_string(),
                cluster_arn: "arn:aws:kafka:us-east-1:111111111111:cluster/orders/abc"
                    .to_string(),
            },
        }];

        write_entries(&path, &entries).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<PrometheusSdEntry> = serde_yaml::from_str(&written).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn empty_discovery_still_writes_a_parsable_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msk_file_sd.yml");

        write_entries(&path, &[]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<PrometheusSdEntry> = serde_yaml::from_str(&written).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn overwrites_the_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msk_file_sd.yml");
        std::fs::write(&path, "stale contents").unwrap();

        write_entries(&path, &[]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
    }
}
