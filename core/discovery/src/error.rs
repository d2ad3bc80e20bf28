use std::error::Error;

use crate::types::PrometheusSdEntry;

/// Discovery aborted while processing a region. Entries gathered from the
/// regions that fully completed before the failure are carried along so the
/// caller can decide whether the partial output is still usable. Results
/// from the failing region itself are discarded.
#[derive(Debug, thiserror::Error)]
#[error("discovery failed in region {region}")]
pub struct DiscoveryFailure {
    pub region: String,
    pub completed: Vec<PrometheusSdEntry>,
    #[source]
    pub source: Box<dyn Error + Send + Sync + 'static>,
}

impl DiscoveryFailure {
    pub(crate) fn new(
        region: &str,
        completed: Vec<PrometheusSdEntry>,
        source: anyhow::Error,
    ) -> Self {
        Self {
            region: region.to_string(),
            completed,
            source: source.into(),
        }
    }
}
