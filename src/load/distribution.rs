//! Per-host response counts

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Thread-safe tally of responses per host identifier
#[derive(Debug, Default)]
pub struct HostDistribution {
    counts: Mutex<HashMap<String, u64>>,
}

impl HostDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one response from `host`
    pub fn record(&self, host: &str) {
        let mut counts = self.lock();
        match counts.get_mut(host) {
            Some(count) => *count += 1,
            None => {
                counts.insert(host.to_string(), 1);
            }
        }
    }

    /// Counts sorted by descending count, then host
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .lock()
            .iter()
            .map(|(host, count)| (host.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    // A worker that panicked mid-increment cannot leave the map torn, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        match self.counts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Host distribution lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
