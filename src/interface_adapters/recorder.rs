// Lock-free per-action counters shared by every session.

use crate::domain::{Action, InteractionRecorder, InteractionSample};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Default)]
struct ActionCounters {
    successes: AtomicU64,
    failures: AtomicU64,
    latency_micros: AtomicU64,
}

/// Totals for one action at the time of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSummary {
    pub action: Action,
    pub successes: u64,
    pub failures: u64,
    pub mean_latency: Duration,
}

impl ActionSummary {
    pub fn total(&self) -> u64 {
        self.successes + self.failures
    }
}

#[derive(Clone, Default)]
pub struct InteractionTally {
    counters: Arc<[ActionCounters; Action::COUNT]>,
}

impl InteractionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions with at least one recorded interaction.
    pub fn snapshot(&self) -> Vec<ActionSummary> {
        Action::ALL
            .iter()
            .filter_map(|&action| {
                let counters = &self.counters[action.index()];
                let successes = counters.successes.load(Ordering::Relaxed);
                let failures = counters.failures.load(Ordering::Relaxed);
                let total = successes + failures;
                if total == 0 {
                    return None;
                }
                let latency_micros = counters.latency_micros.load(Ordering::Relaxed);
                Some(ActionSummary {
                    action,
                    successes,
                    failures,
                    mean_latency: Duration::from_micros(latency_micros / total),
                })
            })
            .collect()
    }

    pub fn log_summary(&self) {
        for summary in self.snapshot() {
            tracing::info!(
                request = summary.action.request_name(),
                total = summary.total(),
                failures = summary.failures,
                mean_latency_ms = summary.mean_latency.as_millis() as u64,
                "interaction summary"
            );
        }
    }
}

impl InteractionRecorder for InteractionTally {
    fn record(&self, sample: InteractionSample) {
        let counters = &self.counters[sample.action.index()];
        if sample.outcome.is_success() {
            counters.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            counters.failures.fetch_add(1, Ordering::Relaxed);
        }
        let micros = u64::try_from(sample.latency.as_micros()).unwrap_or(u64::MAX);
        counters.latency_micros.fetch_add(micros, Ordering::Relaxed);
    }
}
