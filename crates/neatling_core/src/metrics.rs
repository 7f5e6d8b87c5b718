//! Mutation statistics and logging setup.
//!
//! Counters are atomic so that parallel population mutation can record into one
//! collector from every worker thread.

use crate::genome::MutationReport;
use std::sync::atomic::{AtomicU64, Ordering};

/// Plain copy of the counters at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationTotals {
    pub genomes_mutated: u64,
    pub weights_perturbed: u64,
    pub weights_replaced: u64,
    pub connections_added: u64,
    pub connections_exhausted: u64,
    pub nodes_added: u64,
}

/// Run-wide mutation counters.
#[derive(Debug, Default)]
pub struct MutationMetrics {
    genomes_mutated: AtomicU64,
    weights_perturbed: AtomicU64,
    weights_replaced: AtomicU64,
    connections_added: AtomicU64,
    connections_exhausted: AtomicU64,
    nodes_added: AtomicU64,
}

impl MutationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one genome's mutation report to the totals.
    pub fn record(&self, report: &MutationReport) {
        self.genomes_mutated.fetch_add(1, Ordering::Relaxed);
        self.weights_perturbed
            .fetch_add(report.weights_perturbed as u64, Ordering::Relaxed);
        self.weights_replaced
            .fetch_add(report.weights_replaced as u64, Ordering::Relaxed);
        if report.connection_added.is_some() {
            self.connections_added.fetch_add(1, Ordering::Relaxed);
        }
        if report.connection_exhausted {
            self.connections_exhausted.fetch_add(1, Ordering::Relaxed);
        }
        if report.node_added.is_some() {
            self.nodes_added.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn totals(&self) -> MutationTotals {
        MutationTotals {
            genomes_mutated: self.genomes_mutated.load(Ordering::Relaxed),
            weights_perturbed: self.weights_perturbed.load(Ordering::Relaxed),
            weights_replaced: self.weights_replaced.load(Ordering::Relaxed),
            connections_added: self.connections_added.load(Ordering::Relaxed),
            connections_exhausted: self.connections_exhausted.load(Ordering::Relaxed),
            nodes_added: self.nodes_added.load(Ordering::Relaxed),
        }
    }

    /// Logs the current totals at info level.
    pub fn log_summary(&self) {
        let t = self.totals();
        tracing::info!(
            genomes = t.genomes_mutated,
            weights_perturbed = t.weights_perturbed,
            weights_replaced = t.weights_replaced,
            connections_added = t.connections_added,
            connections_exhausted = t.connections_exhausted,
            nodes_added = t.nodes_added,
            "Mutation summary"
        );
    }
}

/// Initialize tracing subscriber for logging, honoring `RUST_LOG` when set.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
