//! # Neatling
//!
//! Facade over the neatling workspace: genome data records, the mutation and
//! evaluation engines, and a small [`run::Run`] holder that keeps one innovation
//! history, one population and its mutation counters together.

pub mod run;

pub use neatling_core::{
    config, error, genome, innovation, init_logging, metrics, population, sigmoid, Activations,
    Connection, ConnectionRecord, EdgeKey, Genome, GenomeConfig, GenomeSnapshot, Innovation,
    InnovationLedger, InnovationRegistry, MutationConfig, MutationMetrics, MutationReport,
    MutationTotals, NeatConfig, NeatError, Node, NodeId, NodeKind, NodeRecord, Population,
    PopulationConfig, SharedInnovationRegistry, WeightBounds,
};
pub use run::{load_config, Run};
