//! # Neatling Core
//!
//! Topology-evolving neural networks in the NEAT style.
//!
//! This crate contains:
//! - Arena-backed genomes (sensor, hidden and output nodes joined by weighted connections)
//! - The mutation engine (weight perturbation, add-connection, add-node)
//! - The run-wide innovation registry that aligns structural history across genomes
//! - Priority-scheduled evaluation over graphs that may contain cycles
//! - A thin population wrapper with sequential and rayon-parallel mutation
//!
//! ## Example
//!
//! ```
//! use neatling_core::{Genome, InnovationRegistry, MutationConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut registry = InnovationRegistry::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut genome = Genome::new_with_rng(3, 1, 3, &mut registry, &mut rng);
//!
//! genome
//!     .mutate_with_rng(&mut registry, &MutationConfig::default(), &mut rng)
//!     .unwrap();
//! let outputs = genome.think(&[0.1, 0.1, 0.1]).unwrap();
//! assert!(outputs[0] > 0.0 && outputs[0] < 1.0);
//! ```

/// Run configuration loaded from TOML
pub mod config;
/// Error taxonomy for genome operations
pub mod error;
/// Genome graph, mutation engine and evaluation engine
pub mod genome;
/// Run-wide innovation history
pub mod innovation;
/// Mutation counters and logging setup
pub mod metrics;
/// Collections of genomes sharing one registry
pub mod population;

pub use config::{GenomeConfig, MutationConfig, NeatConfig, PopulationConfig};
pub use error::{NeatError, Result};
pub use genome::{sigmoid, Connection, Genome, MutationReport, Node};
pub use innovation::{InnovationLedger, InnovationRegistry, SharedInnovationRegistry};
pub use metrics::{init_logging, MutationMetrics, MutationTotals};
pub use neatling_data::{
    Activations, ConnectionRecord, EdgeKey, GenomeSnapshot, Innovation, NodeId, NodeKind,
    NodeRecord, WeightBounds,
};
pub use population::Population;
