//! A set of genomes evolved under one innovation history.
//!
//! Selection, speciation and crossover live outside this crate; the population only
//! creates, clones, mutates and evaluates its members.

use crate::config::{MutationConfig, NeatConfig};
use crate::error::Result;
use crate::genome::Genome;
use crate::innovation::{InnovationLedger, InnovationRegistry};
use crate::metrics::MutationMetrics;
use neatling_data::WeightBounds;
use rand::Rng;

/// Owned collection of genomes. `Clone` deep-copies every member.
#[derive(Clone, Debug, Default)]
pub struct Population {
    genomes: Vec<Genome>,
}

impl Population {
    pub fn new<L: InnovationLedger + ?Sized>(
        size: usize,
        inputs: usize,
        outputs: usize,
        initial_connections: usize,
        registry: &mut L,
    ) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(size, inputs, outputs, initial_connections, registry, &mut rng)
    }

    pub fn new_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
        size: usize,
        inputs: usize,
        outputs: usize,
        initial_connections: usize,
        registry: &mut L,
        rng: &mut R,
    ) -> Self {
        let genomes = (0..size)
            .map(|_| {
                Genome::new_with_rng(
                    inputs,
                    outputs,
                    initial_connections,
                    &mut *registry,
                    &mut *rng,
                )
            })
            .collect();
        Self { genomes }
    }

    /// Builds `config.population.size` genomes shaped by `config.genome`.
    pub fn from_config<L: InnovationLedger + ?Sized, R: Rng>(
        config: &NeatConfig,
        registry: &mut L,
        rng: &mut R,
    ) -> Self {
        let genomes = (0..config.population.size)
            .map(|_| Genome::from_config(config, &mut *registry, &mut *rng))
            .collect();
        tracing::info!(
            size = config.population.size,
            inputs = config.genome.inputs,
            outputs = config.genome.outputs,
            "Population created"
        );
        Self { genomes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    pub fn genomes_mut(&mut self) -> &mut [Genome] {
        &mut self.genomes
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Genome> {
        self.genomes.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Genome> {
        self.genomes.iter()
    }

    /// Mutates every genome in order against one registry.
    pub fn mutate_all<L: InnovationLedger + ?Sized, R: Rng>(
        &mut self,
        registry: &mut L,
        config: &MutationConfig,
        metrics: &MutationMetrics,
        rng: &mut R,
    ) -> Result<()> {
        for genome in &mut self.genomes {
            let report = genome.mutate_with_rng(registry, config, rng)?;
            metrics.record(&report);
        }
        Ok(())
    }

    /// Mutates every genome on the rayon pool.
    ///
    /// Genome `i` draws from a `ChaCha8Rng` seeded with `seed` on stream `i`, so its
    /// random choices do not depend on scheduling. Innovation numbers stay aligned
    /// across genomes; which edge gets the lower number depends on thread interleaving.
    #[cfg(feature = "parallel")]
    pub fn mutate_all_par(
        &mut self,
        registry: &crate::innovation::SharedInnovationRegistry,
        config: &MutationConfig,
        metrics: &MutationMetrics,
        seed: u64,
    ) -> Result<()> {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;
        use rayon::prelude::*;

        self.genomes
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, genome)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(i as u64);
                let mut ledger = registry.clone();
                let report = genome.mutate_with_rng(&mut ledger, config, &mut rng)?;
                metrics.record(&report);
                Ok(())
            })
    }

    /// Evaluates every genome on the same inputs.
    pub fn think_all(&self, inputs: &[f32]) -> Result<Vec<Vec<f32>>> {
        self.genomes.iter().map(|g| g.think(inputs)).collect()
    }

    /// Audits every genome against `registry`.
    pub fn audit(&self, registry: &InnovationRegistry, bounds: &WeightBounds) -> Result<()> {
        self.genomes
            .iter()
            .try_for_each(|genome| genome.audit(registry, bounds))
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Genome;
    type IntoIter = std::slice::Iter<'a, Genome>;

    fn into_iter(self) -> Self::IntoIter {
        self.genomes.iter()
    }
}
