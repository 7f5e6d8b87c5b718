//! One evolutionary run: configuration, innovation history, population and counters.

use anyhow::Context;
use neatling_core::{MutationMetrics, NeatConfig, Population, SharedInnovationRegistry};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// Reads and validates a TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<NeatConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    NeatConfig::from_toml(&content)
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Owns everything that must be shared by the genomes of one run.
///
/// The registry is created empty with the run and handed to every mutation, so
/// structurally identical mutations in different genomes line up.
pub struct Run {
    config: NeatConfig,
    registry: SharedInnovationRegistry,
    population: Population,
    metrics: MutationMetrics,
    rng: ChaCha8Rng,
    generation: u64,
}

impl Run {
    /// Validates `config` and creates the initial population.
    ///
    /// With `population.seed` set, the run is reproducible: every genome's shape and
    /// weights always, innovation numbers and hidden node ids only when mutation runs
    /// sequentially (without the `parallel` feature).
    pub fn new(config: NeatConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = match config.population.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut registry = SharedInnovationRegistry::new();
        let population = Population::from_config(&config, &mut registry, &mut rng);

        Ok(Self {
            config,
            registry,
            population,
            metrics: MutationMetrics::new(),
            rng,
            generation: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &NeatConfig {
        &self.config
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    #[must_use]
    pub fn registry(&self) -> &SharedInnovationRegistry {
        &self.registry
    }

    #[must_use]
    pub fn metrics(&self) -> &MutationMetrics {
        &self.metrics
    }

    /// Mutates every genome once.
    pub fn advance(&mut self) -> anyhow::Result<()> {
        #[cfg(feature = "parallel")]
        {
            let seed = self.rng.gen();
            self.population.mutate_all_par(
                &self.registry,
                &self.config.mutation,
                &self.metrics,
                seed,
            )?;
        }
        #[cfg(not(feature = "parallel"))]
        {
            let mut ledger = self.registry.clone();
            self.population.mutate_all(
                &mut ledger,
                &self.config.mutation,
                &self.metrics,
                &mut self.rng,
            )?;
        }

        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            innovations = self.registry.snapshot().len(),
            "Generation mutated"
        );
        Ok(())
    }

    /// Checks every genome's invariants against the run's registry.
    pub fn audit(&self) -> anyhow::Result<()> {
        let registry = self.registry.snapshot();
        self.population
            .audit(&registry, &self.config.mutation.weight_bounds)
            .with_context(|| format!("Audit failed at generation {}", self.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config() -> NeatConfig {
        let mut config = NeatConfig::default();
        config.population.size = 12;
        config.population.seed = Some(42);
        config.mutation.add_connection_prob = 0.3;
        config.mutation.add_node_prob = 0.2;
        config
    }

    #[test]
    fn test_run_advances_and_audits() {
        let mut run = Run::new(seeded_config()).expect("valid config");
        for _ in 0..10 {
            run.advance().expect("mutation");
        }

        assert_eq!(run.generation(), 10);
        assert_eq!(run.metrics().totals().genomes_mutated, 120);
        assert!(run.audit().is_ok());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let mut config = seeded_config();
        config.population.size = 0;
        assert!(Run::new(config).is_err());
    }

    #[test]
    fn test_run_rejects_bounds_without_split_weight() {
        let mut config = seeded_config();
        config.mutation.weight_bounds = neatling_core::WeightBounds::new(-0.5, 0.5);
        config.mutation.add_node_prob = 1.0;
        assert!(Run::new(config).is_err());
    }

    #[test]
    fn test_split_heavy_run_passes_audit() {
        let mut config = seeded_config();
        config.mutation.weight_bounds = neatling_core::WeightBounds::new(-0.5, 1.0);
        config.mutation.add_node_prob = 1.0;
        let mut run = Run::new(config).expect("valid config");
        for _ in 0..3 {
            run.advance().expect("mutation");
        }
        assert!(run.audit().is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/neat.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_load_config_from_disk() {
        let path = std::env::temp_dir().join(format!("neatling-{}.toml", std::process::id()));
        std::fs::write(&path, "[population]\nsize = 3\nseed = 1\n").expect("write config");

        let config = load_config(&path).expect("config should load");
        std::fs::remove_file(&path).ok();
        assert_eq!(config.population.size, 3);
        assert_eq!(config.population.seed, Some(1));
    }
}
