//! Configuration management for evolutionary runs.
//!
//! Strongly-typed configuration structures that map to a `neat.toml` file.
//! Every field has a default, so a file only needs the values it overrides.
//!
//! ## Example `neat.toml`
//!
//! ```toml
//! [genome]
//! inputs = 3
//! outputs = 1
//! initial_connections = 3
//!
//! [mutation]
//! weight_perturb_prob = 0.8
//! add_node_prob = 0.03
//!
//! [mutation.weight_bounds]
//! lower = -1.0
//! upper = 1.0
//!
//! [population]
//! size = 150
//! seed = 42
//! ```

use neatling_data::WeightBounds;
use serde::{Deserialize, Serialize};

/// Shape of freshly created genomes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenomeConfig {
    pub inputs: usize,
    pub outputs: usize,
    /// Input-to-output connections grown at birth, on top of the bias connections.
    pub initial_connections: usize,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            inputs: 3,
            outputs: 1,
            initial_connections: 1,
        }
    }
}

/// Probabilities and magnitudes driving `Genome::mutate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MutationConfig {
    /// Chance that a mutation pass touches every connection weight.
    pub weight_perturb_prob: f32,
    /// Per-connection chance of drawing a brand new weight instead of nudging it.
    pub new_weight_prob: f32,
    pub add_connection_prob: f32,
    pub add_node_prob: f32,
    pub weight_bounds: WeightBounds,
    /// Fraction of half the weight range used as the nudge standard deviation.
    pub std_dev_multiplier: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            weight_perturb_prob: 0.8,
            new_weight_prob: 0.1,
            add_connection_prob: 0.05,
            add_node_prob: 0.03,
            weight_bounds: WeightBounds::default(),
            std_dev_multiplier: 0.15,
        }
    }
}

impl MutationConfig {
    /// Standard deviation of a slight weight nudge.
    ///
    /// About 68% of nudges move a weight by less than `multiplier` times half the range.
    #[must_use]
    pub fn weight_mutation_std_dev(&self) -> f32 {
        self.weight_bounds.span() / 2.0 * self.std_dev_multiplier
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 150,
            seed: None,
        }
    }
}

/// Top-level configuration of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct NeatConfig {
    pub genome: GenomeConfig,
    pub mutation: MutationConfig,
    pub population: PopulationConfig,
}

fn is_probability(p: f32) -> bool {
    (0.0..=1.0).contains(&p)
}

impl NeatConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Genome validation
        anyhow::ensure!(self.genome.inputs > 0, "Genome needs at least one input");
        anyhow::ensure!(self.genome.outputs > 0, "Genome needs at least one output");

        // Mutation validation
        let m = &self.mutation;
        anyhow::ensure!(
            is_probability(m.weight_perturb_prob),
            "Weight perturbation probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(m.new_weight_prob),
            "New weight probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(m.add_connection_prob),
            "Add-connection probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(m.add_node_prob),
            "Add-node probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            m.weight_bounds.lower.is_finite() && m.weight_bounds.upper.is_finite(),
            "Weight bounds must be finite"
        );
        anyhow::ensure!(
            m.weight_bounds.lower < m.weight_bounds.upper,
            "Weight lower bound must be below upper bound"
        );
        anyhow::ensure!(
            m.weight_bounds.contains(1.0),
            "Weight bounds must contain 1.0, the weight given to the incoming half of a split connection"
        );
        anyhow::ensure!(
            m.std_dev_multiplier >= 0.0 && m.std_dev_multiplier.is_finite(),
            "Standard deviation multiplier must be non-negative"
        );

        // Population validation
        anyhow::ensure!(self.population.size > 0, "Population size must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of every setting, for tagging run output.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.genome).as_bytes());
        hasher.update(format!("{:?}", self.mutation).as_bytes());
        hasher.update(format!("{:?}", self.population).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = NeatConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_std_dev() {
        let config = MutationConfig::default();
        assert!((config.weight_mutation_std_dev() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_probability() {
        let mut config = NeatConfig::default();
        config.mutation.add_node_prob = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Add-node"));
    }

    #[test]
    fn test_inverted_bounds() {
        let mut config = NeatConfig::default();
        config.mutation.weight_bounds = WeightBounds::new(1.0, -1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds_excluding_split_weight() {
        let mut config = NeatConfig::default();
        config.mutation.weight_bounds = WeightBounds::new(-0.5, 0.5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("split"));

        config.mutation.weight_bounds = WeightBounds::new(-2.0, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_population() {
        let mut config = NeatConfig::default();
        config.population.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = NeatConfig::from_toml(
            r#"
            [genome]
            inputs = 2
            outputs = 2

            [mutation]
            add_node_prob = 0.2

            [population]
            size = 10
            seed = 7
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.genome.inputs, 2);
        assert_eq!(config.genome.initial_connections, 1);
        assert_eq!(config.mutation.add_node_prob, 0.2);
        assert_eq!(config.mutation.new_weight_prob, 0.1);
        assert_eq!(config.population.seed, Some(7));
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let result = NeatConfig::from_toml("[mutation]\nnew_weight_prob = -0.5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = NeatConfig::default();
        let mut b = NeatConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.mutation.std_dev_multiplier = 0.3;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
