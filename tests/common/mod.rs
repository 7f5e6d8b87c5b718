use neatling_lib::{Genome, InnovationRegistry, MutationConfig, NodeId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[allow(dead_code)]
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Builds a genome and applies `rounds` mutation passes with `config`.
#[allow(dead_code)]
pub fn evolved_genome(
    inputs: usize,
    outputs: usize,
    initial: usize,
    rounds: usize,
    config: &MutationConfig,
    registry: &mut InnovationRegistry,
    seed: u64,
) -> Genome {
    let mut rng = seeded(seed);
    let mut genome = Genome::new_with_rng(inputs, outputs, initial, registry, &mut rng);
    for _ in 0..rounds {
        genome
            .mutate_with_rng(registry, config, &mut rng)
            .expect("genome keeps its bias connections");
    }
    genome
}

/// Mutation settings that grow structure quickly.
#[allow(dead_code)]
pub fn aggressive_config() -> MutationConfig {
    MutationConfig {
        weight_perturb_prob: 1.0,
        add_connection_prob: 0.6,
        add_node_prob: 0.4,
        ..MutationConfig::default()
    }
}

/// Ids of every hidden node, in creation order.
#[allow(dead_code)]
pub fn hidden(genome: &Genome) -> Vec<NodeId> {
    genome.hidden_ids().collect()
}
