use super::*;
use crate::config::NeatConfig;
use crate::innovation::InnovationLedger;
use rand::Rng;

/// Uniform draw from the closed weight interval.
pub fn random_weight<R: Rng>(bounds: &WeightBounds, rng: &mut R) -> f32 {
    rng.gen_range(bounds.lower..=bounds.upper)
}

/// Builds a minimal genome: `inputs` sensors, one bias sensor, `outputs` output nodes,
/// a bias connection to every output, then up to `initial_connections` input-to-output
/// connections grown by the add-connection search.
///
/// Growth is best effort: when no input has an unconnected output left, the genome is
/// returned with fewer connections than requested.
pub fn create_genome_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
    inputs: usize,
    outputs: usize,
    initial_connections: usize,
    bounds: &WeightBounds,
    registry: &mut L,
    rng: &mut R,
) -> Genome {
    let mut genome = Genome::empty();

    for id in 0..inputs {
        let idx = genome.push_node(id, NodeKind::Sensor);
        genome.inputs.push(idx);
    }
    genome.bias = genome.push_node(inputs, NodeKind::Sensor);
    for offset in 0..outputs {
        let idx = genome.push_node(inputs + 1 + offset, NodeKind::Output);
        genome.outputs.push(idx);
    }

    for out in genome.outputs.clone() {
        let weight = random_weight(bounds, rng);
        genome.connect(genome.bias, out, weight, registry);
    }

    let pool = genome.inputs.clone();
    for grown in 0..initial_connections {
        if genome
            .add_connection_from(&pool, bounds, registry, rng)
            .is_none()
        {
            tracing::warn!(
                requested = initial_connections,
                grown,
                "Input-to-output connections exhausted during genome creation"
            );
            break;
        }
    }

    genome
}

impl Genome {
    /// Creates a genome with the default weight bounds, drawing randomness from the
    /// thread-local generator.
    pub fn new<L: InnovationLedger + ?Sized>(
        inputs: usize,
        outputs: usize,
        initial_connections: usize,
        registry: &mut L,
    ) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(inputs, outputs, initial_connections, registry, &mut rng)
    }

    pub fn new_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
        inputs: usize,
        outputs: usize,
        initial_connections: usize,
        registry: &mut L,
        rng: &mut R,
    ) -> Self {
        create_genome_with_rng(
            inputs,
            outputs,
            initial_connections,
            &WeightBounds::default(),
            registry,
            rng,
        )
    }

    /// Creates a genome shaped by `config.genome`, weights drawn within
    /// `config.mutation.weight_bounds`.
    pub fn from_config<L: InnovationLedger + ?Sized, R: Rng>(
        config: &NeatConfig,
        registry: &mut L,
        rng: &mut R,
    ) -> Self {
        create_genome_with_rng(
            config.genome.inputs,
            config.genome.outputs,
            config.genome.initial_connections,
            &config.mutation.weight_bounds,
            registry,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::innovation::InnovationRegistry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_bias_connects_every_output() {
        let mut registry = InnovationRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let genome = Genome::new_with_rng(2, 3, 0, &mut registry, &mut rng);

        assert_eq!(genome.connections().len(), 3);
        for out in genome.output_ids() {
            let conn = genome
                .connection(EdgeKey::new(genome.bias_id(), out))
                .expect("bias connection");
            assert!(conn.enabled());
            assert!(WeightBounds::default().contains(conn.weight()));
        }
    }

    #[test]
    fn test_initial_connections_come_from_inputs() {
        let mut registry = InnovationRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let genome = Genome::new_with_rng(4, 2, 5, &mut registry, &mut rng);

        assert_eq!(genome.connections().len(), 2 + 5);
        let inputs: Vec<NodeId> = genome.input_ids().collect();
        for conn in &genome.connections()[2..] {
            assert!(inputs.contains(&conn.key().from));
            assert_eq!(genome.node(conn.key().to).map(Node::kind), Some(NodeKind::Output));
        }
    }

    #[test]
    fn test_initial_connections_best_effort() {
        let mut registry = InnovationRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let genome = Genome::new_with_rng(2, 1, 10, &mut registry, &mut rng);

        // one bias connection plus every input-to-output pair
        assert_eq!(genome.connections().len(), 3);
    }

    #[test]
    fn test_from_config_uses_bounds() {
        let mut config = NeatConfig::default();
        config.genome.inputs = 5;
        config.genome.outputs = 3;
        config.genome.initial_connections = 15;
        config.mutation.weight_bounds = WeightBounds::new(0.0, 0.25);

        let mut registry = InnovationRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let genome = Genome::from_config(&config, &mut registry, &mut rng);

        assert_eq!(genome.connections().len(), 3 + 15);
        assert!(genome
            .connections()
            .iter()
            .all(|c| (0.0..=0.25).contains(&c.weight())));
    }

    #[test]
    fn test_shared_registry_aligns_births() {
        let mut registry = InnovationRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = Genome::new_with_rng(3, 1, 0, &mut registry, &mut rng);
        let b = Genome::new_with_rng(3, 1, 0, &mut registry, &mut rng);

        assert_eq!(
            a.connections()[0].innovation(),
            b.connections()[0].innovation()
        );
        assert_eq!(registry.len(), 1);
    }
}
