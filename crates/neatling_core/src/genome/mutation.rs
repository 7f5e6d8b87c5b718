use super::topology::random_weight;
use super::*;
use crate::config::MutationConfig;
use crate::innovation::InnovationLedger;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// What a single [`Genome::mutate`] pass changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationReport {
    /// Weights nudged by a normal draw.
    pub weights_perturbed: usize,
    /// Weights replaced by a fresh uniform draw.
    pub weights_replaced: usize,
    pub connection_added: Option<EdgeKey>,
    /// The add-connection operator fired but every node was already saturated.
    pub connection_exhausted: bool,
    /// Id of the hidden node inserted by a split.
    pub node_added: Option<NodeId>,
}

impl Genome {
    /// Runs the three operators in order, each gated by its own probability:
    /// weight perturbation, add-connection, add-node.
    pub fn mutate<L: InnovationLedger + ?Sized>(
        &mut self,
        registry: &mut L,
        config: &MutationConfig,
    ) -> Result<MutationReport> {
        let mut rng = rand::thread_rng();
        self.mutate_with_rng(registry, config, &mut rng)
    }

    pub fn mutate_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
        &mut self,
        registry: &mut L,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Result<MutationReport> {
        let mut report = MutationReport::default();

        if rng.gen::<f32>() < config.weight_perturb_prob {
            let (perturbed, replaced) = self.mutate_weights_with_rng(config, rng)?;
            report.weights_perturbed = perturbed;
            report.weights_replaced = replaced;
        }

        if rng.gen::<f32>() < config.add_connection_prob {
            let pool = self.default_first_pool();
            report.connection_added =
                self.add_connection_from(&pool, &config.weight_bounds, registry, rng);
            report.connection_exhausted = report.connection_added.is_none();
        }

        if rng.gen::<f32>() < config.add_node_prob {
            report.node_added = Some(self.mutation_add_node_with_rng(registry, rng)?);
        }

        Ok(report)
    }

    /// Changes every connection weight, disabled ones included.
    ///
    /// Each weight is either redrawn uniformly (probability `new_weight_prob`) or
    /// nudged by a zero-mean normal draw and clamped back into bounds.
    /// Returns `(perturbed, replaced)` counts.
    ///
    /// Fails without touching any weight when the configured standard deviation is
    /// negative or not finite.
    pub fn mutate_weights_with_rng<R: Rng>(
        &mut self,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Result<(usize, usize)> {
        let bounds = config.weight_bounds;
        let std_dev = config.weight_mutation_std_dev();
        let nudge = Normal::new(0.0, std_dev)
            .ok()
            .filter(|_| std_dev.is_finite())
            .ok_or_else(|| {
                NeatError::invariant(format!("invalid weight mutation std dev {std_dev}"))
            })?;
        let mut perturbed = 0;
        let mut replaced = 0;

        for conn in &mut self.connections {
            if rng.gen::<f32>() < config.new_weight_prob {
                conn.weight = random_weight(&bounds, rng);
                replaced += 1;
            } else {
                conn.weight = bounds.clamp(conn.weight + nudge.sample(&mut *rng));
                perturbed += 1;
            }
        }
        Ok((perturbed, replaced))
    }

    /// Connects two previously unconnected nodes, first nodes drawn from inputs, bias,
    /// outputs and hidden nodes.
    ///
    /// Returns `None` when every candidate is already connected to every node it
    /// could reach; that is a normal outcome on dense genomes.
    pub fn mutation_add_connection<L: InnovationLedger + ?Sized>(
        &mut self,
        registry: &mut L,
        bounds: &WeightBounds,
    ) -> Option<EdgeKey> {
        let mut rng = rand::thread_rng();
        self.mutation_add_connection_with_rng(registry, bounds, &mut rng)
    }

    pub fn mutation_add_connection_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
        &mut self,
        registry: &mut L,
        bounds: &WeightBounds,
        rng: &mut R,
    ) -> Option<EdgeKey> {
        let pool = self.default_first_pool();
        self.add_connection_from(&pool, bounds, registry, rng)
    }

    fn default_first_pool(&self) -> Vec<usize> {
        let mut pool = self.inputs.clone();
        pool.push(self.bias);
        pool.extend_from_slice(&self.outputs);
        pool.extend_from_slice(&self.hidden);
        pool
    }

    /// Add-connection search restricted to first nodes in `pool` (arena indices).
    ///
    /// Candidates are shuffled; the first one with an eligible second node wins.
    /// Second nodes come from hidden and output nodes, excluding the candidate itself
    /// and anything it already has an outward connection to, enabled or not.
    pub(super) fn add_connection_from<L: InnovationLedger + ?Sized, R: Rng>(
        &mut self,
        pool: &[usize],
        bounds: &WeightBounds,
        registry: &mut L,
        rng: &mut R,
    ) -> Option<EdgeKey> {
        let mut firsts = pool.to_vec();
        firsts.shuffle(rng);

        let seconds: Vec<usize> = self.hidden.iter().chain(&self.outputs).copied().collect();

        let (from, to) = firsts.into_iter().find_map(|first| {
            let linked: HashSet<usize> = self.nodes[first]
                .outward
                .iter()
                .map(|&c| self.connections[c].node_out)
                .collect();
            let eligible: Vec<usize> = seconds
                .iter()
                .copied()
                .filter(|&second| second != first && !linked.contains(&second))
                .collect();
            eligible.choose(&mut *rng).map(|&second| (first, second))
        })?;

        let weight = random_weight(bounds, rng);
        let idx = self.connect(from, to, weight, registry);
        let conn = &self.connections[idx];
        tracing::debug!(
            edge = %conn.key,
            innovation = ?conn.innovation,
            weight,
            "Connection added"
        );
        Some(conn.key)
    }

    /// Splits a random connection (disabled ones are candidates too): the connection
    /// is disabled, a hidden node is inserted, and two connections replace it.
    /// `in -> new` gets weight 1, `new -> out` inherits the old weight.
    ///
    /// Fails only when the genome has no connection at all.
    pub fn mutation_add_node<L: InnovationLedger + ?Sized>(
        &mut self,
        registry: &mut L,
    ) -> Result<NodeId> {
        let mut rng = rand::thread_rng();
        self.mutation_add_node_with_rng(registry, &mut rng)
    }

    pub fn mutation_add_node_with_rng<L: InnovationLedger + ?Sized, R: Rng>(
        &mut self,
        registry: &mut L,
        rng: &mut R,
    ) -> Result<NodeId> {
        if self.connections.is_empty() {
            return Err(NeatError::NoConnections);
        }

        let split = rng.gen_range(0..self.connections.len());
        Ok(self.split_connection(split, registry))
    }

    /// Splits the connection at arena index `split` and returns the new node id.
    pub(super) fn split_connection<L: InnovationLedger + ?Sized>(
        &mut self,
        split: usize,
        registry: &mut L,
    ) -> NodeId {
        let old = &mut self.connections[split];
        old.enabled = false;
        let (from, to, weight, key) = (old.node_in, old.node_out, old.weight, old.key);

        let floor = self.io_floor();
        let node_index = &self.node_index;
        let id = registry.split_node_id(key, floor, &|id| node_index.contains_key(&id));

        let hidden = self.push_node(id, NodeKind::Hidden);
        self.hidden.push(hidden);
        self.connect(from, hidden, 1.0, registry);
        self.connect(hidden, to, weight, registry);

        tracing::debug!(edge = %key, node = id, "Connection split");
        id
    }
}
