//! Graph-structured genomes and the engines that grow and evaluate them.
//!
//! A genome owns two arenas: nodes and connections. Connections refer to their
//! endpoints by node arena index, and every node keeps the arena indices of the
//! connections it feeds (`outward`) and is fed by (`inward`). Those adjacency lists
//! are only ever written by [`Genome::connect`], so they always agree with the
//! connection arena.

pub mod forward;
pub mod mutation;
pub mod schedule;
pub mod topology;

use crate::error::{NeatError, Result};
use crate::innovation::InnovationRegistry;
use neatling_data::{
    ConnectionRecord, EdgeKey, GenomeSnapshot, Innovation, NodeId, NodeKind, NodeRecord,
    WeightBounds,
};
use std::collections::{HashMap, HashSet};

pub use forward::sigmoid;
pub use mutation::MutationReport;
pub use schedule::ActivationQueue;

/// A vertex of the genome graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    outward: Vec<usize>,
    inward: Vec<usize>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            outward: Vec::new(),
            inward: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Arena indices of connections leaving this node.
    #[must_use]
    pub fn outward(&self) -> &[usize] {
        &self.outward
    }

    /// Arena indices of connections entering this node.
    #[must_use]
    pub fn inward(&self) -> &[usize] {
        &self.inward
    }
}

/// A directed, weighted edge between two nodes of the same genome.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    node_in: usize,
    node_out: usize,
    key: EdgeKey,
    weight: f32,
    enabled: bool,
    innovation: Option<Innovation>,
}

impl Connection {
    /// Endpoint ids; the structural identity of this connection.
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    /// Arena index of the input endpoint.
    #[must_use]
    pub fn node_in(&self) -> usize {
        self.node_in
    }

    /// Arena index of the output endpoint.
    #[must_use]
    pub fn node_out(&self) -> usize {
        self.node_out
    }

    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn innovation(&self) -> Option<Innovation> {
        self.innovation
    }

    fn record(&self) -> ConnectionRecord {
        ConnectionRecord {
            from: self.key.from,
            to: self.key.to,
            weight: self.weight,
            enabled: self.enabled,
            innovation: self.innovation,
        }
    }
}

/// One evolvable network: sensors (inputs plus a bias), outputs, hidden nodes and
/// the connections between them.
///
/// `Clone` is a deep copy: the clone shares no state with its source, keeps every
/// weight and innovation number, and evaluates identically until either is mutated.
#[derive(Clone, Debug)]
pub struct Genome {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    inputs: Vec<usize>,
    bias: usize,
    outputs: Vec<usize>,
    hidden: Vec<usize>,
    node_index: HashMap<NodeId, usize>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl Genome {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            inputs: Vec::new(),
            bias: 0,
            outputs: Vec::new(),
            hidden: Vec::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    fn push_node(&mut self, id: NodeId, kind: NodeKind) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node::new(id, kind));
        self.node_index.insert(id, idx);
        idx
    }

    /// Creates an enabled connection between two arena nodes and wires both
    /// adjacency lists. The innovation number comes from `registry`.
    fn connect<L: crate::innovation::InnovationLedger + ?Sized>(
        &mut self,
        from: usize,
        to: usize,
        weight: f32,
        registry: &mut L,
    ) -> usize {
        let key = EdgeKey::new(self.nodes[from].id, self.nodes[to].id);
        debug_assert!(
            !self.edge_index.contains_key(&key),
            "duplicate connection {key}"
        );
        let innovation = registry.lookup_or_assign(key);
        let idx = self.connections.len();
        self.connections.push(Connection {
            node_in: from,
            node_out: to,
            key,
            weight,
            enabled: true,
            innovation: Some(innovation),
        });
        self.nodes[from].outward.push(idx);
        self.nodes[to].inward.push(idx);
        self.edge_index.insert(key, idx);
        idx
    }

    /// First id past the sensor and output block; hidden ids start here.
    fn io_floor(&self) -> NodeId {
        self.inputs.len() + 1 + self.outputs.len()
    }

    /// All nodes: inputs, bias, outputs, then hidden nodes in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All connections, in creation order, disabled ones included.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    #[must_use]
    pub fn connection(&self, key: EdgeKey) -> Option<&Connection> {
        self.edge_index.get(&key).map(|&idx| &self.connections[idx])
    }

    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn input_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().map(|&idx| self.nodes[idx].id)
    }

    #[must_use]
    pub fn bias_id(&self) -> NodeId {
        self.nodes[self.bias].id
    }

    pub fn output_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs.iter().map(|&idx| self.nodes[idx].id)
    }

    pub fn hidden_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.hidden.iter().map(|&idx| self.nodes[idx].id)
    }

    pub fn enabled_connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(|c| c.enabled)
    }

    /// Ordered, read-only enumeration for renderers and persistence layers.
    #[must_use]
    pub fn snapshot(&self) -> GenomeSnapshot {
        GenomeSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    id: n.id,
                    kind: n.kind,
                })
                .collect(),
            connections: self.connections.iter().map(Connection::record).collect(),
        }
    }

    /// Checks every structural invariant and that each innovation number agrees
    /// with `registry`.
    pub fn audit(&self, registry: &InnovationRegistry, bounds: &WeightBounds) -> Result<()> {
        if self.node_index.len() != self.nodes.len() {
            return Err(NeatError::invariant("node ids are not unique"));
        }

        let mut enabled_pairs = HashSet::new();
        for (idx, conn) in self.connections.iter().enumerate() {
            for (arena, id) in [(conn.node_in, conn.key.from), (conn.node_out, conn.key.to)] {
                if self.node_index.get(&id) != Some(&arena) {
                    return Err(NeatError::UnknownNode(id));
                }
            }
            if !self.nodes[conn.node_in].outward.contains(&idx)
                || !self.nodes[conn.node_out].inward.contains(&idx)
            {
                return Err(NeatError::invariant(format!(
                    "adjacency lists out of sync for {}",
                    conn.key
                )));
            }
            if self.nodes[conn.node_out].kind.is_sensor() {
                return Err(NeatError::invariant(format!(
                    "sensor {} has an inward connection",
                    conn.key.to
                )));
            }
            if conn.enabled && !enabled_pairs.insert(conn.key) {
                return Err(NeatError::invariant(format!(
                    "duplicate enabled connection {}",
                    conn.key
                )));
            }
            if !bounds.contains(conn.weight) {
                return Err(NeatError::invariant(format!(
                    "weight {} of {} outside [{}, {}]",
                    conn.weight, conn.key, bounds.lower, bounds.upper
                )));
            }
            if let Some(innovation) = conn.innovation {
                registry.verify(conn.key, innovation)?;
            }
        }
        Ok(())
    }
}
