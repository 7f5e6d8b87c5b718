use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within one genome.
pub type NodeId = usize;

/// Historical marker shared by every connection that joins the same two endpoints.
pub type Innovation = usize;

/// Role of a node in the network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Externally driven node (inputs and the bias).
    Sensor,
    /// Internal node grown by a split mutation.
    Hidden,
    /// Node whose value is reported by `think`.
    Output,
}

impl NodeKind {
    #[must_use]
    pub fn is_sensor(self) -> bool {
        matches!(self, Self::Sensor)
    }
}

/// Structural identity of a connection: the ids of its two endpoints.
///
/// Two connections are "the same connection" when their keys are equal, whatever
/// their weight, enable flag or innovation number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Id of the input endpoint.
    pub from: NodeId,
    /// Id of the output endpoint.
    pub to: NodeId,
}

impl EdgeKey {
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Closed interval every connection weight must stay in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightBounds {
    pub lower: f32,
    pub upper: f32,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

impl WeightBounds {
    #[must_use]
    pub fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    /// Width of the interval.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn clamp(&self, weight: f32) -> f32 {
        weight.clamp(self.lower, self.upper)
    }

    #[must_use]
    pub fn contains(&self, weight: f32) -> bool {
        (self.lower..=self.upper).contains(&weight)
    }
}

/// Per-evaluation node state, indexed by node arena position.
///
/// Kept outside the genome so that every `think` call owns its own copy.
#[derive(Clone, Debug, Default)]
pub struct Activations {
    /// Last value produced by each node.
    pub values: Vec<f32>,
    /// Whether each node has produced its value in the current pass.
    pub triggered: Vec<bool>,
}

impl Activations {
    /// Prepare buffers for `node_count` nodes, zeroing values and clearing every trigger.
    pub fn prepare(&mut self, node_count: usize) {
        self.values.clear();
        self.values.resize(node_count, 0.0);
        self.triggered.clear();
        self.triggered.resize(node_count, false);
    }
}

/// Read-only view of one node for renderers and persistence layers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// Read-only view of one connection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConnectionRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f32,
    pub enabled: bool,
    pub innovation: Option<Innovation>,
}

/// Ordered enumeration of a genome: nodes as inputs, bias, outputs, then hidden in
/// creation order; connections in creation order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct GenomeSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub connections: Vec<ConnectionRecord>,
}
