//! Plain data records shared by the neatling engine and its collaborators.

pub mod data;

pub use data::genome::{
    Activations, ConnectionRecord, EdgeKey, GenomeSnapshot, Innovation, NodeId, NodeKind,
    NodeRecord, WeightBounds,
};
