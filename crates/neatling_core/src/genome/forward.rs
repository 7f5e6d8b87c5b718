//! Evaluation of a genome on one input vector.
//!
//! The graph may contain cycles, so there is no general topological order to follow.
//! Instead a priority sweep visits each node at most once per call:
//!
//! 1. inputs (set to the given values) and the bias (set to 1) are queued first,
//!    all at the same priority, in declaration order;
//! 2. a popped node is marked triggered; non-sensors take
//!    `sigmoid(sum of upstream value * weight)` over their enabled inward connections;
//! 3. every untriggered target of the popped node's outward connections is queued
//!    behind everything already waiting.
//!
//! A node reads whatever its upstream nodes hold when it is popped. Upstream nodes not
//! yet triggered in this call (recurrent or forward-reference edges) still hold 0,
//! so which edges act as recurrent ones follows from the order the sweep reaches nodes.

use super::schedule::ActivationQueue;
use super::*;
use neatling_data::Activations;

/// Steepened logistic used by every non-sensor node.
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-4.9 * x).exp())
}

impl Genome {
    /// Maps `inputs` to one value per output node, in output declaration order.
    ///
    /// `inputs` must hold exactly one value per input node.
    pub fn think(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let mut activations = Activations::default();
        self.think_with(inputs, &mut activations)
    }

    /// Same as [`Genome::think`], reusing caller-owned scratch state. After the call
    /// `activations` holds every node's value and trigger flag, by arena index.
    pub fn think_with(&self, inputs: &[f32], activations: &mut Activations) -> Result<Vec<f32>> {
        if inputs.len() != self.inputs.len() {
            return Err(NeatError::InputLength {
                expected: self.inputs.len(),
                actual: inputs.len(),
            });
        }

        activations.prepare(self.nodes.len());
        for (&idx, &value) in self.inputs.iter().zip(inputs) {
            activations.values[idx] = value;
        }
        activations.values[self.bias] = 1.0;

        let pushes = self.propagate(activations);
        tracing::trace!(nodes = self.nodes.len(), pushes, "Think complete");

        Ok(self
            .outputs
            .iter()
            .map(|&idx| activations.values[idx])
            .collect())
    }

    /// Runs the sweep over prepared activations. Returns the number of queue pushes.
    fn propagate(&self, activations: &mut Activations) -> usize {
        let mut queue = ActivationQueue::with_capacity(self.nodes.len());
        for &idx in &self.inputs {
            queue.put_seed(idx);
        }
        queue.put_seed(self.bias);

        while let Some(idx) = queue.pop() {
            activations.triggered[idx] = true;
            let node = &self.nodes[idx];

            if !node.kind.is_sensor() {
                let sum: f32 = node
                    .inward
                    .iter()
                    .map(|&c| &self.connections[c])
                    .filter(|c| c.enabled)
                    .map(|c| activations.values[c.node_in] * c.weight)
                    .sum();
                activations.values[idx] = sigmoid(sum);
            }

            for &c in &node.outward {
                let target = self.connections[c].node_out;
                if !activations.triggered[target] {
                    queue.put_after_pending(target);
                }
            }
        }
        queue.pushes()
    }
}
