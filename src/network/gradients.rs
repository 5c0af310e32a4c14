use crate::layers::dense::Layer;
use crate::math::{Matrix, Vector};

/// Cost gradient for one layer, shaped like that layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub biases: Vector,
}

impl LayerGradients {
    pub fn zeros_like(layer: &Layer) -> Self {
        let (rows, cols) = layer.weights().shape();
        LayerGradients {
            weights: Matrix::zeros(rows, cols),
            biases: Vector::new(layer.size()),
        }
    }
}

/// Per-layer gradients for a whole network, ordered input → output.
///
/// Produced by `Network::backprop` for one sample and summed over a
/// mini-batch by `Network::update_mini_batch`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub layers: Vec<LayerGradients>,
}

impl Gradients {
    /// Zero-filled accumulator matching `layers`.
    pub fn zeros_like(layers: &[Layer]) -> Self {
        Gradients {
            layers: layers.iter().map(LayerGradients::zeros_like).collect(),
        }
    }

    /// Adds `other` into `self`, layer by layer.
    pub fn accumulate(&mut self, other: &Gradients) {
        assert_eq!(
            self.layers.len(),
            other.layers.len(),
            "Gradients: layer count mismatch"
        );
        for (acc, g) in self.layers.iter_mut().zip(other.layers.iter()) {
            acc.weights.add_assign(&g.weights);
            acc.biases.add_assign(&g.biases);
        }
    }

    /// Consuming form of `accumulate`, suitable as a reduction operator.
    pub fn merge(mut self, other: Gradients) -> Gradients {
        self.accumulate(&other);
        self
    }

    pub fn weights(&self, layer: usize) -> &Matrix {
        &self.layers[layer].weights
    }

    pub fn biases(&self, layer: usize) -> &Vector {
        &self.layers[layer].biases
    }
}
