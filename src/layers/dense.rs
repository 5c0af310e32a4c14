use rand::Rng;

use crate::activation::sigmoid_vector;
use crate::math::{Matrix, Vector};
use crate::network::gradients::LayerGradients;

/// One fully-connected sigmoid layer: `a = σ(W·x + b)`.
///
/// `weights` has shape `(size, input_size)`; `biases` has length `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    biases: Vector,
}

impl Layer {
    /// Random layer: biases ~ N(0, 1), weights ~ N(0, 1/sqrt(input_size)).
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let biases = Vector::random(size, rng);
        let weights = Matrix::fan_in_normal(size, input_size, rng);
        Layer { weights, biases }
    }

    /// # Panics
    /// Panics if `biases.len() != weights.row_count()`.
    pub fn from_parameters(weights: Matrix, biases: Vector) -> Layer {
        assert_eq!(
            weights.row_count(),
            biases.len(),
            "Layer: bias length must equal weight row count"
        );
        Layer { weights, biases }
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    pub fn input_size(&self) -> usize {
        self.weights.column_count()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Vector {
        &self.biases
    }

    /// Pre-activation `z = W·x + b`.
    pub fn weighted_input(&self, input: &Vector) -> Vector {
        self.weights.multiply(input).add(&self.biases)
    }

    pub fn feed_from(&self, input: &Vector) -> Vector {
        sigmoid_vector(&self.weighted_input(input))
    }

    /// Applies `W ← W·regularization − ∇W·step` and `b ← b − ∇b·step`.
    pub fn apply_gradients(
        &mut self,
        grads: &LayerGradients,
        learning_step: f64,
        regularization_factor: f64,
    ) {
        self.weights = self
            .weights
            .scale(regularization_factor)
            .subtract(&grads.weights.scale(learning_step));
        self.biases = self.biases.subtract(&grads.biases.scale(learning_step));
    }
}
