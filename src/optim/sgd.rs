use crate::layers::dense::Layer;
use crate::network::gradients::LayerGradients;

/// Plain mini-batch SGD with L2 weight decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub lambda: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, lambda: f64) -> Sgd {
        Sgd { learning_rate, lambda }
    }

    /// η / batch_len: turns a summed batch gradient into an averaged step.
    pub fn learning_step(&self, batch_len: usize) -> f64 {
        self.learning_rate / batch_len as f64
    }

    /// 1 − η·λ / n, the multiplicative weight decay for a training set of `n`.
    pub fn regularization_factor(&self, training_size: usize) -> f64 {
        1.0 - self.learning_rate * self.lambda / training_size as f64
    }

    /// Applies one update to a layer from gradients summed over `batch_len`
    /// samples. Biases are not decayed.
    pub fn step(
        &self,
        layer: &mut Layer,
        grads: &LayerGradients,
        batch_len: usize,
        training_size: usize,
    ) {
        layer.apply_gradients(
            grads,
            self.learning_step(batch_len),
            self.regularization_factor(training_size),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Matrix, Vector};

    #[test]
    fn factors_follow_hyperparameters() {
        let sgd = Sgd::new(0.5, 2.0);
        assert!((sgd.learning_step(10) - 0.05).abs() < 1e-15);
        assert!((sgd.regularization_factor(100) - 0.99).abs() < 1e-15);
        assert_eq!(Sgd::new(0.5, 0.0).regularization_factor(100), 1.0);
    }

    #[test]
    fn step_averages_summed_gradient() {
        let mut layer = Layer::from_parameters(
            Matrix::from_rows(vec![vec![1.0, 1.0]]),
            Vector::from_vec(vec![0.0]),
        );
        let grads = LayerGradients {
            weights: Matrix::from_rows(vec![vec![4.0, -4.0]]),
            biases: Vector::from_vec(vec![4.0]),
        };
        Sgd::new(1.0, 0.0).step(&mut layer, &grads, 4, 4);
        assert_eq!(layer.weights(), &Matrix::from_rows(vec![vec![0.0, 2.0]]));
        assert_eq!(layer.biases().as_slice(), &[-1.0]);
    }
}
