use serde::{Deserialize, Serialize};

/// Result of `Network::evaluate` over one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Samples whose predicted class (argmax of the output) equals the
    /// argmax of the target.
    pub correct: usize,
    pub total: usize,
    /// Mean cost over the dataset; `0.0` when the dataset is empty.
    pub mean_loss: f64,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}
