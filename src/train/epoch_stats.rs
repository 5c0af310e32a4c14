use serde::{Deserialize, Serialize};

use crate::network::evaluation::Evaluation;

/// Per-epoch training statistics emitted by `train_loop`.
///
/// One `EpochReport` is produced at the end of every epoch, after the
/// network has been evaluated on the training and validation sets. The
/// library does not format or print it; callers decide how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    pub training_correct: usize,
    pub training_size: usize,
    /// Mean cost over the training set after this epoch's updates.
    pub training_loss: f64,
    pub validation_correct: usize,
    pub validation_size: usize,
    pub validation_loss: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochReport {
    pub fn new(
        epoch: usize,
        total_epochs: usize,
        training: &Evaluation,
        validation: &Evaluation,
        elapsed_ms: u64,
    ) -> Self {
        EpochReport {
            epoch,
            total_epochs,
            training_correct: training.correct,
            training_size: training.total,
            training_loss: training.mean_loss,
            validation_correct: validation.correct,
            validation_size: validation.total,
            validation_loss: validation.mean_loss,
            elapsed_ms,
        }
    }

    /// Fraction in [0, 1]; `0.0` for an empty training set.
    pub fn training_accuracy(&self) -> f64 {
        fraction(self.training_correct, self.training_size)
    }

    pub fn validation_accuracy(&self) -> f64 {
        fraction(self.validation_correct, self.validation_size)
    }
}

/// Everything a finished `train_loop` produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs: Vec<EpochReport>,
    /// Held-out test set, evaluated once after the last epoch.
    pub test: Evaluation,
}

impl TrainingSummary {
    pub fn last_epoch(&self) -> Option<&EpochReport> {
        self.epochs.last()
    }
}

fn fraction(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
