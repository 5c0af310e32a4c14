use serde::{Deserialize, Serialize};

use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::loss::mse::MseLoss;
use crate::math::vector::Vector;

/// Selects the cost the network minimizes.
///
/// - `MeanSquaredError` — quadratic cost; its output error carries σ'(z), so
///   learning slows down when the output units saturate.
/// - `CrossEntropy`     — the σ'(z) term cancels, so the output error is
///   simply `a − y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFunction {
    MeanSquaredError,
    #[default]
    CrossEntropy,
}

impl CostFunction {
    /// Scalar cost for one sample.
    pub fn loss(&self, actual: &Vector, desired: &Vector) -> f64 {
        match self {
            CostFunction::MeanSquaredError => MseLoss::loss(actual, desired),
            CostFunction::CrossEntropy => CrossEntropyLoss::loss(actual, desired),
        }
    }

    /// Error term δᴸ injected at the output layer to start backpropagation.
    pub fn output_error(&self, z: &Vector, actual: &Vector, desired: &Vector) -> Vector {
        match self {
            CostFunction::MeanSquaredError => MseLoss::output_error(z, actual, desired),
            CostFunction::CrossEntropy => CrossEntropyLoss::output_error(z, actual, desired),
        }
    }
}

impl std::str::FromStr for CostFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "mse" | "quadratic" | "mean_squared_error" => Ok(CostFunction::MeanSquaredError),
            "ce" | "cross_entropy" => Ok(CostFunction::CrossEntropy),
            other => Err(format!(
                "unknown cost function '{}' (expected 'mse' or 'cross-entropy')",
                other
            )),
        }
    }
}
