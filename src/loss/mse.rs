use crate::activation::sigmoid_prime_vector;
use crate::math::vector::Vector;

/// Quadratic cost.
pub struct MseLoss;

impl MseLoss {
    /// Scalar cost: ‖actual − desired‖² / 2
    pub fn loss(actual: &Vector, desired: &Vector) -> f64 {
        actual.subtract(desired).magnitude().powi(2) / 2.0
    }

    /// Output-layer error: (a − y) ⊙ σ'(z)
    pub fn output_error(z: &Vector, actual: &Vector, desired: &Vector) -> Vector {
        Vector::hadamard(&actual.subtract(desired), &sigmoid_prime_vector(z))
    }
}
