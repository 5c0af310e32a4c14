use crate::math::vector::Vector;

/// Cross-entropy cost for independent sigmoid outputs.
pub struct CrossEntropyLoss;

/// Activations are clamped into [EPS, 1 − EPS] before taking logarithms so a
/// saturated output yields a large finite cost instead of `inf`/`NaN`.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Computes the mean cross-entropy over the output units:
    ///   C = -(1/n) · Σ [y·ln(a) + (1 − y)·ln(1 − a)]
    pub fn loss(actual: &Vector, desired: &Vector) -> f64 {
        assert_eq!(
            actual.len(),
            desired.len(),
            "CrossEntropyLoss: size mismatch"
        );
        let n = actual.len() as f64;
        let sum: f64 = actual
            .iter()
            .zip(desired.iter())
            .map(|(&a, &y)| {
                let a = a.clamp(EPS, 1.0 - EPS);
                y * a.ln() + (1.0 - y) * (1.0 - a).ln()
            })
            .sum();
        -sum / n
    }

    /// Output-layer error: a − y.
    ///
    /// The σ'(z) factor of the chain rule cancels against the derivative of
    /// the logarithms, so `z` is not needed here.
    pub fn output_error(_z: &Vector, actual: &Vector, desired: &Vector) -> Vector {
        actual.subtract(desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_approaches_zero_for_exact_match() {
        let y = Vector::from_vec(vec![0.0, 1.0, 0.0]);
        let loss = CrossEntropyLoss::loss(&y, &y);
        assert!(loss.is_finite());
        assert!(loss >= 0.0 && loss < 1e-9, "loss = {}", loss);
    }

    #[test]
    fn loss_is_finite_for_fully_wrong_saturated_output() {
        let a = Vector::from_vec(vec![1.0, 0.0]);
        let y = Vector::from_vec(vec![0.0, 1.0]);
        let loss = CrossEntropyLoss::loss(&a, &y);
        assert!(loss.is_finite() && loss > 20.0);
    }

    #[test]
    fn loss_of_half_is_ln_two() {
        let a = Vector::from_vec(vec![0.5, 0.5]);
        let y = Vector::from_vec(vec![1.0, 0.0]);
        assert!((CrossEntropyLoss::loss(&a, &y) - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn output_error_is_difference() {
        let z = Vector::from_vec(vec![3.0, -3.0]);
        let a = Vector::from_vec(vec![0.75, 0.25]);
        let y = Vector::from_vec(vec![1.0, 0.0]);
        assert_eq!(CrossEntropyLoss::output_error(&z, &a, &y).as_slice(), &[-0.25, 0.25]);
    }
}
