use crate::math::vector::Vector;

/// Logistic function σ(x) = 1 / (1 + e^-x).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// σ'(x) = σ(x)·(1 − σ(x)).
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

/// Element-wise σ over a weighted-input vector.
pub fn sigmoid_vector(z: &Vector) -> Vector {
    z.map(sigmoid)
}

/// Element-wise σ' over a weighted-input vector.
pub fn sigmoid_prime_vector(z: &Vector) -> Vector {
    z.map(sigmoid_prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_at_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid_prime(0.0), 0.25);
    }

    #[test]
    fn sigmoid_is_monotonic_increasing() {
        let xs: Vec<f64> = (-300..=300).map(|i| i as f64 * 0.1).collect();
        for pair in xs.windows(2) {
            assert!(sigmoid(pair[0]) <= sigmoid(pair[1]));
        }
        assert!(sigmoid(-1.0) < sigmoid(1.0));
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid_prime(1000.0), 0.0);
    }

    #[test]
    fn vector_versions_apply_elementwise() {
        let z = Vector::from_vec(vec![0.0, 0.0]);
        assert_eq!(sigmoid_vector(&z).as_slice(), &[0.5, 0.5]);
        assert_eq!(sigmoid_prime_vector(&z).as_slice(), &[0.25, 0.25]);
    }
}
