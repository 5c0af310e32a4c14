use rand::Rng;
use rand_distr::StandardNormal;
use std::ops::{Add, Mul, Neg, Sub};

/// How `fill` initializes the entries of a `Vector` or `Matrix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    Zero,
    /// Gaussian draws; the standard deviation depends on the container
    /// (1 for vectors, `1/sqrt(column_count)` for matrices).
    Random,
}

/// Fixed-length column vector of `f64`.
///
/// The length is set at construction and never changes. Every binary
/// operation requires both operands to have the same length and panics
/// otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /// Zero-filled vector of `size` elements.
    pub fn new(size: usize) -> Vector {
        Vector { values: vec![0.0; size] }
    }

    pub fn from_vec(values: Vec<f64>) -> Vector {
        Vector { values }
    }

    /// Vector of `size` independent N(0, 1) draws.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vector {
        let mut res = Vector::new(size);
        res.fill(FillType::Random, rng);
        res
    }

    pub fn fill<R: Rng + ?Sized>(&mut self, fill: FillType, rng: &mut R) {
        match fill {
            FillType::Zero => self.values.iter_mut().for_each(|x| *x = 0.0),
            FillType::Random => {
                for x in self.values.iter_mut() {
                    *x = rng.sample(StandardNormal);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Bounds-checked read.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn at(&self, index: usize) -> f64 {
        match self.values.get(index) {
            Some(&x) => x,
            None => panic!("Vector index {} out of range for length {}", index, self.len()),
        }
    }

    /// Bounds-checked write.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, value: f64) {
        let len = self.len();
        match self.values.get_mut(index) {
            Some(x) => *x = value,
            None => panic!("Vector index {} out of range for length {}", index, len),
        }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.values.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    pub fn add(&self, other: &Vector) -> Vector {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Vector) -> Vector {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    pub fn negate(&self) -> Vector {
        self.map(|x| -x)
    }

    pub fn scale(&self, scalar: f64) -> Vector {
        self.map(|x| x * scalar)
    }

    /// In-place `self += other`, used by gradient accumulators.
    pub fn add_assign(&mut self, other: &Vector) {
        assert_same_len(self, other, "add_assign");
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
    }

    /// Sum of elementwise products.
    pub fn dot(a: &Vector, b: &Vector) -> f64 {
        assert_same_len(a, b, "dot");
        a.values.iter().zip(b.values.iter()).map(|(x, y)| x * y).sum()
    }

    /// Elementwise product.
    pub fn hadamard(a: &Vector, b: &Vector) -> Vector {
        a.zip_with(b, "hadamard", |x, y| x * y)
    }

    /// Applies `functor` to every element, producing a vector of equal length.
    pub fn map<F>(&self, functor: F) -> Vector
    where
        F: Fn(f64) -> f64,
    {
        Vector {
            values: self.values.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Index of the largest element; the first one wins on ties.
    /// Returns `None` for an empty vector.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &x) in self.values.iter().enumerate() {
            if x.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, b)| x > b) {
                best = Some((i, x));
            }
        }
        best.map(|(i, _)| i)
    }

    fn zip_with<F>(&self, other: &Vector, op: &str, functor: F) -> Vector
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_same_len(self, other, op);
        Vector {
            values: self
                .values
                .iter()
                .zip(other.values.iter())
                .map(|(&a, &b)| functor(a, b))
                .collect(),
        }
    }
}

fn assert_same_len(a: &Vector, b: &Vector, op: &str) {
    if a.len() != b.len() {
        panic!("Vector {}: size mismatch ({} vs {})", op, a.len(), b.len());
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::from_vec(values)
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Vector {
        Vector::add(self, rhs)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        self.subtract(rhs)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.negate()
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn v(values: &[f64]) -> Vector {
        Vector::from_vec(values.to_vec())
    }

    #[test]
    fn new_is_zero_filled() {
        let z = Vector::new(4);
        assert_eq!(z.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn hadamard_matches_hand_computed_example() {
        let h = Vector::hadamard(&v(&[1.0, 2.0, 3.0]), &v(&[4.0, 5.0, 6.0]));
        assert_eq!(h, v(&[4.0, 10.0, 18.0]));
    }

    #[test]
    fn magnitude_is_euclidean_norm() {
        assert_eq!(v(&[3.0, 4.0]).magnitude(), 5.0);
    }

    #[test]
    fn operators_delegate_to_named_methods() {
        let a = v(&[1.0, -2.0]);
        let b = v(&[0.5, 0.5]);
        assert_eq!(&a + &b, v(&[1.5, -1.5]));
        assert_eq!(&a - &b, v(&[0.5, -2.5]));
        assert_eq!(-&a, v(&[-1.0, 2.0]));
        assert_eq!(&a * 2.0, v(&[2.0, -4.0]));
    }

    #[test]
    fn argmax_prefers_first_of_equal_maxima() {
        assert_eq!(v(&[0.1, 0.9, 0.9, 0.2]).argmax(), Some(1));
        assert_eq!(Vector::new(0).argmax(), None);
    }

    #[test]
    fn random_fill_is_reproducible_for_a_seed() {
        let a = Vector::random(8, &mut StdRng::seed_from_u64(7));
        let b = Vector::random(8, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn fill_zero_clears_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = Vector::random(5, &mut rng);
        a.fill(FillType::Zero, &mut rng);
        assert_eq!(a, Vector::new(5));
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn add_rejects_mismatched_sizes() {
        let _ = v(&[1.0, 2.0]).add(&v(&[1.0]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn at_is_bounds_checked() {
        v(&[1.0]).at(1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_is_bounds_checked() {
        Vector::new(2).set(2, 1.0);
    }

    fn pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..16).prop_flat_map(|n| {
            (
                prop::collection::vec(-1e3f64..1e3, n),
                prop::collection::vec(-1e3f64..1e3, n),
            )
        })
    }

    proptest! {
        #[test]
        fn subtracting_the_added_vector_is_identity((a, b) in pair()) {
            let (a, b) = (Vector::from_vec(a), Vector::from_vec(b));
            let back = a.add(&b).subtract(&b);
            for (x, y) in back.iter().zip(a.iter()) {
                prop_assert!((x - y).abs() < 1e-9);
            }
        }

        #[test]
        fn dot_is_symmetric((a, b) in pair()) {
            let (a, b) = (Vector::from_vec(a), Vector::from_vec(b));
            prop_assert_eq!(Vector::dot(&a, &b), Vector::dot(&b, &a));
        }

        #[test]
        fn hadamard_is_commutative((a, b) in pair()) {
            let (a, b) = (Vector::from_vec(a), Vector::from_vec(b));
            prop_assert_eq!(Vector::hadamard(&a, &b), Vector::hadamard(&b, &a));
        }
    }
}
