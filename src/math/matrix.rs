use rand::Rng;
use rand_distr::StandardNormal;
use std::ops::{Add, Mul, Sub};

use crate::math::vector::{FillType, Vector};

/// Dense row-major matrix of `f64`.
///
/// Represents a linear map from a vector of length `column_count` to one of
/// length `row_count`. Shape is fixed at construction; entries are only
/// reachable through the bounds-checked accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Fan-in (LeCun) initialization: samples from N(0, 1/sqrt(cols)).
    ///
    /// Keeps the weighted input of a sigmoid unit close to the linear part
    /// of the curve regardless of how many inputs feed it.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn fan_in_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill(FillType::Random, rng);
        res
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Panics
    /// Panics if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            panic!(
                "Matrix row {} has length {}, expected {}",
                bad,
                rows[bad].len(),
                cols
            );
        }
        Matrix {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub fn fill<R: Rng + ?Sized>(&mut self, fill: FillType, rng: &mut R) {
        match fill {
            FillType::Zero => self.data.iter_mut().for_each(|x| *x = 0.0),
            FillType::Random => {
                let std_dev = 1.0 / (self.cols as f64).sqrt();
                for x in self.data.iter_mut() {
                    let z: f64 = rng.sample(StandardNormal);
                    *x = z * std_dev;
                }
            }
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "Matrix row {} out of range for {} rows", row, self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// # Panics
    /// Panics if `(row, col)` is outside the matrix.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).unwrap_or_else(|| {
            panic!(
                "Matrix index ({}, {}) out of range for shape {}x{}",
                row, col, self.rows, self.cols
            )
        })
    }

    /// # Panics
    /// Panics if `(row, col)` is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row >= self.rows || col >= self.cols {
            panic!(
                "Matrix index ({}, {}) out of range for shape {}x{}",
                row, col, self.rows, self.cols
            );
        }
        self.data[row * self.cols + col] = value;
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        res
    }

    /// Sum of every entry.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn add(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    pub fn add_assign(&mut self, other: &Matrix) {
        self.assert_same_shape(other, "add_assign");
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    /// Matrix-vector product: element `i` is `dot(row i, vector)`.
    ///
    /// # Panics
    /// Panics if `vector.len() != column_count()`.
    pub fn multiply(&self, vector: &Vector) -> Vector {
        if vector.len() != self.cols {
            panic!(
                "Matrix multiply: {}x{} matrix cannot take a vector of length {}",
                self.rows,
                self.cols,
                vector.len()
            );
        }
        let input = vector.as_slice();
        let out = (0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(input.iter())
                    .map(|(w, x)| w * x)
                    .sum()
            })
            .collect();
        Vector::from_vec(out)
    }

    /// Computes `transpose() * vector` without building the transpose.
    ///
    /// # Panics
    /// Panics if `vector.len() != row_count()`.
    pub fn transpose_multiply(&self, vector: &Vector) -> Vector {
        if vector.len() != self.rows {
            panic!(
                "Matrix transpose_multiply: {}x{} matrix cannot take a vector of length {}",
                self.rows,
                self.cols,
                vector.len()
            );
        }
        let mut out = vec![0.0; self.cols];
        for (i, &v) in vector.iter().enumerate() {
            for (o, w) in out.iter_mut().zip(self.row(i).iter()) {
                *o += w * v;
            }
        }
        Vector::from_vec(out)
    }

    /// Outer product `column · rowᵀ`: entry `(k, j)` is `column[k] * row[j]`.
    pub fn outer(column: &Vector, row: &Vector) -> Matrix {
        let mut data = Vec::with_capacity(column.len() * row.len());
        for &c in column.iter() {
            data.extend(row.iter().map(|&r| c * r));
        }
        Matrix {
            rows: column.len(),
            cols: row.len(),
            data,
        }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    fn zip_with<F>(&self, other: &Matrix, op: &str, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        self.assert_same_shape(other, op);
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| functor(a, b))
                .collect(),
        }
    }

    fn assert_same_shape(&self, other: &Matrix, op: &str) {
        if self.shape() != other.shape() {
            panic!(
                "Matrix {}: size mismatch ({}x{} vs {}x{})",
                op, self.rows, self.cols, other.rows, other.cols
            );
        }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Matrix {
        Matrix::add(self, rhs)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Matrix {
        self.subtract(rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        self.multiply(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
    }

    #[test]
    fn multiply_is_row_dot_products() {
        let out = sample().multiply(&Vector::from_vec(vec![1.0, 0.0, -1.0]));
        assert_eq!(out.as_slice(), &[-2.0, -2.0]);
    }

    #[test]
    fn transpose_multiply_matches_explicit_transpose() {
        let m = sample();
        let v = Vector::from_vec(vec![0.5, -2.0]);
        assert_eq!(m.transpose_multiply(&v), m.transpose().multiply(&v));
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let t = sample().transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.at(2, 1), 6.0);
    }

    #[test]
    fn sum_adds_every_entry() {
        assert_eq!(sample().sum(), 21.0);
    }

    #[test]
    fn outer_product_layout() {
        let m = Matrix::outer(
            &Vector::from_vec(vec![1.0, 2.0]),
            &Vector::from_vec(vec![3.0, 4.0, 5.0]),
        );
        assert_eq!(m, Matrix::from_rows(vec![vec![3.0, 4.0, 5.0], vec![6.0, 8.0, 10.0]]));
    }

    #[test]
    fn elementwise_arithmetic() {
        let m = sample();
        assert_eq!(&m + &m, m.scale(2.0));
        assert_eq!((&m - &m).sum(), 0.0);
        assert_eq!((&m * 0.5).at(1, 1), 2.5);
    }

    #[test]
    fn fan_in_normal_scales_with_fan_in() {
        let m = Matrix::fan_in_normal(200, 400, &mut StdRng::seed_from_u64(3));
        let n = (m.row_count() * m.column_count()) as f64;
        let mean = m.sum() / n;
        let var = m.map(|x| (x - mean).powi(2)).sum() / n;
        // Expected variance is 1/400.
        assert!((var - 0.0025).abs() < 0.0003, "variance {}", var);
    }

    #[test]
    #[should_panic(expected = "cannot take a vector of length 2")]
    fn multiply_rejects_wrong_width() {
        sample().multiply(&Vector::new(2));
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn add_rejects_mismatched_shapes() {
        let _ = sample().add(&Matrix::zeros(3, 2));
    }

    #[test]
    #[should_panic(expected = "row 1 has length 1")]
    fn from_rows_rejects_ragged_input() {
        Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
    }

    fn matrix() -> impl Strategy<Value = Matrix> {
        (1usize..8, 1usize..8).prop_flat_map(|(r, c)| {
            prop::collection::vec(prop::collection::vec(-1e3f64..1e3, c), r)
                .prop_map(Matrix::from_rows)
        })
    }

    proptest! {
        #[test]
        fn double_transpose_is_identity(m in matrix()) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }
    }
}
