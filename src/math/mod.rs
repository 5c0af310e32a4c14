pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::{FillType, Vector};
