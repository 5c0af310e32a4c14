use crate::math::Vector;

/// One training example: an input vector and the output the network should
/// produce for it (one-hot for classification).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub input: Vector,
    pub target: Vector,
}

impl LabeledSample {
    pub fn new(input: Vector, target: Vector) -> Self {
        LabeledSample { input, target }
    }

    /// Builds a sample whose target is the one-hot encoding of `class`.
    ///
    /// # Panics
    /// Panics if `class >= n_classes`.
    pub fn one_hot(input: Vec<f64>, class: usize, n_classes: usize) -> Self {
        let mut target = Vector::new(n_classes);
        target.set(class, 1.0);
        LabeledSample {
            input: Vector::from_vec(input),
            target,
        }
    }

    /// Class index the target encodes (argmax of the target).
    pub fn label(&self) -> Option<usize> {
        self.target.argmax()
    }
}

impl From<(Vec<f64>, Vec<f64>)> for LabeledSample {
    fn from((input, target): (Vec<f64>, Vec<f64>)) -> Self {
        LabeledSample::new(Vector::from_vec(input), Vector::from_vec(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_sets_single_entry() {
        let s = LabeledSample::one_hot(vec![0.0, 1.0], 2, 4);
        assert_eq!(s.target.as_slice(), &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(s.label(), Some(2));
    }
}
