use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or training a `Network`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The layer layout cannot describe a network (fewer than two layers,
    /// or a layer with zero width).
    #[error("invalid layer layout {sizes:?}: {reason}")]
    InvalidLayout { sizes: Vec<usize>, reason: String },

    /// A hyperparameter is outside its allowed range.
    #[error("invalid training config: {0}")]
    InvalidConfig(String),

    /// A sample or parameter does not have the width the network expects.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// An operation that needs at least one sample was given none.
    #[error("{0} must not be empty")]
    EmptyDataset(&'static str),
}

/// Errors raised by the dataset collaborator.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes do not form a valid IDX file.
    #[error("malformed IDX data: {0}")]
    Format(String),

    #[error("image file declares {images} items but label file declares {labels}")]
    CountMismatch { images: usize, labels: usize },

    #[error("label at index {index} is class {class}, out of range for {n_classes} classes")]
    LabelOutOfRange {
        index: usize,
        class: usize,
        n_classes: usize,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
