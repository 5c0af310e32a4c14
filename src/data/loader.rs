use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::data::idx::parse_idx_pair;
use crate::data::sample::LabeledSample;
use crate::error::DataError;

pub const TRAINING_IMAGES: &str = "training_images";
pub const TRAINING_LABELS: &str = "training_labels";
pub const VALIDATION_IMAGES: &str = "validation_images";
pub const VALIDATION_LABELS: &str = "validation_labels";

/// Digit classes in MNIST.
pub const MNIST_CLASSES: usize = 10;

/// Samples kept for training out of the 60 000 in the MNIST training files;
/// the rest become the test set.
pub const DEFAULT_TRAINING_SPLIT: usize = 55_000;

/// The three disjoint sets the training loop consumes.
#[derive(Debug, Clone, Default)]
pub struct DataSplits {
    pub training: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
    pub validation: Vec<LabeledSample>,
}

/// Loads MNIST-style IDX files from `dir`.
///
/// Expects `training_images`, `training_labels`, `validation_images` and
/// `validation_labels`. The first `training_split` training samples form the
/// training set and the remainder the test set; the validation files form
/// the validation set.
pub fn load_mnist(dir: impl AsRef<Path>, training_split: usize) -> Result<DataSplits, DataError> {
    let dir = dir.as_ref();

    let mut training = load_pair(dir, TRAINING_IMAGES, TRAINING_LABELS)?;
    info!(count = training.len(), "loaded training samples");

    let validation = load_pair(dir, VALIDATION_IMAGES, VALIDATION_LABELS)?;
    info!(count = validation.len(), "loaded validation samples");

    if training_split > training.len() {
        warn!(
            training_split,
            available = training.len(),
            "training split exceeds available samples; test set is empty"
        );
    }
    let test = training.split_off(training_split.min(training.len()));

    Ok(DataSplits {
        training,
        test,
        validation,
    })
}

fn load_pair(dir: &Path, images: &str, labels: &str) -> Result<Vec<LabeledSample>, DataError> {
    let image_bytes = read_file(dir.join(images))?;
    let label_bytes = read_file(dir.join(labels))?;
    parse_idx_pair(&image_bytes, &label_bytes, MNIST_CLASSES)
}

fn read_file(path: PathBuf) -> Result<Vec<u8>, DataError> {
    std::fs::read(&path).map_err(|source| DataError::Io { path, source })
}
