use std::fs;

use sigmoid_net::data::idx::encode_idx_pair;
use sigmoid_net::data::loader::{
    load_mnist, TRAINING_IMAGES, TRAINING_LABELS, VALIDATION_IMAGES, VALIDATION_LABELS,
};
use sigmoid_net::DataError;

fn write_pair(dir: &std::path::Path, images: &str, labels: &str, classes: &[u8]) {
    let pixels: Vec<Vec<u8>> = classes.iter().map(|&c| vec![c * 20; 4]).collect();
    let (image_bytes, label_bytes) = encode_idx_pair(&pixels, 2, 2, classes);
    fs::write(dir.join(images), image_bytes).unwrap();
    fs::write(dir.join(labels), label_bytes).unwrap();
}

#[test]
fn splits_training_file_into_training_and_test() {
    let dir = tempfile::tempdir().unwrap();
    write_pair(dir.path(), TRAINING_IMAGES, TRAINING_LABELS, &[1, 2, 3, 4, 5]);
    write_pair(dir.path(), VALIDATION_IMAGES, VALIDATION_LABELS, &[7, 8]);

    let data = load_mnist(dir.path(), 3).unwrap();

    assert_eq!(data.training.len(), 3);
    assert_eq!(data.test.len(), 2);
    assert_eq!(data.validation.len(), 2);
    assert_eq!(data.test[0].label(), Some(4));
    assert_eq!(data.validation[1].label(), Some(8));
    assert_eq!(data.training[0].input.len(), 4);
    assert_eq!(data.training[0].target.len(), 10);
}

#[test]
fn oversized_split_leaves_test_set_empty() {
    let dir = tempfile::tempdir().unwrap();
    write_pair(dir.path(), TRAINING_IMAGES, TRAINING_LABELS, &[0, 1]);
    write_pair(dir.path(), VALIDATION_IMAGES, VALIDATION_LABELS, &[2]);

    let data = load_mnist(dir.path(), 55_000).unwrap();
    assert_eq!(data.training.len(), 2);
    assert!(data.test.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_mnist(dir.path(), 10).unwrap_err();
    match err {
        DataError::Io { path, .. } => assert!(path.ends_with(TRAINING_IMAGES)),
        other => panic!("expected Io error, got {:?}", other),
    }
}
