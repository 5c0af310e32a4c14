pub mod idx;
pub mod loader;
pub mod sample;

pub use loader::{load_mnist, DataSplits};
pub use sample::LabeledSample;
