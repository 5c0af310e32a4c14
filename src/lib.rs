pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use data::sample::LabeledSample;
pub use error::{DataError, NetworkError};
pub use loss::cost_function::CostFunction;
pub use math::{FillType, Matrix, Vector};
pub use network::evaluation::Evaluation;
pub use network::network::Network;
pub use train::epoch_stats::{EpochReport, TrainingSummary};
pub use train::train_config::TrainingConfig;
