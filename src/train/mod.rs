pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::{EpochReport, TrainingSummary};
pub use loop_fn::train_loop;
pub use train_config::TrainingConfig;
