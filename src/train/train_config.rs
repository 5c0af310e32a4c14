use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, NetworkError, Result};
use crate::loss::cost_function::CostFunction;

/// Hyperparameters for a training run.
///
/// # Fields
/// - `eta`             — learning rate, must be positive
/// - `lambda`          — L2 regularization strength, `0.0` disables weight decay
/// - `epochs`          — total number of full passes over the training data
/// - `mini_batch_size` — samples per update; at most the training-set size
/// - `cost_function`   — which cost the network minimizes
/// - `parallel`        — accumulate each mini-batch's gradients on the rayon pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub eta: f64,
    pub lambda: f64,
    pub epochs: usize,
    pub mini_batch_size: usize,
    pub cost_function: CostFunction,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            eta: 0.001,
            lambda: 5.0,
            epochs: 150,
            mini_batch_size: 5,
            cost_function: CostFunction::CrossEntropy,
            parallel: false,
        }
    }
}

impl TrainingConfig {
    pub fn new(
        eta: f64,
        lambda: f64,
        epochs: usize,
        mini_batch_size: usize,
        cost_function: CostFunction,
    ) -> Self {
        TrainingConfig {
            eta,
            lambda,
            epochs,
            mini_batch_size,
            cost_function,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the ranges that do not depend on the dataset.
    pub fn validate(&self) -> Result<()> {
        if !(self.eta.is_finite() && self.eta > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "eta must be a positive finite number, got {}",
                self.eta
            )));
        }
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "lambda must be a non-negative finite number, got {}",
                self.lambda
            )));
        }
        if self.epochs == 0 {
            return Err(NetworkError::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.mini_batch_size == 0 {
            return Err(NetworkError::InvalidConfig(
                "mini_batch_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// `validate` plus the mini-batch size bound for a training set of
    /// `training_size` samples.
    pub fn validate_for(&self, training_size: usize) -> Result<()> {
        self.validate()?;
        if self.mini_batch_size > training_size {
            return Err(NetworkError::InvalidConfig(format!(
                "mini_batch_size {} exceeds training set size {}",
                self.mini_batch_size, training_size
            )));
        }
        Ok(())
    }

    /// Reads a config from a JSON file. `parallel` may be omitted.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainingConfig, DataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TrainingConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = TrainingConfig::default();
        let bad = [
            TrainingConfig { eta: 0.0, ..base },
            TrainingConfig { eta: f64::NAN, ..base },
            TrainingConfig { lambda: -1.0, ..base },
            TrainingConfig { epochs: 0, ..base },
            TrainingConfig { mini_batch_size: 0, ..base },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(NetworkError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn batch_size_bounded_by_training_set() {
        let config = TrainingConfig { mini_batch_size: 10, ..TrainingConfig::default() };
        assert!(config.validate_for(10).is_ok());
        assert!(config.validate_for(9).is_err());
    }

    #[test]
    fn parses_json_without_parallel_field() {
        let json = r#"{
            "eta": 0.5,
            "lambda": 0.0,
            "epochs": 30,
            "mini_batch_size": 10,
            "cost_function": "mean_squared_error"
        }"#;
        let config: TrainingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            TrainingConfig::new(0.5, 0.0, 30, 10, CostFunction::MeanSquaredError)
        );
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = TrainingConfig::load_json("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn load_json_reports_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "eta": 0.5, "lambda": "#).unwrap();
        let err = TrainingConfig::load_json(&path).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
