use std::sync::mpsc;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::data::sample::LabeledSample;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochReport, TrainingSummary};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of mini-batch SGD.
///
/// # Arguments
/// - `network`    — modified in place after every mini-batch
/// - `training`   — shuffled in place at the start of every epoch
/// - `test`       — evaluated once, after the last epoch
/// - `validation` — evaluated after every epoch alongside `training`
/// - `rng`        — drives the shuffles
/// - `progress`   — optional channel; one `EpochReport` is sent per epoch.
///   A dropped receiver does not stop training.
///
/// # Mini-batches
/// Each epoch splits the shuffled training set into contiguous batches of
/// `mini_batch_size`. When the size does not divide the training set the
/// final batch holds the remaining samples and is averaged over its own
/// length.
///
/// # Errors
/// Fails before any update if the training set is empty, the config is out
/// of range for it, or any sample's width disagrees with the network.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    training: &mut [LabeledSample],
    test: &[LabeledSample],
    validation: &[LabeledSample],
    rng: &mut R,
    progress: Option<&mpsc::Sender<EpochReport>>,
) -> Result<TrainingSummary> {
    if training.is_empty() {
        return Err(NetworkError::EmptyDataset("training set"));
    }
    let config = *network.config();
    config.validate_for(training.len())?;
    network.check_samples(training, "training sample")?;
    network.check_samples(validation, "validation sample")?;
    network.check_samples(test, "test sample")?;

    let n = training.len();
    let batch_count = n.div_ceil(config.mini_batch_size);
    let tail = n % config.mini_batch_size;
    if tail != 0 {
        warn!(
            training_size = n,
            mini_batch_size = config.mini_batch_size,
            tail,
            "training set is not a multiple of the mini-batch size; last batch is partial"
        );
    }

    info!(
        epochs = config.epochs,
        training_size = n,
        validation_size = validation.len(),
        test_size = test.len(),
        batch_count,
        "starting training"
    );

    let mut reports = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        training.shuffle(rng);
        for batch in training.chunks(config.mini_batch_size) {
            network.update_mini_batch_unchecked(batch, n);
        }
        debug!(epoch, batch_count, "mini-batch updates applied");

        // ── Evaluation ─────────────────────────────────────────────────────
        let training_eval = network.evaluate_unchecked(training);
        let validation_eval = network.evaluate_unchecked(validation);
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let report = EpochReport::new(
            epoch,
            config.epochs,
            &training_eval,
            &validation_eval,
            elapsed_ms,
        );

        info!(
            epoch,
            total_epochs = config.epochs,
            training_correct = report.training_correct,
            training_loss = report.training_loss,
            validation_correct = report.validation_correct,
            validation_loss = report.validation_loss,
            elapsed_ms,
            "epoch complete"
        );

        // ── Emit progress ──────────────────────────────────────────────────
        if let Some(tx) = progress {
            if tx.send(report.clone()).is_err() {
                debug!(epoch, "progress receiver dropped");
            }
        }

        reports.push(report);
    }

    let test_eval = network.evaluate_unchecked(test);
    info!(
        test_correct = test_eval.correct,
        test_size = test_eval.total,
        test_loss = test_eval.mean_loss,
        "training finished"
    );

    Ok(TrainingSummary {
        epochs: reports,
        test: test_eval,
    })
}
