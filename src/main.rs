//! sigmoid-net CLI: trains a digit classifier on MNIST-style IDX files.
//!
//! Run with:
//!   cargo run --release -- --data-dir ./mnist_data
//!
//! The data directory must contain `training_images`, `training_labels`,
//! `validation_images` and `validation_labels` in IDX format.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sigmoid_net::data::loader::{load_mnist, DEFAULT_TRAINING_SPLIT};
use sigmoid_net::{CostFunction, EpochReport, Network, TrainingConfig};

#[derive(Parser, Debug)]
#[command(name = "sigmoid-net")]
#[command(about = "Train a sigmoid feedforward network with mini-batch SGD")]
#[command(version)]
struct Cli {
    /// Directory holding the IDX training and validation files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// JSON training config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layer widths including input and output
    #[arg(long, value_delimiter = ',', default_values_t = vec![784, 64, 64, 10])]
    layers: Vec<usize>,

    /// Learning rate
    #[arg(long)]
    eta: Option<f64>,

    /// L2 regularization strength
    #[arg(long)]
    lambda: Option<f64>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,

    /// Cost function: mse or cross-entropy
    #[arg(long)]
    cost: Option<CostFunction>,

    /// Training samples kept for training; the rest form the test set
    #[arg(long, default_value_t = DEFAULT_TRAINING_SPLIT)]
    training_split: usize,

    /// Random seed for reproducibility (default: from OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Accumulate mini-batch gradients on all cores
    #[arg(long)]
    parallel: bool,

    /// Print each epoch report as a JSON line
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn training_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load_json(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TrainingConfig::default(),
        };
        if let Some(eta) = self.eta {
            config.eta = eta;
        }
        if let Some(lambda) = self.lambda {
            config.lambda = lambda;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(batch_size) = self.batch_size {
            config.mini_batch_size = batch_size;
        }
        if let Some(cost) = self.cost {
            config.cost_function = cost;
        }
        if self.parallel {
            config.parallel = true;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.training_config()?;

    let data = load_mnist(&cli.data_dir, cli.training_split)
        .with_context(|| format!("loading data from {}", cli.data_dir.display()))?;
    if data.training.is_empty() {
        bail!("no training samples in {}", cli.data_dir.display());
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = Network::new(&cli.layers, config, &mut rng)?;
    let mut training = data.training;

    let (tx, rx) = mpsc::channel::<EpochReport>();
    let json = cli.json;
    let printer = thread::spawn(move || {
        for report in rx {
            if json {
                match serde_json::to_string(&report) {
                    Ok(line) => println!("{}", line),
                    Err(e) => eprintln!("failed to encode report: {}", e),
                }
            } else {
                print_report(&report);
            }
        }
    });

    let summary = network.train(&mut training, &data.test, &data.validation, &mut rng, Some(&tx));
    drop(tx);
    if printer.join().is_err() {
        eprintln!("report printer panicked");
    }
    let summary = summary?;

    println!(
        "Finished. Test: {} / {} = {:.2}%  (mean cost {:.6})",
        summary.test.correct,
        summary.test.total,
        100.0 * summary.test.accuracy(),
        summary.test.mean_loss
    );
    Ok(())
}

fn print_report(report: &EpochReport) {
    println!("Epoch {} of {}:", report.epoch, report.total_epochs);
    println!("\tTraining:");
    println!(
        "\t\t{} / {}\t= {:.2}%",
        report.training_correct,
        report.training_size,
        100.0 * report.training_accuracy()
    );
    println!("\t\t{:.6}", report.training_loss);
    println!("\tValidation:");
    println!(
        "\t\t{} / {}\t= {:.2}%",
        report.validation_correct,
        report.validation_size,
        100.0 * report.validation_accuracy()
    );
    println!("\t\t{:.6}", report.validation_loss);
    println!();
}
