use std::sync::mpsc;

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::activation::{sigmoid_prime_vector, sigmoid_vector};
use crate::data::sample::LabeledSample;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::math::{Matrix, Vector};
use crate::network::evaluation::Evaluation;
use crate::network::gradients::{Gradients, LayerGradients};
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochReport, TrainingSummary};
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainingConfig;

/// A fully-connected sigmoid network.
///
/// `layer_sizes` includes the input layer, so a network with `L` weight
/// layers has `L + 1` sizes. `layers[i]` maps the activations of size
/// `layer_sizes[i]` to those of size `layer_sizes[i + 1]`; the input layer
/// carries no parameters. Parameter shapes never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Vec<usize>,
    layers: Vec<Layer>,
    config: TrainingConfig,
}

impl Network {
    /// Builds a randomly initialized network.
    ///
    /// Biases are drawn from N(0, 1) and weights from N(0, 1/sqrt(fan_in)).
    pub fn new<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        config: TrainingConfig,
        rng: &mut R,
    ) -> Result<Network> {
        validate_layout(layer_sizes)?;
        config.validate()?;

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], rng))
            .collect();

        debug!(?layer_sizes, ?config, "network initialized");

        Ok(Network {
            layer_sizes: layer_sizes.to_vec(),
            layers,
            config,
        })
    }

    /// Builds a network from explicit parameters.
    ///
    /// `weights[i]` must have shape `(layer_sizes[i + 1], layer_sizes[i])` and
    /// `biases[i]` length `layer_sizes[i + 1]`.
    pub fn from_parameters(
        layer_sizes: &[usize],
        weights: Vec<Matrix>,
        biases: Vec<Vector>,
        config: TrainingConfig,
    ) -> Result<Network> {
        validate_layout(layer_sizes)?;
        config.validate()?;

        let expected_layers = layer_sizes.len() - 1;
        check_width("weight layer count", expected_layers, weights.len())?;
        check_width("bias layer count", expected_layers, biases.len())?;

        let mut layers = Vec::with_capacity(expected_layers);
        for (i, (w, b)) in weights.into_iter().zip(biases).enumerate() {
            let (rows, cols) = w.shape();
            check_width(&format!("layer {} weight rows", i + 1), layer_sizes[i + 1], rows)?;
            check_width(&format!("layer {} weight columns", i + 1), layer_sizes[i], cols)?;
            check_width(&format!("layer {} biases", i + 1), layer_sizes[i + 1], b.len())?;
            layers.push(Layer::from_parameters(w, b));
        }

        Ok(Network {
            layer_sizes: layer_sizes.to_vec(),
            layers,
            config,
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Output activations for `input`.
    pub fn feedforward(&self, input: &Vector) -> Result<Vector> {
        check_width("feedforward input", self.input_size(), input.len())?;
        Ok(self.feedforward_unchecked(input))
    }

    /// Gradient of the cost for one sample w.r.t. every weight and bias.
    pub fn backprop(&self, sample: &LabeledSample) -> Result<Gradients> {
        self.check_sample(sample, "backprop sample")?;
        Ok(self.backprop_unchecked(sample))
    }

    /// Sums `backprop` over `batch` and applies one regularized SGD step.
    ///
    /// `training_size` is the size of the whole training set; it scales the
    /// L2 weight decay.
    pub fn update_mini_batch(
        &mut self,
        batch: &[LabeledSample],
        training_size: usize,
    ) -> Result<()> {
        if batch.is_empty() {
            return Err(NetworkError::EmptyDataset("mini-batch"));
        }
        if training_size == 0 {
            return Err(NetworkError::EmptyDataset("training set"));
        }
        self.check_samples(batch, "mini-batch sample")?;
        self.update_mini_batch_unchecked(batch, training_size);
        Ok(())
    }

    /// Counts correct predictions and averages the cost over `data`.
    pub fn evaluate(&self, data: &[LabeledSample]) -> Result<Evaluation> {
        self.check_samples(data, "evaluation sample")?;
        Ok(self.evaluate_unchecked(data))
    }

    /// Runs the full epoch loop; see `train::loop_fn::train_loop`.
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        training: &mut [LabeledSample],
        test: &[LabeledSample],
        validation: &[LabeledSample],
        rng: &mut R,
        progress: Option<&mpsc::Sender<EpochReport>>,
    ) -> Result<TrainingSummary> {
        train_loop(self, training, test, validation, rng, progress)
    }

    /// Shape check for every sample in `data`.
    pub fn check_samples(&self, data: &[LabeledSample], context: &str) -> Result<()> {
        data.iter()
            .try_for_each(|sample| self.check_sample(sample, context))
    }

    pub(crate) fn update_mini_batch_unchecked(
        &mut self,
        batch: &[LabeledSample],
        training_size: usize,
    ) {
        let nabla = if self.config.parallel {
            // Per-worker accumulators, merged once at the end.
            let this = &*self;
            batch
                .par_iter()
                .fold(
                    || Gradients::zeros_like(&this.layers),
                    |mut acc, sample| {
                        acc.accumulate(&this.backprop_unchecked(sample));
                        acc
                    },
                )
                .reduce(|| Gradients::zeros_like(&this.layers), Gradients::merge)
        } else {
            let mut acc = Gradients::zeros_like(&self.layers);
            for sample in batch {
                acc.accumulate(&self.backprop_unchecked(sample));
            }
            acc
        };

        let sgd = Sgd::new(self.config.eta, self.config.lambda);
        for (layer, grads) in self.layers.iter_mut().zip(nabla.layers.iter()) {
            sgd.step(layer, grads, batch.len(), training_size);
        }
    }

    pub(crate) fn evaluate_unchecked(&self, data: &[LabeledSample]) -> Evaluation {
        let mut correct = 0;
        let mut summed_cost = 0.0;

        for sample in data {
            let output = self.feedforward_unchecked(&sample.input);
            if output.argmax() == sample.target.argmax() {
                correct += 1;
            }
            summed_cost += self.config.cost_function.loss(&output, &sample.target);
        }

        let mean_loss = if data.is_empty() {
            0.0
        } else {
            summed_cost / data.len() as f64
        };

        Evaluation {
            correct,
            total: data.len(),
            mean_loss,
        }
    }

    fn feedforward_unchecked(&self, input: &Vector) -> Vector {
        let mut activation = input.clone();
        for layer in &self.layers {
            activation = layer.feed_from(&activation);
        }
        activation
    }

    fn backprop_unchecked(&self, sample: &LabeledSample) -> Gradients {
        let n_layers = self.layers.len();

        // Forward pass keeping every weighted input z and activation a.
        // activations[0] is the input; activations[i + 1] is layers[i]'s output.
        let mut activations = Vec::with_capacity(n_layers + 1);
        let mut zs = Vec::with_capacity(n_layers);
        activations.push(sample.input.clone());
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.weighted_input(&activations[i]);
            activations.push(sigmoid_vector(&z));
            zs.push(z);
        }

        // Output error, then propagate backwards:
        //   δ[i] = (W[i + 1]ᵀ · δ[i + 1]) ⊙ σ'(z[i])
        let mut deltas = vec![Vector::default(); n_layers];
        deltas[n_layers - 1] = self.config.cost_function.output_error(
            &zs[n_layers - 1],
            &activations[n_layers],
            &sample.target,
        );
        for i in (0..n_layers - 1).rev() {
            let propagated = self.layers[i + 1].weights().transpose_multiply(&deltas[i + 1]);
            deltas[i] = Vector::hadamard(&propagated, &sigmoid_prime_vector(&zs[i]));
        }

        // ∂C/∂w[k][j] = a_prev[j] · δ[k]
        let layers = deltas
            .into_iter()
            .zip(activations.iter())
            .map(|(delta, a_prev)| LayerGradients {
                weights: Matrix::outer(&delta, a_prev),
                biases: delta,
            })
            .collect();

        Gradients { layers }
    }

    fn check_sample(&self, sample: &LabeledSample, context: &str) -> Result<()> {
        check_width(&format!("{} input", context), self.input_size(), sample.input.len())?;
        check_width(&format!("{} target", context), self.output_size(), sample.target.len())
    }
}

fn validate_layout(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetworkError::InvalidLayout {
            sizes: layer_sizes.to_vec(),
            reason: "need at least an input and an output layer".into(),
        });
    }
    if let Some(i) = layer_sizes.iter().position(|&s| s == 0) {
        return Err(NetworkError::InvalidLayout {
            sizes: layer_sizes.to_vec(),
            reason: format!("layer {} has zero width", i),
        });
    }
    Ok(())
}

fn check_width(context: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch {
            context: context.to_string(),
            expected,
            actual,
        })
    }
}
