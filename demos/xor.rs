use rand::rngs::StdRng;
use rand::SeedableRng;
use sigmoid_net::{CostFunction, LabeledSample, Network, TrainingConfig};

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);

    let config = TrainingConfig::new(0.5, 0.0, 2000, 1, CostFunction::CrossEntropy);
    let mut network = Network::new(&[2, 4, 2], config, &mut rng).expect("valid layout");

    // Class 1 = inputs differ.
    let mut training: Vec<LabeledSample> = [
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
        ([0.0, 1.0], 1),
        ([0.0, 0.0], 0),
    ]
    .iter()
    .map(|(x, class)| LabeledSample::one_hot(x.to_vec(), *class, 2))
    .collect();
    let validation = training.clone();

    let summary = network
        .train(&mut training, &[], &validation, &mut rng, None)
        .expect("training succeeds");

    for report in summary.epochs.iter().filter(|r| r.epoch % 200 == 0) {
        println!(
            "Epoch {}: cost = {:.6}, correct = {}/{}",
            report.epoch, report.training_loss, report.training_correct, report.training_size
        );
    }

    for sample in &validation {
        let output = network.feedforward(&sample.input).expect("input width matches");
        println!(
            "Input: {:?} -> Output: [{:.4}, {:.4}]",
            sample.input.as_slice(),
            output.at(0),
            output.at(1)
        );
    }
}
