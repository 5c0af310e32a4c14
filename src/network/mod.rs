pub mod evaluation;
pub mod gradients;
pub mod network;

pub use evaluation::Evaluation;
pub use gradients::{Gradients, LayerGradients};
pub use network::Network;
