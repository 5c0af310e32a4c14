pub mod cost_function;
pub mod cross_entropy;
pub mod mse;

pub use cost_function::CostFunction;
pub use cross_entropy::CrossEntropyLoss;
pub use mse::MseLoss;
