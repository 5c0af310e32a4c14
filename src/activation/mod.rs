pub mod sigmoid;

pub use sigmoid::{sigmoid, sigmoid_prime, sigmoid_prime_vector, sigmoid_vector};
