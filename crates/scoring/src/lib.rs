pub mod engagement;
pub mod fidelity;
pub mod strategy;

pub use engagement::Decision;
pub use strategy::evaluator::{Evaluation, StrategyResult, DEFAULT_ITERATIONS};
