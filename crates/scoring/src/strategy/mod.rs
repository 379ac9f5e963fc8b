//! Strategy comparison: sample generation, descriptive statistics, and
//! ratio-based ranking across the fixed strategy set.

pub mod evaluator;
pub mod stats;
pub mod synth;

pub use evaluator::{evaluate, Evaluation, StrategyResult};
pub use synth::BaseProfile;
