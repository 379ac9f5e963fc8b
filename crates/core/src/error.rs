use thiserror::Error;

#[derive(Error, Debug)]
pub enum UppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("evaluation failed: {0}")]
    Evaluation(String),
}
