use thiserror::Error;

/// Failures a classifier implementation can report for a single pass.
///
/// None of these abort a recognition cycle: the sampler logs the failure
/// and carries on with whatever sets it managed to collect.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;
