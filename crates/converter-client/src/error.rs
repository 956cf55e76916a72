use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Conversion rejected: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type ConversionResult<T> = Result<T, ConversionError>;
