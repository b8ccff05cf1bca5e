use thiserror::Error;

/// Errors produced while reading amounts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The value is not a plain decimal string.
    #[error("invalid decimal amount: '{0}'")]
    Invalid(String),
}

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Amount parsing failed.
    #[error("amount error: {0}")]
    Amount(#[from] AmountError),
    /// A data request document could not be decoded.
    #[error("invalid data request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}
