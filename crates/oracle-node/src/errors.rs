use thiserror::Error;

/// Failure reported by a provider adapter while fetching chain state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("provider '{provider}': {message}")]
pub struct ProviderError {
    /// Provider id.
    pub provider: String,
    /// Adapter-specific description.
    pub message: String,
}

impl ProviderError {
    /// Creates a provider error.
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while walking a request.
#[derive(Error, Debug)]
pub enum NodeError {
    /// The provider could not be queried.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Persisting the request failed.
    #[error("store error: {0}")]
    Store(#[from] oracle_store::StoreError),
    /// Persisting the ledger failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] oracle_ledger::LedgerError),
}

/// Errors raised while loading node configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for a node configuration.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
