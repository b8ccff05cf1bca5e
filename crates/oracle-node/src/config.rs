//! Node configuration loaded from TOML.
//!
//! ```toml
//! store_path = "data/node.orj"
//! ledger_key = "near"
//!
//! [token]
//! symbol = "NEAR"
//! decimals = 24
//! contract_id = "wrap.near"
//!
//! [stake]
//! max_stake_amount = "2500000000000000000000000"
//! balance_divider = "0.5"
//! ```
//!
//! Amounts are decimal strings; whole numbers may also be written as integers.

use std::fs;
use std::path::{Path, PathBuf};

use oracle_core::Amount;
use oracle_ledger::Balance;
use oracle_store::{JournalStore, StoreError, WriteOptions};
use serde::Deserialize;

use crate::errors::ConfigError;

/// Token the ledger is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenConfig {
    /// Display symbol.
    pub symbol: String,
    /// Decimals of the base unit.
    pub decimals: u32,
    /// Token contract.
    pub contract_id: String,
}

/// Stake sizing limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StakeSettings {
    /// Upper bound of a single stake, in base units.
    pub max_stake_amount: Amount,
    /// Fraction of the balance staked when it cannot cover a full bond.
    #[serde(default = "Amount::one")]
    pub balance_divider: Amount,
}

impl StakeSettings {
    /// Settings with the default divider of `1`.
    pub fn new(max_stake_amount: Amount) -> Self {
        Self {
            max_stake_amount,
            balance_divider: Amount::one(),
        }
    }

    /// Checks the divider lies in `(0, 1]` and the cap is at least one unit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.balance_divider.is_positive() || self.balance_divider > Amount::one() {
            return Err(ConfigError::Invalid(format!(
                "balance_divider must be in (0, 1], got {}",
                self.balance_divider
            )));
        }
        if self.max_stake_amount < Amount::one() {
            return Err(ConfigError::Invalid(format!(
                "max_stake_amount must be at least 1, got {}",
                self.max_stake_amount
            )));
        }
        Ok(())
    }
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// Journal file backing the document store.
    pub store_path: PathBuf,
    /// Key the ledger is stored under.
    pub ledger_key: String,
    /// Ledger token.
    pub token: TokenConfig,
    /// Stake sizing.
    pub stake: StakeSettings,
}

impl NodeConfig {
    /// Parses and validates a configuration.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration at `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger_key.is_empty() {
            return Err(ConfigError::Invalid("ledger_key must not be empty".to_string()));
        }
        self.stake.validate()
    }

    /// Opens the configured journal store.
    pub fn open_store(&self) -> Result<JournalStore, StoreError> {
        JournalStore::open(&self.store_path, WriteOptions::default())
    }

    /// An empty ledger for the configured key and token.
    pub fn new_ledger(&self) -> Balance {
        Balance::new(
            self.ledger_key.clone(),
            self.token.symbol.clone(),
            self.token.decimals,
            self.token.contract_id.clone(),
        )
    }
}
