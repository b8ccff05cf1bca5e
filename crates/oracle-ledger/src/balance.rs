use std::collections::BTreeMap;

use oracle_core::Amount;
use oracle_store::{DocumentStore, TABLE_BALANCES};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Persisted form of a [`Balance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDoc {
    /// Available balance.
    pub balance: Amount,
    /// Accumulated profit.
    pub profit: Amount,
    /// Token symbol.
    pub symbol: String,
    /// Token decimals.
    pub decimals: u32,
    /// Token contract.
    pub contract_id: String,
    /// Locked amount per request id.
    #[serde(default)]
    pub stakes: BTreeMap<String, Amount>,
}

/// Token ledger of one node for one token contract.
///
/// Staking moves funds out of `balance` into the per-request `stakes` map;
/// unstaking moves them back. `balance` never goes below zero through
/// [`withdraw`](Balance::withdraw) or [`stake`](Balance::stake), and a failed
/// call leaves the ledger untouched.
///
/// The ledger does no locking. Callers serialize mutations of one ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    key: String,
    balance: Amount,
    profit: Amount,
    stakes: BTreeMap<String, Amount>,
    symbol: String,
    decimals: u32,
    contract_id: String,
}

impl Balance {
    /// Creates an empty ledger stored under `key`.
    pub fn new(
        key: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u32,
        contract_id: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            balance: Amount::zero(),
            profit: Amount::zero(),
            stakes: BTreeMap::new(),
            symbol: symbol.into(),
            decimals,
            contract_id: contract_id.into(),
        }
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Available balance.
    pub fn balance(&self) -> &Amount {
        &self.balance
    }

    /// Accumulated profit.
    pub fn profit(&self) -> &Amount {
        &self.profit
    }

    /// Locked amount per request id.
    pub fn stakes(&self) -> &BTreeMap<String, Amount> {
        &self.stakes
    }

    /// Locked amount for one request.
    pub fn stake_of(&self, request_id: &str) -> Option<&Amount> {
        self.stakes.get(request_id)
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Token decimals.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Token contract.
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Total currently locked across all requests.
    pub fn amount_staked(&self) -> Amount {
        self.stakes.values().sum()
    }

    /// Adds `amount` to the available balance.
    pub fn deposit(&mut self, amount: &Amount) {
        self.balance = &self.balance + amount;
    }

    /// Removes `amount` from the available balance.
    ///
    /// Returns false, changing nothing, if the balance would go negative.
    pub fn withdraw(&mut self, amount: &Amount) -> bool {
        let remaining = &self.balance - amount;
        if remaining.is_negative() {
            tracing::debug!(
                key = %self.key,
                requested = %amount,
                available = %self.balance,
                "withdraw refused"
            );
            return false;
        }
        self.balance = remaining;
        true
    }

    /// Locks `amount` for `request_id`, adding to any existing stake.
    ///
    /// Returns false, changing nothing, for a non-positive amount or when the
    /// balance cannot cover it.
    pub fn stake(&mut self, request_id: &str, amount: &Amount) -> bool {
        if !amount.is_positive() {
            return false;
        }
        if !self.withdraw(amount) {
            return false;
        }

        let locked = match self.stakes.get(request_id) {
            Some(existing) => existing + amount,
            None => amount.clone(),
        };
        self.stakes.insert(request_id.to_string(), locked);
        true
    }

    /// Locks as much of `amount` as the balance covers and returns what was
    /// locked, which is zero when nothing could be.
    ///
    /// Used when the chain has already taken a stake, so refusing outright
    /// would leave the ledger out of step with it.
    pub fn stake_available(&mut self, request_id: &str, amount: &Amount) -> Amount {
        let covered = if amount > &self.balance {
            self.balance.clone()
        } else {
            amount.clone()
        };
        if self.stake(request_id, &covered) {
            covered
        } else {
            Amount::zero()
        }
    }

    /// Releases `amount` of the stake on `request_id` back into the balance.
    ///
    /// The entry is removed once it reaches zero. The full `amount` is
    /// credited even when it exceeds what was locked for the request.
    pub fn unstake(&mut self, request_id: &str, amount: &Amount) {
        let locked = self.stakes.get(request_id).cloned().unwrap_or_default();
        if amount > &locked {
            // TODO: decide whether to clamp to the locked amount once providers report exact refunds
            tracing::warn!(
                key = %self.key,
                request_id,
                locked = %locked,
                released = %amount,
                "unstaking more than was locked"
            );
        }

        let remaining = &locked - amount;
        if remaining.is_positive() {
            self.stakes.insert(request_id.to_string(), remaining);
        } else {
            self.stakes.remove(request_id);
        }

        self.deposit(amount);
    }

    /// Drops the stake on `request_id` without returning funds.
    ///
    /// Returns the forfeited amount, if any was locked.
    pub fn slash_self(&mut self, request_id: &str) -> Option<Amount> {
        let slashed = self.stakes.remove(request_id);
        if let Some(amount) = &slashed {
            tracing::info!(key = %self.key, request_id, amount = %amount, "stake slashed");
        }
        slashed
    }

    /// Books a reward: credited to both profit and the available balance.
    pub fn add_profit(&mut self, amount: &Amount) {
        self.profit = &self.profit + amount;
        self.deposit(amount);
    }

    /// Snapshot in persisted form.
    pub fn to_doc(&self) -> BalanceDoc {
        BalanceDoc {
            balance: self.balance.clone(),
            profit: self.profit.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            contract_id: self.contract_id.clone(),
            stakes: self.stakes.clone(),
        }
    }

    fn apply_doc(&mut self, doc: BalanceDoc) {
        self.balance = doc.balance;
        self.profit = doc.profit;
        self.symbol = doc.symbol;
        self.decimals = doc.decimals;
        self.contract_id = doc.contract_id;
        self.stakes = doc.stakes;
    }

    /// Loads the ledger stored under this ledger's key.
    ///
    /// Returns `Ok(false)` and keeps the current state when nothing is stored.
    pub fn restore<S: DocumentStore + ?Sized>(&mut self, store: &S) -> Result<bool, LedgerError> {
        let Some(doc) = store.find_document_by_id(TABLE_BALANCES, &self.key)? else {
            tracing::debug!(key = %self.key, "no stored ledger, keeping defaults");
            return Ok(false);
        };

        let doc: BalanceDoc = serde_json::from_value(doc).map_err(|source| LedgerError::Malformed {
            key: self.key.clone(),
            source,
        })?;
        self.apply_doc(doc);
        Ok(true)
    }

    /// Writes the ledger under its key, replacing the stored version.
    pub fn save<S: DocumentStore + ?Sized>(&self, store: &mut S) -> Result<(), LedgerError> {
        let doc = serde_json::to_value(self.to_doc())?;
        store.create_or_update_document(TABLE_BALANCES, &self.key, doc)?;
        Ok(())
    }
}
