use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Reasons a stake was refused or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakeError {
    /// The ledger cannot cover the stake.
    NotEnoughBalance,
    /// Unclassified failure.
    Unknown,
    /// The provider does not know the request.
    RequestNotFound,
    /// The previous round already settled on this node's outcome.
    AlreadyBonded,
    /// This node already staked in the current round.
    AlreadyStaked,
    /// The protocol accepted a final answer.
    AlreadyFinalized,
    /// The transaction was rejected or did not land.
    TransactionFailure,
    /// The request has not been executed yet.
    NotExecuted,
    /// An off-protocol arbitrator took over the request.
    FinalArbitratorTriggered,
    /// This node is not allowed to answer the request.
    NotWhitelisted,
    /// The requester answers the request itself.
    FirstPartyRequest,
}

impl StakeError {
    /// Expected outcomes of normal operation; not retried in the same round.
    pub fn is_steady_state(self) -> bool {
        matches!(self, StakeError::AlreadyStaked | StakeError::AlreadyBonded)
    }

    /// Conditions that may clear on a later check without any action.
    pub fn is_wait_and_recheck(self) -> bool {
        matches!(
            self,
            StakeError::NotExecuted | StakeError::FinalArbitratorTriggered
        )
    }

    /// Transient failures the provider may retry.
    pub fn is_retryable(self) -> bool {
        matches!(self, StakeError::TransactionFailure | StakeError::Unknown)
    }
}

/// One of this node's own successful stakes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeRecord {
    /// Round the stake was placed in.
    pub round_id: u64,
    /// Amount locked.
    pub amount: Amount,
}

/// Result of submitting a stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StakeResult {
    /// The stake was accepted.
    Success {
        /// Round the stake landed in.
        #[serde(rename = "roundId")]
        round_id: u64,
        /// Amount locked on-chain.
        amount: Amount,
    },
    /// The stake was not placed.
    Error {
        /// Why.
        reason: StakeError,
    },
}

impl StakeResult {
    /// The stake record for a success, `None` otherwise.
    pub fn record(&self) -> Option<StakeRecord> {
        match self {
            StakeResult::Success { round_id, amount } => Some(StakeRecord {
                round_id: *round_id,
                amount: amount.clone(),
            }),
            StakeResult::Error { .. } => None,
        }
    }

    /// Returns true for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, StakeResult::Success { .. })
    }
}

impl From<StakeError> for StakeResult {
    fn from(reason: StakeError) -> Self {
        StakeResult::Error { reason }
    }
}

/// Reasons a claim failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimError {
    /// The request is not in a claimable state on-chain.
    NotClaimable,
    /// The reward was already withdrawn.
    AlreadyClaimed,
    /// The transaction was rejected or did not land.
    TransactionFailure,
    /// Unclassified failure.
    Unknown,
}

/// Result of claiming a resolved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClaimResult {
    /// Funds were returned to this node.
    Success {
        /// Total amount received (returned stake plus reward).
        amount: Amount,
    },
    /// Nothing was claimed.
    Error {
        /// Why.
        reason: ClaimError,
    },
}

/// Answer of the stake-eligibility gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanStake {
    /// Whether a stake may be placed now.
    pub can_stake: bool,
    /// Why not, when refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StakeError>,
}

impl CanStake {
    pub(crate) fn accept() -> Self {
        Self {
            can_stake: true,
            reason: None,
        }
    }

    pub(crate) fn reject(reason: StakeError) -> Self {
        Self {
            can_stake: false,
            reason: Some(reason),
        }
    }
}
