use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::errors::CoreError;
use crate::execute::ExecuteResult;
use crate::outcome::Outcome;
use crate::stake::StakeRecord;
use crate::window::ResolutionWindow;

/// Bonding parameters of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    /// Bond the requester posted.
    pub validity_bond: Amount,
    /// Fee paid for answering.
    pub paid_fee: Amount,
    /// Stake multiplier in basis points (`10_500` = 105%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake_multiplier: Option<u32>,
    /// Lowest bond accepted for later rounds.
    #[serde(default)]
    pub min_resolution_bond: Amount,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            validity_bond: Amount::zero(),
            paid_fee: Amount::zero(),
            stake_multiplier: None,
            min_resolution_bond: Amount::zero(),
        }
    }
}

/// Source the request's task reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    /// Endpoint to query.
    pub end_point: String,
    /// Path into the endpoint's response.
    pub source_path: String,
}

/// A contested data request as tracked by this node.
///
/// `resolution_windows` is ordered by ascending round; the last entry is the
/// current window. `staking` only ever holds this node's own stakes. Once
/// `claimed_amount` is set the request is terminal for this node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    /// Request id on the provider.
    pub id: String,
    /// Storage key, see [`build_internal_id`].
    pub internal_id: String,
    /// Provider the request came from.
    pub provider_id: String,
    /// Allowed answers; empty accepts any answer.
    #[serde(default)]
    pub outcomes: Vec<String>,
    /// Sources consulted by the task.
    #[serde(default)]
    pub sources: Vec<RequestInfo>,
    /// Bonding rounds, oldest first.
    #[serde(default)]
    pub resolution_windows: Vec<ResolutionWindow>,
    /// An off-protocol authority has taken over.
    #[serde(default)]
    pub final_arbitrator_triggered: bool,
    /// Result of the node's execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_result: Option<ExecuteResult>,
    /// This node's own successful stakes.
    #[serde(default)]
    pub staking: Vec<StakeRecord>,
    /// Final answer accepted by the protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_outcome: Option<Outcome>,
    /// Amount this node claimed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_amount: Option<Amount>,
    /// Bonding parameters.
    pub config: RequestConfig,
    /// Free-form requester metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl DataRequest {
    /// Creates a request with no rounds, stakes or results.
    ///
    /// The internal id is built without a contract component; providers that
    /// track several contracts overwrite it with [`build_internal_id`].
    pub fn new(id: impl Into<String>, provider_id: impl Into<String>, config: RequestConfig) -> Self {
        let id = id.into();
        let provider_id = provider_id.into();
        Self {
            internal_id: format!("{}_{}", id, provider_id),
            id,
            provider_id,
            outcomes: Vec::new(),
            sources: Vec::new(),
            resolution_windows: Vec::new(),
            final_arbitrator_triggered: false,
            execute_result: None,
            staking: Vec::new(),
            finalized_outcome: None,
            claimed_amount: None,
            config,
            metadata: None,
        }
    }

    /// Decodes a request from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The current (latest) window.
    pub fn current_window(&self) -> Option<&ResolutionWindow> {
        self.resolution_windows.last()
    }

    /// The window before the current one.
    pub fn previous_window(&self) -> Option<&ResolutionWindow> {
        let len = self.resolution_windows.len();
        if len < 2 {
            return None;
        }
        self.resolution_windows.get(len - 2)
    }

    /// True if this node staked in `round`.
    pub fn has_staked_in(&self, round: u64) -> bool {
        self.staking.iter().any(|stake| stake.round_id == round)
    }

    /// Sum of this node's recorded stakes.
    pub fn total_staked(&self) -> Amount {
        self.staking.iter().map(|stake| &stake.amount).sum()
    }
}

/// Builds the storage key `"{id}_{provider}_{contract}"`.
pub fn build_internal_id(id: &str, provider: &str, contract: &str) -> String {
    format!("{}_{}_{}", id, provider, contract)
}

/// Reconciles a cached request with a fresh on-chain snapshot.
///
/// Only protocol-global state is taken from `remote`: the windows, the final
/// outcome, the arbitrator flag and the paid fee. Everything else, notably the
/// node's own stake history, is kept from `local`.
///
/// The paid fee lives in [`RequestConfig`], so that is where it is refreshed.
pub fn merge_requests(local: &DataRequest, remote: &DataRequest) -> DataRequest {
    let mut merged = local.clone();
    merged.resolution_windows = remote.resolution_windows.clone();
    merged.finalized_outcome = remote.finalized_outcome.clone();
    merged.final_arbitrator_triggered = remote.final_arbitrator_triggered;
    merged.config.paid_fee = remote.config.paid_fee.clone();
    merged
}
