//! One pass over a single data request.

use chrono::{DateTime, Utc};
use oracle_core::{
    can_stake_on_request, derive_outcome, is_request_claimable_at, is_request_deletable_at,
    is_request_executable, is_request_finalizable_at, merge_requests, stake_amount, ClaimResult,
    DataRequest, StakeError, StakeResult,
};
use oracle_ledger::Balance;
use oracle_store::{delete_request, save_request, DocumentStore};
use serde::Serialize;

use crate::config::StakeSettings;
use crate::errors::NodeError;
use crate::provider::Provider;

/// What a walk did to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkReport {
    /// Storage key of the request.
    pub internal_id: String,
    /// Whether a fresh snapshot was merged in.
    pub refreshed: bool,
    /// Whether local state was dropped. Nothing else runs after a delete.
    pub deleted: bool,
    /// Why no stake was attempted, when the gate refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake_refused: Option<StakeError>,
    /// Provider answer for a submitted stake.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake: Option<StakeResult>,
    /// Whether finalization landed, when attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized: Option<bool>,
    /// Provider answer for a submitted claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<ClaimResult>,
}

impl WalkReport {
    fn new(internal_id: &str) -> Self {
        Self {
            internal_id: internal_id.to_string(),
            refreshed: false,
            deleted: false,
            stake_refused: None,
            stake: None,
            finalized: None,
            claim: None,
        }
    }
}

/// Advances `request` by one step against the chain.
///
/// Refreshes it from `provider`, then either drops it or runs stake,
/// finalize and claim in that order, each gated by its predicate at `now`.
/// Dropping a request forfeits whatever stake the ledger still holds for it.
/// The updated request and ledger are persisted before returning.
///
/// Calls for the same request or ledger must not overlap.
pub fn walk_request<P, S>(
    request: DataRequest,
    provider: &mut P,
    ledger: &mut Balance,
    store: &mut S,
    settings: &StakeSettings,
    now: DateTime<Utc>,
) -> Result<WalkReport, NodeError>
where
    P: Provider + ?Sized,
    S: DocumentStore + ?Sized,
{
    let mut request = request;
    let mut report = WalkReport::new(&request.internal_id);

    match provider.get_data_request_by_id(&request.id)? {
        Some(remote) => {
            request = merge_requests(&request, &remote);
            report.refreshed = true;
        }
        None => tracing::warn!(
            provider = provider.id(),
            request_id = %request.id,
            "request unknown to provider, using cached state"
        ),
    }

    if is_request_deletable_at(&request, now) {
        if let Some(lost) = ledger.slash_self(&request.internal_id) {
            tracing::warn!(
                internal_id = %request.internal_id,
                lost = %lost,
                "request deleted with a stake still locked"
            );
        }
        delete_request(store, &request.internal_id)?;
        ledger.save(store)?;
        tracing::info!(internal_id = %request.internal_id, "request deleted");
        report.deleted = true;
        return Ok(report);
    }

    if is_request_executable(&request) {
        try_stake(&mut request, provider, ledger, settings, &mut report);
    }

    if is_request_finalizable_at(&request, now) {
        let landed = provider.finalize(&request);
        tracing::info!(internal_id = %request.internal_id, landed, "finalize submitted");
        report.finalized = Some(landed);
    }

    if is_request_claimable_at(&request, now) {
        let result = provider.claim(&request);
        settle_claim(&mut request, ledger, &result);
        report.claim = Some(result);
    }

    save_request(store, &request)?;
    ledger.save(store)?;

    Ok(report)
}

fn try_stake<P: Provider + ?Sized>(
    request: &mut DataRequest,
    provider: &mut P,
    ledger: &mut Balance,
    settings: &StakeSettings,
    report: &mut WalkReport,
) {
    let verdict = can_stake_on_request(request);
    if !verdict.can_stake {
        tracing::debug!(
            internal_id = %request.internal_id,
            reason = ?verdict.reason,
            "not staking"
        );
        report.stake_refused = verdict.reason;
        return;
    }

    let amount = stake_amount(
        request,
        ledger.balance(),
        &settings.max_stake_amount,
        &settings.balance_divider,
    );
    if !amount.is_positive() || &amount > ledger.balance() {
        tracing::info!(
            internal_id = %request.internal_id,
            amount = %amount,
            balance = %ledger.balance(),
            "insufficient balance to stake"
        );
        return;
    }

    let outcome = derive_outcome(request);
    let result = provider.stake(request, &outcome, &amount);

    match result.record() {
        Some(record) => {
            let locked = ledger.stake_available(&request.internal_id, &record.amount);
            if locked < record.amount {
                tracing::warn!(
                    internal_id = %request.internal_id,
                    amount = %record.amount,
                    locked = %locked,
                    "provider accepted a stake the ledger cannot fully cover"
                );
            }
            tracing::info!(
                internal_id = %request.internal_id,
                round = record.round_id,
                amount = %record.amount,
                "stake placed"
            );
            request.staking.push(record);
        }
        None => {
            if let StakeResult::Error { reason } = &result {
                tracing::info!(
                    internal_id = %request.internal_id,
                    reason = ?reason,
                    retryable = reason.is_retryable(),
                    "stake rejected"
                );
            }
        }
    }

    report.stake = Some(result);
}

fn settle_claim(request: &mut DataRequest, ledger: &mut Balance, result: &ClaimResult) {
    let received = match result {
        ClaimResult::Success { amount } => amount,
        ClaimResult::Error { reason } => {
            tracing::warn!(internal_id = %request.internal_id, reason = ?reason, "claim failed");
            return;
        }
    };

    // Only the locked part of the stake ever left the balance, so only that
    // part is released. Profit is measured against the on-chain total.
    let staked = request.total_staked();
    let locked = ledger
        .stake_of(&request.internal_id)
        .cloned()
        .unwrap_or_default();
    request.claimed_amount = Some(received.clone());

    if received >= &staked {
        ledger.unstake(&request.internal_id, &locked);
        let profit = received - &staked;
        if profit.is_positive() {
            ledger.add_profit(&profit);
        }
        tracing::info!(
            internal_id = %request.internal_id,
            staked = %staked,
            profit = %profit,
            "claim settled"
        );
    } else {
        let refund = if received < &locked { received } else { &locked };
        ledger.unstake(&request.internal_id, refund);
        let lost = ledger.slash_self(&request.internal_id);
        tracing::info!(
            internal_id = %request.internal_id,
            staked = %staked,
            received = %received,
            lost = ?lost.map(|amount| amount.to_string()),
            "claim settled at a loss"
        );
    }
}
