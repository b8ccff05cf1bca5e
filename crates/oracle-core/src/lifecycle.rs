use chrono::{DateTime, Utc};

use crate::amount::Amount;
use crate::outcome::derive_outcome;
use crate::request::{DataRequest, RequestConfig};
use crate::stake::{CanStake, StakeError};

/// Decides whether this node may stake on `request` now.
///
/// Checks run in a fixed order and the first refusal wins:
/// arbitrator, execution, finalization, own stake in the current round,
/// previous round already bonded on this node's outcome.
pub fn can_stake_on_request(request: &DataRequest) -> CanStake {
    if request.final_arbitrator_triggered {
        return CanStake::reject(StakeError::FinalArbitratorTriggered);
    }

    if request.execute_result.is_none() {
        return CanStake::reject(StakeError::NotExecuted);
    }

    if request.finalized_outcome.is_some() {
        return CanStake::reject(StakeError::AlreadyFinalized);
    }

    // first stake ever on this request
    let Some(current) = request.current_window() else {
        return CanStake::accept();
    };

    if request.has_staked_in(current.round) {
        return CanStake::reject(StakeError::AlreadyStaked);
    }

    if let Some(bonded) = request
        .previous_window()
        .and_then(|window| window.bonded_outcome.as_ref())
    {
        if *bonded == derive_outcome(request) {
            return CanStake::reject(StakeError::AlreadyBonded);
        }
    }

    CanStake::accept()
}

/// Bond required to open a new round for `config`.
///
/// The larger of validity bond and paid fee, scaled by the stake multiplier
/// (basis points, rounded half-up to whole units) and doubled.
pub fn window_bond_size(config: &RequestConfig) -> Amount {
    let mut bond = config
        .validity_bond
        .clone()
        .max_of(config.paid_fee.clone());

    if let Some(multiplier) = config.stake_multiplier {
        bond = bond.apply_basis_points(multiplier).round_half_up();
    }

    &bond + &bond
}

/// Amount this node should stake on `request`.
///
/// Targets the current window's bond (or a fresh window's bond), clamped to
/// `[1, max_amount]`. When the balance cannot cover the target, stakes
/// `available_balance * balance_divider` rounded down instead so funds spread
/// across requests.
pub fn stake_amount(
    request: &DataRequest,
    available_balance: &Amount,
    max_amount: &Amount,
    balance_divider: &Amount,
) -> Amount {
    let target = match request.current_window() {
        Some(window) => window.bond_size.clone(),
        None => window_bond_size(&request.config),
    };

    let clamped = target.clamp_between(&Amount::one(), max_amount);

    if &clamped > available_balance {
        return (available_balance * balance_divider).round_down();
    }

    clamped
}

/// Whether `request` can be finalized at `now`.
pub fn is_request_finalizable_at(request: &DataRequest, now: DateTime<Utc>) -> bool {
    let Some(current) = request.current_window() else {
        return false;
    };

    if request.finalized_outcome.is_some() || request.final_arbitrator_triggered {
        return false;
    }

    // round 0 must be bonded
    if request.resolution_windows.len() < 2 {
        return false;
    }

    if request.execute_result.is_none() {
        return false;
    }

    // disagreement leaves room to dispute instead
    if let Some(bonded) = request
        .previous_window()
        .and_then(|window| window.bonded_outcome.as_ref())
    {
        if *bonded != derive_outcome(request) {
            return false;
        }
    }

    current.has_ended(now)
}

/// Whether `request` can be finalized now.
pub fn is_request_finalizable(request: &DataRequest) -> bool {
    is_request_finalizable_at(request, Utc::now())
}

/// Whether this node can claim its share of `request` at `now`.
pub fn is_request_claimable_at(request: &DataRequest, now: DateTime<Utc>) -> bool {
    let Some(current) = request.current_window() else {
        return false;
    };

    if request.staking.is_empty() || request.claimed_amount.is_some() {
        return false;
    }

    if request.resolution_windows.len() < 2 {
        return false;
    }

    current.has_ended(now)
}

/// Whether this node can claim its share of `request` now.
pub fn is_request_claimable(request: &DataRequest) -> bool {
    is_request_claimable_at(request, Utc::now())
}

/// Whether local state for `request` can be dropped at `now`.
pub fn is_request_deletable_at(request: &DataRequest, now: DateTime<Utc>) -> bool {
    if request.claimed_amount.is_some() || request.final_arbitrator_triggered {
        return true;
    }

    request.finalized_outcome.is_some() && !is_request_claimable_at(request, now)
}

/// Whether local state for `request` can be dropped now.
pub fn is_request_deletable(request: &DataRequest) -> bool {
    is_request_deletable_at(request, Utc::now())
}

/// Requests are executable as soon as they are seen; there are no settlement times.
pub fn is_request_executable(_request: &DataRequest) -> bool {
    true
}
