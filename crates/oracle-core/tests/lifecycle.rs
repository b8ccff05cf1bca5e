use chrono::{DateTime, Duration, TimeZone, Utc};
use oracle_core::{
    build_internal_id, can_stake_on_request, is_request_claimable_at, is_request_deletable_at,
    is_request_executable, is_request_finalizable_at, merge_requests, stake_amount,
    window_bond_size, Amount, DataRequest, ExecuteResult, Outcome, RequestConfig,
    ResolutionWindow, StakeError, StakeRecord,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn past() -> DateTime<Utc> {
    now() - Duration::hours(1)
}

fn future() -> DateTime<Utc> {
    now() + Duration::hours(1)
}

fn amount(s: &str) -> Amount {
    Amount::parse(s).unwrap()
}

// Whole tokens expressed in base units with 24 decimals.
fn tokens(whole: &str) -> Amount {
    let base = amount("1000000000000000000000000");
    &amount(whole) * &base
}

fn make_config(validity_bond: &str, paid_fee: &str) -> RequestConfig {
    RequestConfig {
        validity_bond: amount(validity_bond),
        paid_fee: amount(paid_fee),
        stake_multiplier: None,
        min_resolution_bond: amount("100000000000000000000"),
    }
}

fn make_request() -> DataRequest {
    DataRequest::new("1", "near", make_config("0", "0"))
}

fn window(round: u64, bond: &str, end: DateTime<Utc>) -> ResolutionWindow {
    ResolutionWindow::new(round, amount(bond), end)
}

fn stake(round: u64, value: &str) -> StakeRecord {
    StakeRecord {
        round_id: round,
        amount: amount(value),
    }
}

fn executed(data: &str) -> Option<ExecuteResult> {
    Some(ExecuteResult::success(data, 0))
}

// ---------------------------------------------------------------------------
// bond and stake sizing
// ---------------------------------------------------------------------------

#[test]
fn bond_size_of_empty_config_is_zero() {
    assert_eq!(window_bond_size(&make_config("0", "0")).to_string(), "0");
}

#[test]
fn bond_size_doubles_the_larger_of_bond_and_fee() {
    let bond = window_bond_size(&make_config("1000000000000000000000000", "0"));
    assert_eq!(bond.to_string(), "2000000000000000000000000");

    let fee = window_bond_size(&make_config(
        "1000000000000000000000000",
        "2000000000000000000000000",
    ));
    assert_eq!(fee.to_string(), "4000000000000000000000000");
}

#[test]
fn bond_size_applies_multiplier_before_doubling() {
    let mut config = make_config("1000000000000000000000000", "0");
    config.stake_multiplier = Some(10_500);

    assert_eq!(window_bond_size(&config).to_string(), "2100000000000000000000000");
}

#[test]
fn bond_size_multiplier_rounds_half_up() {
    let mut config = make_config("3", "0");
    config.stake_multiplier = Some(15_000);

    // 3 * 1.5 = 4.5 -> 5, doubled
    assert_eq!(window_bond_size(&config).to_string(), "10");
}

#[test]
fn stake_amount_never_drops_below_one() {
    let request = make_request();
    let staked = stake_amount(&request, &tokens("10"), &tokens("8"), &Amount::one());

    assert_eq!(staked.to_string(), "1");
}

#[test]
fn stake_amount_is_zero_with_empty_balance() {
    let mut request = make_request();
    request.config = make_config("5000000000000000000000000", "0");

    let staked = stake_amount(&request, &tokens("0"), &tokens("8"), &Amount::one());

    assert_eq!(staked.to_string(), "0");
}

#[test]
fn stake_amount_uses_whole_balance_when_bond_is_too_high() {
    let mut request = make_request();
    request.config = make_config("5000000000000000000000000", "0");

    let staked = stake_amount(&request, &tokens("3"), &tokens("20"), &Amount::one());

    assert_eq!(staked.to_string(), "3000000000000000000000000");
}

#[test]
fn stake_amount_applies_balance_divider() {
    let mut request = make_request();
    request.config = make_config("5000000000000000000000000", "0");

    let staked = stake_amount(&request, &tokens("3"), &tokens("20"), &amount("0.5"));

    assert_eq!(staked.to_string(), "1500000000000000000000000");
}

#[test]
fn stake_amount_rounds_divided_balance_down() {
    let mut request = make_request();
    request.config = make_config("100", "0");

    let staked = stake_amount(&request, &amount("7"), &amount("1000"), &amount("0.5"));

    assert_eq!(staked.to_string(), "3");
}

#[test]
fn stake_amount_without_windows_uses_config_bond() {
    let mut request = make_request();
    request.config = make_config("1000000000000000000000000", "0");

    let staked = stake_amount(&request, &tokens("100"), &tokens("8"), &Amount::one());

    assert_eq!(staked.to_string(), "2000000000000000000000000");
}

#[test]
fn stake_amount_follows_current_window_bond() {
    let mut request = make_request();
    request.config = make_config("1000000000000000000000000", "0");
    request.resolution_windows = vec![
        ResolutionWindow::new(0, tokens("2"), past()).bonded(Outcome::Invalid),
        ResolutionWindow::new(1, tokens("4"), past()),
    ];

    let staked = stake_amount(&request, &tokens("100"), &tokens("8"), &Amount::one());

    assert_eq!(staked.to_string(), "4000000000000000000000000");
}

#[test]
fn stake_amount_is_capped_by_max_amount() {
    let mut request = make_request();
    request.resolution_windows = vec![
        ResolutionWindow::new(0, tokens("2"), past()).bonded(Outcome::Invalid),
        ResolutionWindow::new(1, tokens("4"), past()),
    ];

    let staked = stake_amount(&request, &tokens("100"), &tokens("3.5"), &Amount::one());

    assert_eq!(staked.to_string(), "3500000000000000000000000");
}

// ---------------------------------------------------------------------------
// stake eligibility
// ---------------------------------------------------------------------------

#[test]
fn arbitrator_blocks_staking_first() {
    let mut request = make_request();
    request.final_arbitrator_triggered = true;
    request.finalized_outcome = Some(Outcome::Invalid);

    let verdict = can_stake_on_request(&request);

    assert!(!verdict.can_stake);
    assert_eq!(verdict.reason, Some(StakeError::FinalArbitratorTriggered));
}

#[test]
fn unexecuted_request_cannot_be_staked() {
    let request = make_request();

    assert_eq!(
        can_stake_on_request(&request).reason,
        Some(StakeError::NotExecuted)
    );
}

#[test]
fn finalized_request_cannot_be_staked() {
    let mut request = make_request();
    request.execute_result = executed("yes");
    request.finalized_outcome = Some(Outcome::answer("yes"));

    assert_eq!(
        can_stake_on_request(&request).reason,
        Some(StakeError::AlreadyFinalized)
    );
}

#[test]
fn first_stake_is_allowed_without_windows() {
    let mut request = make_request();
    request.execute_result = executed("yes");

    let verdict = can_stake_on_request(&request);

    assert!(verdict.can_stake);
    assert_eq!(verdict.reason, None);
}

#[test]
fn second_stake_in_same_round_is_refused() {
    let mut request = make_request();
    request.execute_result = executed("yes");
    request.resolution_windows = vec![window(0, "2", future())];
    request.staking = vec![stake(0, "2")];

    assert_eq!(
        can_stake_on_request(&request).reason,
        Some(StakeError::AlreadyStaked)
    );
}

#[test]
fn round_bonded_on_own_outcome_is_refused() {
    let mut request = make_request();
    request.execute_result = executed("yes");
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::answer("yes")),
        window(1, "4", future()),
    ];

    assert_eq!(
        can_stake_on_request(&request).reason,
        Some(StakeError::AlreadyBonded)
    );
}

#[test]
fn round_bonded_on_other_outcome_invites_dispute() {
    let mut request = make_request();
    request.execute_result = executed("yes");
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::answer("no")),
        window(1, "4", future()),
    ];
    request.staking = vec![stake(0, "2")];

    assert!(can_stake_on_request(&request).can_stake);
}

#[test]
fn failed_execution_matches_invalid_bond() {
    let mut request = make_request();
    request.execute_result = Some(ExecuteResult::error("unreachable", 1));
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::Invalid),
        window(1, "4", future()),
    ];

    assert_eq!(
        can_stake_on_request(&request).reason,
        Some(StakeError::AlreadyBonded)
    );
}

// ---------------------------------------------------------------------------
// finalizability
// ---------------------------------------------------------------------------

fn finalizable_request() -> DataRequest {
    let mut request = make_request();
    request.execute_result = executed("yes");
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::answer("yes")),
        window(1, "4", past()),
    ];
    request
}

#[test]
fn finalizable_once_last_window_ended_in_agreement() {
    assert!(is_request_finalizable_at(&finalizable_request(), now()));
}

#[test]
fn finalizable_exactly_at_end_time() {
    let mut request = finalizable_request();
    request.resolution_windows[1].end_time = now();

    assert!(is_request_finalizable_at(&request, now()));
}

#[test]
fn not_finalizable_before_end_time() {
    let mut request = finalizable_request();
    request.resolution_windows[1].end_time = future();

    assert!(!is_request_finalizable_at(&request, now()));
}

#[test]
fn not_finalizable_without_windows_or_with_one() {
    let mut request = finalizable_request();
    request.resolution_windows.truncate(1);
    assert!(!is_request_finalizable_at(&request, now()));

    request.resolution_windows.clear();
    assert!(!is_request_finalizable_at(&request, now()));
}

#[test]
fn not_finalizable_when_disagreeing_with_bond() {
    let mut request = finalizable_request();
    request.resolution_windows[0].bonded_outcome = Some(Outcome::answer("no"));

    assert!(!is_request_finalizable_at(&request, now()));
}

#[test]
fn not_finalizable_without_execution_or_when_settled() {
    let mut unexecuted = finalizable_request();
    unexecuted.execute_result = None;
    assert!(!is_request_finalizable_at(&unexecuted, now()));

    let mut finalized = finalizable_request();
    finalized.finalized_outcome = Some(Outcome::answer("yes"));
    assert!(!is_request_finalizable_at(&finalized, now()));

    let mut arbitrated = finalizable_request();
    arbitrated.final_arbitrator_triggered = true;
    assert!(!is_request_finalizable_at(&arbitrated, now()));
}

// ---------------------------------------------------------------------------
// claimability
// ---------------------------------------------------------------------------

#[test]
fn not_claimable_without_windows() {
    let mut request = make_request();
    request.staking = vec![stake(0, "1")];

    assert!(!is_request_claimable_at(&request, now()));
}

#[test]
fn not_claimable_with_single_window() {
    let mut request = make_request();
    request.resolution_windows = vec![window(0, "2", past()).bonded(Outcome::Invalid)];
    assert!(!is_request_claimable_at(&request, now()));

    request.staking = vec![stake(0, "1")];
    assert!(!is_request_claimable_at(&request, now()));
}

#[test]
fn not_claimable_once_claimed() {
    let mut request = make_request();
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::Invalid),
        window(1, "4", past()),
    ];
    request.staking = vec![stake(0, "2")];
    request.claimed_amount = Some(amount("1"));

    assert!(!is_request_claimable_at(&request, now()));
}

#[test]
fn not_claimable_without_own_stake() {
    let mut request = make_request();
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::Invalid),
        window(1, "4", past()),
    ];

    assert!(!is_request_claimable_at(&request, now()));
}

#[test]
fn not_claimable_before_window_ends() {
    let mut request = make_request();
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::Invalid),
        window(1, "4", future()),
    ];
    request.staking = vec![stake(0, "2")];

    assert!(!is_request_claimable_at(&request, now()));
}

#[test]
fn claimable_after_window_ends_with_stake() {
    let mut request = make_request();
    request.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::Invalid),
        window(1, "4", past()),
    ];
    request.staking = vec![stake(0, "2")];

    assert!(is_request_claimable_at(&request, now()));
}

// ---------------------------------------------------------------------------
// deletability
// ---------------------------------------------------------------------------

#[test]
fn deletable_when_arbitrator_triggered() {
    let mut request = make_request();
    request.final_arbitrator_triggered = true;

    assert!(is_request_deletable_at(&request, now()));
}

#[test]
fn deletable_once_claimed_regardless_of_windows() {
    let mut request = make_request();
    request.finalized_outcome = Some(Outcome::Invalid);
    request.claimed_amount = Some(amount("1"));
    assert!(is_request_deletable_at(&request, now()));

    request.finalized_outcome = None;
    request.resolution_windows = vec![window(0, "2", future())];
    assert!(is_request_deletable_at(&request, now()));
}

#[test]
fn not_deletable_while_claim_is_pending() {
    let mut request = make_request();
    request.finalized_outcome = Some(Outcome::Invalid);
    request.resolution_windows = vec![window(0, "2", past()), window(1, "4", past())];
    request.staking = vec![stake(0, "1")];

    assert!(!is_request_deletable_at(&request, now()));
}

#[test]
fn deletable_when_finalized_with_nothing_to_claim() {
    let mut request = make_request();
    request.finalized_outcome = Some(Outcome::Invalid);
    request.resolution_windows = vec![window(0, "2", past()), window(1, "4", past())];

    assert!(is_request_deletable_at(&request, now()));
}

#[test]
fn fresh_request_is_not_deletable() {
    assert!(!is_request_deletable_at(&make_request(), now()));
}

// ---------------------------------------------------------------------------
// merge and misc
// ---------------------------------------------------------------------------

#[test]
fn merge_takes_protocol_state_from_remote() {
    let mut local = make_request();
    local.execute_result = executed("yes");
    local.staking = vec![stake(0, "2")];
    local.resolution_windows = vec![window(0, "2", past())];
    local.metadata = Some("local".to_string());

    let mut remote = make_request();
    remote.resolution_windows = vec![
        window(0, "2", past()).bonded(Outcome::answer("yes")),
        window(1, "4", future()),
    ];
    remote.finalized_outcome = Some(Outcome::answer("yes"));
    remote.final_arbitrator_triggered = true;
    remote.config.paid_fee = amount("77");
    remote.config.validity_bond = amount("5");

    let merged = merge_requests(&local, &remote);

    assert_eq!(merged.resolution_windows.len(), 2);
    assert_eq!(merged.resolution_windows, remote.resolution_windows);
    assert_eq!(merged.finalized_outcome, remote.finalized_outcome);
    assert!(merged.final_arbitrator_triggered);
    assert_eq!(merged.config.paid_fee, amount("77"));

    assert_eq!(merged.staking, local.staking);
    assert_eq!(merged.execute_result, local.execute_result);
    assert_eq!(merged.metadata, local.metadata);
    assert_eq!(merged.config.validity_bond, local.config.validity_bond);
}

#[test]
fn current_window_is_the_latest() {
    let mut request = make_request();
    request.resolution_windows = vec![window(0, "2", now()), window(1, "2", now())];

    assert_eq!(request.current_window().map(|w| w.round), Some(1));
    assert_eq!(request.previous_window().map(|w| w.round), Some(0));
}

#[test]
fn internal_id_joins_components() {
    assert_eq!(build_internal_id("7", "near", "oracle.near"), "7_near_oracle.near");
}

#[test]
fn requests_are_always_executable() {
    assert!(is_request_executable(&make_request()));
}

#[test]
fn request_document_round_trips_through_json() {
    let mut request = finalizable_request();
    request.staking = vec![stake(0, "2000000000000000000000000")];

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("\"internalId\""));
    assert!(json.contains("\"resolutionWindows\""));
    assert!(json.contains("\"roundId\":0"));

    let decoded = DataRequest::from_json(&json).unwrap();
    assert_eq!(decoded, request);
}
