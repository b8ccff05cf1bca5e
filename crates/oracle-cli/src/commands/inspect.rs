//! Inspect command implementation.

use chrono::{DateTime, Utc};
use oracle_core::{
    can_stake_on_request, derive_outcome, is_request_claimable_at, is_request_deletable_at,
    is_request_finalizable_at, window_bond_size,
};
use serde_json::json;

use crate::commands::read_request;
use crate::output;

pub fn run(request: String, json: bool, now: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| format!("Invalid --now '{}': {}", raw, e))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let request = read_request(&request)?;
    let outcome = derive_outcome(&request);
    let verdict = can_stake_on_request(&request);
    let finalizable = is_request_finalizable_at(&request, now);
    let claimable = is_request_claimable_at(&request, now);
    let deletable = is_request_deletable_at(&request, now);
    let bond = window_bond_size(&request.config);

    if json {
        let report = json!({
            "internalId": request.internal_id,
            "outcome": outcome,
            "canStake": verdict,
            "finalizable": finalizable,
            "claimable": claimable,
            "deletable": deletable,
            "windowBondSize": bond,
            "rounds": request.resolution_windows.len(),
            "totalStaked": request.total_staked(),
            "evaluatedAt": now.to_rfc3339(),
        });
        println!("{}", output::format_json(&report));
        return Ok(());
    }

    let stake_line = match verdict.reason {
        Some(reason) if !verdict.can_stake => format!("no ({:?})", reason),
        _ => "yes".to_string(),
    };

    println!("request:       {}", request.internal_id);
    println!("outcome:       {}", output::format_outcome(&outcome));
    println!("can stake:     {}", stake_line);
    println!("finalizable:   {}", finalizable);
    println!("claimable:     {}", claimable);
    println!("deletable:     {}", deletable);
    println!("window bond:   {}", bond);
    println!("rounds:        {}", request.resolution_windows.len());
    println!("total staked:  {}", request.total_staked());

    Ok(())
}
