//! Output formatting utilities.

use oracle_core::{DataRequest, Outcome};
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Human form of an outcome.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Answer { answer } => format!("answer {:?}", answer),
        Outcome::Invalid => "invalid".to_string(),
    }
}

/// Formats a request as a table row.
pub fn format_request_row(request: &DataRequest) -> String {
    let finalized = request
        .finalized_outcome
        .as_ref()
        .map(format_outcome)
        .unwrap_or_else(|| "-".to_string());
    let claimed = request
        .claimed_amount
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<40} {:<7} {:<24} {:<20} {}",
        truncate(&request.internal_id, 40),
        request.resolution_windows.len(),
        truncate(&request.total_staked().to_string(), 24),
        truncate(&finalized, 20),
        claimed
    )
}

/// Prints the request table header.
#[allow(clippy::print_literal)]
pub fn print_request_header() {
    println!(
        "{:<40} {:<7} {:<24} {:<20} {}",
        "INTERNAL_ID", "ROUNDS", "STAKED", "FINALIZED", "CLAIMED"
    );
    println!("{}", "-".repeat(100));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
