use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::outcome::Outcome;

/// One bonding round of a data request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionWindow {
    /// Round number, 0-based and increasing.
    pub round: u64,
    /// Amount required to bond this round.
    pub bond_size: Amount,
    /// Moment the round closes.
    pub end_time: DateTime<Utc>,
    /// Outcome bonded by some participant in this round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonded_outcome: Option<Outcome>,
}

impl ResolutionWindow {
    /// Creates an unbonded window.
    pub fn new(round: u64, bond_size: Amount, end_time: DateTime<Utc>) -> Self {
        Self {
            round,
            bond_size,
            end_time,
            bonded_outcome: None,
        }
    }

    /// Returns the window with `outcome` bonded.
    pub fn bonded(mut self, outcome: Outcome) -> Self {
        self.bonded_outcome = Some(outcome);
        self
    }

    /// True once `now` reached the window's end.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }
}
