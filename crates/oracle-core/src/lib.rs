//! Decision core of a data-oracle node.
//!
//! This crate provides:
//! - The outcome model derived from a request's execution
//! - Stake, claim and execution result types
//! - Resolution windows and the data request record
//! - Lifecycle predicates: stake eligibility, finalizability, claimability, deletability
//! - Bond and stake sizing over exact decimal amounts
//!
//! Core invariants:
//! - Every amount is an exact decimal; no floating point anywhere
//! - Predicates are pure reads; time only enters through an explicit `now`
//! - The current resolution window is always the last one
//! - Merging a fresh snapshot never touches the node's own stake history
//!
#![deny(missing_docs)]

/// Exact decimal token amounts.
pub mod amount;
/// Error types for core operations.
pub mod errors;
/// Execution results consumed from the processing chain.
pub mod execute;
/// Lifecycle predicates and stake sizing.
pub mod lifecycle;
/// Outcome model and derivation.
pub mod outcome;
/// Data request record and merge.
pub mod request;
/// Stake and claim results.
pub mod stake;
/// Resolution windows.
pub mod window;

pub use amount::{Amount, BASIS_POINTS};
pub use errors::{AmountError, CoreError};
pub use execute::ExecuteResult;
pub use lifecycle::{
    can_stake_on_request, is_request_claimable, is_request_claimable_at, is_request_deletable,
    is_request_deletable_at, is_request_executable, is_request_finalizable,
    is_request_finalizable_at, stake_amount, window_bond_size,
};
pub use outcome::{derive_outcome, Outcome};
pub use request::{build_internal_id, merge_requests, DataRequest, RequestConfig, RequestInfo};
pub use stake::{CanStake, ClaimError, ClaimResult, StakeError, StakeRecord, StakeResult};
pub use window::ResolutionWindow;
