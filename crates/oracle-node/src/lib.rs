//! Node-side wiring of the oracle core.
//!
//! This crate provides:
//! - The `Provider` contract a chain adapter implements
//! - `NodeConfig`, loaded from TOML
//! - `walk_request`, one step of the request lifecycle: refresh, delete,
//!   stake, finalize, claim, persist
//!
//! Request discovery and the polling cadence belong to the caller.

#![deny(missing_docs)]

/// Node configuration.
pub mod config;
/// Error types for node operations.
pub mod errors;
/// Chain adapter contract.
pub mod provider;
/// Per-request walk step.
pub mod walker;

pub use config::{NodeConfig, StakeSettings, TokenConfig};
pub use errors::{ConfigError, NodeError, ProviderError};
pub use provider::Provider;
pub use walker::{walk_request, WalkReport};
