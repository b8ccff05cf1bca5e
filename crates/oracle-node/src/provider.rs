//! Contract with the chain adapter a node drives.

use oracle_core::{Amount, ClaimResult, DataRequest, Outcome, StakeResult};

use crate::errors::ProviderError;

/// Chain adapter for one provider.
///
/// Implementations own transaction submission and every network concern.
/// Stake, finalize and claim failures are domain answers carried in the
/// returned values; only state lookups fail with [`ProviderError`].
pub trait Provider {
    /// Provider id, as stored in [`DataRequest::provider_id`].
    fn id(&self) -> &str;

    /// Fetches the current on-chain state of request `id`.
    ///
    /// `Ok(None)` means the chain no longer knows the request.
    fn get_data_request_by_id(&mut self, id: &str) -> Result<Option<DataRequest>, ProviderError>;

    /// Stakes `amount` on `outcome`.
    fn stake(&mut self, request: &DataRequest, outcome: &Outcome, amount: &Amount) -> StakeResult;

    /// Submits finalization. Returns true if it landed.
    fn finalize(&mut self, request: &DataRequest) -> bool;

    /// Claims this node's share of a resolved request.
    fn claim(&mut self, request: &DataRequest) -> ClaimResult;
}
