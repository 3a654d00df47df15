//! Price oracle collaborator seam.

use elastic_types::RebaseResult;

/// Read side of the price oracle.
///
/// A single synchronous query. The engine does not retry: a failed read
/// aborts the current rebase attempt and leaves state untouched.
pub trait PriceSource {
    /// Current price at 1e18 scale.
    fn current_price(&self) -> RebaseResult<u128>;
}

/// Fixed-price source for tests and wiring.
#[derive(Debug, Clone, Copy)]
pub struct StaticPriceSource(pub u128);

impl PriceSource for StaticPriceSource {
    fn current_price(&self) -> RebaseResult<u128> {
        Ok(self.0)
    }
}
