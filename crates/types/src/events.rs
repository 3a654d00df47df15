//! Event types consumed by external observers (dashboards, indexers).

use serde::{Deserialize, Serialize};

/// Record of one effective rebase. Emitted exactly once per supply change,
/// never for cooldown or no-op outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebaseEvent {
    /// Epoch index: attempt timestamp divided by the rebase interval.
    pub epoch: u64,
    /// Oracle price observed for this rebase (1e18 scale).
    pub observed_price: u128,
    /// Target price at the time of the rebase (1e18 scale).
    pub target_price: u128,
    /// Aggregate supply before the change.
    pub supply_before: u128,
    /// Aggregate supply after the change.
    pub supply_after: u128,
    /// Signed supply change; negative for contractions.
    pub delta: i128,
    /// Unix timestamp of the rebase.
    pub timestamp: i64,
}

/// Configuration-change notification carrying the new value. Each successful
/// parameter update produces exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamChange {
    Oracle { address: String },
    RebaseInterval { seconds: i64 },
    MaxRebasePercentage { fraction: u128 },
    PriceDeltaThreshold { fraction: u128 },
    MaxSupply { value: u128 },
}
