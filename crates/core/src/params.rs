//! Governance-controlled configuration.

use elastic_types::constants::MAX_PERCENTAGE;
use elastic_types::{ParamChange, RebaseError, RebaseResult};

/// The mutable policy parameters of the rebase mechanism.
///
/// Construction and every field-level update enforce the validity
/// constraints below; an update either fully applies and returns the
/// matching [`ParamChange`] notification or rejects before any mutation.
/// The engine exposes authorization-gated wrappers around the setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceParams {
    /// Price the mechanism steers toward (1e18 scale, positive).
    target_price: u128,
    /// Minimum seconds between two effective rebases (positive).
    rebase_interval: i64,
    /// Hard cap on supply change magnitude per rebase (1e18 fraction, <= 100%).
    max_rebase_percentage: u128,
    /// Minimum relative price deviation required to trigger a change
    /// (1e18 fraction, <= 100%).
    price_delta_threshold: u128,
    /// Upper bound on total supply.
    max_supply: u128,
    /// Identity of the current price source (non-empty).
    oracle_address: String,
}

impl GovernanceParams {
    pub fn new(
        target_price: u128,
        rebase_interval: i64,
        max_rebase_percentage: u128,
        price_delta_threshold: u128,
        max_supply: u128,
        oracle_address: impl Into<String>,
    ) -> RebaseResult<Self> {
        if target_price == 0 {
            return Err(RebaseError::invalid_parameter(
                "target_price",
                "must be positive",
            ));
        }
        if rebase_interval <= 0 {
            return Err(RebaseError::invalid_parameter(
                "rebase_interval",
                "must be positive",
            ));
        }
        if max_rebase_percentage > MAX_PERCENTAGE {
            return Err(RebaseError::invalid_parameter(
                "max_rebase_percentage",
                "must not exceed 100%",
            ));
        }
        if price_delta_threshold > MAX_PERCENTAGE {
            return Err(RebaseError::invalid_parameter(
                "price_delta_threshold",
                "must not exceed 100%",
            ));
        }
        let oracle_address = oracle_address.into();
        if oracle_address.is_empty() {
            return Err(RebaseError::invalid_parameter(
                "oracle_address",
                "must not be empty",
            ));
        }

        Ok(Self {
            target_price,
            rebase_interval,
            max_rebase_percentage,
            price_delta_threshold,
            max_supply,
            oracle_address,
        })
    }

    pub fn target_price(&self) -> u128 {
        self.target_price
    }

    pub fn rebase_interval(&self) -> i64 {
        self.rebase_interval
    }

    pub fn max_rebase_percentage(&self) -> u128 {
        self.max_rebase_percentage
    }

    pub fn price_delta_threshold(&self) -> u128 {
        self.price_delta_threshold
    }

    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    pub fn oracle_address(&self) -> &str {
        &self.oracle_address
    }

    pub(crate) fn set_oracle(&mut self, address: String) -> RebaseResult<ParamChange> {
        if address.is_empty() {
            return Err(RebaseError::invalid_parameter(
                "oracle_address",
                "must not be empty",
            ));
        }
        self.oracle_address = address.clone();
        Ok(ParamChange::Oracle { address })
    }

    pub(crate) fn set_rebase_interval(&mut self, seconds: i64) -> RebaseResult<ParamChange> {
        if seconds <= 0 {
            return Err(RebaseError::invalid_parameter(
                "rebase_interval",
                "must be positive",
            ));
        }
        self.rebase_interval = seconds;
        Ok(ParamChange::RebaseInterval { seconds })
    }

    pub(crate) fn set_max_rebase_percentage(&mut self, fraction: u128) -> RebaseResult<ParamChange> {
        if fraction > MAX_PERCENTAGE {
            return Err(RebaseError::invalid_parameter(
                "max_rebase_percentage",
                "must not exceed 100%",
            ));
        }
        self.max_rebase_percentage = fraction;
        Ok(ParamChange::MaxRebasePercentage { fraction })
    }

    pub(crate) fn set_price_delta_threshold(&mut self, fraction: u128) -> RebaseResult<ParamChange> {
        if fraction > MAX_PERCENTAGE {
            return Err(RebaseError::invalid_parameter(
                "price_delta_threshold",
                "must not exceed 100%",
            ));
        }
        self.price_delta_threshold = fraction;
        Ok(ParamChange::PriceDeltaThreshold { fraction })
    }

    /// `current_supply` is the engine's supply figure; the ceiling can never
    /// drop below it.
    pub(crate) fn set_max_supply(
        &mut self,
        new_max: u128,
        current_supply: u128,
    ) -> RebaseResult<ParamChange> {
        if new_max < current_supply {
            return Err(RebaseError::invalid_parameter(
                "max_supply",
                format!("must not be below current supply {}", current_supply),
            ));
        }
        self.max_supply = new_max;
        Ok(ParamChange::MaxSupply { value: new_max })
    }
}
