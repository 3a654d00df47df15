//! The rebase decision state machine.

use elastic_math::fixed_point::{percentage_of, relative_deviation};
use elastic_types::constants::SMOOTHING_DIVISOR;
use elastic_types::{ParamChange, RebaseError, RebaseEvent, RebaseResult};

use crate::auth::{ensure_authorized, Authorizer};
use crate::oracle::PriceSource;
use crate::params::GovernanceParams;
use crate::recorder::EventRecorder;

/// Outcome of a rebase attempt that completed without error.
///
/// The three non-applied variants are valid outcomes, not failures; callers
/// must not conflate them with an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The rebase interval has not elapsed. Nothing was read or written.
    Cooldown,
    /// Price sat exactly on target. The cooldown window was consumed.
    AtTarget,
    /// No supply change: the deviation sat below the trigger threshold, or
    /// the computed change truncated (or clamped) to zero. The cooldown
    /// window was consumed.
    BelowThreshold,
    /// Supply changed; the event describes the change.
    Applied(RebaseEvent),
}

/// The rebase engine: governance parameters plus the two engine-state
/// fields (`last_rebase_time`, `total_supply`) and the event log.
///
/// All mutating operations take `&mut self`; exclusive ownership serializes
/// attempts against each other and against parameter updates. On any error
/// the attempt aborts atomically with no state change.
#[derive(Debug, Clone)]
pub struct RebaseEngine {
    params: GovernanceParams,
    /// Timestamp of the most recent attempt that consumed the cooldown
    /// window (applied rebases and no-op outcomes alike).
    last_rebase_time: i64,
    /// Aggregate supply as of the last rebase; the authoritative figure
    /// behind the supply query.
    total_supply: u128,
    recorder: EventRecorder,
}

impl RebaseEngine {
    /// Requires a positive initial supply not exceeding the configured
    /// supply ceiling.
    pub fn new(params: GovernanceParams, initial_supply: u128) -> RebaseResult<Self> {
        if initial_supply == 0 {
            return Err(RebaseError::invalid_parameter(
                "initial_supply",
                "must be positive",
            ));
        }
        if initial_supply > params.max_supply() {
            return Err(RebaseError::invalid_parameter(
                "initial_supply",
                format!("must not exceed max supply {}", params.max_supply()),
            ));
        }

        Ok(Self {
            params,
            last_rebase_time: 0,
            total_supply: initial_supply,
            recorder: EventRecorder::new(),
        })
    }

    /// Evaluate the price against the target and, if warranted, resize the
    /// aggregate supply.
    ///
    /// Decision order: cooldown gate, oracle read, at-target / threshold
    /// no-ops (which still advance `last_rebase_time`), then the capped and
    /// 50%-smoothed supply change with zero floor and max-supply clamp. A
    /// change that resolves to zero is a no-op without an event. Errors
    /// (oracle failure, zero price, arithmetic overflow) abort the attempt
    /// with no state change.
    pub fn attempt_rebase(
        &mut self,
        oracle: &dyn PriceSource,
        now: i64,
    ) -> RebaseResult<RebaseOutcome> {
        let interval = self.params.rebase_interval();
        if now < self.last_rebase_time.saturating_add(interval) {
            log::debug!(
                "rebase gated by cooldown: now={} last={} interval={}s",
                now,
                self.last_rebase_time,
                interval
            );
            return Ok(RebaseOutcome::Cooldown);
        }

        let observed = oracle.current_price()?;
        if observed == 0 {
            return Err(RebaseError::InvalidPriceReading);
        }
        let target = self.params.target_price();

        if observed == target {
            // Consumes the cooldown window so an on-target price is not
            // re-polled every invocation.
            self.last_rebase_time = now;
            log::debug!("price on target ({}), supply unchanged", observed);
            return Ok(RebaseOutcome::AtTarget);
        }

        let deviation = relative_deviation(observed, target)?;
        if deviation < self.params.price_delta_threshold() {
            self.last_rebase_time = now;
            log::debug!(
                "deviation {} below threshold {}, supply unchanged",
                deviation,
                self.params.price_delta_threshold()
            );
            return Ok(RebaseOutcome::BelowThreshold);
        }

        let capped = deviation.min(self.params.max_rebase_percentage());
        let applied = capped / SMOOTHING_DIVISOR;

        let supply = self.total_supply;
        let magnitude = percentage_of(supply, applied)?;

        let (new_supply, delta) =
            apply_magnitude(supply, magnitude, observed > target, self.params.max_supply())?;

        if delta == 0 {
            // Truncation on a tiny supply, or a ceiling clamp with the
            // supply already at the maximum. No event for no change.
            self.last_rebase_time = now;
            log::debug!("computed change is zero at supply {}, supply unchanged", supply);
            return Ok(RebaseOutcome::BelowThreshold);
        }

        let event = RebaseEvent {
            epoch: self.epoch_at(now),
            observed_price: observed,
            target_price: target,
            supply_before: supply,
            supply_after: new_supply,
            delta,
            timestamp: now,
        };

        // Commit point: nothing above mutates state.
        self.total_supply = new_supply;
        self.last_rebase_time = now;
        self.recorder.record(event.clone());

        log::info!(
            "rebase applied: epoch={} supply {} -> {} (delta {}), price {} vs target {}",
            event.epoch,
            supply,
            new_supply,
            delta,
            observed,
            target
        );

        Ok(RebaseOutcome::Applied(event))
    }

    /// Same algorithm as [`attempt_rebase`](Self::attempt_rebase), restricted
    /// to authorized callers.
    pub fn manual_rebase(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        oracle: &dyn PriceSource,
        now: i64,
    ) -> RebaseResult<RebaseOutcome> {
        ensure_authorized(auth, caller)?;
        self.attempt_rebase(oracle, now)
    }

    /// Epoch index for a timestamp under the current interval.
    fn epoch_at(&self, now: i64) -> u64 {
        // Interval is validated positive; timestamps before the unix epoch
        // are not meaningful inputs here.
        (now / self.params.rebase_interval()).max(0) as u64
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Aggregate supply as of the last rebase
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn last_rebase_time(&self) -> i64 {
        self.last_rebase_time
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    // ------------------------------------------------------------------
    // Authorization-gated parameter updates
    // ------------------------------------------------------------------

    pub fn set_oracle(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        address: impl Into<String>,
    ) -> RebaseResult<ParamChange> {
        ensure_authorized(auth, caller)?;
        let change = self.params.set_oracle(address.into())?;
        log::info!("parameter updated: {:?}", change);
        Ok(change)
    }

    pub fn set_rebase_interval(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        seconds: i64,
    ) -> RebaseResult<ParamChange> {
        ensure_authorized(auth, caller)?;
        let change = self.params.set_rebase_interval(seconds)?;
        log::info!("parameter updated: {:?}", change);
        Ok(change)
    }

    pub fn set_max_rebase_percentage(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        fraction: u128,
    ) -> RebaseResult<ParamChange> {
        ensure_authorized(auth, caller)?;
        let change = self.params.set_max_rebase_percentage(fraction)?;
        log::info!("parameter updated: {:?}", change);
        Ok(change)
    }

    pub fn set_price_delta_threshold(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        fraction: u128,
    ) -> RebaseResult<ParamChange> {
        ensure_authorized(auth, caller)?;
        let change = self.params.set_price_delta_threshold(fraction)?;
        log::info!("parameter updated: {:?}", change);
        Ok(change)
    }

    pub fn set_max_supply(
        &mut self,
        auth: &dyn Authorizer,
        caller: &str,
        new_max: u128,
    ) -> RebaseResult<ParamChange> {
        ensure_authorized(auth, caller)?;
        let change = self.params.set_max_supply(new_max, self.total_supply)?;
        log::info!("parameter updated: {:?}", change);
        Ok(change)
    }
}

/// Apply an unsigned change magnitude to the supply: expansion clamps at
/// the ceiling (recomputing the recorded delta), contraction floors at
/// zero. Returns the new supply and the signed delta.
fn apply_magnitude(
    supply: u128,
    magnitude: u128,
    expand: bool,
    max_supply: u128,
) -> RebaseResult<(u128, i128)> {
    if expand {
        let expanded = supply
            .checked_add(magnitude)
            .ok_or(RebaseError::MathOverflow)?;
        if expanded > max_supply {
            let clamped = max_supply - supply;
            Ok((max_supply, to_signed(clamped)?))
        } else {
            Ok((expanded, to_signed(magnitude)?))
        }
    } else if magnitude >= supply {
        // Full contraction floors at zero.
        Ok((0, -to_signed(supply)?))
    } else {
        Ok((supply - magnitude, -to_signed(magnitude)?))
    }
}

fn to_signed(value: u128) -> RebaseResult<i128> {
    i128::try_from(value).map_err(|_| RebaseError::MathOverflow)
}
