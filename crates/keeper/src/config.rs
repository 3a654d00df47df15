use std::fs;

use elastic_core::{GovernanceParams, RebaseEngine};
use elastic_types::constants::ONE;
use serde::{Deserialize, Serialize};

use crate::error::KeeperError;

/// Keeper configuration loaded from a TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeeperConfig {
    /// Seconds between rebase attempts driven by the keeper loop. The
    /// engine applies its own cooldown on top of this.
    pub tick_interval: u64,

    /// Price feed settings.
    pub feed: FeedConfig,

    /// Engine parameters and initial state.
    pub engine: EngineConfig,
}

/// Price feed settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Path to the JSON price feed document.
    pub path: String,

    /// Reject readings older than this many seconds; 0 disables the check.
    pub max_age_secs: i64,
}

/// Engine parameters and initial state. Fraction and price fields are
/// 1e18-scale values written as decimal strings, since TOML integers stop
/// at i64.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Target price (1e18 scale).
    #[serde(with = "u128_decimal")]
    pub target_price: u128,

    /// Minimum seconds between effective rebases.
    pub rebase_interval: i64,

    /// Per-rebase cap on supply change (1e18 fraction).
    #[serde(with = "u128_decimal")]
    pub max_rebase_percentage: u128,

    /// Minimum deviation required to trigger a change (1e18 fraction).
    #[serde(with = "u128_decimal")]
    pub price_delta_threshold: u128,

    /// Supply ceiling.
    #[serde(with = "u128_decimal")]
    pub max_supply: u128,

    /// Supply at initialization.
    #[serde(with = "u128_decimal")]
    pub initial_supply: u128,
}

impl KeeperConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> Result<Self, KeeperError> {
        let content = fs::read_to_string(path).map_err(|e| {
            KeeperError::InvalidConfig(format!("failed to read config file {}: {}", path, e))
        })?;

        let config: KeeperConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> Result<(), KeeperError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Surface-level validation; the engine constructor enforces the full
    /// parameter constraints.
    fn validate(&self) -> Result<(), KeeperError> {
        if self.tick_interval == 0 {
            return Err(KeeperError::InvalidConfig(
                "tick_interval must be greater than 0".to_string(),
            ));
        }
        if self.feed.path.is_empty() {
            return Err(KeeperError::InvalidConfig(
                "feed.path must not be empty".to_string(),
            ));
        }
        if self.feed.max_age_secs < 0 {
            return Err(KeeperError::InvalidConfig(
                "feed.max_age_secs must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Construct the engine this configuration describes. The feed path
    /// doubles as the oracle address recorded in governance parameters.
    pub fn build_engine(&self) -> Result<RebaseEngine, KeeperError> {
        let params = GovernanceParams::new(
            self.engine.target_price,
            self.engine.rebase_interval,
            self.engine.max_rebase_percentage,
            self.engine.price_delta_threshold,
            self.engine.max_supply,
            self.feed.path.clone(),
        )?;
        Ok(RebaseEngine::new(params, self.engine.initial_supply)?)
    }

    /// Staleness bound for the price feed, `None` when disabled
    pub fn feed_max_age(&self) -> Option<i64> {
        (self.feed.max_age_secs > 0).then_some(self.feed.max_age_secs)
    }
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            tick_interval: 60,
            feed: FeedConfig {
                path: "price-feed.json".to_string(),
                max_age_secs: 300,
            },
            engine: EngineConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_price: ONE,             // 1.00
            rebase_interval: 86_400,       // 1 day
            max_rebase_percentage: ONE / 20, // 5%
            price_delta_threshold: ONE / 200, // 0.5%
            max_supply: 1_000_000 * ONE,
            initial_supply: 100_000 * ONE,
        }
    }
}

/// Write a starting-point configuration with the default parameters
pub fn write_example_config(path: &str) -> Result<(), KeeperError> {
    KeeperConfig::default().save(path)
}

// TOML integers are i64; 1e18-scale values go through decimal strings.
mod u128_decimal {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
