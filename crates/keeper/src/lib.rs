pub mod config;
pub mod error;
pub mod price_feed;

pub use config::{EngineConfig, FeedConfig, KeeperConfig};
pub use error::KeeperError;
pub use price_feed::FilePriceFeed;
