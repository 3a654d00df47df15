//! File-backed price feed.
//!
//! An external publisher writes a small JSON document; the keeper reads it
//! on every attempt. Unreadable, malformed, or stale documents surface as
//! `OracleUnavailable` and abort the attempt without touching engine state.

use std::fs;
use std::path::PathBuf;

use elastic_core::PriceSource;
use elastic_types::{RebaseError, RebaseResult};
use serde::Deserialize;

/// On-disk feed document.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    /// Price at 1e18 scale, as a decimal string.
    price: String,
    /// Unix timestamp of the reading.
    timestamp: i64,
}

/// `PriceSource` backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FilePriceFeed {
    path: PathBuf,
    /// Readings older than this many seconds are rejected; `None` disables
    /// the check.
    max_age: Option<i64>,
}

impl FilePriceFeed {
    pub fn new(path: impl Into<PathBuf>, max_age: Option<i64>) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    fn read_document(&self) -> RebaseResult<FeedDocument> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            RebaseError::OracleUnavailable(format!("read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            RebaseError::OracleUnavailable(format!("parse {}: {}", self.path.display(), e))
        })
    }
}

impl PriceSource for FilePriceFeed {
    fn current_price(&self) -> RebaseResult<u128> {
        let document = self.read_document()?;

        if let Some(max_age) = self.max_age {
            let age = chrono::Utc::now().timestamp() - document.timestamp;
            if age > max_age {
                return Err(RebaseError::OracleUnavailable(format!(
                    "reading is {}s old (max {}s)",
                    age, max_age
                )));
            }
        }

        let price: u128 = document
            .price
            .parse()
            .map_err(|_| RebaseError::InvalidPriceReading)?;
        if price == 0 {
            return Err(RebaseError::InvalidPriceReading);
        }
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct TempFeed(PathBuf);

    impl TempFeed {
        fn write(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "elastic-feed-{}-{}.json",
                std::process::id(),
                name
            ));
            fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempFeed {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_reads_fresh_price() {
        let now = chrono::Utc::now().timestamp();
        let feed = TempFeed::write(
            "fresh",
            &format!(r#"{{"price": "1050000000000000000", "timestamp": {}}}"#, now),
        );

        let source = FilePriceFeed::new(feed.path(), Some(300));
        assert_eq!(source.current_price().unwrap(), 1_050_000_000_000_000_000);
    }

    #[test]
    fn test_rejects_stale_reading() {
        let feed = TempFeed::write("stale", r#"{"price": "1000", "timestamp": 1000}"#);

        let source = FilePriceFeed::new(feed.path(), Some(300));
        assert!(matches!(
            source.current_price().unwrap_err(),
            RebaseError::OracleUnavailable(_)
        ));

        // Disabling the bound accepts the old reading
        let source = FilePriceFeed::new(feed.path(), None);
        assert_eq!(source.current_price().unwrap(), 1000);
    }

    #[test]
    fn test_rejects_zero_and_malformed_prices() {
        let feed = TempFeed::write("zero", r#"{"price": "0", "timestamp": 1000}"#);
        let source = FilePriceFeed::new(feed.path(), None);
        assert_eq!(
            source.current_price().unwrap_err(),
            RebaseError::InvalidPriceReading
        );

        let feed = TempFeed::write("garbled", r#"{"price": "not-a-number", "timestamp": 1}"#);
        let source = FilePriceFeed::new(feed.path(), None);
        assert_eq!(
            source.current_price().unwrap_err(),
            RebaseError::InvalidPriceReading
        );
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = FilePriceFeed::new("/nonexistent/feed.json", None);
        assert!(matches!(
            source.current_price().unwrap_err(),
            RebaseError::OracleUnavailable(_)
        ));
    }
}
