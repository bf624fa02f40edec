// src/config.rs
// =============================================================================
// Crawl configuration.
//
// One struct holds every knob the engine reads. The CLI fills it from flags;
// library users start from Default and adjust with the with_* methods.
// validate() runs before any worker is spawned so misuse fails fast.
// =============================================================================

use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_MAX_DEPTH: usize = 5;
pub const DEFAULT_FOLLOW_SUFFIX: &str = ".html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Number of workers pulling from the frontier
    pub concurrency: usize,
    /// Deepest depth a queued page may have (seeds are depth 0)
    pub max_depth: usize,
    /// Child links are only recorded and followed when they end with this
    pub follow_suffix: String,
    /// Total time allowed for one page download
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_depth: DEFAULT_MAX_DEPTH,
            follow_suffix: DEFAULT_FOLLOW_SUFFIX.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("link-spider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    pub fn new(concurrency: usize, max_depth: usize) -> Self {
        Self {
            concurrency,
            max_depth,
            ..Default::default()
        }
    }

    pub fn with_follow_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.follow_suffix = suffix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    // Checks the config before a crawl starts
    //
    // Returns: Err for settings that would make the crawl meaningless
    //   concurrency == 0 -> no worker would ever drain the queue
    //   empty suffix     -> suffix filter would accept everything, including
    //                       images and archives
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConcurrency(self.concurrency));
        }
        if self.follow_suffix.is_empty() {
            return Err(CrawlError::InvalidConfig(
                "follow suffix must not be empty".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "request timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.follow_suffix, ".html");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = CrawlConfig::new(0, 1).validate().unwrap_err();
        assert!(matches!(err, CrawlError::InvalidConcurrency(0)));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let config = CrawlConfig::new(2, 1).with_follow_suffix("");
        assert!(matches!(config.validate(), Err(CrawlError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CrawlConfig::new(2, 1).with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
