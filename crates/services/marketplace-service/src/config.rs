//! Marketplace service configuration.

use common::DatabaseConfig;

/// Environment variables holding the connection URL, in lookup order.
pub const DATABASE_URL_VARS: &[&str] = &["MARKETPLACE_DATABASE_URL", "DATABASE_URL"];

/// Marketplace service configuration.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceConfig {
    pub database: DatabaseConfig,
}

impl MarketplaceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(DATABASE_URL_VARS),
        }
    }

    /// Load configuration, forcing a connection URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.database.url = url.into();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_url_overrides_environment() {
        let config = MarketplaceConfig::with_url("sqlite::memory:");
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_debug_hides_url() {
        let config = MarketplaceConfig::with_url("postgres://user:secret@db/market");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
