//! Database configuration

use serde::Deserialize;

use super::error::ValidationError;

/// PostgreSQL configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_postgres_url_passes() {
        let config = DatabaseConfig {
            url: "postgresql://user@localhost/taskhub".to_string(),
            max_connections: 10,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_postgres_url_fails() {
        let config = DatabaseConfig {
            url: "mysql://localhost/taskhub".to_string(),
            max_connections: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_pool_fails() {
        let config = DatabaseConfig {
            url: "postgres://localhost/taskhub".to_string(),
            max_connections: 500,
        };
        assert!(config.validate().is_err());
    }
}
