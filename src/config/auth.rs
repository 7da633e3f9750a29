//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token signing
    pub jwt_secret: String,

    /// Token lifetime in minutes
    #[serde(default = "default_expiration_minutes")]
    pub jwt_expiration_minutes: u64,
}

impl AuthConfig {
    /// Token lifetime in seconds, as reported to clients at login
    pub fn expiration_secs(&self) -> u64 {
        self.jwt_expiration_minutes * 60
    }

    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.jwt_expiration_minutes == 0 {
            return Err(ValidationError::InvalidJwtExpiration);
        }
        Ok(())
    }
}

fn default_expiration_minutes() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_expiration_minutes: 30,
        }
    }

    #[test]
    fn long_secret_passes() {
        assert!(config("0123456789abcdef0123456789abcdef").validate().is_ok());
    }

    #[test]
    fn short_secret_fails() {
        assert!(config("secret").validate().is_err());
    }

    #[test]
    fn expiration_converts_to_seconds() {
        assert_eq!(config("0123456789abcdef0123456789abcdef").expiration_secs(), 1800);
    }
}
