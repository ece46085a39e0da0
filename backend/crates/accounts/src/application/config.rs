//! Application Configuration
//!
//! Configuration for the accounts application layer. All values are fixed
//! at construction; nothing here is mutated after process start.

use std::time::Duration;

use platform::token::TokenCodec;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Access-token signing secret
    pub access_token_secret: Vec<u8>,
    /// Refresh-token signing secret (independent of the access secret)
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (10 days)
    pub refresh_token_ttl: Duration,
    /// Cookie carrying the access token
    pub access_cookie_name: String,
    /// Cookie carrying the refresh token
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            access_token_secret: vec![0u8; 32],
            refresh_token_secret: vec![0u8; 32],
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(10 * 24 * 3600),
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AccountsConfig {
    /// Create config with random token secrets (for development)
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;

        let mut access = vec![0u8; 32];
        let mut refresh = vec![0u8; 32];
        rand::rng().fill_bytes(&mut access);
        rand::rng().fill_bytes(&mut refresh);

        Self {
            access_token_secret: access,
            refresh_token_secret: refresh,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Build the token codec for these secrets and lifetimes
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(
            &self.access_token_secret,
            self.access_token_ttl,
            &self.refresh_token_secret,
            self.refresh_token_ttl,
        )
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Access-token cookie Max-Age in seconds
    pub fn access_cookie_max_age(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }

    /// Refresh-token cookie Max-Age in seconds
    pub fn refresh_cookie_max_age(&self) -> i64 {
        self.refresh_token_ttl.as_secs() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_shorter_than_refresh() {
        let config = AccountsConfig::default();
        assert!(config.access_token_ttl < config.refresh_token_ttl);
    }

    #[test]
    fn test_random_secrets_differ_per_purpose() {
        let config = AccountsConfig::with_random_secrets();
        assert_ne!(config.access_token_secret, config.refresh_token_secret);
    }

    #[test]
    fn test_development_disables_secure_cookie() {
        let config = AccountsConfig::development();
        assert!(!config.cookie_secure);
    }
}
