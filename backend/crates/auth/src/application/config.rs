//! Application Configuration
//!
//! Configuration for the account verification use cases.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Origin of the web app; verification links point at
    /// `{public_base_url}/verify-email?token=...`
    pub public_base_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Mount `force-verify` and `debug-token`
    pub dev_endpoints_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            password_pepper: None,
            dev_endpoints_enabled: false,
        }
    }
}

impl AuthConfig {
    /// Create config for development (diagnostic endpoints on)
    pub fn development() -> Self {
        Self {
            dev_endpoints_enabled: true,
            ..Self::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.public_base_url.trim_end_matches('/'),
            token
        )
    }
}
