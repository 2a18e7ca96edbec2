//! Service configuration loaded from the environment.

use std::env;

const DEFAULT_BASE_URL: &str = "https://doc.rongdasoft.com";

/// Credentials and endpoint root for the Rongda service.
///
/// `RD_USER` and `RD_PASS` are required; their absence is a startup failure.
/// The base URL is fixed in production and overridable only so tests can point
/// the client at a local mock server.
#[derive(Debug, Clone)]
pub struct RongdaConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl RongdaConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("RD_USER").map_err(|_| "RD_USER must be set".to_string())?;
        let password = env::var("RD_PASS").map_err(|_| "RD_PASS must be set".to_string())?;

        Ok(Self {
            base_url: env::var("RD_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            username,
            password,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
