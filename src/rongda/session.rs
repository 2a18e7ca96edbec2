//! Authenticated session against the Rongda service.
//!
//! A session is a cookie-bearing `reqwest::Client` obtained through the login
//! endpoint. It is acquired once per retrieval, handed to the resolver and
//! search client, and released (logged out) on every exit path. Sessions are
//! never cached or reused across retrievals, which keeps session-expiry edge
//! cases out of the pipeline at the cost of one login round-trip per call.

use log::warn;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use serde::Deserialize;
use serde_json::json;

use super::config::RongdaConfig;
use super::error::RongdaError;

const LOGIN_PATH: &str = "/api/web-server/xp/user/login";
const LOGOUT_PATH: &str = "/api/web-server/xp/user/logout";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Headers the service expects on every request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"));
    headers
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "retMsg")]
    ret_msg: Option<String>,
}

/// An authenticated transport handle. Owns the cookie jar the service issued
/// at login.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    base_url: String,
}

impl Session {
    /// Log in with the configured credentials. Any rejection, including an
    /// unreachable host, surfaces as `RongdaError::Authentication`.
    pub async fn acquire(config: &RongdaConfig) -> Result<Session, RongdaError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()
            .map_err(|err| RongdaError::authentication(format!("client setup failed: {err}")))?;

        let response = client
            .post(format!("{}{}", config.base_url, LOGIN_PATH))
            .json(&json!({
                "username": config.username,
                "password": config.password,
            }))
            .send()
            .await
            .map_err(|err| RongdaError::authentication(format!("login request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RongdaError::authentication(format!(
                "login endpoint answered {status}"
            )));
        }

        let envelope: LoginEnvelope = response
            .json()
            .await
            .map_err(|err| RongdaError::authentication(format!("malformed login response: {err}")))?;

        if envelope.code != 200 || !envelope.success {
            return Err(RongdaError::authentication(
                envelope.ret_msg.unwrap_or_else(|| "credentials rejected".to_string()),
            ));
        }

        Ok(Session {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// GET request builder for a service path, carrying the session cookies.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    /// POST request builder for a service path, carrying the session cookies.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    /// Log out, consuming the session. Best-effort: a failed logout only
    /// leaves a stale remote session behind, so it is logged and swallowed.
    pub async fn release(self) {
        let result = self
            .client
            .post(format!("{}{}", self.base_url, LOGOUT_PATH))
            .send()
            .await;

        if let Err(err) = result {
            warn!("logout failed, remote session left to expire: {err}");
        }
    }
}
