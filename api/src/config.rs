// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Authentication method of the booking API.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Bearer token authentication.
    #[serde(rename = "bearer")]
    Bearer {
        /// Access token.
        token: String,
    },
}

/// Booking API server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("roombook/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let config: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.auth, AuthMethod::None);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("roombook/"));
    }

    #[test]
    fn bearer_auth_is_tagged() {
        let config: ApiConfig = serde_json::from_str(
            r#"{"base_url": "https://rooms.example.org", "auth": {"type": "bearer", "token": "t"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.auth,
            AuthMethod::Bearer {
                token: "t".to_string()
            }
        );
    }
}
