// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and error-body handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ApiConfig, AuthMethod};
use crate::error::ApiError;

const CHAOS_HEADER: &str = "x-chaos-token";

/// HTTP client for booking API operations.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    auth: AuthMethod,
    chaos: bool,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            auth: config.auth.clone(),
            chaos: false,
        })
    }

    pub fn set_auth(&mut self, auth: AuthMethod) {
        self.auth = auth;
    }

    pub fn set_chaos(&mut self, chaos: bool) {
        self.chaos = chaos;
    }

    /// Builds a request with authentication and chaos headers.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.auth {
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        if self.chaos {
            req = req.header(CHAOS_HEADER, "true");
        }

        req
    }

    /// Executes a request and maps non-success statuses to errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        tracing::debug!(%status, ?detail, "request rejected");
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(detail),
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            status => ApiError::Rejected {
                status: status.as_u16(),
                detail,
            },
        })
    }

    /// Decodes a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read or has an unexpected shape.
    pub async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Understands a bare string, a `detail` string, a `detail` list of
/// validation errors with `msg` fields, and a `message` string.
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match value {
        Value::String(text) => Some(text),
        Value::Object(map) => match map.get("detail") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| {
                        item.get("msg")
                            .and_then(Value::as_str)
                            .unwrap_or("Invalid input.")
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Some(Value::String(text)) => Some(text.clone()),
            _ => map.get("message").and_then(Value::as_str).map(str::to_string),
        },
        _ => None,
    }
}
