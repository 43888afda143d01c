// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Booking API client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response not received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused the credentials (401).
    #[error("Unauthorized: {}", show(.0))]
    Unauthorized(Option<String>),

    /// The resource does not exist (404).
    #[error("Not found: {}", show(.0))]
    NotFound(Option<String>),

    /// Any other non-success status.
    #[error("Request rejected with status {status}: {}", show(.detail))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        detail: Option<String>,
    },

    /// The response body does not have the expected shape.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// The client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The message reported by the server, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(detail)
            | Self::NotFound(detail)
            | Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The server's message, or `fallback` when it sent none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

fn show(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or("no details")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_server_detail() {
        let err = ApiError::Rejected {
            status: 400,
            detail: Some("Room is under maintenance".to_string()),
        };
        assert_eq!(err.message_or("Booking failed."), "Room is under maintenance");
        assert_eq!(
            err.to_string(),
            "Request rejected with status 400: Room is under maintenance"
        );
    }

    #[test]
    fn message_falls_back() {
        let err = ApiError::NotFound(None);
        assert_eq!(err.message_or("Unable to cancel booking."), "Unable to cancel booking.");
        assert_eq!(err.to_string(), "Not found: no details");

        let err = ApiError::InvalidResponse("expected array".to_string());
        assert_eq!(err.detail(), None);
    }
}
