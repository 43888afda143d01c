// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Booking API client.

use jiff::civil::Date;
use reqwest::{Method, Url};
use roombook_core::{AvailabilityRange, Booking, BookingId, BookingRequest, Room, RoomId, RoomType};
use serde_json::Value;

use crate::config::{ApiConfig, AuthMethod};
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{NewUser, Token, User};

/// Client for the library room-booking API.
///
/// # Example
///
/// ```ignore
/// use roombook_api::{ApiConfig, BookingClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BookingClient::new(ApiConfig::default())?.with_chaos(true);
/// let rooms = client.list_rooms(None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: HttpClient,
    base_url: String,
}

impl BookingClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let http = HttpClient::new(&config)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends `token` as bearer authentication on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.http.set_auth(AuthMethod::Bearer {
            token: token.into(),
        });
        self
    }

    /// Tags every request for fault injection when `chaos` is set.
    #[must_use]
    pub fn with_chaos(mut self, chaos: bool) -> Self {
        self.http.set_chaos(chaos);
        self
    }

    /// Lists rooms, optionally only those of one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_rooms(&self, kind: Option<&RoomType>) -> Result<Vec<Room>, ApiError> {
        let mut req = self.http.build_request(Method::GET, &self.full_url("/rooms"));
        if let Some(kind) = kind {
            req = req.query(&[("type", kind.as_str())]);
        }
        let resp = self.http.execute(req).await?;
        HttpClient::json(resp).await
    }

    /// Booked ranges of one room on one day.
    ///
    /// Entries that are not range objects are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list.
    #[tracing::instrument(skip(self))]
    pub async fn get_availability(
        &self,
        room_id: RoomId,
        date: Date,
    ) -> Result<Vec<AvailabilityRange>, ApiError> {
        let url = self.full_url(&format!("/rooms/{room_id}/availability"));
        let req = self
            .http
            .build_request(Method::GET, &url)
            .query(&[("date", date.to_string())]);
        let resp = self.http.execute(req).await?;
        let entries: Vec<Value> = HttpClient::json(resp).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(range) => Some(range),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed availability entry");
                    None
                }
            })
            .collect())
    }

    /// Submits a new booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the booking.
    #[tracing::instrument(skip(self))]
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, &self.full_url("/bookings"))
            .json(request);
        let resp = self.http.execute(req).await?;
        let booking: Booking = HttpClient::json(resp).await?;
        tracing::info!(id = %booking.id, "booking created");
        Ok(booking)
    }

    /// Cancels a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking cannot be cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(&self, id: BookingId) -> Result<(), ApiError> {
        let url = self.full_url(&format!("/bookings/{id}"));
        self.http
            .execute(self.http.build_request(Method::DELETE, &url))
            .await?;
        Ok(())
    }

    /// Exchanges credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are refused.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, &self.full_url("/token"))
            .form(&[("username", email), ("password", password)]);
        let resp = self.http.execute(req).await?;
        HttpClient::json(resp).await
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is refused.
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let req = self
            .http
            .build_request(Method::POST, &self.full_url("/register"))
            .json(user);
        let resp = self.http.execute(req).await?;
        HttpClient::json(resp).await
    }

    /// Bookings owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn my_bookings(&self, user_id: i64) -> Result<Vec<Booking>, ApiError> {
        let url = self.full_url(&format!("/my-bookings/{user_id}"));
        let resp = self
            .http
            .execute(self.http.build_request(Method::GET, &url))
            .await?;
        HttpClient::json(resp).await
    }

    fn full_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
