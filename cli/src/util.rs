// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use colored::Color;
use jiff::Zoned;
use jiff::civil::Date;
use roombook_api::ApiError;
use roombook_core::{RoomStatus, Theme};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Terminal colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub good: Color,
    pub bad: Color,
    pub muted: Color,
}

impl Palette {
    pub fn status(self, status: RoomStatus) -> Color {
        match status.is_bookable() {
            true => self.good,
            false => self.bad,
        }
    }
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: Color::Blue,
                good: Color::Green,
                bad: Color::Red,
                muted: Color::BrightBlack,
            },
            Theme::Dark => Self {
                accent: Color::BrightCyan,
                good: Color::BrightGreen,
                bad: Color::BrightRed,
                muted: Color::White,
            },
        }
    }
}

pub fn today() -> Date {
    Zoned::now().date()
}

/// Parses `today`, `tomorrow` or a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<Date, Box<dyn Error>> {
    match text.trim() {
        "today" => Ok(today()),
        "tomorrow" => Ok(today().tomorrow()?),
        s => s
            .parse()
            .map_err(|e| format!("Invalid date '{s}', expected YYYY-MM-DD: {e}").into()),
    }
}

/// Turns an API error into the server's message, or `fallback` without one.
pub fn api_error(fallback: &str) -> impl FnOnce(ApiError) -> Box<dyn Error> {
    move |err| {
        tracing::debug!(error = %err, "request failed");
        err.message_or(fallback).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn parses_dates() {
        assert_eq!(parse_date("2025-03-10").unwrap(), date(2025, 3, 10));
        assert_eq!(parse_date("today").unwrap(), today());
        assert_eq!(parse_date("tomorrow").unwrap(), today().tomorrow().unwrap());
        assert!(parse_date("10/03/2025").is_err());
    }

    #[test]
    fn api_error_uses_detail_or_fallback() {
        let err = ApiError::Rejected {
            status: 409,
            detail: Some("Room already booked".to_string()),
        };
        assert_eq!(api_error("fallback")(err).to_string(), "Room already booked");

        let err = ApiError::NotFound(None);
        assert_eq!(
            api_error("Unable to cancel booking.")(err).to_string(),
            "Unable to cancel booking."
        );
    }

    #[test]
    fn palettes_differ_per_theme() {
        let light = Palette::from(Theme::Light);
        let dark = Palette::from(Theme::Dark);
        assert_ne!(light, dark);
        assert_eq!(light.status(RoomStatus::Available), Color::Green);
        assert_eq!(dark.status(RoomStatus::Maintenance), Color::BrightRed);
    }
}
