// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::datetime::parse_instant;
use crate::eligibility::{Checker, ValidationResult, parse_attendees};
use crate::room::{Room, RoomId, RoomType};

/// Identifier of a booking on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub i64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BookingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// A booking as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Server-side identifier.
    pub id: BookingId,
    /// The booked room.
    pub room_id: RoomId,
    /// Owner of the booking.
    pub user_id: i64,
    /// Start, as sent by the server.
    pub start_time: String,
    /// End, as sent by the server.
    pub end_time: String,
    /// Number of attendees.
    pub attendees_count: u32,
    /// Name of the booked room, empty if unknown.
    #[serde(default)]
    pub room_name: String,
    /// Server-side status such as `active`.
    pub status: String,
    /// Creation time, if reported.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    /// Room name, falling back to `Room <id>`.
    #[must_use]
    pub fn room_label(&self) -> String {
        match self.room_name.is_empty() {
            true => format!("Room {}", self.room_id),
            false => self.room_name.clone(),
        }
    }
}

/// Formats a server-side time range as `01 Jan, 09:00 - 10:00`.
#[must_use]
pub fn format_range(start: &str, end: &str) -> String {
    match (parse_server_time(start), parse_server_time(end)) {
        (Some(start), Some(end)) => format!(
            "{}, {} - {}",
            start.strftime("%d %b"),
            start.strftime("%H:%M"),
            end.strftime("%H:%M")
        ),
        _ => "Invalid date range".to_string(),
    }
}

fn parse_server_time(text: &str) -> Option<DateTime> {
    // Offsets are dropped: the server reports times in the library's zone.
    let text = text.trim();
    let civil = text
        .find(['+', 'Z', 'z'])
        .or_else(|| offset_sign(text))
        .map_or(text, |i| text.get(..i).unwrap_or(text));
    parse_instant(civil)
}

fn offset_sign(text: &str) -> Option<usize> {
    let time = text.find(['T', ' '])?;
    text.get(time..)?.rfind('-').map(|i| time + i)
}

/// Payload of a new booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    /// The room to book.
    pub room_id: RoomId,
    /// Start time.
    pub start_time: DateTime,
    /// End time.
    pub end_time: DateTime,
    /// Number of attendees.
    pub attendees_count: u32,
}

/// A booking being prepared by the user, exactly as typed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProposedBooking {
    /// Start date and time text.
    pub start: Option<String>,
    /// End date and time text.
    pub end: Option<String>,
    /// Attendee count text.
    pub attendees: String,
}

impl ProposedBooking {
    /// Runs the checks that do not depend on the room: times, duration and a
    /// parsable attendee count.
    ///
    /// # Errors
    ///
    /// Returns the user-facing reason when the booking cannot be valid for any room.
    pub fn precheck(&self, checker: &Checker) -> Result<(), String> {
        checker
            .check(
                &RoomType::Other(String::new()),
                &self.attendees,
                self.start.as_deref(),
                self.end.as_deref(),
            )
            .into_result()
    }

    /// Runs the checker against `room` and builds the request payload.
    ///
    /// # Errors
    ///
    /// Returns the user-facing reason when the booking must not be submitted.
    pub fn validate(&self, room: &Room, checker: &Checker) -> Result<BookingRequest, String> {
        let result = checker.check(
            &room.kind,
            &self.attendees,
            self.start.as_deref(),
            self.end.as_deref(),
        );
        if let ValidationResult::Invalid(reason) = result {
            return Err(reason);
        }

        let invalid_times = || "select valid times".to_string();
        let start_time = self
            .start
            .as_deref()
            .and_then(parse_instant)
            .ok_or_else(invalid_times)?;
        let end_time = self
            .end
            .as_deref()
            .and_then(parse_instant)
            .ok_or_else(invalid_times)?;

        let attendees_count = parse_attendees(&self.attendees)
            .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX))
            .map(|n| n as u32)
            .ok_or_else(|| "enter a valid attendee count".to_string())?;

        Ok(BookingRequest {
            room_id: room.id,
            start_time,
            end_time,
            attendees_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomStatus;
    use jiff::SignedDuration;
    use jiff::civil::date;

    fn room(kind: RoomType) -> Room {
        Room {
            id: RoomId(7),
            name: "B07".to_string(),
            kind,
            capacity: 5,
            status: RoomStatus::Available,
        }
    }

    fn proposal(attendees: &str) -> ProposedBooking {
        ProposedBooking {
            start: Some("2025-03-10T09:00".to_string()),
            end: Some("2025-03-10T10:30".to_string()),
            attendees: attendees.to_string(),
        }
    }

    #[test]
    fn validate_builds_request() {
        let request = proposal(" 3 ")
            .validate(&room(RoomType::B), &Checker::default())
            .unwrap();
        assert_eq!(request.room_id, RoomId(7));
        assert_eq!(request.start_time, date(2025, 3, 10).at(9, 0, 0, 0));
        assert_eq!(request.end_time, date(2025, 3, 10).at(10, 30, 0, 0));
        assert_eq!(request.attendees_count, 3);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["room_id"], 7);
        assert_eq!(json["start_time"], "2025-03-10T09:00:00");
        assert_eq!(json["attendees_count"], 3);
    }

    #[test]
    fn validate_surfaces_checker_reason() {
        let err = proposal("9")
            .validate(&room(RoomType::B), &Checker::default())
            .unwrap_err();
        assert_eq!(err, "type B rooms require 2-5 people");

        let missing = ProposedBooking {
            start: None,
            ..proposal("3")
        };
        let err = missing
            .validate(&room(RoomType::B), &Checker::default())
            .unwrap_err();
        assert_eq!(err, "select both start and end times");
    }

    #[test]
    fn precheck_ignores_room_policy() {
        let checker = Checker::default();
        assert_eq!(proposal("9").precheck(&checker), Ok(()));

        let missing = ProposedBooking {
            end: None,
            ..proposal("abc")
        };
        assert_eq!(
            missing.precheck(&checker).unwrap_err(),
            "select both start and end times"
        );
        assert_eq!(
            proposal("abc").precheck(&checker).unwrap_err(),
            "enter a valid attendee count"
        );

        let long = ProposedBooking {
            end: Some("2025-03-10T15:00".to_string()),
            ..proposal("1")
        };
        assert_eq!(long.precheck(&checker), Ok(()));
        let limited = Checker::default().with_max_duration(SignedDuration::from_hours(4));
        assert!(long.precheck(&limited).is_err());
    }

    #[test]
    fn validate_rejects_fractional_counts() {
        let err = proposal("2.5")
            .validate(&room(RoomType::B), &Checker::default())
            .unwrap_err();
        assert_eq!(err, "enter a valid attendee count");

        let err = proposal("0")
            .validate(&room("D".into()), &Checker::default())
            .unwrap_err();
        assert_eq!(err, "enter a valid attendee count");
    }

    #[test]
    fn deserializes_booking() {
        let json = r#"{
            "id": 12, "room_id": 7, "user_id": 1,
            "start_time": "2025-03-10T09:00:00+07:00",
            "end_time": "2025-03-10T10:30:00+07:00",
            "attendees_count": 3, "room_name": "", "status": "active"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, BookingId(12));
        assert_eq!(booking.created_at, None);
        assert_eq!(booking.room_label(), "Room 7");
        assert_eq!(
            format_range(&booking.start_time, &booking.end_time),
            "10 Mar, 09:00 - 10:30"
        );
    }

    #[test]
    fn format_range_handles_bad_input() {
        assert_eq!(format_range("yesterday", "2025-03-10T10:30"), "Invalid date range");
        assert_eq!(
            format_range("2025-03-10T09:00:00Z", "2025-03-10T10:00:00-05:00"),
            "10 Mar, 09:00 - 10:00"
        );
        assert_eq!(
            format_range("2025-03-10T09:00:00", "2025-03-10T10:00:00.123"),
            "10 Mar, 09:00 - 10:00"
        );
    }

    #[test]
    fn parses_booking_ids() {
        assert_eq!("#42".parse::<BookingId>().unwrap(), BookingId(42));
        assert!("x".parse::<BookingId>().is_err());
    }
}
