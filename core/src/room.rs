// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a room on the booking server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RoomId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Category of a room.
///
/// The server knows the types `A`, `B` and `C`. Any other tag is kept as
/// [`RoomType::Other`] so rooms of newer categories still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    /// Single-person study room.
    A,
    /// Small group room.
    B,
    /// Large group room.
    C,
    /// A type this client has no built-in knowledge of.
    Other(String),
}

impl RoomType {
    /// The wire tag of the room type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::A => "A",
            RoomType::B => "B",
            RoomType::C => "C",
            RoomType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RoomType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "A" => RoomType::A,
            "B" => RoomType::B,
            "C" => RoomType::C,
            _ => RoomType::Other(tag),
        }
    }
}

impl From<&str> for RoomType {
    fn from(tag: &str) -> Self {
        tag.to_string().into()
    }
}

impl From<RoomType> for String {
    fn from(kind: RoomType) -> Self {
        match kind {
            RoomType::Other(tag) => tag,
            kind => kind.as_str().to_string(),
        }
    }
}

impl FromStr for RoomType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.trim().to_uppercase().into())
    }
}

/// Booking status of a room as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Open for booking.
    Available,
    /// Under maintenance.
    Maintenance,
    /// Currently occupied.
    Occupied,
}

impl RoomStatus {
    /// Whether new bookings can be placed on the room.
    #[must_use]
    pub const fn is_bookable(self) -> bool {
        matches!(self, RoomStatus::Available)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoomStatus::Available => "available",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Occupied => "occupied",
        })
    }
}

/// A library room, as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Server-side identifier.
    pub id: RoomId,
    /// Display name, e.g. `A01`.
    pub name: String,
    /// Category deciding the attendee policy.
    #[serde(rename = "type")]
    pub kind: RoomType,
    /// Maximum number of people.
    pub capacity: u32,
    /// Current status.
    pub status: RoomStatus,
}
