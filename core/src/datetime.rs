// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{DateTime, Time};

const INSTANT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parses a local date and time as typed into a booking form, such as
/// `2025-01-01T09:30` or `2025-01-01 09:30`.
///
/// Returns `None` for empty or malformed input.
#[must_use]
pub fn parse_instant(text: &str) -> Option<DateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = text.parse::<DateTime>() {
        return Some(dt);
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| DateTime::strptime(fmt, text).ok())
}

/// Parses a `HH:MM` clock time into minutes since midnight.
#[must_use]
pub fn parse_clock(text: &str) -> Option<u32> {
    let time = Time::strptime("%H:%M", text.trim()).ok()?;
    let minutes = i32::from(time.hour()) * 60 + i32::from(time.minute());
    u32::try_from(minutes).ok()
}
