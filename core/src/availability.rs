// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Projection of booked time ranges onto a daily timeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datetime::parse_clock;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A booked time range of one room on one day, as sent by the server.
///
/// Missing or non-text fields read as empty, which [`project`] skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRange {
    /// Start of the booking, `HH:MM`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start: String,
    /// End of the booking, `HH:MM`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub end: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

impl AvailabilityRange {
    /// Creates a range from two clock texts.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// The span of a day shown on the timeline, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowClock", into = "WindowClock")]
pub struct DisplayWindow {
    /// First minute shown.
    pub start: u32,
    /// Minute the timeline ends at.
    pub end: u32,
}

impl DisplayWindow {
    /// Creates a window from minute offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates a window from two `HH:MM` clock texts.
    #[must_use]
    pub fn from_clock(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(parse_clock(start)?, parse_clock(end)?))
    }

    /// Length of the window in minutes, zero for a degenerate window.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl Default for DisplayWindow {
    /// 08:00 to 20:00.
    fn default() -> Self {
        Self::new(8 * 60, 20 * 60)
    }
}

impl fmt::Display for DisplayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", clock(self.start), clock(self.end))
    }
}

#[derive(Serialize, Deserialize)]
struct WindowClock {
    start: String,
    end: String,
}

impl TryFrom<WindowClock> for DisplayWindow {
    type Error = String;

    fn try_from(raw: WindowClock) -> Result<Self, Self::Error> {
        let window = DisplayWindow::from_clock(&raw.start, &raw.end)
            .ok_or_else(|| format!("invalid display window {}-{}", raw.start, raw.end))?;
        match window.total() {
            0 => Err(format!("display window {window} is empty")),
            _ => Ok(window),
        }
    }
}

impl From<DisplayWindow> for WindowClock {
    fn from(window: DisplayWindow) -> Self {
        Self {
            start: clock(window.start),
            end: clock(window.end),
        }
    }
}

/// An occupied stretch of the timeline, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Offset from the left edge.
    pub left: f64,
    /// Width of the segment.
    pub width: f64,
}

/// Projects booked ranges onto the display window.
///
/// Each range yields at most one segment, in input order. Ranges that fail
/// to parse or fall outside the window are skipped; overlapping ranges are
/// kept as separate segments.
#[must_use]
pub fn project(ranges: &[AvailabilityRange], window: DisplayWindow) -> Vec<Segment> {
    let total = window.total();
    if total == 0 {
        return Vec::new();
    }

    let total = f64::from(total);
    ranges
        .iter()
        .filter_map(|range| {
            let (Some(start), Some(end)) = (parse_clock(&range.start), parse_clock(&range.end))
            else {
                tracing::debug!(?range, "skipping malformed availability range");
                return None;
            };

            let start = start.max(window.start);
            let end = end.min(window.end);
            (end > start).then(|| Segment {
                left: f64::from(start - window.start) / total * 100.0,
                width: f64::from(end - start) / total * 100.0,
            })
        })
        .collect()
}

/// Draws segments as a row of `width` cells, `█` where occupied and `·` where free.
#[must_use]
pub fn render_timeline(segments: &[Segment], width: usize) -> String {
    let cell = 100.0 / width.max(1) as f64;
    (0..width)
        .map(|i| {
            let from = i as f64 * cell;
            let to = from + cell;
            let occupied = segments
                .iter()
                .any(|s| s.width > 0.0 && s.left < to && s.left + s.width > from);
            if occupied { '█' } else { '·' }
        })
        .collect()
}

/// Hour labels matching a [`render_timeline`] row of the same width.
#[must_use]
pub fn timeline_axis(window: DisplayWindow, width: usize) -> String {
    let total = window.total();
    let mut axis = vec![' '; width];
    if total == 0 || width == 0 {
        return String::new();
    }

    let first_hour = window.start.div_ceil(60);
    let last_hour = window.end.min(MINUTES_PER_DAY) / 60;
    let mut next_free = 0;
    for hour in first_hour..=last_hour {
        let offset = (hour * 60).saturating_sub(window.start);
        let pos = (offset as usize * width) / total as usize;
        let label = format!("{hour:02}");
        if pos < next_free || pos + label.len() > width {
            continue;
        }
        for (slot, ch) in axis.iter_mut().skip(pos).zip(label.chars()) {
            *slot = ch;
        }
        next_free = pos + label.len() + 1;
    }

    axis.into_iter().collect::<String>().trim_end().to_string()
}

fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
