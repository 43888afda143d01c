// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use roombook_core::{Booking, format_range};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, Palette};

#[derive(Debug)]
pub struct BookingFormatter {
    columns: Vec<BookingColumn>,
    format: OutputFormat,
}

impl BookingFormatter {
    pub fn new(palette: Palette) -> Self {
        Self {
            columns: vec![
                BookingColumn::Id,
                BookingColumn::Room,
                BookingColumn::TimeRange,
                BookingColumn::Attendees,
                BookingColumn::Status(palette),
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, bookings: &'a [Booking]) -> Display<'a> {
        Display {
            bookings,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    bookings: &'a [Booking],
    formatter: &'a BookingFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.bookings)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.bookings)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BookingColumn {
    Id,
    Room,
    TimeRange,
    Attendees,
    Status(Palette),
}

impl TableColumn<Booking> for BookingColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            BookingColumn::Id => "ID",
            BookingColumn::Room => "Room",
            BookingColumn::TimeRange => "Time Range",
            BookingColumn::Attendees => "Attendees",
            BookingColumn::Status(_) => "Status",
        }
        .into()
    }

    fn format<'a>(&self, booking: &'a Booking) -> Cow<'a, str> {
        match self {
            BookingColumn::Id => format!("#{}", booking.id).into(),
            BookingColumn::Room => booking.room_label().into(),
            BookingColumn::TimeRange => format_range(&booking.start_time, &booking.end_time).into(),
            BookingColumn::Attendees => booking.attendees_count.to_string().into(),
            BookingColumn::Status(_) => booking.status.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            BookingColumn::Id | BookingColumn::Attendees => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, booking: &Booking) -> Option<Color> {
        match self {
            BookingColumn::Status(palette) => Some(match booking.status.as_str() {
                "active" | "confirmed" => palette.good,
                "cancelled" => palette.muted,
                _ => palette.accent,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_core::{BookingId, RoomId, Theme};

    fn booking(id: i64, room_name: &str) -> Booking {
        Booking {
            id: BookingId(id),
            room_id: RoomId(7),
            user_id: 3,
            start_time: "2025-03-10T09:00:00".to_string(),
            end_time: "2025-03-10T10:30:00".to_string(),
            attendees_count: 3,
            room_name: room_name.to_string(),
            status: "active".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn formats_table() {
        colored::control::set_override(false);
        let bookings = vec![booking(12, "B07"), booking(104, "")];
        let formatter = BookingFormatter::new(Theme::Light.into());
        let out = formatter.format(&bookings).to_string();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "  ID  Room    Time Range             Attendees  Status");
        assert_eq!(lines[1], " #12  B07     10 Mar, 09:00 - 10:30          3  active");
        assert_eq!(lines[2], "#104  Room 7  10 Mar, 09:00 - 10:30          3  active");
    }

    #[test]
    fn formats_json() {
        let bookings = vec![booking(12, "B07")];
        let formatter =
            BookingFormatter::new(Theme::Light.into()).with_output_format(OutputFormat::Json);
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format(&bookings).to_string()).unwrap();
        assert_eq!(value[0]["id"], "#12");
        assert_eq!(value[0]["time_range"], "10 Mar, 09:00 - 10:30");
    }
}
