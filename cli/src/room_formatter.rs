// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use roombook_core::Room;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, Palette};

#[derive(Debug)]
pub struct RoomFormatter {
    columns: Vec<RoomColumn>,
    format: OutputFormat,
}

impl RoomFormatter {
    pub fn new(palette: Palette) -> Self {
        Self {
            columns: vec![
                RoomColumn::Id,
                RoomColumn::Name,
                RoomColumn::Type,
                RoomColumn::Capacity,
                RoomColumn::Status(palette),
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, rooms: &'a [Room]) -> Display<'a> {
        Display {
            rooms,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rooms: &'a [Room],
    formatter: &'a RoomFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.rooms)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.rooms)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RoomColumn {
    Id,
    Name,
    Type,
    Capacity,
    Status(Palette),
}

impl TableColumn<Room> for RoomColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            RoomColumn::Id => "ID",
            RoomColumn::Name => "Name",
            RoomColumn::Type => "Type",
            RoomColumn::Capacity => "Capacity",
            RoomColumn::Status(_) => "Status",
        }
        .into()
    }

    fn format<'a>(&self, room: &'a Room) -> Cow<'a, str> {
        match self {
            RoomColumn::Id => room.id.to_string().into(),
            RoomColumn::Name => room.name.as_str().into(),
            RoomColumn::Type => room.kind.as_str().into(),
            RoomColumn::Capacity => room.capacity.to_string().into(),
            RoomColumn::Status(_) => room.status.to_string().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            RoomColumn::Id | RoomColumn::Capacity => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, room: &Room) -> Option<Color> {
        match self {
            RoomColumn::Status(palette) => Some(palette.status(room.status)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_core::{RoomId, RoomStatus, RoomType, Theme};

    fn rooms() -> Vec<Room> {
        vec![
            Room {
                id: RoomId(1),
                name: "A01".to_string(),
                kind: RoomType::A,
                capacity: 1,
                status: RoomStatus::Available,
            },
            Room {
                id: RoomId(42),
                name: "C02".to_string(),
                kind: RoomType::C,
                capacity: 10,
                status: RoomStatus::Maintenance,
            },
        ]
    }

    #[test]
    fn formats_table() {
        colored::control::set_override(false);
        let rooms = rooms();
        let formatter = RoomFormatter::new(Theme::Light.into());
        let out = formatter.format(&rooms).to_string();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID  Name  Type  Capacity  Status");
        assert_eq!(lines[1], " 1  A01   A            1  available");
        assert_eq!(lines[2], "42  C02   C           10  maintenance");
    }

    #[test]
    fn formats_json() {
        let rooms = rooms();
        let formatter =
            RoomFormatter::new(Theme::Dark.into()).with_output_format(OutputFormat::Json);
        let out = formatter.format(&rooms).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1]["name"], "C02");
        assert_eq!(value[1]["status"], "maintenance");
        assert_eq!(value[0]["capacity"], "1");
    }
}
