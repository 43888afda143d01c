// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use roombook_core::{
    Page, Room, RoomFilter, RoomId, RoomType, project, render_timeline, timeline_axis,
};
use serde_json::json;

use crate::app::App;
use crate::arg::{CommonArgs, RoomArgs};
use crate::room_formatter::RoomFormatter;
use crate::util::{OutputFormat, api_error, parse_date, today};

#[derive(Debug, Clone)]
pub struct CmdRoomList {
    pub kind: Option<RoomType>,
    pub page: usize,
    pub output_format: OutputFormat,
}

impl CmdRoomList {
    pub const NAME: &str = "rooms";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List library rooms, one page at a time")
            .arg(
                Arg::new("type")
                    .short('t')
                    .long("type")
                    .value_name("TYPE")
                    .help("Only rooms of this type (A, B or C)")
                    .value_parser(|s: &str| s.parse::<RoomType>()),
            )
            .arg(
                arg!(-p --page <PAGE> "Page to show, starting at 1")
                    .value_parser(value_parser!(usize))
                    .default_value("1"),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            kind: matches.get_one::<RoomType>("type").cloned(),
            page: matches.get_one("page").copied().unwrap_or(1),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    /// The command shown when none is given.
    pub fn new() -> Self {
        Self {
            kind: None,
            page: 1,
            output_format: OutputFormat::Table,
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing rooms...");
        let client = app.client()?;
        let rooms = client
            .list_rooms(self.kind.as_ref())
            .await
            .map_err(api_error("Unable to load rooms right now."))?;

        let filter = self.kind.map_or(RoomFilter::All, RoomFilter::Type);
        let rooms: Vec<Room> = filter.apply(&rooms).into_iter().cloned().collect();
        let page = Page::of(&rooms, self.page, app.config.page_size);
        if page.page != self.page {
            tracing::debug!(requested = self.page, shown = page.page, "page out of range");
        }

        let palette = app.palette();
        let formatter = RoomFormatter::new(palette).with_output_format(self.output_format);
        match self.output_format {
            OutputFormat::Json => println!("{}", formatter.format(page.items)),
            OutputFormat::Table => {
                println!("{} {}", "Rooms".bold(), format!("({filter})").color(palette.muted));
                if !page.items.is_empty() {
                    println!("{}", formatter.format(page.items));
                }
                let footer = format!(
                    "{}, page {}/{}",
                    page.summary("rooms"),
                    page.page,
                    page.total_pages
                );
                println!("{}", footer.color(palette.muted));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAvailability {
    pub room: Option<RoomId>,
    pub date: Option<String>,
    pub width: usize,
    pub output_format: OutputFormat,
}

impl CmdAvailability {
    pub const NAME: &str = "availability";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("avail")
            .about("Show when a room is booked on a day")
            .arg(RoomArgs::room(false).help("Id of the room, defaults to the last one viewed"))
            .arg(arg!(-d --date <DATE> "Day to show: YYYY-MM-DD, today or tomorrow"))
            .arg(
                arg!(-w --width <WIDTH> "Width of the timeline in cells")
                    .value_parser(value_parser!(usize))
                    .default_value("48"),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            room: RoomArgs::get_room(matches),
            date: matches.get_one("date").cloned(),
            width: matches.get_one("width").copied().unwrap_or(48),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing availability...");
        let room = self
            .room
            .or(app.session.selected_room)
            .ok_or("No room given and none viewed before")?;
        let date = match &self.date {
            Some(date) => parse_date(date)?,
            None => today(),
        };

        let client = app.client()?;
        let ranges = client
            .get_availability(room, date)
            .await
            .map_err(api_error("Unable to load availability right now."))?;
        app.session.selected_room = Some(room);

        let window = app.config.display_window;
        let segments = project(&ranges, window);
        match self.output_format {
            OutputFormat::Json => {
                let value = json!({
                    "room_id": room,
                    "date": date.to_string(),
                    "window": window,
                    "ranges": ranges,
                    "segments": segments,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            OutputFormat::Table => {
                let palette = app.palette();
                println!("{} {room} on {date} ({window})", "Room".bold());
                println!("{}", timeline_axis(window, self.width).color(palette.muted));
                println!("{}", render_timeline(&segments, self.width).color(palette.accent));
                if ranges.is_empty() {
                    println!("{}", "No bookings, free all day".color(palette.good));
                }
                for range in &ranges {
                    println!("  booked {}-{}", range.start, range.end);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rooms_command() {
        let cmd = CmdRoomList::command();
        let matches = cmd
            .try_get_matches_from(["rooms", "--type", "b", "--page", "3", "--output-format", "json"])
            .unwrap();
        let parsed = CmdRoomList::from(&matches);
        assert_eq!(parsed.kind, Some(RoomType::B));
        assert_eq!(parsed.page, 3);
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn rooms_command_defaults() {
        let matches = CmdRoomList::command()
            .try_get_matches_from(["rooms"])
            .unwrap();
        let parsed = CmdRoomList::from(&matches);
        assert_eq!(parsed.kind, None);
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn parses_availability_command() {
        let matches = CmdAvailability::command()
            .try_get_matches_from(["availability", "7", "--date", "2025-03-10", "-w", "24"])
            .unwrap();
        let parsed = CmdAvailability::from(&matches);
        assert_eq!(parsed.room, Some(RoomId(7)));
        assert_eq!(parsed.date.as_deref(), Some("2025-03-10"));
        assert_eq!(parsed.width, 24);

        let matches = CmdAvailability::command()
            .try_get_matches_from(["availability"])
            .unwrap();
        let parsed = CmdAvailability::from(&matches);
        assert_eq!(parsed.room, None);
        assert_eq!(parsed.width, 48);
    }

    #[test]
    fn rejects_non_numeric_room() {
        let result = CmdAvailability::command().try_get_matches_from(["availability", "B07"]);
        assert!(result.is_err());
    }
}
