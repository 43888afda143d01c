// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::slice;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use roombook_core::{BookingId, ProposedBooking, RoomId, duration_label};

use crate::app::App;
use crate::arg::{BookingArgs, CommonArgs, RoomArgs};
use crate::booking_formatter::BookingFormatter;
use crate::util::{OutputFormat, api_error};

#[derive(Debug, Clone)]
pub struct CmdBook {
    pub room: RoomId,
    pub start: Option<String>,
    pub end: Option<String>,
    pub attendees: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdBook {
    pub const NAME: &str = "book";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Book a room")
            .arg(RoomArgs::room(true))
            .arg(arg!(-s --start <START> "Start, as YYYY-MM-DDTHH:MM or YYYY-MM-DD HH:MM"))
            .arg(arg!(-e --end <END> "End, as YYYY-MM-DDTHH:MM or YYYY-MM-DD HH:MM"))
            .arg(arg!(-a --attendees <COUNT> "Number of attendees"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            room: RoomArgs::get_room(matches).ok_or("Room is required")?,
            start: matches.get_one("start").cloned(),
            end: matches.get_one("end").cloned(),
            attendees: matches.get_one("attendees").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub fn proposal(&self) -> ProposedBooking {
        ProposedBooking {
            start: self.start.clone(),
            end: self.end.clone(),
            attendees: self.attendees.clone().unwrap_or_default(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "booking room...");
        let checker = app.config.checker();
        let proposal = self.proposal();
        proposal
            .precheck(&checker)
            .map_err(|reason| format!("Cannot book room {}: {reason}", self.room))?;

        if !app.session.is_authenticated() {
            return Err("Please log in first".into());
        }

        let client = app.client()?;
        let rooms = client
            .list_rooms(None)
            .await
            .map_err(api_error("Unable to load rooms right now."))?;
        let room = rooms
            .into_iter()
            .find(|room| room.id == self.room)
            .ok_or_else(|| format!("Room {} not found", self.room))?;
        app.session.selected_room = Some(room.id);

        let palette = app.palette();
        if !room.status.is_bookable() {
            println!(
                "{} room {} is {}",
                "Warning:".color(palette.bad),
                room.name,
                room.status
            );
        }

        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            println!("Duration: {}", duration_label(start, end));
        }

        let request = proposal
            .validate(&room, &checker)
            .map_err(|reason| format!("Cannot book {}: {reason}", room.name))?;

        let booking = client
            .create_booking(&request)
            .await
            .map_err(api_error("Booking failed. Please try again."))?;

        if self.output_format == OutputFormat::Table {
            println!("{}", "Booking Successful!".color(palette.good));
        }
        let formatter = BookingFormatter::new(palette).with_output_format(self.output_format);
        println!("{}", formatter.format(slice::from_ref(&booking)));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdBookingList {
    pub output_format: OutputFormat,
}

impl CmdBookingList {
    pub const NAME: &str = "bookings";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List your bookings")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing bookings...");
        let user_id = app.user_id()?;
        let client = app.client()?;
        let bookings = client
            .my_bookings(user_id)
            .await
            .map_err(api_error("Unable to load bookings right now."))?;

        let palette = app.palette();
        if bookings.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No bookings yet".color(palette.muted));
            return Ok(());
        }

        let formatter = BookingFormatter::new(palette).with_output_format(self.output_format);
        println!("{}", formatter.format(&bookings));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCancel {
    pub ids: Vec<BookingId>,
}

impl CmdCancel {
    pub const NAME: &str = "cancel";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Cancel one or more of your bookings")
            .arg(BookingArgs::ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: BookingArgs::get_ids(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "cancelling bookings...");
        if !app.session.is_authenticated() {
            return Err("Please log in first".into());
        }

        let client = app.client()?;
        let palette = app.palette();
        for id in self.ids {
            client
                .cancel_booking(id)
                .await
                .map_err(api_error("Unable to cancel booking."))?;
            println!("{} #{id}", "Cancelled booking".color(palette.good));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_api::ApiConfig;
    use roombook_core::Config as CoreConfig;
    use tempfile::TempDir;

    #[test]
    fn parses_book_command() {
        let matches = CmdBook::command()
            .try_get_matches_from([
                "book",
                "7",
                "--start",
                "2025-03-10T09:00",
                "--end",
                "2025-03-10 10:30",
                "-a",
                "3",
            ])
            .unwrap();
        let parsed = CmdBook::from(&matches).unwrap();
        assert_eq!(parsed.room, RoomId(7));

        let proposal = parsed.proposal();
        assert_eq!(proposal.start.as_deref(), Some("2025-03-10T09:00"));
        assert_eq!(proposal.end.as_deref(), Some("2025-03-10 10:30"));
        assert_eq!(proposal.attendees, "3");
    }

    #[test]
    fn book_leaves_missing_fields_to_the_checker() {
        let matches = CmdBook::command()
            .try_get_matches_from(["book", "7"])
            .unwrap();
        let proposal = CmdBook::from(&matches).unwrap().proposal();
        assert_eq!(proposal.start, None);
        assert_eq!(proposal.attendees, "");
    }

    #[test]
    fn book_requires_room() {
        assert!(CmdBook::command().try_get_matches_from(["book"]).is_err());
    }

    #[tokio::test]
    async fn book_checks_times_before_login() {
        let dir = TempDir::new().unwrap();
        let config = CoreConfig {
            state_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let mut app = App::new(config, ApiConfig::default()).await.unwrap();

        let matches = CmdBook::command()
            .try_get_matches_from(["book", "7", "--attendees", "3"])
            .unwrap();
        let err = CmdBook::from(&matches).unwrap().run(&mut app).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot book room 7: select both start and end times"
        );

        let matches = CmdBook::command()
            .try_get_matches_from([
                "book",
                "7",
                "--start",
                "2025-03-10T09:00",
                "--end",
                "2025-03-10T10:00",
                "--attendees",
                "3",
            ])
            .unwrap();
        let err = CmdBook::from(&matches).unwrap().run(&mut app).await.unwrap_err();
        assert_eq!(err.to_string(), "Please log in first");
    }

    #[test]
    fn parses_cancel_ids() {
        let matches = CmdCancel::command()
            .try_get_matches_from(["cancel", "12", "#14"])
            .unwrap();
        let parsed = CmdCancel::from(&matches);
        assert_eq!(parsed.ids, vec![BookingId(12), BookingId(14)]);

        assert!(CmdCancel::command().try_get_matches_from(["cancel"]).is_err());
        assert!(
            CmdCancel::command()
                .try_get_matches_from(["cancel", "abc"])
                .is_err()
        );
    }
}
