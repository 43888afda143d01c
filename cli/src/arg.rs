// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use roombook_core::{BookingId, RoomId};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoomArgs;

impl RoomArgs {
    pub fn room(required: bool) -> Arg {
        arg!(room: <ROOM> "Id of the room")
            .value_parser(value_parser!(RoomId))
            .required(required)
    }

    pub fn get_room(matches: &ArgMatches) -> Option<RoomId> {
        matches.get_one("room").copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BookingArgs;

impl BookingArgs {
    pub fn ids() -> Arg {
        arg!(id: <ID> "Id of the booking, with or without a leading #")
            .value_parser(value_parser!(BookingId))
            .num_args(1..)
    }

    pub fn get_ids(matches: &ArgMatches) -> Vec<BookingId> {
        matches
            .get_many::<BookingId>("id")
            .map(|ids| ids.copied().collect())
            .unwrap_or_default()
    }
}
