// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line client for the library room-booking service.

mod app;
mod arg;
mod booking_formatter;
mod cli;
mod cmd_account;
mod cmd_booking;
mod cmd_generate_completion;
mod cmd_room;
mod cmd_session;
mod config;
mod room_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
