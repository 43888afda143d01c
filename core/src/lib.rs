// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the roombook client: the room and booking model, the booking
//! eligibility checker, the availability timeline projector, and the local
//! session and configuration.

#![warn(
    trivial_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing
)]

mod availability;
mod booking;
mod catalog;
mod config;
mod datetime;
mod eligibility;
mod room;
mod session;

pub use crate::availability::{
    AvailabilityRange, DisplayWindow, Segment, project, render_timeline, timeline_axis,
};
pub use crate::booking::{Booking, BookingId, BookingRequest, ProposedBooking, format_range};
pub use crate::catalog::{DEFAULT_PAGE_SIZE, Page, RoomFilter};
pub use crate::config::{APP_NAME, Config, ConfigDuration};
pub use crate::datetime::{parse_clock, parse_instant};
pub use crate::eligibility::{
    AttendeePolicy, Checker, PolicyTable, ValidationResult, check, duration_hours, duration_label,
};
pub use crate::room::{Room, RoomId, RoomStatus, RoomType};
pub use crate::session::{SESSION_FILE, Session, Theme, decode_user_id};
