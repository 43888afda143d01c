// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side pre-validation of booking requests.
//!
//! The server validates every booking on its own; the checks here only stop
//! requests that are bound to be rejected and tell the user why.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use jiff::SignedDuration;

use crate::datetime::parse_instant;
use crate::room::RoomType;

static DEFAULT_CHECKER: LazyLock<Checker> = LazyLock::new(Checker::default);

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The booking may be submitted.
    Valid,
    /// The booking must not be submitted; the reason is meant for the user.
    Invalid(String),
}

impl ValidationResult {
    fn invalid(reason: impl Into<String>) -> Self {
        ValidationResult::Invalid(reason.into())
    }

    /// Whether the booking may be submitted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The reason of an invalid result.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(reason) => Some(reason),
        }
    }

    /// Converts into a `Result`, with the reason as error.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(reason) => Err(reason),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid => f.write_str("valid"),
            ValidationResult::Invalid(reason) => f.write_str(reason),
        }
    }
}

/// How many attendees a room type admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeePolicy {
    /// Inclusive bounds on the attendee count.
    Between {
        /// Lowest admitted count.
        min: u32,
        /// Highest admitted count.
        max: u32,
    },
    /// Any count is accepted.
    Unrestricted,
}

impl AttendeePolicy {
    /// A policy admitting exactly `n` attendees.
    #[must_use]
    pub const fn exactly(n: u32) -> Self {
        AttendeePolicy::Between { min: n, max: n }
    }

    /// Whether `count` satisfies the policy.
    #[must_use]
    pub fn admits(self, count: f64) -> bool {
        match self {
            AttendeePolicy::Between { min, max } => {
                f64::from(min) <= count && count <= f64::from(max)
            }
            AttendeePolicy::Unrestricted => true,
        }
    }

    fn violation(self, kind: &RoomType) -> String {
        match self {
            AttendeePolicy::Between { min: 1, max: 1 } => {
                format!("type {kind} rooms require exactly 1 person")
            }
            AttendeePolicy::Between { min, max } if min == max => {
                format!("type {kind} rooms require exactly {min} people")
            }
            AttendeePolicy::Between { min, max } => {
                format!("type {kind} rooms require {min}-{max} people")
            }
            AttendeePolicy::Unrestricted => String::new(),
        }
    }
}

/// Lookup table from room type to attendee policy.
///
/// Types missing from the table are unrestricted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: HashMap<RoomType, AttendeePolicy>,
}

impl PolicyTable {
    /// A table without any restriction.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Sets the policy of a room type, returning the previous one.
    pub fn insert(&mut self, kind: RoomType, policy: AttendeePolicy) -> Option<AttendeePolicy> {
        self.policies.insert(kind, policy)
    }

    /// Builder-style variant of [`PolicyTable::insert`].
    #[must_use]
    pub fn with(mut self, kind: RoomType, policy: AttendeePolicy) -> Self {
        self.insert(kind, policy);
        self
    }

    /// The policy of a room type.
    #[must_use]
    pub fn get(&self, kind: &RoomType) -> AttendeePolicy {
        self.policies
            .get(kind)
            .copied()
            .unwrap_or(AttendeePolicy::Unrestricted)
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::empty()
            .with(RoomType::A, AttendeePolicy::exactly(1))
            .with(RoomType::B, AttendeePolicy::Between { min: 2, max: 5 })
            .with(RoomType::C, AttendeePolicy::Between { min: 6, max: 10 })
    }
}

/// Booking eligibility checker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checker {
    policies: PolicyTable,
    max_duration: Option<SignedDuration>,
}

impl Checker {
    /// Creates a checker with the given policy table and no duration limit.
    #[must_use]
    pub fn new(policies: PolicyTable) -> Self {
        Self {
            policies,
            max_duration: None,
        }
    }

    /// Rejects bookings longer than `max`. A zero or negative limit disables the check.
    #[must_use]
    pub fn with_max_duration(mut self, max: SignedDuration) -> Self {
        self.max_duration = max.is_positive().then_some(max);
        self
    }

    /// The policy table in use.
    #[must_use]
    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Checks a proposed booking.
    ///
    /// `start` and `end` are the raw date-time texts of the form; `None` or
    /// blank means the field was left unset. Missing times are reported
    /// before anything else.
    #[must_use]
    pub fn check(
        &self,
        kind: &RoomType,
        attendees: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ValidationResult {
        let (Some(start), Some(end)) = (non_blank(start), non_blank(end)) else {
            return ValidationResult::invalid("select both start and end times");
        };

        let Some(duration) = duration_between(start, end) else {
            return ValidationResult::invalid("select valid times");
        };

        let Some(count) = parse_attendees(attendees) else {
            return ValidationResult::invalid("enter a valid attendee count");
        };

        let policy = self.policies.get(kind);
        if !policy.admits(count) {
            return ValidationResult::Invalid(policy.violation(kind));
        }

        if let Some(max) = self.max_duration
            && duration > max
        {
            return ValidationResult::Invalid(format!(
                "booking duration cannot exceed {}",
                describe_duration(max)
            ));
        }

        ValidationResult::Valid
    }
}

/// Checks a proposed booking against the default policy table.
///
/// See [`Checker::check`].
#[must_use]
pub fn check(
    kind: &RoomType,
    attendees: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> ValidationResult {
    DEFAULT_CHECKER.check(kind, attendees, start, end)
}

/// Duration in hours from `start` to `end`.
///
/// Returns `None` when either side fails to parse or the range is empty or
/// reversed.
#[must_use]
pub fn duration_hours(start: &str, end: &str) -> Option<f64> {
    duration_between(start, end).map(|d| d.as_secs_f64() / 3600.0)
}

/// Label shown next to the booking form, e.g. `1.50 hours`.
#[must_use]
pub fn duration_label(start: &str, end: &str) -> String {
    match duration_hours(start, end) {
        Some(hours) => format!("{hours:.2} hours"),
        None => "select valid times".to_string(),
    }
}

pub(crate) fn parse_attendees(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn duration_between(start: &str, end: &str) -> Option<SignedDuration> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let duration = start.duration_until(end);
    duration.is_positive().then_some(duration)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn describe_duration(d: SignedDuration) -> String {
    let minutes = d.as_secs() / 60;
    match (minutes / 60, minutes % 60) {
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        (0, m) => format!("{m} minutes"),
        (h, m) => format!("{h} hours {m} minutes"),
    }
}
