//! Time axes with calendar-system awareness.
//!
//! Time coordinates are `chrono` UTC instants ordered and searched through
//! their millisecond scalar; midpoints and edge extrapolation truncate
//! half-millisecond results toward zero.

use chrono::{DateTime, Utc};
use coverage_common::Extent;
use std::fmt;

use crate::axis::{Axis, AxisCoordinate, AxisValues};
use crate::error::Result;

impl AxisCoordinate for DateTime<Utc> {
    fn is_valid(self) -> bool {
        true
    }

    fn midpoint(self, other: Self) -> Self {
        // Half-millisecond results truncate toward zero.
        let ms = (0.5 * (self.timestamp_millis() + other.timestamp_millis()) as f64) as i64;
        DateTime::from_timestamp_millis(ms).unwrap_or(self)
    }

    fn half_step_beyond(self, inner: Self) -> Self {
        let edge = self.timestamp_millis();
        let ms = (edge as f64 - 0.5 * (inner.timestamp_millis() - edge) as f64) as i64;
        DateTime::from_timestamp_millis(ms).unwrap_or(self)
    }

    fn prefers_upper(target: Self, lower: Self, upper: Self) -> bool {
        let t = target.timestamp_millis();
        (upper.timestamp_millis() - t).abs() <= (t - lower.timestamp_millis()).abs()
    }
}

/// The convention mapping a time axis's scalar values to calendar dates.
///
/// Codes follow the CF `calendar` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    /// Proleptic Gregorian ("standard"/"gregorian")
    Gregorian,
    /// No leap years, 365 days ("noleap"/"365_day")
    NoLeap,
    /// Every year leaps, 366 days ("all_leap"/"366_day")
    AllLeap,
    /// Twelve 30-day months ("360_day")
    ThreeSixtyDay,
}

impl CalendarSystem {
    /// Parse a CF calendar attribute string.
    pub fn from_cf_string(s: &str) -> std::result::Result<Self, CalendarParseError> {
        match s.to_lowercase().as_str() {
            "gregorian" | "standard" | "proleptic_gregorian" => Ok(CalendarSystem::Gregorian),
            "noleap" | "365_day" => Ok(CalendarSystem::NoLeap),
            "all_leap" | "366_day" => Ok(CalendarSystem::AllLeap),
            "360_day" => Ok(CalendarSystem::ThreeSixtyDay),
            _ => Err(CalendarParseError::UnknownCalendar(s.to_string())),
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CalendarSystem::Gregorian => "gregorian",
            CalendarSystem::NoLeap => "noleap",
            CalendarSystem::AllLeap => "all_leap",
            CalendarSystem::ThreeSixtyDay => "360_day",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarParseError {
    #[error("Unknown calendar system: {0}")]
    UnknownCalendar(String),
}

/// An axis of time instants with an associated calendar system.
///
/// Construction and query semantics match [`crate::axis::ReferenceableAxis`];
/// the calendar is fixed for the axis lifetime.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    name: String,
    calendar: CalendarSystem,
    values: AxisValues<DateTime<Utc>>,
}

impl TimeAxis {
    /// Build a time axis from explicit instants.
    pub fn new(
        name: impl Into<String>,
        calendar: CalendarSystem,
        values: Vec<DateTime<Utc>>,
    ) -> Result<Self> {
        let name = name.into();
        let values = AxisValues::from_values(values)?;
        tracing::debug!(
            axis = %name,
            size = values.len(),
            ascending = values.is_ascending(),
            calendar = %calendar,
            "built time axis"
        );
        Ok(Self {
            name,
            calendar,
            values,
        })
    }

    /// The calendar system attached at construction.
    pub fn calendar_system(&self) -> CalendarSystem {
        self.calendar
    }
}

impl Axis for TimeAxis {
    type Value = DateTime<Utc>;

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn is_ascending(&self) -> bool {
        self.values.is_ascending()
    }

    fn coordinate_value(&self, index: usize) -> DateTime<Utc> {
        self.values.value(index)
    }

    fn find_index_of(&self, value: DateTime<Utc>) -> Option<usize> {
        self.values.find_index_of(value)
    }

    fn find_index_of_unconstrained(&self, value: DateTime<Utc>) -> usize {
        self.values.find_index_of_unconstrained(value)
    }

    fn coordinate_bounds(&self, index: usize) -> Extent<DateTime<Utc>> {
        self.values.coordinate_bounds(index)
    }

    fn coordinate_extent(&self) -> Extent<DateTime<Utc>> {
        self.values.coordinate_extent()
    }
}
