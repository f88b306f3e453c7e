use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime};

use crate::ValidationError;

/// Calendar date with day granularity and no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        };
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Exchange-local date of a Unix timestamp shifted by `utc_offset_secs`.
    pub fn from_unix_timestamp(timestamp: i64, utc_offset_secs: i64) -> Option<Self> {
        let local = timestamp.checked_add(utc_offset_secs)?;
        OffsetDateTime::from_unix_timestamp(local)
            .ok()
            .map(|value| Self(value.date()))
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Unix timestamp of midnight UTC on this date.
    pub fn unix_midnight(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    /// Continuous day number used as the horizontal chart coordinate.
    pub const fn day_number(self) -> i32 {
        self.0.to_julian_day()
    }

    pub fn from_day_number(day: i32) -> Option<Self> {
        Date::from_julian_day(day).ok().map(Self)
    }

    /// First day of the month following this date.
    pub fn next_month_start(self) -> Option<Self> {
        let (year, month) = match self.0.month() {
            Month::December => (self.0.year().checked_add(1)?, Month::January),
            other => (self.0.year(), other.next()),
        };
        Date::from_calendar_date(year, month, 1).ok().map(Self)
    }

    pub const fn is_month_start(self) -> bool {
        self.0.day() == 1
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
