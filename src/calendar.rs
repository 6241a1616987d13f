//! Calendar dates as the face consumes them.

use chrono::{Datelike, Month, NaiveDate};

use crate::error::{Result, SkyClockError};

/// A validated Gregorian date.
///
/// Construction is the only place calendar input is checked; everything
/// downstream assumes a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(SkyClockError::InvalidDate { year, month, day })
    }

    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 1-based ordinal within the year (January 1st is 1).
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    pub fn days_in_year(&self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Upper-case English month name, e.g. `SEPTEMBER`.
    pub fn month_name(&self) -> String {
        Month::try_from(self.0.month() as u8)
            .map(|m| m.name().to_uppercase())
            .unwrap_or_default()
    }

    /// Every date of this year paired with its day-of-year, January 1st first.
    pub fn days_of_year(&self) -> impl Iterator<Item = (u32, CalendarDate)> {
        let first = self.0.with_ordinal(1).unwrap_or(self.0);
        (1..=self.days_in_year()).zip(first.iter_days().map(CalendarDate))
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
