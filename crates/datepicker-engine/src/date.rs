//! Calendar-day values: [`CalendarDate`], the [`YearMonth`] view cursor and
//! the inclusive [`DateRange`] that restricts selection.
//!
//! All values are plain calendar days with no time-of-day and no timezone.
//! Converting "now" into a day happens once, in [`crate::clock`]; everything
//! here is pure arithmetic on `chrono::NaiveDate`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PickerError, Result};

/// Smallest year a picker can display or select.
pub const MIN_YEAR: i32 = 1;
/// Largest year a picker can display or select.
pub const MAX_YEAR: i32 = 9999;

// ── CalendarDate ────────────────────────────────────────────────────────────

/// A specific calendar day. Ordered and compared by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its components.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] if the day does not exist or the
    /// year is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_ymd_opt(year, month, day).ok_or_else(|| {
            PickerError::InvalidDate(format!("{year:04}-{month:02}-{day:02}"))
        })
    }

    /// Like [`CalendarDate::new`], returning `None` for impossible dates.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wrap a `NaiveDate`, rejecting years the picker cannot represent.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    /// Wrap without the year check. Only the grid uses this, for the
    /// adjacent-month days around the first and last supported months.
    pub(crate) fn from_naive_unchecked(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Whether the year is within [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn is_supported(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.year())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The month this date falls in.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Shift by a number of days. `None` if the result leaves the supported years.
    pub fn add_days(self, days: i64) -> Option<Self> {
        let shifted = self.0.checked_add_signed(chrono::Duration::try_days(days)?)?;
        Self::from_naive(shifted)
    }

    /// Shift by a number of months, clamping the day to the target month's
    /// last day (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(self, months: i32) -> Option<Self> {
        let magnitude = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(magnitude)?
        } else {
            self.0.checked_sub_months(magnitude)?
        };
        Self::from_naive(shifted)
    }

    /// Shift by a number of years; Feb 29 clamps to Feb 28 in non-leap years.
    pub fn add_years(self, years: i32) -> Option<Self> {
        self.add_months(years.checked_mul(12)?)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = PickerError;

    /// Strict ISO `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(Self::from_naive)
            .ok_or_else(|| PickerError::InvalidDate(format!("'{s}'")))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── YearMonth ───────────────────────────────────────────────────────────────

/// A (year, month) pair: the month currently displayed by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = PickerError;

    fn try_from(raw: RawYearMonth) -> Result<Self> {
        YearMonth::new(raw.year, raw.month).ok_or_else(|| {
            PickerError::InvalidDate(format!("month {:04}-{:02}", raw.year, raw.month))
        })
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by `delta` months, carrying into the year. Saturates at the first
    /// and last supported months.
    pub fn add_months(&self, delta: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1);
        let min = i64::from(MIN_YEAR) * 12;
        let max = i64::from(MAX_YEAR) * 12 + 11;
        let target = index.saturating_add(delta).clamp(min, max);
        Self {
            year: target.div_euclid(12) as i32,
            month: (target.rem_euclid(12) + 1) as u32,
        }
    }

    /// Move by `delta` years keeping the month. Saturates like [`YearMonth::add_months`].
    pub fn add_years(&self, delta: i64) -> Self {
        self.add_months(delta.saturating_mul(12))
    }

    pub fn first_day(&self) -> CalendarDate {
        // Month and year are validated on construction.
        CalendarDate(
            NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN),
        )
    }

    pub fn last_day(&self) -> CalendarDate {
        let first = self.first_day().naive();
        CalendarDate(
            first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(first),
        )
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PickerError;

    /// `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || PickerError::InvalidDate(format!("month '{s}'"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// Inclusive bounds on selectable dates. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

#[derive(Deserialize)]
struct RawRange {
    #[serde(default)]
    min: Option<CalendarDate>,
    #[serde(default)]
    max: Option<CalendarDate>,
}

impl TryFrom<RawRange> for DateRange {
    type Error = PickerError;

    fn try_from(raw: RawRange) -> Result<Self> {
        DateRange::new(raw.min, raw.max)
    }
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidRange`] when both bounds are present and
    /// `min > max`.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(PickerError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn between(min: CalendarDate, max: CalendarDate) -> Result<Self> {
        Self::new(Some(min), Some(max))
    }

    pub fn since(min: CalendarDate) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn until(max: CalendarDate) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |d: Option<CalendarDate>| d.map_or_else(|| "..".to_string(), |d| d.to_string());
        write!(f, "[{}, {}]", side(self.min), side(self.max))
    }
}
