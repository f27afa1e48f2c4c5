//! Injectable source of "today".

use chrono::{Local, Utc};
use chrono_tz::Tz;

use crate::date::CalendarDate;
use crate::error::{PickerError, Result};

/// Supplies the current calendar day.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Wall clock, read in an IANA timezone or in the host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz: Some(tz) }
    }

    /// The host's local zone; the browser's zone under wasm.
    pub fn local() -> Self {
        Self { tz: None }
    }

    /// Parse an IANA timezone name such as `"Europe/London"`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| PickerError::InvalidTimezone(name.to_string()))
    }

    /// `None` for the local zone.
    pub fn timezone(&self) -> Option<Tz> {
        self.tz
    }
}

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        let local = match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        };
        // The wall clock is always inside 1..=9999.
        CalendarDate::from_naive_unchecked(local)
    }
}

/// A clock that always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day: CalendarDate = "2024-01-15".parse().unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }

    #[test]
    fn test_system_clock_from_name() {
        let clock = SystemClock::from_name("America/New_York").unwrap();
        assert_eq!(clock.timezone(), Some(Tz::America__New_York));
        assert!(clock.today().is_supported());
    }

    #[test]
    fn test_default_clock_reads_local_zone() {
        let clock = SystemClock::default();
        assert_eq!(clock, SystemClock::local());
        assert_eq!(clock.timezone(), None);
        assert_eq!(clock.today().naive(), Local::now().date_naive());
    }

    #[test]
    fn test_system_clock_rejects_unknown_zone() {
        let err = SystemClock::from_name("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err, PickerError::InvalidTimezone("Mars/Olympus_Mons".to_string()));
    }

    #[test]
    fn test_dateline_zones_are_ahead_or_level() {
        let east = SystemClock::from_name("Pacific/Kiritimati").unwrap().today();
        let west = SystemClock::from_name("Pacific/Pago_Pago").unwrap().today();
        let diff = east.naive().signed_duration_since(west.naive()).num_days();
        assert!((0..=2).contains(&diff));
    }
}
