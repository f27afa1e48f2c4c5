//! Picker configuration, loadable from camelCase JSON.
//!
//! ```json
//! {
//!   "initialDate": "2024-01-15",
//!   "range": { "min": "2024-01-01", "max": "2024-12-31" },
//!   "firstDayOfWeek": 0,
//!   "locale": "en-US",
//!   "dateFormatPattern": "MM/DD/YYYY",
//!   "timezone": "America/New_York",
//!   "labels": { "today": "Now" }
//! }
//! ```
//!
//! Every field is optional. Options only affect rendering and parsing
//! policy; the controller's algorithms are the same for every config.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::SystemClock;
use crate::date::{CalendarDate, DateRange};
use crate::error::{PickerError, Result};
use crate::format::DatePattern;
use crate::grid::weekday_from_sunday_index;

pub const DEFAULT_LOCALE: &str = "en-GB";
pub const DEFAULT_PATTERN: &str = "YYYY-MM-DD";
/// Monday, counted from Sunday = 0.
pub const DEFAULT_FIRST_DAY_OF_WEEK: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PickerConfig {
    pub initial_date: Option<CalendarDate>,
    pub range: Option<DateRange>,
    /// 0 = Sunday … 6 = Saturday.
    pub first_day_of_week: u8,
    pub locale: String,
    pub date_format_pattern: String,
    /// IANA timezone that decides which day "today" is. Unset means the
    /// host's local zone.
    pub timezone: Option<String>,
    /// Overrides for the default button labels.
    pub labels: BTreeMap<LabelKey, String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_date: None,
            range: None,
            first_day_of_week: DEFAULT_FIRST_DAY_OF_WEEK,
            locale: DEFAULT_LOCALE.to_string(),
            date_format_pattern: DEFAULT_PATTERN.to_string(),
            timezone: None,
            labels: BTreeMap::new(),
        }
    }
}

impl PickerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PickerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every option that can be wrong after deserialization.
    pub fn validate(&self) -> Result<()> {
        self.week_start()?;
        self.pattern()?;
        self.clock()?;
        Ok(())
    }

    pub fn week_start(&self) -> Result<Weekday> {
        weekday_from_sunday_index(self.first_day_of_week).ok_or_else(|| {
            PickerError::InvalidConfig(format!(
                "firstDayOfWeek must be 0..=6, got {}",
                self.first_day_of_week
            ))
        })
    }

    pub fn pattern(&self) -> Result<DatePattern> {
        DatePattern::compile(&self.date_format_pattern)
    }

    pub fn clock(&self) -> Result<SystemClock> {
        self.timezone
            .as_deref()
            .map_or(Ok(SystemClock::local()), SystemClock::from_name)
    }

    pub fn button_labels(&self) -> ButtonLabels {
        ButtonLabels::with_overrides(&self.labels)
    }
}

// ── Labels ──────────────────────────────────────────────────────────────────

/// The buttons a rendering layer may draw around the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelKey {
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    Toggle,
    Today,
    Clear,
}

impl LabelKey {
    pub const ALL: [LabelKey; 7] = [
        LabelKey::PrevMonth,
        LabelKey::NextMonth,
        LabelKey::PrevYear,
        LabelKey::NextYear,
        LabelKey::Toggle,
        LabelKey::Today,
        LabelKey::Clear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelKey::PrevMonth => "prev-month",
            LabelKey::NextMonth => "next-month",
            LabelKey::PrevYear => "prev-year",
            LabelKey::NextYear => "next-year",
            LabelKey::Toggle => "toggle",
            LabelKey::Today => "today",
            LabelKey::Clear => "clear",
        }
    }

    fn default_label(self) -> &'static str {
        match self {
            LabelKey::PrevMonth => "<",
            LabelKey::NextMonth => ">",
            LabelKey::PrevYear => "<<",
            LabelKey::NextYear => ">>",
            LabelKey::Toggle => "Calendar",
            LabelKey::Today => "Today",
            LabelKey::Clear => "Clear",
        }
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings for every [`LabelKey`]. Passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ButtonLabels(BTreeMap<LabelKey, String>);

impl Default for ButtonLabels {
    fn default() -> Self {
        Self::with_overrides(&BTreeMap::new())
    }
}

impl ButtonLabels {
    pub fn with_overrides(overrides: &BTreeMap<LabelKey, String>) -> Self {
        let labels = LabelKey::ALL
            .into_iter()
            .map(|key| {
                let text = overrides
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| key.default_label().to_string());
                (key, text)
            })
            .collect();
        Self(labels)
    }

    pub fn get(&self, key: LabelKey) -> &str {
        self.0.get(&key).map_or(key.default_label(), String::as_str)
    }
}
