//! Month grid derivation.
//!
//! [`render_grid`] is a pure function of its [`GridInput`]: the displayed
//! month, the selection, the active range, "today" and the first day of the
//! week. It always yields [`GRID_CELLS`] cells (6 weeks × 7 days) so the
//! rendering layer never has to reflow when navigating between months.

use chrono::Weekday;
use serde::Serialize;

use crate::date::{CalendarDate, DateRange, YearMonth};

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// One day of the rendered grid with its display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Everything the grid depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridInput {
    pub view: YearMonth,
    pub selection: Option<CalendarDate>,
    pub range: Option<DateRange>,
    pub today: CalendarDate,
    pub first_day_of_week: Weekday,
}

/// Build the 42-cell grid for `input.view`.
///
/// The grid starts on the last `first_day_of_week` strictly before the 1st
/// of the month, so there is always at least one leading day from the
/// previous month and at least one trailing day from the next.
pub fn render_grid(input: &GridInput) -> Vec<CalendarCell> {
    let start = grid_start(input.view, input.first_day_of_week).naive();

    (0..GRID_CELLS)
        .map(|offset| {
            // Within chrono's range: MIN_YEAR/MAX_YEAR leave ample headroom.
            let date = CalendarDate::from_naive_unchecked(
                start + chrono::Duration::days(offset as i64),
            );
            let in_range = input.range.is_none_or(|range| range.contains(date));
            CalendarCell {
                date,
                in_current_month: input.view.contains(date),
                is_today: date == input.today,
                is_selected: input.selection == Some(date),
                is_disabled: !in_range || !date.is_supported(),
            }
        })
        .collect()
}

/// First date shown in the grid for `view`.
pub fn grid_start(view: YearMonth, first_day_of_week: Weekday) -> CalendarDate {
    let first = view.first_day();
    let lead = match days_from_week_start(first.weekday(), first_day_of_week) {
        0 => DAYS_PER_WEEK as i64,
        n => n,
    };
    CalendarDate::from_naive_unchecked(first.naive() - chrono::Duration::days(lead))
}

/// How many days `weekday` is from the week-start day.
pub fn days_from_week_start(weekday: Weekday, week_start: Weekday) -> i64 {
    (weekday.num_days_from_sunday() as i64 - week_start.num_days_from_sunday() as i64)
        .rem_euclid(DAYS_PER_WEEK as i64)
}

/// Map a Sunday-based index (0 = Sunday … 6 = Saturday) to a weekday.
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Short weekday names for the grid header, starting at `first_day_of_week`.
pub fn weekday_labels(first_day_of_week: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    let mut labels = [""; DAYS_PER_WEEK];
    let mut day = first_day_of_week;
    for label in labels.iter_mut() {
        *label = short_weekday_name(day);
        day = day.succ();
    }
    labels
}

pub(crate) fn short_weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
