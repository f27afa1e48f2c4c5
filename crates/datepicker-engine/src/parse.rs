//! Free-text date parsing behind a pluggable [`DateParser`] strategy.
//!
//! The controller only relies on the contract: text plus a reference date in,
//! a [`ParseResult`] out. Parsing never fails with an error; text that does
//! not name exactly one day yields [`ParseResult::Unparsed`], and the caller
//! branches on it. Nothing here guesses: a date is produced only when the
//! text determines it, with one documented fallback (a missing year is taken
//! from the reference date).
//!
//! [`NaturalDateParser`] is the built-in strategy. It accepts:
//!
//! - **ISO / RFC 3339**: `"2024-01-15"`, `"2024/01/15"`, `"2024-01-15T10:00:00Z"`
//! - **Anchors**: `"today"`, `"now"`, `"tomorrow"`, `"yesterday"`,
//!   `"day after tomorrow"`, `"day before yesterday"`
//! - **Weekdays**: `"friday"` (next occurrence, today included),
//!   `"next friday"`, `"this friday"`, `"last friday"`
//! - **Periods**: `"next week"`, `"last month"`, `"this year"`,
//!   `"start of next quarter"`, `"end of month"`
//! - **Offsets**: `"in 3 days"`, `"2 weeks ago"`, `"a month from now"`,
//!   `"+3d"`, `"-1w"`
//! - **Ordinals**: `"first monday of march"`, `"last friday of the month"`,
//!   `"last day of next month"`, `"third tuesday of march 2026"`
//! - **Month names**: `"january 15"`, `"jan 15th, 2024"`, `"15 jan 2024"`,
//!   `"the 15th of january"`
//! - **Numeric**: `"15/01/2024"`, `"1.2.24"`, `"15/01"` read in the locale's
//!   [`DateOrder`]

use chrono::{DateTime, Weekday};
use serde::Serialize;
use tracing::trace;

use crate::date::{CalendarDate, YearMonth};
use crate::format::{
    parse_month_name, parse_weekday_name, pivot_two_digit_year, strip_ordinal_suffix, DatePattern,
};
use crate::grid::days_from_week_start;

// ── Contract ────────────────────────────────────────────────────────────────

/// Outcome of parsing free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "date", rename_all = "camelCase")]
pub enum ParseResult {
    Resolved(CalendarDate),
    Unparsed,
}

impl ParseResult {
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            ParseResult::Resolved(date) => Some(date),
            ParseResult::Unparsed => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ParseResult::Resolved(_))
    }
}

impl From<Option<CalendarDate>> for ParseResult {
    fn from(date: Option<CalendarDate>) -> Self {
        date.map_or(ParseResult::Unparsed, ParseResult::Resolved)
    }
}

/// A strategy that turns text into a date relative to `reference`.
pub trait DateParser {
    fn parse(&self, text: &str, reference: CalendarDate) -> ParseResult;
}

impl<F> DateParser for F
where
    F: Fn(&str, CalendarDate) -> ParseResult,
{
    fn parse(&self, text: &str, reference: CalendarDate) -> ParseResult {
        self(text, reference)
    }
}

/// Parses text laid out exactly like a [`DatePattern`].
#[derive(Debug, Clone)]
pub struct PatternParser {
    pattern: DatePattern,
}

impl PatternParser {
    pub fn new(pattern: DatePattern) -> Self {
        Self { pattern }
    }
}

impl DateParser for PatternParser {
    fn parse(&self, text: &str, reference: CalendarDate) -> ParseResult {
        self.pattern.parse(text, reference).into()
    }
}

/// Tries each parser in order and returns the first resolved date.
#[derive(Default)]
pub struct ParserChain {
    parsers: Vec<Box<dyn DateParser>>,
}

impl ParserChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, parser: impl DateParser + 'static) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    pub fn push(&mut self, parser: Box<dyn DateParser>) {
        self.parsers.push(parser);
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl DateParser for ParserChain {
    fn parse(&self, text: &str, reference: CalendarDate) -> ParseResult {
        self.parsers
            .iter()
            .map(|parser| parser.parse(text, reference))
            .find(ParseResult::is_resolved)
            .unwrap_or(ParseResult::Unparsed)
    }
}

// ── Locale field order ──────────────────────────────────────────────────────

/// Field order for purely numeric dates such as `01/02/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DateOrder {
    /// `15/01/2024` (most of the world).
    #[default]
    DayMonthYear,
    /// `01/15/2024` (United States, Philippines).
    MonthDayYear,
    /// `2024/01/15` (China, Japan, Korea, Hungary, Lithuania).
    YearMonthDay,
}

impl DateOrder {
    /// Derive the order from a BCP 47 style locale tag (`en-US`, `de_DE`, `ja`).
    pub fn for_locale(locale: &str) -> Self {
        let tag = locale.trim().to_lowercase().replace('_', "-");
        let mut parts = tag.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()));

        match (language, region) {
            (_, Some("us" | "ph")) | ("en", None) => DateOrder::MonthDayYear,
            (_, Some("cn" | "jp" | "kr" | "tw" | "hu" | "lt")) => DateOrder::YearMonthDay,
            ("zh" | "ja" | "ko" | "hu" | "lt", None) => DateOrder::YearMonthDay,
            _ => DateOrder::DayMonthYear,
        }
    }
}

// ── NaturalDateParser ───────────────────────────────────────────────────────

/// English natural-language and numeric date parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalDateParser {
    order: DateOrder,
    week_start: Weekday,
}

impl Default for NaturalDateParser {
    fn default() -> Self {
        Self {
            order: DateOrder::default(),
            week_start: Weekday::Mon,
        }
    }
}

impl NaturalDateParser {
    pub fn new(order: DateOrder, week_start: Weekday) -> Self {
        Self { order, week_start }
    }

    pub fn for_locale(locale: &str, week_start: Weekday) -> Self {
        Self::new(DateOrder::for_locale(locale), week_start)
    }

    pub fn order(&self) -> DateOrder {
        self.order
    }

    /// Resolve `text` relative to `reference`, or `None`.
    pub fn resolve(&self, text: &str, reference: CalendarDate) -> Option<CalendarDate> {
        if let Some(date) = try_passthrough_rfc3339(text.trim()) {
            return Some(date);
        }

        let normalized = normalize_expression(text);
        if normalized.is_empty() {
            return None;
        }

        try_anchored(&normalized, reference)
            .or_else(|| try_weekday_relative(&normalized, reference, self.week_start))
            .or_else(|| try_period(&normalized, reference, self.week_start))
            .or_else(|| try_natural_offset(&normalized, reference))
            .or_else(|| try_duration_offset(&normalized, reference))
            .or_else(|| try_ordinal_date(&normalized, reference))
            .or_else(|| try_month_name_date(&normalized, reference))
            .or_else(|| try_numeric_date(&normalized, reference, self.order))
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, text: &str, reference: CalendarDate) -> ParseResult {
        let resolved = self.resolve(text, reference);
        trace!(input = text, %reference, ?resolved, "natural date parse");
        resolved.into()
    }
}

// ── Expression parsers ──────────────────────────────────────────────────────

/// Normalize: trim, lowercase, commas to spaces, drop "the", collapse spaces.
fn normalize_expression(s: &str) -> String {
    s.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .filter(|word| *word != "the")
        .collect::<Vec<_>>()
        .join(" ")
}

/// RFC 3339 date-time: the calendar date as written in its own offset.
fn try_passthrough_rfc3339(s: &str) -> Option<CalendarDate> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .and_then(|dt| CalendarDate::from_naive(dt.date_naive()))
}

/// "today", "now", "tomorrow", "yesterday", "day after tomorrow", "day before yesterday".
fn try_anchored(s: &str, reference: CalendarDate) -> Option<CalendarDate> {
    match s {
        "today" | "now" => Some(reference),
        "tomorrow" => reference.add_days(1),
        "yesterday" => reference.add_days(-1),
        "day after tomorrow" => reference.add_days(2),
        "day before yesterday" => reference.add_days(-2),
        _ => None,
    }
}

/// "friday", "on friday", "next friday", "this friday", "last friday".
fn try_weekday_relative(
    s: &str,
    reference: CalendarDate,
    week_start: Weekday,
) -> Option<CalendarDate> {
    let s = s.strip_prefix("on ").unwrap_or(s);
    let (modifier, name) = s.split_once(' ').unwrap_or(("", s));
    let weekday = parse_weekday_name(name)?;
    let current = reference.weekday();
    let ahead = (weekday.num_days_from_monday() as i64 - current.num_days_from_monday() as i64)
        .rem_euclid(7);

    let offset = match modifier {
        // Upcoming occurrence, today included.
        "" => ahead,
        // Always future: the same weekday means a week from today.
        "next" => {
            if ahead == 0 {
                7
            } else {
                ahead
            }
        }
        // Within the current week, which may be in the past.
        "this" => {
            days_from_week_start(weekday, week_start) - days_from_week_start(current, week_start)
        }
        // Always past.
        "last" => {
            let back = (7 - ahead) % 7;
            -(if back == 0 { 7 } else { back })
        }
        _ => return None,
    };
    reference.add_days(offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

fn parse_period(s: &str) -> Option<Period> {
    match s {
        "week" => Some(Period::Week),
        "month" => Some(Period::Month),
        "quarter" => Some(Period::Quarter),
        "year" => Some(Period::Year),
        _ => None,
    }
}

/// First and last day of the period containing `reference`, shifted by `shift` periods.
fn period_bounds(
    period: Period,
    shift: i64,
    reference: CalendarDate,
    week_start: Weekday,
) -> Option<(CalendarDate, CalendarDate)> {
    match period {
        Period::Week => {
            let back = days_from_week_start(reference.weekday(), week_start);
            let start = reference.add_days(shift.checked_mul(7)? - back)?;
            Some((start, start.add_days(6)?))
        }
        Period::Month => {
            let month = shifted_month(reference.year_month(), shift)?;
            Some((month.first_day(), month.last_day()))
        }
        Period::Quarter => {
            let quarter_start = (reference.month() - 1) / 3 * 3 + 1;
            let first = YearMonth::new(reference.year(), quarter_start)?;
            let first = shifted_month(first, shift.checked_mul(3)?)?;
            let last = shifted_month(first, 2)?;
            Some((first.first_day(), last.last_day()))
        }
        Period::Year => {
            let year = i32::try_from(i64::from(reference.year()).checked_add(shift)?).ok()?;
            Some((
                YearMonth::new(year, 1)?.first_day(),
                YearMonth::new(year, 12)?.last_day(),
            ))
        }
    }
}

/// `YearMonth::add_months` saturates; here leaving the supported years is a miss.
fn shifted_month(month: YearMonth, delta: i64) -> Option<YearMonth> {
    let target = month.add_months(delta);
    let expected = i64::from(month.year()) * 12 + i64::from(month.month()) - 1 + delta;
    (i64::from(target.year()) * 12 + i64::from(target.month()) - 1 == expected).then_some(target)
}

/// "next week", "last month", "this year", "start of next quarter", "end of month".
///
/// A bare relative period resolves to its first day.
fn try_period(s: &str, reference: CalendarDate, week_start: Weekday) -> Option<CalendarDate> {
    let (boundary, rest) = if let Some(rest) = s.strip_prefix("start of ") {
        (Some(true), rest)
    } else if let Some(rest) = s.strip_prefix("beginning of ") {
        (Some(true), rest)
    } else if let Some(rest) = s.strip_prefix("end of ") {
        (Some(false), rest)
    } else {
        (None, s)
    };

    let (shift, period) = match rest.split_once(' ') {
        Some(("next", p)) => (1, parse_period(p)?),
        Some(("last" | "previous", p)) => (-1, parse_period(p)?),
        Some(("this", p)) => (0, parse_period(p)?),
        // "start of month" needs a boundary; "month" alone names nothing.
        None if boundary.is_some() => (0, parse_period(rest)?),
        _ => return None,
    };

    let (start, end) = period_bounds(period, shift, reference, week_start)?;
    Some(if boundary == Some(false) { end } else { start })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Day,
    Week,
    Month,
    Year,
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s {
        "day" | "days" => Some(Unit::Day),
        "week" | "weeks" | "wk" | "wks" => Some(Unit::Week),
        "month" | "months" | "mo" | "mos" => Some(Unit::Month),
        "year" | "years" | "yr" | "yrs" => Some(Unit::Year),
        _ => None,
    }
}

fn apply_offset(reference: CalendarDate, n: i64, unit: Unit) -> Option<CalendarDate> {
    match unit {
        Unit::Day => reference.add_days(n),
        Unit::Week => reference.add_days(n.checked_mul(7)?),
        Unit::Month => reference.add_months(i32::try_from(n).ok()?),
        Unit::Year => reference.add_years(i32::try_from(n).ok()?),
    }
}

/// "N unit" or "a/an unit".
fn parse_quantity(s: &str) -> Option<(i64, Unit)> {
    let (count, unit) = s.split_once(' ')?;
    let n = match count {
        "a" | "an" | "one" => 1,
        _ if count.bytes().all(|b| b.is_ascii_digit()) => count.parse().ok()?,
        _ => return None,
    };
    Some((n, parse_unit(unit)?))
}

/// "in 3 days", "2 weeks ago", "a month from now", "10 days from today".
fn try_natural_offset(s: &str, reference: CalendarDate) -> Option<CalendarDate> {
    if let Some(rest) = s.strip_prefix("in ") {
        let (n, unit) = parse_quantity(rest)?;
        return apply_offset(reference, n, unit);
    }
    if let Some(rest) = s.strip_suffix(" ago") {
        let (n, unit) = parse_quantity(rest)?;
        return apply_offset(reference, n.checked_neg()?, unit);
    }
    let rest = s
        .strip_suffix(" from now")
        .or_else(|| s.strip_suffix(" from today"))?;
    let (n, unit) = parse_quantity(rest)?;
    apply_offset(reference, n, unit)
}

/// "+3d", "-2w", "+1d1w". Only day and week components are accepted.
fn try_duration_offset(s: &str, reference: CalendarDate) -> Option<CalendarDate> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1i64, &s[1..]),
        Some(b'-') => (-1i64, &s[1..]),
        _ => return None,
    };
    if rest.is_empty() {
        return None;
    }

    let mut days = 0i64;
    let mut num_buf = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            num_buf.push(ch);
            continue;
        }
        if num_buf.is_empty() {
            return None;
        }
        let n: i64 = num_buf.parse().ok()?;
        num_buf.clear();
        let per_unit = match ch {
            'd' => 1,
            'w' => 7,
            _ => return None,
        };
        days = days.checked_add(n.checked_mul(per_unit)?)?;
    }
    // Trailing number without unit
    if !num_buf.is_empty() {
        return None;
    }
    reference.add_days(sign * days)
}

/// Parse an ordinal: "first"→1, ..., "fifth"→5, "last"→-1.
fn parse_ordinal(s: &str) -> Option<i32> {
    match s {
        "first" | "1st" => Some(1),
        "second" | "2nd" => Some(2),
        "third" | "3rd" => Some(3),
        "fourth" | "4th" => Some(4),
        "fifth" | "5th" => Some(5),
        "last" => Some(-1),
        _ => None,
    }
}

/// "month", "this month", "next month", "last month", "march", "march 2026".
fn parse_month_reference(parts: &[&str], reference: CalendarDate) -> Option<YearMonth> {
    let current = reference.year_month();
    match parts {
        ["month"] | ["this", "month"] => Some(current),
        ["next", "month"] => shifted_month(current, 1),
        ["last" | "previous", "month"] => shifted_month(current, -1),
        [name] => YearMonth::new(reference.year(), parse_month_name(name)?),
        [name, year] => YearMonth::new(parse_full_year(year)?, parse_month_name(name)?),
        _ => None,
    }
}

/// "first monday of march", "last friday of month", "last day of next month",
/// "third tuesday of march 2026".
fn try_ordinal_date(s: &str, reference: CalendarDate) -> Option<CalendarDate> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() < 4 || parts[2] != "of" {
        return None;
    }

    let ordinal = parse_ordinal(parts[0])?;
    let month = parse_month_reference(&parts[3..], reference)?;

    if parts[1] == "day" {
        return match ordinal {
            -1 => Some(month.last_day()),
            n => month
                .first_day()
                .add_days(i64::from(n - 1))
                .filter(|date| month.contains(*date)),
        };
    }

    let weekday = parse_weekday_name(parts[1])?;
    nth_weekday_of_month(month, weekday, ordinal)
}

/// The `ordinal`-th `weekday` of `month`; negative counts from the end.
fn nth_weekday_of_month(month: YearMonth, weekday: Weekday, ordinal: i32) -> Option<CalendarDate> {
    let target = if ordinal > 0 {
        let first = month.first_day();
        let diff = (weekday.num_days_from_monday() as i64
            - first.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        first.add_days(diff + 7 * i64::from(ordinal - 1))?
    } else {
        let last = month.last_day();
        let diff = (last.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64)
            .rem_euclid(7);
        last.add_days(-diff - 7 * i64::from(-ordinal - 1))?
    };
    // Verify still in the same month
    month.contains(target).then_some(target)
}

/// A day token: "15", "15th", "1st".
fn parse_day_token(s: &str) -> Option<u32> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 2 || !strip_ordinal_suffix(&s[digits..]).is_empty() {
        return None;
    }
    s[..digits].parse().ok()
}

/// Exactly four digits.
fn parse_full_year(s: &str) -> Option<i32> {
    (s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
        .then(|| s.parse().ok())
        .flatten()
}

/// "january 15", "jan 15th 2024", "15 jan 2024", "15th of january",
/// optionally preceded by a weekday that must agree: "fri jan 5 2024".
fn try_month_name_date(s: &str, reference: CalendarDate) -> Option<CalendarDate> {
    let mut parts: Vec<&str> = s.split_whitespace().collect();

    let weekday = match parts.first().and_then(|w| parse_weekday_name(w)) {
        Some(wd) if parts.len() > 1 => {
            parts.remove(0);
            Some(wd)
        }
        _ => None,
    };
    parts.retain(|p| *p != "of");

    let (month, day, year) = match parts.as_slice() {
        [a, b] | [a, b, _] if parse_month_name(a).is_some() => {
            (parse_month_name(a)?, parse_day_token(b)?, parts.get(2))
        }
        [a, b] | [a, b, _] if parse_month_name(b).is_some() => {
            (parse_month_name(b)?, parse_day_token(a)?, parts.get(2))
        }
        _ => return None,
    };

    let year = match year {
        Some(y) => parse_full_year(y)?,
        None => reference.year(),
    };

    let date = CalendarDate::from_ymd_opt(year, month, day)?;
    match weekday {
        Some(wd) if wd != date.weekday() => None,
        _ => Some(date),
    }
}

/// "2024-01-15", "15/01/2024", "01.15.24", "15/01".
///
/// A four-digit leading field always means year-month-day. Otherwise the
/// fields are read in `order`; a year may be two or four digits and, when
/// omitted, comes from the reference date.
fn try_numeric_date(s: &str, reference: CalendarDate, order: DateOrder) -> Option<CalendarDate> {
    let separator = s.chars().find(|c| matches!(c, '/' | '.' | '-'))?;
    let fields: Vec<&str> = s.split(separator).collect();
    if fields
        .iter()
        .any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let number = |f: &str, max_len: usize| -> Option<u32> {
        (f.len() <= max_len).then(|| f.parse().ok()).flatten()
    };
    let year = |f: &str| -> Option<i32> {
        match f.len() {
            4 => f.parse().ok(),
            2 => Some(pivot_two_digit_year(f.parse().ok()?)),
            _ => None,
        }
    };

    let (y, m, d) = match (fields.as_slice(), order) {
        (&[a, b, c], _) if a.len() == 4 => (year(a)?, number(b, 2)?, number(c, 2)?),
        (&[a, b, c], DateOrder::DayMonthYear) => (year(c)?, number(b, 2)?, number(a, 2)?),
        (&[a, b, c], DateOrder::MonthDayYear) => (year(c)?, number(a, 2)?, number(b, 2)?),
        // Year-first locales write two-digit years first too.
        (&[a, b, c], DateOrder::YearMonthDay) if a.len() == 2 => {
            (year(a)?, number(b, 2)?, number(c, 2)?)
        }
        (&[a, b], DateOrder::DayMonthYear) => (reference.year(), number(b, 2)?, number(a, 2)?),
        (&[a, b], _) => (reference.year(), number(a, 2)?, number(b, 2)?),
        _ => return None,
    };

    CalendarDate::from_ymd_opt(y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    /// Wednesday, February 18, 2026.
    fn anchor() -> CalendarDate {
        d("2026-02-18")
    }

    fn resolve(text: &str) -> Option<CalendarDate> {
        NaturalDateParser::default().resolve(text, anchor())
    }

    // ── contract ────────────────────────────────────────────────────────

    #[test]
    fn test_iso_date_resolves() {
        let result = NaturalDateParser::default().parse("2024-01-15", anchor());
        assert_eq!(result, ParseResult::Resolved(d("2024-01-15")));
    }

    #[test]
    fn test_unparseable_is_unparsed() {
        let result = NaturalDateParser::default().parse("not a date", anchor());
        assert_eq!(result, ParseResult::Unparsed);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("gobbledygook"), None);
    }

    #[test]
    fn test_closure_is_a_parser() {
        let always = |_: &str, reference: CalendarDate| ParseResult::Resolved(reference);
        assert_eq!(always.parse("anything", anchor()), ParseResult::Resolved(anchor()));
    }

    #[test]
    fn test_chain_returns_first_resolved() {
        let pattern = PatternParser::new(DatePattern::compile("DD/MM/YYYY").unwrap());
        let chain = ParserChain::new()
            .with(pattern)
            .with(NaturalDateParser::new(DateOrder::MonthDayYear, Weekday::Mon));
        // The pattern reads day-first before the US-ordered fallback gets a chance.
        assert_eq!(chain.parse("02/03/2024", anchor()), ParseResult::Resolved(d("2024-03-02")));
        assert_eq!(chain.parse("tomorrow", anchor()), ParseResult::Resolved(d("2026-02-19")));
        assert_eq!(chain.parse("nope", anchor()), ParseResult::Unparsed);
        assert_eq!(ParserChain::new().parse("today", anchor()), ParseResult::Unparsed);
    }

    #[test]
    fn test_parse_result_serializes_tagged() {
        let json = serde_json::to_string(&ParseResult::Resolved(d("2024-01-15"))).unwrap();
        assert_eq!(json, r#"{"outcome":"resolved","date":"2024-01-15"}"#);
        let json = serde_json::to_string(&ParseResult::Unparsed).unwrap();
        assert_eq!(json, r#"{"outcome":"unparsed"}"#);
    }

    // ── passthrough ─────────────────────────────────────────────────────

    #[test]
    fn test_iso_slash_and_rfc3339() {
        assert_eq!(resolve("2024/01/15"), Some(d("2024-01-15")));
        assert_eq!(resolve("2024-01-15T23:30:00-05:00"), Some(d("2024-01-15")));
        assert_eq!(resolve("2024-02-30"), None);
    }

    // ── anchors ─────────────────────────────────────────────────────────

    #[test]
    fn test_anchors() {
        assert_eq!(resolve("today"), Some(anchor()));
        assert_eq!(resolve("  Now "), Some(anchor()));
        assert_eq!(resolve("tomorrow"), Some(d("2026-02-19")));
        assert_eq!(resolve("Yesterday"), Some(d("2026-02-17")));
        assert_eq!(resolve("the day after tomorrow"), Some(d("2026-02-20")));
        assert_eq!(resolve("day before yesterday"), Some(d("2026-02-16")));
    }

    // ── weekdays ────────────────────────────────────────────────────────

    #[test]
    fn test_next_friday_from_wednesday() {
        assert_eq!(resolve("next friday"), Some(d("2026-02-20")));
        assert_eq!(resolve("Next Fri"), Some(d("2026-02-20")));
    }

    #[test]
    fn test_next_same_weekday_is_a_week_out() {
        assert_eq!(resolve("next wednesday"), Some(d("2026-02-25")));
    }

    #[test]
    fn test_bare_weekday_includes_today() {
        assert_eq!(resolve("wednesday"), Some(anchor()));
        assert_eq!(resolve("on monday"), Some(d("2026-02-23")));
    }

    #[test]
    fn test_this_and_last_weekday() {
        assert_eq!(resolve("this monday"), Some(d("2026-02-16")));
        assert_eq!(resolve("this sunday"), Some(d("2026-02-22")));
        assert_eq!(resolve("last tuesday"), Some(d("2026-02-17")));
        assert_eq!(resolve("last wednesday"), Some(d("2026-02-11")));
    }

    #[test]
    fn test_this_weekday_honours_week_start() {
        let parser = NaturalDateParser::new(DateOrder::DayMonthYear, Weekday::Sun);
        // Sunday-first week containing Wed Feb 18 runs Feb 15..Feb 21.
        assert_eq!(parser.resolve("this sunday", anchor()), Some(d("2026-02-15")));
    }

    // ── periods ─────────────────────────────────────────────────────────

    #[test]
    fn test_relative_periods_start() {
        assert_eq!(resolve("next week"), Some(d("2026-02-23")));
        assert_eq!(resolve("last week"), Some(d("2026-02-09")));
        assert_eq!(resolve("this week"), Some(d("2026-02-16")));
        assert_eq!(resolve("next month"), Some(d("2026-03-01")));
        assert_eq!(resolve("last month"), Some(d("2026-01-01")));
        assert_eq!(resolve("next year"), Some(d("2027-01-01")));
        assert_eq!(resolve("previous year"), Some(d("2025-01-01")));
    }

    #[test]
    fn test_period_boundaries() {
        assert_eq!(resolve("end of month"), Some(d("2026-02-28")));
        assert_eq!(resolve("start of week"), Some(d("2026-02-16")));
        assert_eq!(resolve("end of week"), Some(d("2026-02-22")));
        assert_eq!(resolve("end of next month"), Some(d("2026-03-31")));
        assert_eq!(resolve("start of next quarter"), Some(d("2026-04-01")));
        assert_eq!(resolve("end of last quarter"), Some(d("2025-12-31")));
        assert_eq!(resolve("end of the year"), Some(d("2026-12-31")));
        assert_eq!(resolve("beginning of last month"), Some(d("2026-01-01")));
        assert_eq!(resolve("month"), None);
    }

    #[test]
    fn test_week_periods_sunday_start() {
        let parser = NaturalDateParser::new(DateOrder::DayMonthYear, Weekday::Sun);
        assert_eq!(parser.resolve("start of week", anchor()), Some(d("2026-02-15")));
        assert_eq!(parser.resolve("next week", anchor()), Some(d("2026-02-22")));
    }

    // ── offsets ─────────────────────────────────────────────────────────

    #[test]
    fn test_natural_offsets() {
        assert_eq!(resolve("in 3 days"), Some(d("2026-02-21")));
        assert_eq!(resolve("in a week"), Some(d("2026-02-25")));
        assert_eq!(resolve("2 weeks ago"), Some(d("2026-02-04")));
        assert_eq!(resolve("a month from now"), Some(d("2026-03-18")));
        assert_eq!(resolve("10 days from today"), Some(d("2026-02-28")));
        assert_eq!(resolve("1 year ago"), Some(d("2025-02-18")));
        assert_eq!(resolve("in 3 fortnights"), None);
    }

    #[test]
    fn test_month_offset_clamps() {
        let parser = NaturalDateParser::default();
        assert_eq!(parser.resolve("in 1 month", d("2024-01-31")), Some(d("2024-02-29")));
    }

    #[test]
    fn test_duration_offsets() {
        assert_eq!(resolve("+3d"), Some(d("2026-02-21")));
        assert_eq!(resolve("-1w"), Some(d("2026-02-11")));
        assert_eq!(resolve("+1w2d"), Some(d("2026-02-27")));
        assert_eq!(resolve("+3"), None);
        assert_eq!(resolve("+3h"), None);
    }

    // ── ordinals ────────────────────────────────────────────────────────

    #[test]
    fn test_ordinal_weekdays() {
        assert_eq!(resolve("first monday of march"), Some(d("2026-03-02")));
        assert_eq!(resolve("third tuesday of march 2026"), Some(d("2026-03-17")));
        assert_eq!(resolve("last friday of the month"), Some(d("2026-02-27")));
        assert_eq!(resolve("2nd sunday of next month"), Some(d("2026-03-08")));
        assert_eq!(resolve("fifth monday of february"), None);
    }

    #[test]
    fn test_ordinal_days() {
        assert_eq!(resolve("last day of month"), Some(d("2026-02-28")));
        assert_eq!(resolve("first day of next month"), Some(d("2026-03-01")));
        assert_eq!(resolve("last day of february 2024"), Some(d("2024-02-29")));
    }

    // ── month names ─────────────────────────────────────────────────────

    #[test]
    fn test_month_name_forms() {
        assert_eq!(resolve("January 15"), Some(d("2026-01-15")));
        assert_eq!(resolve("jan 15th, 2024"), Some(d("2024-01-15")));
        assert_eq!(resolve("15 jan 2024"), Some(d("2024-01-15")));
        assert_eq!(resolve("the 15th of january"), Some(d("2026-01-15")));
        assert_eq!(resolve("Sept 3"), Some(d("2026-09-03")));
    }

    #[test]
    fn test_month_name_with_weekday_must_agree() {
        assert_eq!(resolve("Fri, Jan 5, 2024"), Some(d("2024-01-05")));
        assert_eq!(resolve("Mon, Jan 5, 2024"), None);
    }

    #[test]
    fn test_month_name_rejects_bad_day_or_year() {
        assert_eq!(resolve("february 30"), None);
        assert_eq!(resolve("january 2024"), None);
        assert_eq!(resolve("jan 5 24"), None);
        assert_eq!(resolve("jan 5xx"), None);
    }

    // ── numeric ─────────────────────────────────────────────────────────

    #[test]
    fn test_numeric_day_first() {
        assert_eq!(resolve("15/01/2024"), Some(d("2024-01-15")));
        assert_eq!(resolve("1.2.24"), Some(d("2024-02-01")));
        assert_eq!(resolve("15/01"), Some(d("2026-01-15")));
        assert_eq!(resolve("01/15/2024"), None);
    }

    #[test]
    fn test_numeric_month_first() {
        let parser = NaturalDateParser::for_locale("en-US", Weekday::Sun);
        assert_eq!(parser.resolve("01/15/2024", anchor()), Some(d("2024-01-15")));
        assert_eq!(parser.resolve("1/15", anchor()), Some(d("2026-01-15")));
        assert_eq!(parser.resolve("2024-01-15", anchor()), Some(d("2024-01-15")));
    }

    #[test]
    fn test_numeric_year_first() {
        let parser = NaturalDateParser::for_locale("ja-JP", Weekday::Sun);
        assert_eq!(parser.resolve("2024/1/15", anchor()), Some(d("2024-01-15")));
        assert_eq!(parser.resolve("24/01/15", anchor()), Some(d("2024-01-15")));
        // Four-digit trailing year does not fit a year-first locale.
        assert_eq!(parser.resolve("15/01/2024", anchor()), None);
    }

    #[test]
    fn test_numeric_rejects_mixed_or_long_fields() {
        assert_eq!(resolve("15/01-2024"), None);
        assert_eq!(resolve("123/01/2024"), None);
        assert_eq!(resolve("15/01/202"), None);
    }

    #[test]
    fn test_locale_order() {
        assert_eq!(DateOrder::for_locale("en-US"), DateOrder::MonthDayYear);
        assert_eq!(DateOrder::for_locale("en_us"), DateOrder::MonthDayYear);
        assert_eq!(DateOrder::for_locale("en"), DateOrder::MonthDayYear);
        assert_eq!(DateOrder::for_locale("en-GB"), DateOrder::DayMonthYear);
        assert_eq!(DateOrder::for_locale("de-DE"), DateOrder::DayMonthYear);
        assert_eq!(DateOrder::for_locale("zh-Hant-TW"), DateOrder::YearMonthDay);
        assert_eq!(DateOrder::for_locale("ko"), DateOrder::YearMonthDay);
        assert_eq!(DateOrder::for_locale(""), DateOrder::DayMonthYear);
    }
}
