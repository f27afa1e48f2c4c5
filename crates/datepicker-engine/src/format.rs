//! Deterministic date formatting with token patterns, and the reverse:
//! reading text back through the same pattern.
//!
//! # Pattern tokens
//!
//! | Token  | Output        |
//! |--------|---------------|
//! | `YYYY` | `2024`        |
//! | `YY`   | `24`          |
//! | `M`    | `1`           |
//! | `MM`   | `01`          |
//! | `MMM`  | `Jan`         |
//! | `MMMM` | `January`     |
//! | `D`    | `5`           |
//! | `DD`   | `05`          |
//! | `Do`   | `5th`         |
//! | `ddd`  | `Fri`         |
//! | `dddd` | `Friday`      |
//!
//! Any non-letter character is copied verbatim. Letters can be emitted
//! literally by wrapping them in brackets: `[Week of] MMM D`.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::Weekday;

use crate::date::CalendarDate;
use crate::error::{PickerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year4,
    Year2,
    Month,
    Month2,
    MonthShort,
    MonthLong,
    Day,
    Day2,
    DayOrdinal,
    WeekdayShort,
    WeekdayLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(Token),
    Literal(String),
}

/// A compiled format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    segments: Vec<Segment>,
}

/// Format `date` with `pattern`.
///
/// # Errors
///
/// Returns [`PickerError::InvalidPattern`] if the pattern contains an
/// unrecognized letter token or an unterminated `[` escape.
///
/// # Examples
///
/// ```
/// use datepicker_engine::{format_text, CalendarDate};
///
/// let date = CalendarDate::new(2024, 1, 5).unwrap();
/// assert_eq!(format_text(date, "dddd, MMMM Do YYYY").unwrap(), "Friday, January 5th 2024");
/// assert!(format_text(date, "YYYY-QQ").is_err());
/// ```
pub fn format_text(date: CalendarDate, pattern: &str) -> Result<String> {
    Ok(DatePattern::compile(pattern)?.format(date))
}

impl DatePattern {
    /// Compile a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidPattern`] for an empty pattern, an
    /// unknown letter run or an unterminated `[` escape.
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(PickerError::InvalidPattern("empty pattern".to_string()));
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if ch == '[' {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or_else(|| {
                        PickerError::InvalidPattern(format!("unterminated '[' in '{pattern}'"))
                    })?;
                literal.extend(&chars[i + 1..i + 1 + close]);
                i += close + 2;
                continue;
            }

            if !ch.is_ascii_alphabetic() {
                literal.push(ch);
                i += 1;
                continue;
            }

            let mut end = i;
            while end < chars.len() && chars[end] == ch {
                end += 1;
            }
            let run: String = chars[i..end].iter().collect();
            let token = match run.as_str() {
                "YYYY" => Token::Year4,
                "YY" => Token::Year2,
                "M" => Token::Month,
                "MM" => Token::Month2,
                "MMM" => Token::MonthShort,
                "MMMM" => Token::MonthLong,
                "D" if chars.get(end) == Some(&'o') => {
                    end += 1;
                    Token::DayOrdinal
                }
                "D" => Token::Day,
                "DD" => Token::Day2,
                "ddd" => Token::WeekdayShort,
                "dddd" => Token::WeekdayLong,
                _ => {
                    return Err(PickerError::InvalidPattern(format!(
                        "unknown token '{run}' in '{pattern}'"
                    )));
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(token));
            i = end;
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format(&self, date: CalendarDate) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            // Writing to a String cannot fail.
            let _ = match segment {
                Segment::Literal(text) => write!(out, "{text}"),
                Segment::Field(Token::Year4) => write!(out, "{:04}", date.year()),
                Segment::Field(Token::Year2) => write!(out, "{:02}", date.year().rem_euclid(100)),
                Segment::Field(Token::Month) => write!(out, "{}", date.month()),
                Segment::Field(Token::Month2) => write!(out, "{:02}", date.month()),
                Segment::Field(Token::MonthShort) => write!(out, "{}", &month_name(date.month())[..3]),
                Segment::Field(Token::MonthLong) => write!(out, "{}", month_name(date.month())),
                Segment::Field(Token::Day) => write!(out, "{}", date.day()),
                Segment::Field(Token::Day2) => write!(out, "{:02}", date.day()),
                Segment::Field(Token::DayOrdinal) => {
                    write!(out, "{}{}", date.day(), ordinal_suffix(date.day()))
                }
                Segment::Field(Token::WeekdayShort) => {
                    write!(out, "{}", &weekday_name(date.weekday())[..3])
                }
                Segment::Field(Token::WeekdayLong) => write!(out, "{}", weekday_name(date.weekday())),
            };
        }
        out
    }

    /// Read `text` back through this pattern.
    ///
    /// Letter case and whitespace around separators are ignored. A pattern
    /// without a year token takes the year from `reference`. A weekday in the
    /// text must agree with the date it names.
    pub fn parse(&self, text: &str, reference: CalendarDate) -> Option<CalendarDate> {
        let mut rest = text.trim();
        let mut year = None;
        let mut month = None;
        let mut day = None;
        let mut weekday = None;

        for segment in &self.segments {
            rest = rest.trim_start();
            match segment {
                Segment::Literal(lit) => {
                    let lit = lit.trim();
                    if lit.is_empty() {
                        continue;
                    }
                    rest = strip_prefix_ignore_case(rest, lit)?;
                }
                Segment::Field(Token::Year4) => {
                    let (digits, tail) = take_digits(rest, 4, 4)?;
                    year = Some(digits as i32);
                    rest = tail;
                }
                Segment::Field(Token::Year2) => {
                    let (digits, tail) = take_digits(rest, 2, 2)?;
                    year = Some(pivot_two_digit_year(digits));
                    rest = tail;
                }
                Segment::Field(Token::Month | Token::Month2) => {
                    let (digits, tail) = take_digits(rest, 1, 2)?;
                    month = Some(digits);
                    rest = tail;
                }
                Segment::Field(Token::MonthShort | Token::MonthLong) => {
                    let (word, tail) = take_word(rest)?;
                    month = Some(parse_month_name(&word.to_lowercase())?);
                    rest = tail;
                }
                Segment::Field(Token::Day | Token::Day2) => {
                    let (digits, tail) = take_digits(rest, 1, 2)?;
                    day = Some(digits);
                    rest = tail;
                }
                Segment::Field(Token::DayOrdinal) => {
                    let (digits, tail) = take_digits(rest, 1, 2)?;
                    day = Some(digits);
                    rest = strip_ordinal_suffix(tail);
                }
                Segment::Field(Token::WeekdayShort | Token::WeekdayLong) => {
                    let (word, tail) = take_word(rest)?;
                    weekday = Some(parse_weekday_name(&word.to_lowercase())?);
                    rest = tail;
                }
            }
        }

        if !rest.trim().is_empty() {
            return None;
        }

        let date = CalendarDate::from_ymd_opt(year.unwrap_or(reference.year()), month?, day?)?;
        match weekday {
            Some(wd) if wd != date.weekday() => None,
            _ => Some(date),
        }
    }
}

impl FromStr for DatePattern {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

// ── Name tables ─────────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a lowercase month name, full or abbreviated, to 1-12.
pub(crate) fn parse_month_name(s: &str) -> Option<u32> {
    match s {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// Parse a lowercase weekday name, full or abbreviated.
pub(crate) fn parse_weekday_name(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Two-digit years: 69-99 → 1969-1999, 00-68 → 2000-2068 (same pivot as `%y`).
pub(crate) fn pivot_two_digit_year(yy: u32) -> i32 {
    if yy >= 69 {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    }
}

// ── Scanning helpers ────────────────────────────────────────────────────────

/// Take between `min` and `max` leading ASCII digits.
fn take_digits(s: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = s.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}

/// Take a leading run of letters.
fn take_word(s: &str) -> Option<(&str, &str)> {
    let len: usize = s
        .chars()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    if len == 0 {
        return None;
    }
    Some(s.split_at(len))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

pub(crate) fn strip_ordinal_suffix(s: &str) -> &str {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| strip_prefix_ignore_case(s, suffix))
        .unwrap_or(s)
}
