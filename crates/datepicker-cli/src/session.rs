//! Scripted picker sessions.
//!
//! A script is one command per line; blank lines and lines starting with `#`
//! are skipped. Commands mirror the UI events a widget would forward:
//!
//! ```text
//! focus
//! input next friday
//! range 2024-01-10 2024-01-20
//! select 2024-01-05
//! month -1
//! grid
//! ```

use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use datepicker_engine::{CalendarController, CalendarDate, PickerError, Validity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Open,
    Close,
    Focus,
    Blur,
    Toggle,
    Select(CalendarDate),
    Clear,
    Month(i64),
    Year(i64),
    Today,
    Input(String),
    /// `range MIN MAX` with `-` for an open side, or `range none`.
    Range(Option<CalendarDate>, Option<CalendarDate>),
    Grid,
}

/// What a step did, beyond changing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Rejected(PickerError),
    Input(Validity),
    ShowGrid,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let step = match name {
            "open" => Step::Open,
            "close" => Step::Close,
            "focus" => Step::Focus,
            "blur" => Step::Blur,
            "toggle" => Step::Toggle,
            "clear" => Step::Clear,
            "today" => Step::Today,
            "grid" => Step::Grid,
            "next-month" => Step::Month(1),
            "prev-month" => Step::Month(-1),
            "next-year" => Step::Year(1),
            "prev-year" => Step::Year(-1),
            "month" => Step::Month(parse_delta(rest)?),
            "year" => Step::Year(parse_delta(rest)?),
            "select" => Step::Select(rest.parse()?),
            "input" => Step::Input(rest.to_string()),
            "range" => parse_range(rest)?,
            _ => bail!("unknown command '{name}'"),
        };
        Ok(step)
    }
}

fn parse_delta(s: &str) -> anyhow::Result<i64> {
    s.trim_start_matches('+')
        .parse()
        .with_context(|| format!("expected a signed number, got '{s}'"))
}

fn parse_range(s: &str) -> anyhow::Result<Step> {
    if s == "none" {
        return Ok(Step::Range(None, None));
    }
    let bound = |part: &str| -> anyhow::Result<Option<CalendarDate>> {
        match part {
            "-" => Ok(None),
            date => Ok(Some(date.parse()?)),
        }
    };
    match s.split_whitespace().collect::<Vec<_>>().as_slice() {
        &[min, max] => Ok(Step::Range(bound(min)?, bound(max)?)),
        _ => Err(anyhow!("expected 'range MIN MAX' or 'range none', got 'range {s}'")),
    }
}

/// Apply one step to the controller.
pub fn apply(controller: &mut CalendarController, step: &Step) -> Outcome {
    match step {
        Step::Open => controller.open(),
        Step::Close => controller.close(),
        Step::Focus => controller.focus(),
        Step::Blur => controller.blur(),
        Step::Toggle => controller.toggle(),
        Step::Select(date) => return rejection(controller.select_date(*date)),
        Step::Clear => controller.clear_selection(),
        Step::Month(delta) => controller.navigate_month(*delta),
        Step::Year(delta) => controller.navigate_year(*delta),
        Step::Today => controller.jump_to_today(),
        Step::Input(text) => return Outcome::Input(controller.commit_text(text)),
        Step::Range(None, None) => controller.set_range(None),
        Step::Range(min, max) => return rejection(controller.set_bounds(*min, *max)),
        Step::Grid => return Outcome::ShowGrid,
    }
    Outcome::Done
}

fn rejection(result: Result<(), PickerError>) -> Outcome {
    result.err().map_or(Outcome::Done, Outcome::Rejected)
}

/// Parse every command line of `script`, keeping 1-based line numbers.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<(usize, String, Step)>> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| -> anyhow::Result<_> {
            let step: Step = line
                .parse()
                .with_context(|| format!("line {number}: '{line}'"))?;
            Ok((number, line.to_string(), step))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepicker_engine::{FixedClock, PickerConfig, PopoverState};

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn controller() -> CalendarController {
        CalendarController::with_clock(PickerConfig::default(), FixedClock(d("2024-01-17"))).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!("focus".parse::<Step>().unwrap(), Step::Focus);
        assert_eq!("month +3".parse::<Step>().unwrap(), Step::Month(3));
        assert_eq!("year -2".parse::<Step>().unwrap(), Step::Year(-2));
        assert_eq!("next-month".parse::<Step>().unwrap(), Step::Month(1));
        assert_eq!(
            "select 2024-01-15".parse::<Step>().unwrap(),
            Step::Select(d("2024-01-15"))
        );
        assert_eq!(
            "input  next friday ".parse::<Step>().unwrap(),
            Step::Input("next friday".to_string())
        );
        assert_eq!(
            "range 2024-01-10 -".parse::<Step>().unwrap(),
            Step::Range(Some(d("2024-01-10")), None)
        );
        assert_eq!("range none".parse::<Step>().unwrap(), Step::Range(None, None));
    }

    #[test]
    fn test_parse_step_errors() {
        assert!("jump".parse::<Step>().is_err());
        assert!("month soon".parse::<Step>().is_err());
        assert!("select tomorrow".parse::<Step>().is_err());
        assert!("range 2024-01-10".parse::<Step>().is_err());
    }

    #[test]
    fn test_parse_script_skips_comments_and_numbers_lines() {
        let steps = parse_script("# demo\nfocus\n\n  select 2024-01-15\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].0, 2);
        assert_eq!(steps[1], (4, "select 2024-01-15".to_string(), Step::Select(d("2024-01-15"))));

        let err = parse_script("focus\nwiggle\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_apply_reports_rejections() {
        let mut c = controller();
        assert_eq!(apply(&mut c, &Step::Range(Some(d("2024-01-10")), Some(d("2024-01-20")))), Outcome::Done);
        assert_eq!(apply(&mut c, &Step::Focus), Outcome::Done);
        assert_eq!(
            apply(&mut c, &Step::Select(d("2024-01-05"))),
            Outcome::Rejected(PickerError::OutOfRange { date: d("2024-01-05") })
        );
        assert_eq!(c.popover(), PopoverState::Open);
        assert!(matches!(
            apply(&mut c, &Step::Range(Some(d("2024-02-01")), Some(d("2024-01-01")))),
            Outcome::Rejected(PickerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_apply_input_and_grid() {
        let mut c = controller();
        assert_eq!(apply(&mut c, &Step::Input("tomorrow".to_string())), Outcome::Input(Validity::Valid));
        assert_eq!(c.selection(), Some(d("2024-01-18")));
        assert_eq!(apply(&mut c, &Step::Grid), Outcome::ShowGrid);
        assert_eq!(apply(&mut c, &Step::Range(None, None)), Outcome::Done);
        assert_eq!(c.range(), None);
    }
}
