//! Text and JSON rendering of picker state.

use datepicker_engine::{
    weekday_labels, ButtonLabels, CalendarCell, CalendarController, LabelKey, Snapshot, YearMonth,
};
use serde::Serialize;

const CELL_WIDTH: usize = 4;

/// Grid as emitted by `--output json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReport<'a> {
    pub view: YearMonth,
    pub weekdays: [&'static str; 7],
    pub labels: &'a ButtonLabels,
    pub cells: Vec<CalendarCell>,
}

impl<'a> GridReport<'a> {
    pub fn new(controller: &'a CalendarController) -> Self {
        Self {
            view: controller.view(),
            weekdays: weekday_labels(controller.first_day_of_week()),
            labels: controller.labels(),
            cells: controller.render_grid(),
        }
    }
}

/// One day, four columns wide.
///
/// `[15]` selected, `<15>` today, `(15)` disabled, ` 15.` outside the month.
pub fn cell_text(cell: &CalendarCell) -> String {
    let day = cell.date.day();
    if cell.is_selected {
        format!("[{day:>2}]")
    } else if cell.is_today {
        format!("<{day:>2}>")
    } else if cell.is_disabled {
        format!("({day:>2})")
    } else if !cell.in_current_month {
        format!(" {day:>2}.")
    } else {
        format!(" {day:>2} ")
    }
}

/// The month grid framed by the navigation and action button labels.
pub fn grid_text(controller: &CalendarController) -> String {
    let labels = controller.labels();
    let width = CELL_WIDTH * 7;
    let title = month_title(controller.view());

    let nav_left = format!(
        "{} {}",
        labels.get(LabelKey::PrevYear),
        labels.get(LabelKey::PrevMonth)
    );
    let nav_right = format!(
        "{} {}",
        labels.get(LabelKey::NextMonth),
        labels.get(LabelKey::NextYear)
    );
    let used = [&nav_left, &nav_right, &title].map(|s| s.chars().count());
    let gap = width.saturating_sub(used.iter().sum());
    let left_gap = gap / 2;

    let mut out = format!(
        "{nav_left}{}{title}{}{nav_right}\n",
        " ".repeat(left_gap.max(1)),
        " ".repeat((gap - left_gap).max(1)),
    );

    for label in weekday_labels(controller.first_day_of_week()) {
        out.push_str(&format!("{label:>CELL_WIDTH$}"));
    }
    out.push('\n');

    for week in controller.render_grid().chunks(7) {
        let row: String = week.iter().map(cell_text).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "[{}] [{}]",
        labels.get(LabelKey::Today),
        labels.get(LabelKey::Clear)
    ));
    out
}

fn month_title(view: YearMonth) -> String {
    datepicker_engine::format_text(view.first_day(), "MMMM YYYY")
        .unwrap_or_else(|_| view.to_string())
}

/// One-line summary of the observable state.
pub fn state_line(snapshot: &Snapshot) -> String {
    let selection = snapshot
        .selection
        .map_or_else(|| "none".to_string(), |d| d.to_string());
    let range = snapshot
        .range
        .map_or_else(|| "none".to_string(), |r| r.to_string());
    format!(
        "selection={selection} view={} range={range} popover={} validity={} text={:?}",
        snapshot.view,
        json_word(&snapshot.popover),
        json_word(&snapshot.validity),
        snapshot.text,
    )
}

/// The serde name of a unit enum variant.
fn json_word<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepicker_engine::{CalendarDate, FixedClock, PickerConfig};

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn controller() -> CalendarController {
        CalendarController::with_clock(PickerConfig::default(), FixedClock(d("2024-01-17"))).unwrap()
    }

    #[test]
    fn test_cell_markers() {
        let mut c = controller();
        c.set_bounds(Some(d("2024-01-03")), None).unwrap();
        c.select_date(d("2024-01-15")).unwrap();
        let cells = c.render_grid();
        let text_of = |date: &str| cell_text(cells.iter().find(|cell| cell.date == d(date)).unwrap());

        assert_eq!(text_of("2024-01-15"), "[15]");
        assert_eq!(text_of("2024-01-17"), "<17>");
        assert_eq!(text_of("2024-01-02"), "( 2)");
        assert_eq!(text_of("2024-02-01"), "  1.");
        assert_eq!(text_of("2024-01-20"), " 20 ");
    }

    #[test]
    fn test_grid_text_layout() {
        let text = grid_text(&controller());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 1 + 6 + 1);
        assert!(lines[0].starts_with("<< <"));
        assert!(lines[0].contains("January 2024"));
        assert!(lines[0].ends_with("> >>"));
        assert_eq!(lines[1], " Mon Tue Wed Thu Fri Sat Sun");
        assert!(lines[2].starts_with(" 25."));
        assert_eq!(lines[8], "[Today] [Clear]");
    }

    #[test]
    fn test_title_centred_between_non_ascii_labels() {
        let config = PickerConfig::from_json(
            r#"{ "labels": { "prev-year": "←←", "prev-month": "←", "next-month": "→", "next-year": "→→" } }"#,
        )
        .unwrap();
        let c = CalendarController::with_clock(config, FixedClock(d("2024-01-17"))).unwrap();
        let text = grid_text(&c);
        let title_line = text.lines().next().unwrap();

        assert_eq!(title_line, "←← ←    January 2024    → →→");
        assert_eq!(title_line.chars().count(), CELL_WIDTH * 7);
    }

    #[test]
    fn test_state_line() {
        let mut c = controller();
        c.select_date(d("2024-01-15")).unwrap();
        assert_eq!(
            state_line(&c.snapshot()),
            "selection=2024-01-15 view=2024-01 range=none popover=closed validity=valid text=\"2024-01-15\""
        );
    }
}
