//! WASM bindings for the datepicker calendar state controller.
//!
//! Dates cross the boundary as ISO `YYYY-MM-DD` strings; the grid, state
//! snapshot and button labels cross as JSON strings. Errors are returned as
//! their display message.
//!
//! ```js
//! import { DatePicker } from "datepicker-wasm";
//!
//! const picker = new DatePicker('{"locale":"en-US","dateFormatPattern":"MM/DD/YYYY"}');
//! picker.focus();
//! picker.commitText("next friday");     // "valid"
//! const cells = JSON.parse(picker.renderGrid());
//! ```

use datepicker_engine::{
    CalendarController, CalendarDate, FixedClock, ParseResult, PickerConfig, PickerError,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse_date(s: &str) -> Result<CalendarDate, String> {
    s.parse().map_err(|e: PickerError| e.to_string())
}

fn parse_optional_date(s: Option<String>) -> Result<Option<CalendarDate>, String> {
    s.filter(|s| !s.trim().is_empty())
        .map(|s| parse_date(&s))
        .transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Serde name of a unit variant, e.g. `"outOfRange"`.
fn variant_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// A date picker controller owned by a JavaScript UI component.
#[wasm_bindgen]
pub struct DatePicker {
    inner: CalendarController,
}

#[wasm_bindgen]
impl DatePicker {
    /// Create a picker from a JSON config (or defaults).
    ///
    /// `today` pins the current day (`YYYY-MM-DD`); without it the clock of
    /// the configured timezone (or the browser's zone) is used.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, today: Option<String>) -> Result<DatePicker, String> {
        let config = match config_json {
            Some(json) => PickerConfig::from_json(&json).map_err(|e| e.to_string())?,
            None => PickerConfig::default(),
        };
        let inner = match parse_optional_date(today)? {
            Some(today) => CalendarController::with_clock(config, FixedClock(today)),
            None => CalendarController::new(config),
        }
        .map_err(|e| e.to_string())?;
        Ok(DatePicker { inner })
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Set the selectable range; empty or missing bounds are open.
    #[wasm_bindgen(js_name = "setRange")]
    pub fn set_range(&mut self, min: Option<String>, max: Option<String>) -> Result<(), String> {
        let min = parse_optional_date(min)?;
        let max = parse_optional_date(max)?;
        self.inner.set_bounds(min, max).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "selectDate")]
    pub fn select_date(&mut self, date: &str) -> Result<(), String> {
        let date = parse_date(date)?;
        self.inner.select_date(date).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "clearSelection")]
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }

    #[wasm_bindgen(js_name = "navigateMonth")]
    pub fn navigate_month(&mut self, delta: i32) {
        self.inner.navigate_month(i64::from(delta));
    }

    #[wasm_bindgen(js_name = "navigateYear")]
    pub fn navigate_year(&mut self, delta: i32) {
        self.inner.navigate_year(i64::from(delta));
    }

    #[wasm_bindgen(js_name = "jumpToToday")]
    pub fn jump_to_today(&mut self) {
        self.inner.jump_to_today();
    }

    pub fn open(&mut self) {
        self.inner.open();
    }

    pub fn close(&mut self) {
        self.inner.close();
    }

    pub fn focus(&mut self) {
        self.inner.focus();
    }

    pub fn blur(&mut self) {
        self.inner.blur();
    }

    pub fn toggle(&mut self) {
        self.inner.toggle();
    }

    /// Apply text typed into the field. Returns `"valid"`, `"unparseable"`
    /// or `"outOfRange"`.
    #[wasm_bindgen(js_name = "commitText")]
    pub fn commit_text(&mut self, text: &str) -> String {
        variant_name(&self.inner.commit_text(text))
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Resolve text to an ISO date, or `undefined` when it cannot be parsed.
    #[wasm_bindgen(js_name = "parseText")]
    pub fn parse_text(&self, text: &str, reference: Option<String>) -> Result<Option<String>, String> {
        let reference = parse_optional_date(reference)?.unwrap_or_else(|| self.inner.today());
        Ok(match self.inner.parse_text(text, reference) {
            ParseResult::Resolved(date) => Some(date.to_string()),
            ParseResult::Unparsed => None,
        })
    }

    #[wasm_bindgen(js_name = "formatText")]
    pub fn format_text(&self, date: &str, pattern: &str) -> Result<String, String> {
        let date = parse_date(date)?;
        self.inner.format_text(date, pattern).map_err(|e| e.to_string())
    }

    /// The 42 grid cells as a JSON array.
    #[wasm_bindgen(js_name = "renderGrid")]
    pub fn render_grid(&self) -> Result<String, String> {
        to_json(&self.inner.render_grid())
    }

    /// The full state snapshot as JSON.
    pub fn state(&self) -> Result<String, String> {
        to_json(&self.inner.snapshot())
    }

    /// Button labels keyed by `prev-month`, `next-month`, … as JSON.
    pub fn labels(&self) -> Result<String, String> {
        to_json(self.inner.labels())
    }

    pub fn selection(&self) -> Option<String> {
        self.inner.selection().map(|d| d.to_string())
    }

    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }

    #[wasm_bindgen(js_name = "isOpen")]
    pub fn is_open(&self) -> bool {
        self.inner.popover().is_open()
    }

    pub fn today(&self) -> String {
        self.inner.today().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> DatePicker {
        DatePicker::new(None, Some("2024-01-17".to_string())).unwrap()
    }

    #[test]
    fn test_new_with_config() {
        let picker = DatePicker::new(
            Some(r#"{"initialDate":"2024-03-09","labels":{"today":"Now"}}"#.to_string()),
            Some("2024-01-17".to_string()),
        )
        .unwrap();
        assert_eq!(picker.selection().as_deref(), Some("2024-03-09"));
        assert!(picker.labels().unwrap().contains(r#""today":"Now""#));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = DatePicker::new(Some(r#"{"firstDayOfWeek":8}"#.to_string()), None).err().unwrap();
        assert!(err.contains("firstDayOfWeek"));
        let err = DatePicker::new(None, Some("17/01/2024".to_string())).err().unwrap();
        assert!(err.contains("Invalid date"));
    }

    #[test]
    fn test_select_and_range() {
        let mut p = picker();
        p.set_range(Some("2024-01-10".to_string()), Some("2024-01-20".to_string())).unwrap();
        let err = p.select_date("2024-01-05").unwrap_err();
        assert!(err.contains("outside the selectable range"));
        assert_eq!(p.selection(), None);
        p.select_date("2024-01-15").unwrap();
        assert_eq!(p.selection().as_deref(), Some("2024-01-15"));
        assert!(p.set_range(Some("2024-02-01".to_string()), Some("2024-01-01".to_string())).is_err());
        p.set_range(None, Some(String::new())).unwrap();
    }

    #[test]
    fn test_commit_text_and_popover() {
        let mut p = picker();
        p.focus();
        assert!(p.is_open());
        assert_eq!(p.commit_text("soonish"), "unparseable");
        assert!(p.is_open());
        assert_eq!(p.commit_text("tomorrow"), "valid");
        assert!(!p.is_open());
        assert_eq!(p.text(), "2024-01-18");
    }

    #[test]
    fn test_parse_and_format() {
        let p = picker();
        assert_eq!(p.parse_text("next friday", None).unwrap().as_deref(), Some("2024-01-19"));
        assert_eq!(p.parse_text("not a date", None).unwrap(), None);
        assert_eq!(
            p.parse_text("tomorrow", Some("2024-12-31".to_string())).unwrap().as_deref(),
            Some("2025-01-01")
        );
        assert_eq!(p.format_text("2024-01-05", "D MMM YYYY").unwrap(), "5 Jan 2024");
        assert!(p.format_text("2024-01-05", "QQ").is_err());
    }

    #[test]
    fn test_grid_and_state_json() {
        let mut p = picker();
        p.navigate_month(1);
        let cells: serde_json::Value = serde_json::from_str(&p.render_grid().unwrap()).unwrap();
        assert_eq!(cells.as_array().unwrap().len(), 42);

        let state: serde_json::Value = serde_json::from_str(&p.state().unwrap()).unwrap();
        assert_eq!(state["view"]["month"], 2);
        assert_eq!(state["popover"], "closed");

        p.jump_to_today();
        p.navigate_year(-1);
        let state: serde_json::Value = serde_json::from_str(&p.state().unwrap()).unwrap();
        assert_eq!(state["view"]["year"], 2023);
        assert_eq!(p.today(), "2024-01-17");
    }
}
