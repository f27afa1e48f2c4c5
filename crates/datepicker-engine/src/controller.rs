//! The calendar date-state controller.
//!
//! [`CalendarController`] owns the selection, the displayed month, the valid
//! range, the popover state and the text shown in the companion text field.
//! A UI layer calls its commands from event handlers and re-renders from
//! [`CalendarController::render_grid`] and the getters.
//!
//! # Change notification
//!
//! Every command that changes the observable [`Snapshot`] notifies the
//! subscribers registered with [`CalendarController::subscribe`], once, after
//! the command has been fully applied. Commands that fail leave the
//! selection, view and range untouched.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::clock::Clock;
use crate::config::{ButtonLabels, PickerConfig};
use crate::date::{CalendarDate, DateRange, YearMonth};
use crate::error::{PickerError, Result};
use crate::format::{self, DatePattern};
use crate::grid::{render_grid, CalendarCell, GridInput};
use crate::parse::{DateParser, NaturalDateParser, ParseResult, ParserChain, PatternParser};
use crate::popover::{PopoverEvent, PopoverState};

/// Inline validity flag for the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Validity {
    #[default]
    Valid,
    /// The last text input could not be parsed.
    Unparseable,
    /// The last selection attempt fell outside the range.
    OutOfRange,
}

/// Everything a renderer can read, as one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub selection: Option<CalendarDate>,
    pub view: YearMonth,
    pub range: Option<DateRange>,
    pub popover: PopoverState,
    pub validity: Validity,
    pub text: String,
}

/// Handle returned by [`CalendarController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

pub struct CalendarController {
    config: PickerConfig,
    week_start: Weekday,
    pattern: DatePattern,
    labels: ButtonLabels,
    clock: Box<dyn Clock>,
    parser: Box<dyn DateParser>,

    selection: Option<CalendarDate>,
    view: YearMonth,
    range: Option<DateRange>,
    popover: PopoverState,
    validity: Validity,
    text: String,

    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CalendarController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarController")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CalendarController {
    /// Build a controller reading "today" from the wall clock in the
    /// configured timezone, or in the local zone when none is set.
    pub fn new(config: PickerConfig) -> Result<Self> {
        let clock = config.clock()?;
        Self::with_clock(config, clock)
    }

    /// Build a controller with an explicit clock.
    ///
    /// An initial date outside the configured range is dropped, and the
    /// view then starts on today's month.
    pub fn with_clock(config: PickerConfig, clock: impl Clock + 'static) -> Result<Self> {
        let week_start = config.week_start()?;
        let pattern = config.pattern()?;
        let labels = config.button_labels();
        let range = config.range.filter(|r| !r.is_unbounded());

        let selection = config.initial_date.filter(|date| {
            let keep = range.is_none_or(|r| r.contains(*date));
            if !keep {
                debug!(%date, "initial date outside range, dropped");
            }
            keep
        });
        let view = selection.unwrap_or_else(|| clock.today()).year_month();
        let text = selection.map(|d| pattern.format(d)).unwrap_or_default();

        let parser = ParserChain::new()
            .with(PatternParser::new(pattern.clone()))
            .with(NaturalDateParser::for_locale(&config.locale, week_start));

        Ok(Self {
            config,
            week_start,
            pattern,
            labels,
            clock: Box::new(clock),
            parser: Box::new(parser),
            selection,
            view,
            range,
            popover: PopoverState::default(),
            validity: Validity::default(),
            text,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    // ── Range and selection ─────────────────────────────────────────────

    /// Replace the active range. A selection outside it is cleared.
    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.apply(|c| {
            c.range = range.filter(|r| !r.is_unbounded());
            if let Some(date) = c.selection {
                if !c.in_range(date) {
                    debug!(%date, "selection outside new range, cleared");
                    c.clear();
                }
            }
        });
    }

    /// Validate `min <= max` and then behave like [`Self::set_range`].
    ///
    /// # Errors
    ///
    /// [`PickerError::InvalidRange`] when both bounds are present and
    /// inverted; the controller is left untouched.
    pub fn set_bounds(
        &mut self,
        min: Option<CalendarDate>,
        max: Option<CalendarDate>,
    ) -> Result<()> {
        let range = DateRange::new(min, max)?;
        self.set_range(Some(range));
        Ok(())
    }

    /// Select `date` and move the view to its month. Closes the popover.
    ///
    /// # Errors
    ///
    /// [`PickerError::OutOfRange`] when `date` is outside the active range.
    /// The selection and view are unchanged, the popover stays as it was and
    /// the validity flag reads [`Validity::OutOfRange`].
    pub fn select_date(&mut self, date: CalendarDate) -> Result<()> {
        self.apply(|c| c.select(date))
    }

    /// Drop the selection. The view does not move.
    pub fn clear_selection(&mut self) {
        self.apply(Self::clear);
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Move the view by `delta` months. Browsing is never clamped to the
    /// range; it stops at the first and last supported months.
    pub fn navigate_month(&mut self, delta: i64) {
        self.apply(|c| c.view = c.view.add_months(delta));
    }

    /// Move the view by `delta` years, keeping the month.
    pub fn navigate_year(&mut self, delta: i64) {
        self.apply(|c| c.view = c.view.add_years(delta));
    }

    /// Show today's month. The selection is unchanged.
    pub fn jump_to_today(&mut self) {
        self.apply(|c| c.view = c.clock.today().year_month());
    }

    // ── Popover ─────────────────────────────────────────────────────────

    pub fn open(&mut self) {
        self.popover_event(PopoverEvent::Open);
    }

    pub fn close(&mut self) {
        self.popover_event(PopoverEvent::Close);
    }

    /// The text field gained focus.
    pub fn focus(&mut self) {
        self.popover_event(PopoverEvent::Focus);
    }

    /// The text field lost focus.
    pub fn blur(&mut self) {
        self.popover_event(PopoverEvent::Blur);
    }

    pub fn toggle(&mut self) {
        self.popover_event(PopoverEvent::Toggle);
    }

    // ── Text ────────────────────────────────────────────────────────────

    /// Apply text typed into the field.
    ///
    /// Blank text clears the selection. Otherwise the text is parsed
    /// relative to today and selected. When that fails the raw text stays
    /// in the field and the returned validity says why.
    pub fn commit_text(&mut self, text: &str) -> Validity {
        self.apply(|c| {
            if text.trim().is_empty() {
                c.clear();
                return c.validity;
            }
            match c.parser.parse(text, c.clock.today()) {
                ParseResult::Resolved(date) => {
                    if c.select(date).is_err() {
                        c.text = text.to_string();
                    }
                }
                ParseResult::Unparsed => {
                    c.text = text.to_string();
                    c.validity = Validity::Unparseable;
                }
            }
            c.validity
        })
    }

    /// Resolve `text` relative to `reference` with the active parser.
    pub fn parse_text(&self, text: &str, reference: CalendarDate) -> ParseResult {
        self.parser.parse(text, reference)
    }

    /// Format `date` with an arbitrary pattern.
    pub fn format_text(&self, date: CalendarDate, pattern: &str) -> Result<String> {
        format::format_text(date, pattern)
    }

    /// Replace the parsing strategy.
    pub fn set_parser(&mut self, parser: impl DateParser + 'static) {
        self.parser = Box::new(parser);
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// The 42-cell grid for the current view.
    pub fn render_grid(&self) -> Vec<CalendarCell> {
        render_grid(&GridInput {
            view: self.view,
            selection: self.selection,
            range: self.range,
            today: self.clock.today(),
            first_day_of_week: self.week_start,
        })
    }

    pub fn selection(&self) -> Option<CalendarDate> {
        self.selection
    }

    pub fn view(&self) -> YearMonth {
        self.view
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn popover(&self) -> PopoverState {
        self.popover
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.week_start
    }

    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    pub fn labels(&self) -> &ButtonLabels {
        &self.labels
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selection: self.selection,
            view: self.view,
            range: self.range,
            popover: self.popover,
            validity: self.validity,
            text: self.text.clone(),
        }
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    /// Call `listener` with the new snapshot after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // ── Internal helpers ────────────────────────────────────────────────

    /// Run a mutation, then notify subscribers if the snapshot changed.
    fn apply<T>(&mut self, mutate: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.snapshot();
        let out = mutate(self);
        let after = self.snapshot();
        if after != before {
            debug!(
                selection = ?after.selection,
                view = %after.view,
                popover = ?after.popover,
                validity = ?after.validity,
                "picker state changed"
            );
            for (_, listener) in &mut self.listeners {
                listener(&after);
            }
        }
        out
    }

    fn in_range(&self, date: CalendarDate) -> bool {
        date.is_supported() && self.range.is_none_or(|r| r.contains(date))
    }

    fn select(&mut self, date: CalendarDate) -> Result<()> {
        if !self.in_range(date) {
            self.validity = Validity::OutOfRange;
            self.popover = self.popover.transition(PopoverEvent::Rejected);
            return Err(PickerError::OutOfRange { date });
        }
        self.selection = Some(date);
        self.view = date.year_month();
        self.text = self.pattern.format(date);
        self.validity = Validity::Valid;
        self.popover = self.popover.transition(PopoverEvent::Selected);
        Ok(())
    }

    fn clear(&mut self) {
        self.selection = None;
        self.text.clear();
        self.validity = Validity::Valid;
    }

    fn popover_event(&mut self, event: PopoverEvent) {
        self.apply(|c| c.popover = c.popover.transition(event));
    }
}
