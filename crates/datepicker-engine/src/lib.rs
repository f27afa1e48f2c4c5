//! # datepicker-engine
//!
//! The framework-independent core of a date-picker widget.
//!
//! A [`CalendarController`] owns the selected date, the displayed month, an
//! optional inclusive valid range, the popover state and the text shown in
//! the companion text field. A UI layer calls its commands from event
//! handlers, subscribes to state changes and draws the 42-cell grid it
//! returns. Nothing here renders or persists state.
//!
//! ## Modules
//!
//! - [`date`]: `CalendarDate`, the `YearMonth` view cursor and `DateRange`
//! - [`grid`]: Pure 6 × 7 month grid derivation
//! - [`format`]: Date patterns: formatting and pattern-directed parsing
//! - [`parse`]: Pluggable free-text parsing and the built-in natural-language parser
//! - [`popover`]: Closed/Open popover state machine
//! - [`clock`]: Source of "today"
//! - [`config`]: JSON-loadable picker options and button labels
//! - [`controller`]: The calendar state controller
//! - [`error`]: Error types
//!
//! ```
//! use datepicker_engine::{CalendarController, CalendarDate, FixedClock, PickerConfig};
//!
//! let today = CalendarDate::new(2024, 1, 17).unwrap();
//! let mut picker = CalendarController::with_clock(PickerConfig::default(), FixedClock(today)).unwrap();
//!
//! picker.commit_text("next friday");
//! assert_eq!(picker.selection(), Some(CalendarDate::new(2024, 1, 19).unwrap()));
//! assert_eq!(picker.render_grid().len(), 42);
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod format;
pub mod grid;
pub mod parse;
pub mod popover;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ButtonLabels, LabelKey, PickerConfig};
pub use controller::{CalendarController, Snapshot, SubscriptionId, Validity};
pub use date::{CalendarDate, DateRange, YearMonth};
pub use error::{PickerError, Result};
pub use format::{format_text, DatePattern};
pub use grid::{render_grid, weekday_labels, CalendarCell, GridInput, GRID_CELLS};
pub use parse::{
    DateOrder, DateParser, NaturalDateParser, ParseResult, ParserChain, PatternParser,
};
pub use popover::{PopoverEvent, PopoverState};
