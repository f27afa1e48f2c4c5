//! Open/close state of the calendar popover bound to the text field.

use serde::Serialize;

/// Whether the calendar popover is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PopoverState {
    #[default]
    Closed,
    Open,
}

/// Interaction events that can move the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverEvent {
    /// The text field gained focus.
    Focus,
    /// The text field lost focus.
    Blur,
    Open,
    Close,
    Toggle,
    /// A date was selected successfully.
    Selected,
    /// A selection attempt was rejected.
    Rejected,
}

impl PopoverState {
    /// Next state after `event`.
    pub fn transition(self, event: PopoverEvent) -> Self {
        use PopoverEvent as E;

        match (self, event) {
            (PopoverState::Closed, E::Focus | E::Open | E::Toggle) => PopoverState::Open,
            (PopoverState::Open, E::Selected | E::Close | E::Blur | E::Toggle) => {
                PopoverState::Closed
            }
            // Rejected selections keep it open.
            (state, _) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self == PopoverState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_closed() {
        assert_eq!(PopoverState::default(), PopoverState::Closed);
    }

    #[test]
    fn test_closed_opens_on_focus_or_open() {
        assert_eq!(PopoverState::Closed.transition(PopoverEvent::Focus), PopoverState::Open);
        assert_eq!(PopoverState::Closed.transition(PopoverEvent::Open), PopoverState::Open);
        assert_eq!(PopoverState::Closed.transition(PopoverEvent::Toggle), PopoverState::Open);
    }

    #[test]
    fn test_open_closes_on_select_close_or_blur() {
        for event in [PopoverEvent::Selected, PopoverEvent::Close, PopoverEvent::Blur] {
            assert_eq!(PopoverState::Open.transition(event), PopoverState::Closed);
        }
    }

    #[test]
    fn test_rejected_selection_stays_open() {
        assert_eq!(PopoverState::Open.transition(PopoverEvent::Rejected), PopoverState::Open);
    }

    #[test]
    fn test_irrelevant_events_are_ignored() {
        assert_eq!(PopoverState::Closed.transition(PopoverEvent::Blur), PopoverState::Closed);
        assert_eq!(PopoverState::Closed.transition(PopoverEvent::Selected), PopoverState::Closed);
        assert_eq!(PopoverState::Open.transition(PopoverEvent::Focus), PopoverState::Open);
        assert_eq!(PopoverState::Open.transition(PopoverEvent::Open), PopoverState::Open);
    }
}
