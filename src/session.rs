//! Session state machine
//!
//! A session is always in one of two states: no trip selected (the top
//! level) or one trip selected. The state gates which command categories
//! are legal: trip management at the top level, photo management inside a
//! trip. The selection is a zero-based index into the diary, never a live
//! reference, so deleting a trip can never leave a dangling selection.
//!
//! The state is threaded through the dispatch loop as a value and updated
//! after each command; it is never stored in a global.

use std::fmt;

/// Current session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Top level: trip-management commands are legal
    NoTripSelected,
    /// Inside the trip at this diary index: photo-management commands are legal
    TripSelected(usize),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::NoTripSelected
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTripSelected => write!(f, "no trip selected"),
            Self::TripSelected(i) => write!(f, "trip {} selected", i + 1),
        }
    }
}

/// Legality category of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    /// Legal in either state (menu, bye)
    Global,
    /// Legal only with no trip selected (create/list/delete/select trips)
    TripManagement,
    /// Legal only with a trip selected (add/remove/caption/list photos)
    PhotoManagement,
}

impl SessionState {
    /// Whether a trip is currently selected
    pub fn is_trip_selected(&self) -> bool {
        matches!(self, Self::TripSelected(_))
    }

    /// The selected trip index, if any
    pub fn selected(&self) -> Option<usize> {
        match self {
            Self::TripSelected(i) => Some(*i),
            Self::NoTripSelected => None,
        }
    }

    /// Enter the trip at `index`
    pub fn select(&mut self, index: usize) {
        *self = Self::TripSelected(index);
    }

    /// Return to the top level
    pub fn deselect(&mut self) {
        *self = Self::NoTripSelected;
    }

    /// Whether a command of the given category is legal in this state
    pub fn permits(&self, category: CommandCategory) -> bool {
        match category {
            CommandCategory::Global => true,
            CommandCategory::TripManagement => !self.is_trip_selected(),
            CommandCategory::PhotoManagement => self.is_trip_selected(),
        }
    }

    /// Fix up the selection after the trip at `deleted` was removed
    ///
    /// Deleting the selected trip clears the selection; deleting an earlier
    /// trip shifts the selection index down by one.
    pub fn on_trip_deleted(&mut self, deleted: usize) {
        if let Self::TripSelected(i) = *self {
            if i == deleted {
                *self = Self::NoTripSelected;
            } else if i > deleted {
                *self = Self::TripSelected(i - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_no_trip_selected() {
        let state = SessionState::default();
        assert_eq!(state, SessionState::NoTripSelected);
        assert!(!state.is_trip_selected());
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_select_and_deselect() {
        let mut state = SessionState::default();
        state.select(2);
        assert_eq!(state.selected(), Some(2));
        state.deselect();
        assert_eq!(state, SessionState::NoTripSelected);
    }

    #[test]
    fn test_permits_global_in_both_states() {
        assert!(SessionState::NoTripSelected.permits(CommandCategory::Global));
        assert!(SessionState::TripSelected(0).permits(CommandCategory::Global));
    }

    #[test]
    fn test_permits_trip_management_only_at_top_level() {
        assert!(SessionState::NoTripSelected.permits(CommandCategory::TripManagement));
        assert!(!SessionState::TripSelected(0).permits(CommandCategory::TripManagement));
    }

    #[test]
    fn test_permits_photo_management_only_inside_trip() {
        assert!(!SessionState::NoTripSelected.permits(CommandCategory::PhotoManagement));
        assert!(SessionState::TripSelected(0).permits(CommandCategory::PhotoManagement));
    }

    #[test]
    fn test_deleting_selected_trip_clears_selection() {
        let mut state = SessionState::TripSelected(1);
        state.on_trip_deleted(1);
        assert_eq!(state, SessionState::NoTripSelected);
    }

    #[test]
    fn test_deleting_earlier_trip_shifts_selection() {
        let mut state = SessionState::TripSelected(3);
        state.on_trip_deleted(1);
        assert_eq!(state, SessionState::TripSelected(2));
    }

    #[test]
    fn test_deleting_later_trip_keeps_selection() {
        let mut state = SessionState::TripSelected(1);
        state.on_trip_deleted(3);
        assert_eq!(state, SessionState::TripSelected(1));
    }

    #[test]
    fn test_deleting_with_no_selection_is_noop() {
        let mut state = SessionState::NoTripSelected;
        state.on_trip_deleted(0);
        assert_eq!(state, SessionState::NoTripSelected);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::NoTripSelected.to_string(), "no trip selected");
        assert_eq!(SessionState::TripSelected(0).to_string(), "trip 1 selected");
    }
}
