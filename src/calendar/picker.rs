use super::state::{PickerEvent, TabDirection, WidgetState};
use super::widget::{PickerLayout, Target};
use super::PickerObserver;
use thiserror::Error;
use time::{Date, Weekday};

/// Owns the picker's one `WidgetState` along with what is needed to render it
/// and to report changes to the host
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Picker<O> {
    pub(super) today: Date,
    state: WidgetState,
    observer: O,
    /// Where the picker was last drawn, for mapping pointer events back onto
    /// controls and days
    pub(super) layout: PickerLayout,
}

impl<O: PickerObserver> Picker<O> {
    pub(crate) fn new(today: Date, week_start: Weekday, observer: O) -> Self {
        Picker {
            today,
            state: WidgetState::new(today, week_start),
            observer,
            layout: PickerLayout::default(),
        }
    }

    /// Start with both the cursor and the selection on `date` instead of on
    /// today
    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.state = WidgetState::new(date, self.state.week_start());
        self
    }

    /// Replace the observer, keeping everything else
    pub(crate) fn with_observer<P: PickerObserver>(self, observer: P) -> Picker<P> {
        Picker {
            today: self.today,
            state: self.state,
            observer,
            layout: self.layout,
        }
    }

    pub(crate) fn state(&self) -> WidgetState {
        self.state
    }

    pub(crate) fn selected(&self) -> Date {
        self.state.selected()
    }

    pub(crate) fn observer(&self) -> &O {
        &self.observer
    }

    /// Apply `event`.  Navigation that cannot move the cursor because it is
    /// at the end of the navigable range returns an error and leaves the
    /// state as it was.
    pub(crate) fn dispatch(&mut self, event: PickerEvent) -> Result<(), OutOfTimeError> {
        let before = self.state.cursor();
        self.apply(event);
        if event.is_navigation() && self.state.cursor() == before {
            Err(OutOfTimeError)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, event: PickerEvent) {
        let old = self.state;
        self.state = old.apply(event);
        if self.state.cursor() != old.cursor() {
            log::debug!(
                "{event:?}: cursor moved from {} to {}",
                old.cursor(),
                self.state.cursor()
            );
            self.observer.cursor_moved(self.state.cursor());
        }
        let fired = match event {
            PickerEvent::Confirm => true,
            PickerEvent::Click(date) => old.displays(date),
            _ => false,
        };
        if fired {
            log::info!("Selected {}", self.state.selected());
            self.observer.date_selected(self.state.selected());
        }
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.apply(PickerEvent::JumpTo(self.today));
    }

    pub(crate) fn tab(&mut self, direction: TabDirection) {
        let target = self.state.tab_target(direction);
        self.apply(PickerEvent::Focus(target));
    }

    /// Handle the pointer moving onto the given screen cell
    pub(crate) fn hover_at(&mut self, column: u16, row: u16) {
        if let Some(date) = self.day_at(column, row) {
            self.apply(PickerEvent::Hover(date));
        }
    }

    /// Handle a primary-button click on the given screen cell.  Clicking a
    /// month control fails in the same way as [`Picker::dispatch`] when the
    /// month cannot change.
    pub(crate) fn click_at(&mut self, column: u16, row: u16) -> Result<(), OutOfTimeError> {
        match self.layout.target(column, row) {
            Some(Target::Previous) => self.dispatch(PickerEvent::PreviousMonth),
            Some(Target::Next) => self.dispatch(PickerEvent::NextMonth),
            Some(Target::Day { .. }) => {
                if let Some(date) = self.day_at(column, row) {
                    self.apply(PickerEvent::Click(date));
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn day_at(&self, column: u16, row: u16) -> Option<Date> {
        match self.layout.target(column, row)? {
            Target::Day { week, column } => self.state.matrix().get(week, column),
            Target::Previous | Target::Next => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
