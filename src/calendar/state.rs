use super::matrix::{build_month_matrix, CalendarMatrix};
use super::util::{
    first_of_month, last_of_month, same_calendar_day, same_month, shift_date, EARLIEST, LATEST,
};
use time::{Date, Weekday};

/// An input to the picker, already stripped of how the user produced it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Hover(Date),
    Focus(Date),
    Click(Date),
    PreviousMonth,
    NextMonth,
    JumpTo(Date),
}

impl PickerEvent {
    /// Returns true for events that always move the cursor unless it is at
    /// the end of the navigable range
    pub(crate) fn is_navigation(self) -> bool {
        matches!(
            self,
            PickerEvent::MoveUp
                | PickerEvent::MoveDown
                | PickerEvent::MoveLeft
                | PickerEvent::MoveRight
                | PickerEvent::PreviousMonth
                | PickerEvent::NextMonth
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TabDirection {
    Forwards,
    Backwards,
}

/// How a single day cell should be shown.  The flags are independent of
/// each other.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayFlags {
    /// The day belongs to the displayed month rather than an adjacent one
    pub(crate) in_month: bool,
    pub(crate) selected: bool,
    pub(crate) cursor: bool,
    pub(crate) today: bool,
}

/// Everything the picker remembers between two events.  The displayed month
/// is the cursor's month.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WidgetState {
    selected: Date,
    cursor: Date,
    week_start: Weekday,
}

impl WidgetState {
    pub(crate) fn new(date: Date, week_start: Weekday) -> WidgetState {
        let date = date.clamp(EARLIEST, LATEST);
        WidgetState {
            selected: date,
            cursor: date,
            week_start,
        }
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Returns true if `date` is in the displayed month
    pub(crate) fn displays(&self, date: Date) -> bool {
        same_month(date, self.cursor)
    }

    pub(crate) fn matrix(&self) -> CalendarMatrix {
        build_month_matrix(self.cursor, self.week_start)
    }

    /// Compute the state that follows `event`.  Pointer events on days
    /// outside the displayed month are ignored.
    #[must_use]
    pub(crate) fn apply(self, event: PickerEvent) -> WidgetState {
        match event {
            PickerEvent::MoveUp => self.with_cursor(shift_date(self.cursor, 0, 0, -7)),
            PickerEvent::MoveDown => self.with_cursor(shift_date(self.cursor, 0, 0, 7)),
            PickerEvent::MoveLeft => self.with_cursor(shift_date(self.cursor, 0, 0, -1)),
            PickerEvent::MoveRight => self.with_cursor(shift_date(self.cursor, 0, 0, 1)),
            PickerEvent::Confirm => WidgetState {
                selected: self.cursor,
                ..self
            },
            PickerEvent::Hover(date) | PickerEvent::Focus(date) if self.displays(date) => {
                self.with_cursor(date)
            }
            PickerEvent::Click(date) if self.displays(date) => WidgetState {
                selected: date,
                cursor: date,
                ..self
            },
            PickerEvent::Hover(_) | PickerEvent::Focus(_) | PickerEvent::Click(_) => self,
            PickerEvent::PreviousMonth => self.with_cursor(shift_date(self.cursor, 0, -1, 0)),
            PickerEvent::NextMonth => self.with_cursor(shift_date(self.cursor, 0, 1, 0)),
            PickerEvent::JumpTo(date) => self.with_cursor(date.clamp(EARLIEST, LATEST)),
        }
    }

    fn with_cursor(self, cursor: Date) -> WidgetState {
        WidgetState { cursor, ..self }
    }

    /// The day that receives focus when tabbing away from the cursor.  Focus
    /// wraps around within the displayed month.
    pub(crate) fn tab_target(&self, direction: TabDirection) -> Date {
        match direction {
            TabDirection::Forwards if self.cursor == last_of_month(self.cursor) => {
                first_of_month(self.cursor)
            }
            TabDirection::Forwards => shift_date(self.cursor, 0, 0, 1),
            TabDirection::Backwards if self.cursor.day() == 1 => last_of_month(self.cursor),
            TabDirection::Backwards => shift_date(self.cursor, 0, 0, -1),
        }
    }

    pub(crate) fn day_flags(&self, day: Date, today: Date) -> DayFlags {
        DayFlags {
            in_month: self.displays(day),
            selected: same_calendar_day(day, self.selected),
            cursor: same_calendar_day(day, self.cursor),
            today: same_calendar_day(day, today),
        }
    }
}
