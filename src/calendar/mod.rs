mod matrix;
mod picker;
mod state;
mod util;
mod widget;
pub(crate) use self::picker::Picker;
pub(crate) use self::state::{DayFlags, PickerEvent, TabDirection};
pub(crate) use self::util::{parse_weekday, WeekdayExt, DAYS_IN_WEEK};
pub(crate) use self::widget::DatePicker;
use time::Date;

/// Receives the picker's host-visible events.  Both methods default to doing
/// nothing.
pub(crate) trait PickerObserver {
    /// Called whenever the user confirms a day, even if it was already the
    /// selected one
    fn date_selected(&mut self, _date: Date) {}

    /// Called whenever the cursor lands on a different day
    fn cursor_moved(&mut self, _date: Date) {}
}

impl PickerObserver for () {}
