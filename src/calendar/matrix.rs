use super::util::{first_of_month, WeekdayExt, DAYS_IN_WEEK, EARLIEST, LATEST};
use time::{Date, Duration, Weekday};

/// Number of week rows in every displayed month
pub(crate) const WEEKS: usize = 6;

/// The 6×7 grid of consecutive days shown for one month.  Rows start on the
/// week start day; the displayed month is always contained in full.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarMatrix([[Date; DAYS_IN_WEEK]; WEEKS]);

impl CalendarMatrix {
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Date; DAYS_IN_WEEK]> + '_ {
        self.0.iter()
    }

    pub(crate) fn get(&self, week: usize, column: usize) -> Option<Date> {
        self.0.get(week).and_then(|row| row.get(column)).copied()
    }
}

#[cfg(test)]
impl CalendarMatrix {
    pub(crate) fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.0.iter().flatten().copied()
    }

    pub(crate) fn first(&self) -> Date {
        self.0[0][0]
    }

    pub(crate) fn last(&self) -> Date {
        self.0[WEEKS - 1][DAYS_IN_WEEK - 1]
    }
}

/// Build the grid for the month containing `cursor` with rows starting on
/// `week_start`.  Cursors outside the navigable range are treated as the
/// nearest date inside it.
pub(crate) fn build_month_matrix(cursor: Date, week_start: Weekday) -> CalendarMatrix {
    // Padding days may fall outside EARLIEST..=LATEST, so step with plain
    // `Duration`s rather than `shift_date()`.
    let first = first_of_month(cursor.clamp(EARLIEST, LATEST));
    let padding = first.weekday().column(week_start);
    let anchor = first.saturating_sub(Duration::days(i64::from(padding)));
    let mut offset = 0i64;
    CalendarMatrix(std::array::from_fn(|_| {
        std::array::from_fn(|_| {
            let date = anchor.saturating_add(Duration::days(offset));
            offset += 1;
            date
        })
    }))
}
