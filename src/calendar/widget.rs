use super::picker::Picker;
use super::state::DayFlags;
use super::util::weekday_abbreviations;
use super::PickerObserver;
use crate::locale::Localization;
use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::iter::zip;
use std::marker::PhantomData;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the picker in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Width of each of the month controls at either end of the header
const CONTROL_WIDTH: u16 = 3;

const HEADER_ROW: u16 = 0;
const WEEKDAY_ROW: u16 = 1;
const RULE_ROW: u16 = 2;
const FIRST_WEEK_ROW: u16 = 3;

/// One line per week
const FOOTER_ROW: u16 = FIRST_WEEK_ROW + 6;

const TOTAL_HEIGHT: u16 = FOOTER_ROW + 1;

/// Columns between the left edge of a day's column and the start of its text
const DAY_TEXT_OFFSET: u16 = 1;

/// Width of the text drawn for a day or weekday: a two-digit day plus room
/// for brackets around the cursor
const DAY_TEXT_WIDTH: u16 = 4;

const PREV_SYMBOL: &str = "‹";
const NEXT_SYMBOL: &str = "›";
const ACS_HLINE: char = '─';

/// Something that can be pointed at in a rendered picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    Previous,
    Next,
    Day { week: usize, column: usize },
}

/// Screen geometry of a rendered picker
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PickerLayout {
    area: Rect,
}

impl PickerLayout {
    /// Center the picker within `outer`, shrinking it if `outer` is too small
    pub(crate) fn new(outer: Rect) -> PickerLayout {
        let width = MAIN_WIDTH.min(outer.width);
        let height = TOTAL_HEIGHT.min(outer.height);
        PickerLayout {
            area: Rect {
                x: outer.x + (outer.width - width) / 2,
                y: outer.y + (outer.height - height) / 2,
                width,
                height,
            },
        }
    }

    pub(crate) fn area(&self) -> Rect {
        self.area
    }

    /// What is drawn at the given screen cell, if anything interactive
    pub(crate) fn target(&self, column: u16, row: u16) -> Option<Target> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - self.area.x;
        let y = row - self.area.y;
        match y {
            HEADER_ROW if x < CONTROL_WIDTH => Some(Target::Previous),
            HEADER_ROW if x >= MAIN_WIDTH - CONTROL_WIDTH => Some(Target::Next),
            FIRST_WEEK_ROW..FOOTER_ROW => Some(Target::Day {
                week: usize::from(y - FIRST_WEEK_ROW),
                column: usize::from(x / DAY_WIDTH),
            }),
            _ => None,
        }
    }
}

/// Draws a `Picker`: a header with the month controls and title, the
/// weekday abbreviations, six weeks of days, and the selected date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DatePicker<'a, O> {
    locale: &'a Localization,
    _data: PhantomData<O>,
}

impl<'a, O> DatePicker<'a, O> {
    pub(crate) fn new(locale: &'a Localization) -> DatePicker<'a, O> {
        DatePicker {
            locale,
            _data: PhantomData,
        }
    }
}

impl<O: PickerObserver> StatefulWidget for DatePicker<'_, O> {
    type State = Picker<O>;

    fn render(self, area: Rect, buf: &mut Buffer, picker: &mut Picker<O>) {
        let layout = PickerLayout::new(area);
        picker.layout = layout;
        let state = picker.state();
        let mut canvas = BufferCanvas::new(layout.area(), buf);
        canvas.draw_header(&self.locale.month_title(state.cursor()));
        canvas.draw_weekdays(weekday_abbreviations(self.locale, state.week_start()));
        canvas.hline(RULE_ROW, 0, ACS_HLINE, MAIN_WIDTH);
        for (week_no, week) in zip(0u16.., state.matrix().rows()) {
            for (column, &date) in zip(0u16.., week) {
                canvas.draw_day(week_no, column, date.day(), state.day_flags(date, picker.today));
            }
        }
        canvas.draw_footer(&self.locale.long_date(state.selected()));
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_header(&mut self, title: &str) {
        self.mvprint(HEADER_ROW, 1, PREV_SYMBOL, theme::CONTROL_STYLE);
        self.mvprint(
            HEADER_ROW,
            MAIN_WIDTH - CONTROL_WIDTH + 1,
            NEXT_SYMBOL,
            theme::CONTROL_STYLE,
        );
        // The title must not run over the controls
        self.center(
            HEADER_ROW,
            CONTROL_WIDTH,
            MAIN_WIDTH - 2 * CONTROL_WIDTH,
            title,
            theme::TITLE_STYLE,
        );
    }

    fn draw_weekdays(&mut self, abbreviations: [&str; 7]) {
        for (column, abbr) in zip(0u16.., abbreviations) {
            self.mvprint_clipped(
                WEEKDAY_ROW,
                DAY_WIDTH * column + DAY_TEXT_OFFSET,
                format!("{abbr:>3}"),
                DAY_TEXT_WIDTH,
                theme::WEEKDAY_STYLE,
            );
        }
    }

    fn draw_day(&mut self, week_no: u16, column: u16, day: u8, flags: DayFlags) {
        let s = if flags.cursor {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        self.mvprint(
            FIRST_WEEK_ROW + week_no,
            DAY_WIDTH * column + DAY_TEXT_OFFSET,
            s,
            theme::day_style(flags),
        );
    }

    fn draw_footer(&mut self, text: &str) {
        self.center(FOOTER_ROW, 0, MAIN_WIDTH, text, theme::FOOTER_STYLE);
    }

    /// Print `s` centered within the `room` columns starting at column
    /// `left`, cutting off whatever does not fit
    fn center(&mut self, y: u16, left: u16, room: u16, s: &str, style: Style) {
        let width = u16::try_from(Text::raw(s).width())
            .unwrap_or(u16::MAX)
            .min(room);
        self.mvprint_clipped(y, left + (room - width) / 2, s, room, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        self.mvprint_clipped(y, x, s, u16::MAX, style);
    }

    fn mvprint_clipped<S: AsRef<str>>(
        &mut self,
        y: u16,
        x: u16,
        s: S,
        max_width: u16,
        style: Style,
    ) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width())
                .unwrap_or(u16::MAX)
                .min(max_width);
            // Paragraph clips at the edge of its Rect, and that Rect must lie
            // inside the buffer or rendering panics.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(
            y,
            x,
            String::from(ch).repeat(length.into()),
            theme::RULE_STYLE,
        );
    }
}
