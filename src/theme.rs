use crate::calendar::DayFlags;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const CONTROL_STYLE: Style = BASE_STYLE
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const RULE_STYLE: Style = BASE_STYLE;

pub(crate) const DAY_STYLE: Style = BASE_STYLE;

/// Days from the months before and after the displayed one
pub(crate) const ADJACENT_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::UNDERLINED);

pub(crate) const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const FOOTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::ITALIC);

pub(crate) const HELP_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);

/// Combine the styles for every flag that applies to a day.  Later flags
/// win where they conflict: today, then selected, then cursor.
pub(crate) fn day_style(flags: DayFlags) -> Style {
    let mut style = if flags.in_month {
        DAY_STYLE
    } else {
        ADJACENT_DAY_STYLE
    };
    if flags.today {
        style = style.patch(TODAY_STYLE);
    }
    if flags.selected {
        style = style.patch(SELECTED_STYLE);
    }
    if flags.cursor {
        style = style.patch(CURSOR_STYLE);
    }
    style
}
