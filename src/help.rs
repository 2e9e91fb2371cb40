use crate::locale::Localization;
use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key column of the command list and the fixed descriptions that go with
/// it.  `None` marks the rows described by the locale's month labels.
static COMMANDS: &[(&str, Option<&str>)] = &[
    ("h, LEFT", Some("Previous day")),
    ("l, RIGHT", Some("Next day")),
    ("k, UP", Some("Previous week")),
    ("j, DOWN", Some("Next week")),
    ("p, PAGE UP", None),
    ("n, PAGE DOWN", None),
    ("TAB, BACKTAB", Some("Cycle through the month")),
    ("ENTER, SPACE", Some("Select the highlighted day")),
    ("0, HOME", Some("Jump to today")),
    ("?", Some("Show this help")),
    ("q, ESC", Some("Quit")),
];

const KEY_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a> {
    locale: &'a Localization,
    style: Style,
}

impl<'a> Help<'a> {
    pub(crate) fn new(locale: &'a Localization, style: Style) -> Help<'a> {
        Help { locale, style }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut month_labels = [self.locale.prev_label(), self.locale.next_label()].into_iter();
        let mut lines = COMMANDS
            .iter()
            .map(|&(keys, desc)| {
                let desc = desc.or_else(|| month_labels.next()).unwrap_or_default();
                Line::raw(format!("{keys:<KEY_WIDTH$}{desc}"))
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        lines
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(self.lines());
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        para.render(help_area, buf);
    }
}
