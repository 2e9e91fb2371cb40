use crate::calendar::{DatePicker, Picker, PickerEvent, PickerObserver, TabDirection};
use crate::help::Help;
use crate::locale::Localization;
use crate::theme::{BASE_STYLE, HELP_STYLE};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<'a> {
    picker: Picker<SelectionWatch>,
    locale: &'a Localization,
    state: AppState,
    quit_on_select: bool,
}

impl<'a> App<'a> {
    pub(crate) fn new(picker: Picker<()>, locale: &'a Localization) -> App<'a> {
        App {
            picker: picker.with_observer(SelectionWatch::default()),
            locale,
            state: AppState::Picking,
            quit_on_select: false,
        }
    }

    /// Quit as soon as the user selects a date
    pub(crate) fn quit_on_select(mut self, flag: bool) -> App<'a> {
        self.quit_on_select = flag;
        self
    }

    /// Run the event loop.  Returns the selected date on a normal quit or
    /// `None` if the user aborted.
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.outcome())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        let ok = if let Event::Mouse(mouse) = event {
            self.handle_mouse(mouse)
        } else if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                log::info!("Aborted by user");
                self.state = AppState::Aborted;
                true
            } else {
                normal_modifiers.contains(modifiers) && self.handle_key(code)
            }
        } else {
            // Resizes, focus changes, and pastes only need a redraw
            true
        };
        if !ok {
            self.beep()?;
        }
        Ok(())
    }

    // `false` means the key is unbound in the current state
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let ok = match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.navigate(PickerEvent::MoveLeft),
                KeyCode::Char('l') | KeyCode::Right => self.navigate(PickerEvent::MoveRight),
                KeyCode::Char('k') | KeyCode::Up => self.navigate(PickerEvent::MoveUp),
                KeyCode::Char('j') | KeyCode::Down => self.navigate(PickerEvent::MoveDown),
                KeyCode::Char('p') | KeyCode::PageUp => {
                    self.navigate(PickerEvent::PreviousMonth)
                }
                KeyCode::Char('n') | KeyCode::PageDown => self.navigate(PickerEvent::NextMonth),
                KeyCode::Enter | KeyCode::Char(' ') => self.navigate(PickerEvent::Confirm),
                KeyCode::Tab => {
                    self.picker.tab(TabDirection::Forwards);
                    true
                }
                KeyCode::BackTab => {
                    self.picker.tab(TabDirection::Backwards);
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.picker.jump_to_today();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting | AppState::Aborted => false,
        };
        self.check_selection();
        ok
    }

    // Returns `false` if scrolling or a month control ran into the end of
    // time
    fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let MouseEvent {
            kind, column, row, ..
        } = event;
        let ok = match self.state {
            AppState::Picking => match kind {
                MouseEventKind::Moved => {
                    self.picker.hover_at(column, row);
                    true
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    match self.picker.click_at(column, row) {
                        Ok(()) => true,
                        Err(e) => {
                            log::debug!("Click at ({column}, {row}) rejected: {e}");
                            false
                        }
                    }
                }
                MouseEventKind::ScrollUp => self.navigate(PickerEvent::PreviousMonth),
                MouseEventKind::ScrollDown => self.navigate(PickerEvent::NextMonth),
                _ => true,
            },
            AppState::Helping => {
                if kind == MouseEventKind::Down(MouseButton::Left) {
                    self.state = AppState::Picking;
                }
                true
            }
            AppState::Quitting | AppState::Aborted => true,
        };
        self.check_selection();
        ok
    }

    fn navigate(&mut self, event: PickerEvent) -> bool {
        match self.picker.dispatch(event) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{event:?} rejected: {e}");
                false
            }
        }
    }

    fn check_selection(&mut self) {
        if self.quit_on_select
            && self.state == AppState::Picking
            && self.picker.observer().selections > 0
        {
            self.state = AppState::Quitting;
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Quitting | AppState::Aborted)
    }

    fn outcome(&self) -> Option<Date> {
        (self.state == AppState::Quitting).then(|| self.picker.selected())
    }
}

impl Widget for &mut App<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        DatePicker::new(self.locale).render(area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help::new(self.locale, HELP_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
    Aborted,
}

/// Counts how many times the user has selected a date
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct SelectionWatch {
    selections: usize,
}

impl PickerObserver for SelectionWatch {
    fn date_selected(&mut self, _date: Date) {
        self.selections += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{
        ADJACENT_DAY_STYLE, CONTROL_STYLE, CURSOR_STYLE, FOOTER_STYLE, SELECTED_STYLE, TITLE_STYLE,
        TODAY_STYLE, WEEKDAY_STYLE,
    };
    use time::macros::date;
    use time::Weekday::Monday;

    fn app(locale: &Localization) -> App<'_> {
        let picker =
            Picker::new(date!(2024 - 01 - 22), Monday, ()).start_date(date!(2024 - 01 - 15));
        App::new(picker, locale)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(app: &mut App<'_>, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn test_render() {
        let locale = Localization::english();
        let mut app = app(&locale);
        let area = Rect::new(0, 0, 41, 12);
        let buffer = render(&mut app, area);
        let mut expected = Buffer::with_lines([
            "                                         ",
            "    ‹         January 2024          ›    ",
            "    Mon  Tue  Wed  Thu  Fri  Sat  Sun    ",
            "   ───────────────────────────────────   ",
            "      1    2    3    4    5    6    7    ",
            "      8    9   10   11   12   13   14    ",
            "    [15]  16   17   18   19   20   21    ",
            "     22   23   24   25   26   27   28    ",
            "     29   30   31    1    2    3    4    ",
            "      5    6    7    8    9   10   11    ",
            "         Monday, 15 January 2024         ",
            "                                         ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(4, 1, 1, 1), CONTROL_STYLE);
        expected.set_style(Rect::new(36, 1, 1, 1), CONTROL_STYLE);
        expected.set_style(Rect::new(14, 1, 12, 1), TITLE_STYLE);
        for column in 0..7 {
            expected.set_style(Rect::new(4 + 5 * column, 2, 3, 1), WEEKDAY_STYLE);
        }
        expected.set_style(Rect::new(4, 6, 4, 1), CURSOR_STYLE);
        expected.set_style(Rect::new(4, 6, 4, 1), SELECTED_STYLE);
        expected.set_style(Rect::new(4, 7, 4, 1), TODAY_STYLE);
        // February 1 through 11
        for column in 3..7 {
            expected.set_style(Rect::new(4 + 5 * column, 8, 4, 1), ADJACENT_DAY_STYLE);
        }
        for column in 0..7 {
            expected.set_style(Rect::new(4 + 5 * column, 9, 4, 1), ADJACENT_DAY_STYLE);
        }
        expected.set_style(Rect::new(9, 10, 23, 1), FOOTER_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_keys_move_and_select() {
        let locale = Localization::english();
        let mut app = app(&locale);
        assert!(app.handle_key(KeyCode::Char('l')));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 23));
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 02 - 23));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert!(app.handle_key(KeyCode::Char('h')));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 02 - 15));
        assert_eq!(app.picker.selected(), date!(2024 - 01 - 15));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.picker.selected(), date!(2024 - 02 - 15));
        assert_eq!(app.state, AppState::Picking);
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 22));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
        assert_eq!(app.outcome(), Some(date!(2024 - 02 - 15)));
    }

    #[test]
    fn test_tab_wraps_within_month() {
        let locale = Localization::english();
        let mut app = App::new(Picker::new(date!(2024 - 02 - 29), Monday, ()), &locale);
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 02 - 01));
        assert!(app.handle_key(KeyCode::BackTab));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 02 - 29));
    }

    #[test]
    fn test_invalid_key() {
        let locale = Localization::english();
        let mut app = app(&locale);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(!app.handle_key(KeyCode::F(1)));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 15));
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let locale = Localization::english();
        let mut app = app(&locale);
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 15));
    }

    #[test]
    fn test_help_dismissed_by_click() {
        let locale = Localization::english();
        let mut app = app(&locale);
        render(&mut app, Rect::new(0, 0, 35, 10));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, 12, 3)));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 3)));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 15));
        assert_eq!(app.picker.selected(), date!(2024 - 01 - 15));
    }

    #[test]
    fn test_mouse() {
        let locale = Localization::english();
        let mut app = app(&locale);
        render(&mut app, Rect::new(0, 0, 35, 10));
        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, 12, 3)));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 03));
        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollDown, 12, 3)));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 02 - 03));
        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0)));
        assert_eq!(app.picker.state().cursor(), date!(2024 - 01 - 03));
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 34, 6)));
        assert_eq!(app.picker.selected(), date!(2024 - 01 - 28));
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 2, 3)));
        assert_eq!(app.picker.selected(), date!(2024 - 01 - 28));
        assert_eq!(app.state, AppState::Picking);
    }

    #[test]
    fn test_once_quits_on_selection() {
        let locale = Localization::english();
        let mut app = app(&locale).quit_on_select(true);
        render(&mut app, Rect::new(0, 0, 35, 10));
        assert!(app.handle_key(KeyCode::Right));
        assert!(!app.quitting());
        // A click on the next month's days selects nothing
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 8)));
        assert!(!app.quitting());
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.quitting());
        assert_eq!(app.outcome(), Some(date!(2024 - 01 - 16)));
    }

    #[test]
    fn test_abort() {
        let locale = Localization::english();
        let mut app = app(&locale);
        app.state = AppState::Aborted;
        assert!(app.quitting());
        assert_eq!(app.outcome(), None);
        assert!(!app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_scroll_past_end_of_time() {
        let locale = Localization::english();
        let mut app = App::new(
            Picker::new(date!(2024 - 01 - 22), Monday, ()).start_date(date!(9998 - 12 - 31)),
            &locale,
        );
        assert!(!app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0)));
        assert!(!app.handle_key(KeyCode::Char('n')));
        assert!(app.handle_key(KeyCode::Char('p')));
        assert_eq!(app.picker.state().cursor(), date!(9998 - 11 - 30));
    }

    #[test]
    fn test_click_past_end_of_time() {
        let locale = Localization::english();
        let mut app = App::new(
            Picker::new(date!(2024 - 01 - 22), Monday, ()).start_date(date!(9998 - 12 - 31)),
            &locale,
        );
        render(&mut app, Rect::new(0, 0, 35, 10));
        assert!(!app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 34, 0)));
        assert_eq!(app.picker.state().cursor(), date!(9998 - 12 - 31));
        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 0)));
        assert_eq!(app.picker.state().cursor(), date!(9998 - 11 - 30));
    }
}
