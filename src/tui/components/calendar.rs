//! # Calendar Picker Component
//!
//! Month-grid date picker over the pure math in `core::calendar`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CalendarState` lives in `TuiState`
//! - `CalendarPicker` is created each frame with borrowed state
//!
//! The widget never stores the selected date. Selection is *reported* via
//! `CalendarEvent::Selected` and fed back in as a prop by the app on the
//! next frame, so the caller stays the single owner of that piece of state.
//! What the widget does own is presentation state: the displayed month (the
//! cursor) and which day cell has keyboard focus.

use chrono::{Datelike, Local, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use std::collections::BTreeSet;

use crate::core::calendar::{MonthCursor, days_in_month, month_grid};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

const WEEKDAY_HEADER: &str = " Su Mo Tu We Th Fr Sa";

/// Events emitted by the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    Selected(NaiveDate),
}

/// Persistent state for the calendar pane.
pub struct CalendarState {
    pub cursor: MonthCursor,
    /// Keyboard-focused day within the displayed month (1-based).
    pub focus_day: u32,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: BTreeSet<NaiveDate>,
    /// Injected "current date" so tests don't depend on the wall clock.
    pub today: NaiveDate,
}

impl CalendarState {
    /// Cursor starts at the selected date if the caller supplied one,
    /// otherwise at today.
    pub fn new(
        selected: Option<NaiveDate>,
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
        disabled_dates: BTreeSet<NaiveDate>,
    ) -> Self {
        Self::with_today(
            selected,
            min_date,
            max_date,
            disabled_dates,
            Local::now().date_naive(),
        )
    }

    pub fn with_today(
        selected: Option<NaiveDate>,
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
        disabled_dates: BTreeSet<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let anchor = selected.unwrap_or(today);
        Self {
            cursor: MonthCursor::from_date(anchor),
            focus_day: anchor.day(),
            min_date,
            max_date,
            disabled_dates,
            today,
        }
    }

    /// Whether a date may be selected. Compares by calendar date only —
    /// `NaiveDate` carries no time-of-day to leak into the comparison.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        if self.min_date.is_some_and(|min| date < min) {
            return true;
        }
        if self.max_date.is_some_and(|max| date > max) {
            return true;
        }
        self.disabled_dates.contains(&date)
    }

    /// The date currently under keyboard focus, if the focused day exists
    /// in the displayed month.
    pub fn focused_date(&self) -> Option<NaiveDate> {
        self.cursor.date(self.focus_day)
    }

    fn move_focus(&mut self, delta: i32) {
        let days = days_in_month(self.cursor.year, self.cursor.month) as i32;
        if days == 0 {
            return;
        }
        // Clamp to real days; focus never lands on a leading blank.
        self.focus_day = (self.focus_day as i32 + delta).clamp(1, days) as u32;
    }

    fn navigate_month(&mut self, delta: i32) {
        self.cursor = self.cursor.advanced(delta);
        // Preserve the focused day number, clamped to the new month's length.
        let days = days_in_month(self.cursor.year, self.cursor.month);
        self.focus_day = self.focus_day.min(days.max(1));
    }
}

impl EventHandler for CalendarState {
    type Event = CalendarEvent;

    /// Handle a key event, returning a CalendarEvent when a date is chosen.
    ///
    /// Enter on a disabled day short-circuits: no event, no state change.
    /// Month navigation is unbounded — only day selection honors the
    /// min/max/disabled restrictions.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<CalendarEvent> {
        match event {
            TuiEvent::CursorLeft => {
                self.move_focus(-1);
                None
            }
            TuiEvent::CursorRight => {
                self.move_focus(1);
                None
            }
            TuiEvent::CursorUp => {
                self.move_focus(-7);
                None
            }
            TuiEvent::CursorDown => {
                self.move_focus(7);
                None
            }
            TuiEvent::PrevMonth => {
                self.navigate_month(-1);
                None
            }
            TuiEvent::NextMonth => {
                self.navigate_month(1);
                None
            }
            TuiEvent::Submit => {
                let date = self.focused_date()?;
                if self.is_disabled(date) {
                    None
                } else {
                    Some(CalendarEvent::Selected(date))
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the calendar pane. The selected date is a
/// prop from App state.
pub struct CalendarPicker<'a> {
    state: &'a mut CalendarState,
    selected: Option<NaiveDate>,
    focused: bool,
}

impl<'a> CalendarPicker<'a> {
    pub fn new(
        state: &'a mut CalendarState,
        selected: Option<NaiveDate>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            selected,
            focused,
        }
    }

    fn day_style(&self, date: NaiveDate) -> Style {
        let disabled = self.state.is_disabled(date);
        let is_focus = self.focused && Some(date) == self.state.focused_date();

        if is_focus {
            let fg = if disabled { Color::Red } else { Color::White };
            return Style::default()
                .fg(fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        if Some(date) == self.selected {
            return Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
        }
        if disabled {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);
        }
        if date == self.state.today {
            return Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED);
        }
        Style::default().fg(Color::Gray)
    }

    fn grid_lines(&self) -> Vec<Line<'static>> {
        let cursor = self.state.cursor;
        let month_title = cursor
            .date(1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(Span::styled(
                month_title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                WEEKDAY_HEADER,
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let cells = month_grid(cursor.year, cursor.month);
        for week in cells.chunks(7) {
            let mut spans = Vec::with_capacity(7);
            for cell in week {
                match cell {
                    // Leading blanks keep weekday columns aligned and are
                    // inert — no style, no focus.
                    None => spans.push(Span::raw("   ")),
                    Some(day) => {
                        let text = format!(" {day:>2}");
                        match cursor.date(*day) {
                            Some(date) => {
                                spans.push(Span::styled(text, self.day_style(date)))
                            }
                            None => spans.push(Span::raw(text)),
                        }
                    }
                }
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Travel date ")
            .title_bottom(Line::from(" [ ] month  Enter select ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.grid_lines())
            .alignment(Alignment::Left)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
