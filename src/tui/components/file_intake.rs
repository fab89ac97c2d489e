//! # File Intake Component
//!
//! The booking-document pane: shows the accepted list, the drop-zone hint,
//! and upload progress. Dragging paths onto the terminal (a bracketed
//! paste) or pressing `o` to browse the inbox both produce intake batches;
//! validation itself lives in `crate::intake`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FileIntakeState` lives in `TuiState`
//! - `FileIntake` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::intake::IntakeSession;
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Events emitted by the intake pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeUiEvent {
    /// Remove the accepted file at this position (after `d d` confirmation).
    Remove(usize),
    /// Open the file requester (`o`).
    RequestFiles,
}

/// Persistent state for the intake pane.
pub struct FileIntakeState {
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl FileIntakeState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            confirm_delete: false,
            list_state: ListState::default(),
        }
    }

    /// Clamp the selection after the accepted list changed underneath us.
    pub fn sync_selection(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(list_len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle a key event against the current accepted-list length.
    ///
    /// While an upload is in flight the pane is inert: pointer-equivalent
    /// interactions are suppressed here, and the data layer refuses batches
    /// anyway.
    pub fn handle_key(&mut self, event: &TuiEvent, list_len: usize, uploading: bool) -> Option<IntakeUiEvent> {
        if uploading {
            return None;
        }

        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::CursorUp => {
                if list_len > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if list_len > 0 {
                    self.selected = (self.selected + 1).min(list_len - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::InputChar('o') => Some(IntakeUiEvent::RequestFiles),
            TuiEvent::InputChar('d') => {
                if list_len == 0 {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(IntakeUiEvent::Remove(self.selected))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for FileIntakeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for the intake pane. Key handling stays on
/// `FileIntakeState` because routing needs `&mut App` at the same time,
/// so the wrapper only ever borrows the session for one draw.
pub struct FileIntake<'a> {
    state: &'a mut FileIntakeState,
    session: &'a IntakeSession,
    focused: bool,
    spinner_frame: usize,
}

impl<'a> FileIntake<'a> {
    pub fn new(
        state: &'a mut FileIntakeState,
        session: &'a IntakeSession,
        focused: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            session,
            focused,
            spinner_frame,
        }
    }

    fn border_style(&self) -> Style {
        if self.session.drag_active {
            Style::default().fg(Color::Yellow)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " Documents ({}/{}) ",
            self.session.accepted.len(),
            self.session.config.max_files
        );

        let help_text = if self.session.is_uploading() {
            " uploading... ".to_string()
        } else if self.state.confirm_delete {
            " Press d again to confirm remove ".to_string()
        } else {
            " o Browse inbox  d Remove  paste paths to drop ".to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.session.is_uploading() {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let files = self
                .session
                .in_flight
                .as_ref()
                .map(|b| b.files.len())
                .unwrap_or(0);
            let busy = Paragraph::new(format!("{spinner} Uploading {files} file(s)..."))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(busy, area);
            return;
        }

        if self.session.accepted.is_empty() {
            let hint = if self.session.drag_active {
                "Release to add documents"
            } else {
                "No documents attached.\nPaste file paths here, or press o\nto browse the inbox."
            };
            let empty = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Build list items: "  name          1.2 MB"
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .session
            .accepted
            .iter()
            .enumerate()
            .map(|(i, file)| {
                let size = human_size(file.size_bytes);
                let name_width = inner_width.saturating_sub(size.len() + 2);
                let name = truncate_str(&file.name, name_width);
                let padded_name = format!("{:<width$}", name, width = name_width);

                let style = if self.focused && i == self.state.selected {
                    if self.state.confirm_delete {
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    }
                } else {
                    Style::default().fg(Color::Gray)
                };

                let line = Line::from(vec![
                    Span::styled(padded_name, style),
                    Span::styled("  ", style),
                    Span::styled(size, style),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Format a byte count as "512 B", "3.4 KB", "1.2 MB".
fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Truncate a string to fit within `max_width` display columns, adding "..."
/// if needed. Width-aware so CJK filenames don't overflow the row.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
