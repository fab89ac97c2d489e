//! # TitleBar Component
//!
//! Top status bar showing the travel date picked so far and upload activity.
//!
//! ## Stateless Component
//!
//! TitleBar is purely presentational — it receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     selected_date: app.selected_date,
//!     uploading: app.intake.is_uploading(),
//! };
//! title_bar.render(frame, title_area);
//! ```
//!
//! The props come from core App state; the bar doesn't care where they come
//! from — it just renders what it's given.
//!
//! ## Conditional Formatting
//!
//! 1. **Uploading**: `"Tripdeck | travel date: Sep 12, 2026 | uploading..."`
//! 2. **Date picked**: `"Tripdeck | travel date: Sep 12, 2026"`
//! 3. **Default**: `"Tripdeck | no travel date picked"`

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

/// Top status bar component.
pub struct TitleBar {
    pub selected_date: Option<NaiveDate>,
    pub uploading: bool,
}

impl TitleBar {
    fn title_text(&self) -> String {
        let date_part = match self.selected_date {
            Some(date) => format!("travel date: {}", date.format("%b %d, %Y")),
            None => "no travel date picked".to_string(),
        };
        if self.uploading {
            format!("Tripdeck | {} | uploading...", date_part)
        } else {
            format!("Tripdeck | {}", date_part)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.title_text(), style), area);
    }
}
