use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{CalendarPicker, FileIntake, ProfilePanel, TitleBar};
use crate::tui::{Pane, TuiState};

/// Lay out and draw the whole screen: title bar on top, the three panes in
/// the middle, the status line (notices) at the bottom.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    let panes = Layout::horizontal([Percentage(32), Percentage(34), Percentage(34)]);
    let [profile_area, calendar_area, intake_area] = panes.areas(main_area);

    let mut title_bar = TitleBar {
        selected_date: app.selected_date,
        uploading: app.intake.is_uploading(),
    };
    title_bar.render(frame, title_area);

    ProfilePanel::new(app.profile.as_ref(), &mut tui.profile_scroll)
        .render(frame, profile_area);

    CalendarPicker::new(
        &mut tui.calendar,
        app.selected_date,
        tui.focus == Pane::Calendar,
    )
    .render(frame, calendar_area);

    FileIntake::new(
        &mut tui.file_intake,
        &app.intake,
        tui.focus == Pane::Intake,
        spinner_frame,
    )
    .render(frame, intake_area);

    let status = Span::styled(
        app.status_message.as_str(),
        Style::default().fg(Color::Yellow),
    );
    frame.render_widget(status, status_area);
}
