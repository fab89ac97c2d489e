//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the three
//! panes, and translates keyboard/paste events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! intake rules and calendar math in `core`/`intake` never see a terminal.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Uploading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Drop events
//!
//! Terminals deliver a dragged file as a bracketed paste of its path, so
//! `TuiEvent::Paste` is translated into `DragSignal::Drop` with candidates
//! built from the pasted paths. The file-picker path goes through the
//! injected `FileRequester` instead (`o`).

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::profile::PersonalizationSettings;
use crate::core::state::App;
use crate::intake::requester::{FileRequester, InboxRequester, candidate_from_path};
use crate::intake::transport::{SimulatedTransport, UploadTransport};
use crate::intake::{DragSignal, FileCandidate, PendingBatch};
use crate::tui::component::EventHandler;
use crate::tui::components::calendar::{CalendarEvent, CalendarState};
use crate::tui::components::{FileIntakeState, IntakeUiEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane keyboard events go to. The profile pane is display-only and
/// never takes focus; mouse scroll reaches it regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Calendar,
    Intake,
}

impl Pane {
    fn toggled(self) -> Self {
        match self {
            Pane::Calendar => Pane::Intake,
            Pane::Intake => Pane::Calendar,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub calendar: CalendarState,
    pub file_intake: FileIntakeState,
    pub profile_scroll: ScrollViewState,
    pub focus: Pane,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            calendar: CalendarState::new(
                app.selected_date,
                None,
                None,
                Default::default(),
            ),
            file_intake: FileIntakeState::new(),
            profile_scroll: ScrollViewState::default(),
            focus: Pane::Calendar,
        }
    }

    pub fn from_config(app: &App, config: &ResolvedConfig) -> Self {
        Self {
            calendar: CalendarState::new(
                app.selected_date,
                config.min_date,
                config.max_date,
                config.disabled_dates.iter().copied().collect(),
            ),
            ..Self::new(app)
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse capture, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(
    config: ResolvedConfig,
    profile: Option<PersonalizationSettings>,
) -> std::io::Result<()> {
    let transport: Arc<dyn UploadTransport> = Arc::new(SimulatedTransport::new(
        Duration::from_millis(config.upload_delay_ms),
    ));
    let requester = InboxRequester::new(config.inbox_dir.clone());

    let mut app = App::from_config(profile, &config);
    let mut tui = TuiState::from_config(&app, &config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background upload tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.intake.is_uploading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 8.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when the spinner runs, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::Quit | TuiEvent::ForceQuit) {
                if dispatch(&mut app, Action::Quit, &transport, &tx) {
                    should_quit = true;
                }
                continue;
            }

            if matches!(event, TuiEvent::SwitchPane) {
                tui.focus = tui.focus.toggled();
                continue;
            }

            // Mouse scroll always goes to the profile panel
            if matches!(event, TuiEvent::ScrollUp) {
                tui.profile_scroll.scroll_up();
                continue;
            }
            if matches!(event, TuiEvent::ScrollDown) {
                tui.profile_scroll.scroll_down();
                continue;
            }

            // A paste is our drop event: build candidates from the paths
            if let TuiEvent::Paste(data) = &event {
                let (files, skipped) = candidates_from_paste(data);
                if files.is_empty() {
                    app.status_message = "Nothing readable in that drop.".to_string();
                } else {
                    if skipped > 0 {
                        debug!("Drop skipped {skipped} unreadable path(s)");
                    }
                    if dispatch(&mut app, Action::Drag(DragSignal::Drop(files)), &transport, &tx)
                    {
                        should_quit = true;
                    }
                }
                continue;
            }

            // Everything else routes to the focused pane
            match tui.focus {
                Pane::Calendar => {
                    if let Some(CalendarEvent::Selected(date)) =
                        tui.calendar.handle_event(&event)
                        && dispatch(&mut app, Action::SelectDate(date), &transport, &tx)
                    {
                        should_quit = true;
                    }
                }
                Pane::Intake => {
                    let ui_event = tui.file_intake.handle_key(
                        &event,
                        app.intake.accepted.len(),
                        app.intake.is_uploading(),
                    );
                    match ui_event {
                        Some(IntakeUiEvent::Remove(index)) => {
                            if dispatch(&mut app, Action::RemoveFile(index), &transport, &tx) {
                                should_quit = true;
                            }
                            tui.file_intake.sync_selection(app.intake.accepted.len());
                        }
                        Some(IntakeUiEvent::RequestFiles) => match requester.request() {
                            Ok(files) if files.is_empty() => {
                                app.status_message = "Inbox is empty.".to_string();
                            }
                            Ok(files) => {
                                if dispatch(&mut app, Action::IntakeBatch(files), &transport, &tx)
                                {
                                    should_quit = true;
                                }
                            }
                            Err(e) => {
                                warn!("File request failed: {e}");
                                app.status_message = format!("{e}");
                            }
                        },
                        None => {}
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (upload completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &transport, &tx) {
                break;
            }
            tui.file_intake.sync_selection(app.intake.accepted.len());
        }
    }

    ratatui::restore();
    Ok(())
}

/// Run an action through `update` and execute its effect.
/// Returns true if the app should quit.
fn dispatch(
    app: &mut App,
    action: Action,
    transport: &Arc<dyn UploadTransport>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::SpawnUpload(batch) => {
            spawn_upload(batch, transport.clone(), tx.clone());
            false
        }
        Effect::DateSelected(date) => {
            // The output event a host application would subscribe to.
            info!("Date selected: {date}");
            false
        }
        Effect::FilesChanged(list) => {
            info!(
                "Accepted files now: [{}]",
                list.iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            false
        }
        Effect::None => false,
    }
}

fn spawn_upload(
    batch: PendingBatch,
    transport: Arc<dyn UploadTransport>,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning upload via '{}': {} file(s) (batch {})",
        transport.name(),
        batch.files.len(),
        batch.id
    );
    tokio::spawn(async move {
        if let Err(e) = transport.transfer(&batch).await {
            warn!("Upload of batch {} failed: {}", batch.id, e);
        }
        if tx
            .send(Action::UploadFinished { batch_id: batch.id })
            .is_err()
        {
            warn!(
                "Failed to send completion for batch {}: receiver dropped",
                batch.id
            );
        }
    });
}

/// Parse pasted text into file candidates: one path per line, quotes
/// stripped. Unreadable or non-file paths are counted but skipped.
fn candidates_from_paste(data: &str) -> (Vec<FileCandidate>, usize) {
    let mut files = Vec::new();
    let mut skipped = 0;
    for raw in data.lines() {
        let trimmed = raw.trim().trim_matches('\'').trim_matches('"');
        if trimmed.is_empty() {
            continue;
        }
        match candidate_from_path(Path::new(trimmed)) {
            Ok(Some(candidate)) => files.push(candidate),
            Ok(None) => skipped += 1,
            Err(e) => {
                warn!("Dropped path {trimmed} unreadable: {e}");
                skipped += 1;
            }
        }
    }
    (files, skipped)
}
