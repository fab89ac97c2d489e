//! # Actions
//!
//! Everything that can happen in Tripdeck becomes an `Action`.
//! User picks a date? That's `Action::SelectDate(date)`.
//! Upload timer fires? That's `Action::UploadFinished { batch_id }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing what I/O the caller should do
//! next. No side effects here — spawning the upload task and logging the
//! output events happen in the event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The output events the widgets would deliver to a host application —
//! "a date was selected", "the attached-file list changed" — are `Effect`
//! variants, and the file list one always carries the complete current list,
//! never a delta.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::state::App;
use crate::intake::{BatchOutcome, DragSignal, FileCandidate, PendingBatch};

#[derive(Debug)]
pub enum Action {
    Quit,
    /// A date was chosen in the calendar (already validated against
    /// min/max/disabled by the widget).
    SelectDate(NaiveDate),
    /// A drag signal from the host surface. `Drop` feeds straight into
    /// batch intake.
    Drag(DragSignal),
    /// A batch of candidates from the file requester.
    IntakeBatch(Vec<FileCandidate>),
    /// The transport finished the in-flight batch.
    UploadFinished { batch_id: Uuid },
    /// Remove the accepted file at this position.
    RemoveFile(usize),
}

/// What the event loop should do after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Hand this batch to the transport; send `UploadFinished` when done.
    SpawnUpload(PendingBatch),
    /// Output event: the date chosen, for whoever embeds the picker.
    DateSelected(NaiveDate),
    /// Output event: the full current accepted list after a change.
    FilesChanged(Vec<FileCandidate>),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::SelectDate(date) => {
            app.selected_date = Some(date);
            app.status_message = format!("Travel date: {}", date.format("%b %d, %Y"));
            Effect::DateSelected(date)
        }

        Action::Drag(signal) => match app.intake.apply_drag(signal) {
            Some(files) => begin_batch(app, files),
            None => Effect::None,
        },

        Action::IntakeBatch(files) => begin_batch(app, files),

        Action::UploadFinished { batch_id } => match app.intake.finish_batch(batch_id) {
            Some(list) => {
                app.status_message = format!("{} file(s) attached", list.len());
                Effect::FilesChanged(list)
            }
            None => Effect::None,
        },

        Action::RemoveFile(index) => match app.intake.remove(index) {
            Some(list) => {
                app.status_message = format!("Removed 1 file, {} attached", list.len());
                Effect::FilesChanged(list)
            }
            None => Effect::None,
        },
    }
}

fn begin_batch(app: &mut App, files: Vec<FileCandidate>) -> Effect {
    match app.intake.begin_batch(files) {
        BatchOutcome::Upload(batch, notices) => {
            app.status_message = if notices.is_empty() {
                format!("Uploading {} file(s)...", batch.files.len())
            } else {
                // Per-file drops still surface even when the rest proceeds.
                format!(
                    "{} Uploading {} file(s)...",
                    notices.join(" "),
                    batch.files.len()
                )
            };
            Effect::SpawnUpload(batch)
        }
        BatchOutcome::Refused(notices) => {
            app.status_message = notices.join(" ");
            Effect::None
        }
    }
}
