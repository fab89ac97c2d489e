//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as props:
//! - `TitleBar`: top bar showing the picked travel date and upload activity
//! - `ProfilePanel`: personalization sections rendered from the profile
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage presentation state and emit events:
//! - `CalendarPicker`: month grid over `core::calendar::CalendarState`
//! - `FileIntake`: document list over `intake::IntakeSession`
//!
//! Stateful components keep their persistent state in `TuiState` and are
//! wrapped in a transient struct each frame with borrowed state, so props
//! stay explicit and everything is testable without a real terminal.

mod title_bar;
pub use title_bar::TitleBar;

pub mod calendar;
pub mod file_intake;
pub mod profile_panel;
pub use calendar::{CalendarPicker, CalendarState};
pub use file_intake::{FileIntake, FileIntakeState, IntakeUiEvent};
pub use profile_panel::ProfilePanel;
