//! # Application State
//!
//! Core business state for Tripdeck. This module contains domain logic only -
//! no TUI-specific types. Presentation state (month cursor, list focus,
//! scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── profile: Option<PersonalizationSettings>  // AI personalization, read-only
//! ├── selected_date: Option<NaiveDate>          // travel date picked so far
//! ├── intake: IntakeSession                     // accepted documents + flags
//! └── status_message: String                    // status bar text / notices
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::NaiveDate;

use crate::core::config::ResolvedConfig;
use crate::core::profile::PersonalizationSettings;
use crate::intake::{IntakeConfig, IntakeSession};

pub struct App {
    /// Personalization settings, supplied by the profile file. The app never
    /// mutates these — absent sections simply don't render.
    pub profile: Option<PersonalizationSettings>,
    /// The travel date the user has picked. Owned here, fed to the calendar
    /// widget as a prop each frame.
    pub selected_date: Option<NaiveDate>,
    pub intake: IntakeSession,
    pub status_message: String,
}

impl App {
    pub fn new(profile: Option<PersonalizationSettings>, intake_config: IntakeConfig) -> Self {
        Self {
            profile,
            selected_date: None,
            intake: IntakeSession::new(intake_config),
            status_message: String::from("Welcome to Tripdeck!"),
        }
    }

    pub fn from_config(
        profile: Option<PersonalizationSettings>,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(profile, config.intake.clone())
    }
}
