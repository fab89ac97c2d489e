//! # Core
//!
//! Domain logic, independent of the terminal layer. The `tui` module renders
//! this state and feeds actions back in; nothing here imports ratatui.

pub mod action;
pub mod calendar;
pub mod config;
pub mod profile;
pub mod state;
