//! Tripdeck library exports for testing

pub mod core;
pub mod intake;
pub mod tui;

#[cfg(test)]
pub mod test_support;
