//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::state::App;
use crate::intake::transport::{TransportError, UploadTransport};
use crate::intake::{FileCandidate, IntakeConfig, PendingBatch};

/// A transport that completes immediately, for tests that don't want to wait.
pub struct InstantTransport;

#[async_trait]
impl UploadTransport for InstantTransport {
    fn name(&self) -> &str {
        "instant"
    }

    async fn transfer(&self, _batch: &PendingBatch) -> Result<(), TransportError> {
        Ok(())
    }
}

/// An accepted-by-default image candidate.
pub fn candidate(name: &str, size_bytes: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        mime: Some("image/png".to_string()),
        size_bytes,
    }
}

/// Creates a test App with no profile and default intake limits.
pub fn test_app() -> App {
    App::new(None, IntakeConfig::default())
}
