//! # Upload Transport
//!
//! Where batch bytes would go if anything actually went anywhere. Real
//! transport is explicitly out of scope — the intake surface only curates
//! metadata — but the seam is a trait so the simulated delay is swappable
//! and tests can complete uploads instantly.

use async_trait::async_trait;
use log::info;
use std::fmt;
use std::time::Duration;

use super::PendingBatch;

#[derive(Debug)]
pub enum TransportError {
    Interrupted(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Interrupted(reason) => write!(f, "upload interrupted: {reason}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Moves a validated batch "to the backend".
#[async_trait]
pub trait UploadTransport: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve when the batch has been transferred.
    async fn transfer(&self, batch: &PendingBatch) -> Result<(), TransportError>;
}

/// The bundled transport: a fixed-duration sleep per batch, no bytes moved.
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl UploadTransport for SimulatedTransport {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn transfer(&self, batch: &PendingBatch) -> Result<(), TransportError> {
        info!(
            "Simulating upload of {} file(s) (batch {})",
            batch.files.len(),
            batch.id
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::FileCandidate;
    use uuid::Uuid;

    fn batch() -> PendingBatch {
        PendingBatch {
            id: Uuid::new_v4(),
            files: vec![FileCandidate {
                name: "ticket.pdf".to_string(),
                mime: Some("application/pdf".to_string()),
                size_bytes: 1024,
            }],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_waits_full_delay() {
        let transport = SimulatedTransport::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        transport.transfer(&batch()).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_zero_delay_completes() {
        let transport = SimulatedTransport::new(Duration::ZERO);
        assert!(transport.transfer(&batch()).await.is_ok());
        assert_eq!(transport.name(), "simulated");
    }
}
