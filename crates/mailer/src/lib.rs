//! Outbound transactional email.
//!
//! The service never talks to a provider directly: handlers hold an
//! `Arc<dyn EmailClient>` built once at startup and call [`EmailClient::send`]
//! with an [`EmailEnvelope`].

mod error;
mod log;
mod resend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{Result, SendError};
pub use log::LogClient;
pub use resend::{DEFAULT_API_URL, ResendClient, ResendOptions};

/// Payload handed to the provider for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailEnvelope {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement for an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    /// Deliver one envelope. Implementations must not retry.
    async fn send(&self, envelope: &EmailEnvelope) -> Result<SendReceipt>;
}
