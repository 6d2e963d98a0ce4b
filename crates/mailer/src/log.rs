use async_trait::async_trait;
use tracing::info;
use ulid::Ulid;

use crate::{EmailClient, EmailEnvelope, Result, SendReceipt};

/// Development client: logs the envelope and skips delivery
#[derive(Debug, Clone, Default)]
pub struct LogClient;

#[async_trait]
impl EmailClient for LogClient {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<SendReceipt> {
        let id = format!("log-{}", Ulid::new());

        info!(
            id = %id,
            from = %envelope.from,
            to = ?envelope.to,
            subject = %envelope.subject,
            html_len = envelope.html.len(),
            "Log email client: delivery skipped"
        );

        Ok(SendReceipt { id })
    }
}
