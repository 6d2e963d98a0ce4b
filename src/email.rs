//! Email client selection

use std::sync::Arc;

use gym_site_mailer::{EmailClient, LogClient, ResendClient, ResendOptions};
use tracing::warn;

use crate::config::{EmailConfig, EmailProvider};

/// Build the process-wide email client from configuration
pub fn build_client(config: &EmailConfig) -> anyhow::Result<Arc<dyn EmailClient>> {
    match config.provider {
        EmailProvider::Resend => {
            let client = ResendClient::new(ResendOptions {
                api_key: config.api_key.clone(),
                api_url: config.api_url.clone(),
                timeout: config.timeout(),
            })?;
            Ok(Arc::new(client))
        }
        EmailProvider::Log => {
            warn!("Email provider set to \"log\": contact emails will not be delivered");
            Ok(Arc::new(LogClient))
        }
    }
}
