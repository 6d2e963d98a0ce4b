//! Client for the Resend REST API (`POST /emails`)

use std::{fmt, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{EmailClient, EmailEnvelope, Result, SendError, SendReceipt};

pub const DEFAULT_API_URL: &str = "https://api.resend.com";

#[derive(Clone)]
pub struct ResendOptions {
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ResendOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendOptions")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resend-backed email client
///
/// Holds a pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Error object returned by the provider on non-2xx answers
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderErrorBody {
    status_code: Option<u16>,
    name: Option<String>,
    message: Option<String>,
}

impl ResendClient {
    /// Build a client. A missing API key is a configuration error.
    pub fn new(options: ResendOptions) -> anyhow::Result<Self> {
        if options.api_key.trim().is_empty() {
            anyhow::bail!("Resend API key is not configured");
        }

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("gym-site-mailer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for Resend")?;

        let endpoint = format!("{}/emails", options.api_url.trim_end_matches('/'));

        info!(
            endpoint = %endpoint,
            timeout_secs = options.timeout.as_secs(),
            "Resend email client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            api_key: options.api_key,
        })
    }
}

impl fmt::Debug for ResendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmailClient for ResendClient {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<SendReceipt> {
        debug!(to = ?envelope.to, subject = %envelope.subject, "Sending email through Resend");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let receipt = response.json::<SendReceipt>().await?;
            info!(id = %receipt.id, "Email accepted by provider");
            return Ok(receipt);
        }

        let text = response.text().await?;
        let body = serde_json::from_str::<ProviderErrorBody>(&text).unwrap_or_default();

        let err = SendError::Provider {
            status: body.status_code.unwrap_or_else(|| status.as_u16()),
            name: body.name.unwrap_or_else(|| "http_error".to_owned()),
            message: body.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected provider response")
                    .to_owned()
            }),
        };

        warn!(status = status.as_u16(), error = %err, "Email rejected by provider");

        Err(err)
    }
}
