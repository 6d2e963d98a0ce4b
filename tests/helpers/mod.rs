//! Test helpers for driving the router with a recording email client

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use gym_site::{
    AppState, Config,
    config::{AppConfig, EmailConfig, Environment, LoggingConfig, ServerConfig},
};
use gym_site_mailer::{EmailClient, EmailEnvelope, SendError, SendReceipt};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// What the stub client does with the next envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accept,
    Reject,
    Unreachable,
    Panic,
}

/// `EmailClient` that records every envelope and answers with a scripted outcome
#[derive(Clone)]
pub struct RecordingClient {
    outcome: Arc<Mutex<Outcome>>,
    sent: Arc<Mutex<Vec<EmailEnvelope>>>,
}

impl RecordingClient {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn sent(&self) -> Vec<EmailEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailClient for RecordingClient {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<SendReceipt, SendError> {
        self.sent.lock().unwrap().push(envelope.clone());
        let outcome = *self.outcome.lock().unwrap();

        match outcome {
            Outcome::Accept => Ok(SendReceipt {
                id: "123".to_string(),
            }),
            Outcome::Reject => Err(SendError::Provider {
                status: 422,
                name: "validation_error".to_string(),
                message: "Invalid `to` field.".to_string(),
            }),
            Outcome::Unreachable => Err(SendError::Transport(anyhow::anyhow!(
                "error sending request: connection refused"
            ))),
            Outcome::Panic => panic!("stub email client panicked"),
        }
    }
}

pub fn create_test_config(environment: Environment) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_dir: None,
        },
        app: AppConfig { environment },
        email: EmailConfig {
            api_key: "re_test".to_string(),
            from_email: "contacto@forjagym.test".to_string(),
            from_name: "Forja Gym".to_string(),
            ..EmailConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

pub fn create_test_app(client: &RecordingClient, environment: Environment) -> Router {
    gym_site::router(AppState {
        config: create_test_config(environment),
        mailer: Arc::new(client.clone()),
    })
}

pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn multipart_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let boundary = "gymsiteboundary";
    let mut body = String::new();

    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send one request through a clone of the router and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, body)
}
