use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
};
use gym_site_contact::Error as ContactError;
use gym_site_mailer::SendError;
use serde::Serialize;
use thiserror::Error;

use crate::config::Environment;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Todos los campos son requeridos";
pub const SEND_FAILED_MESSAGE: &str = "Error al enviar el mensaje";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validate(errors) => AppError::ValidationError(errors.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<SendError> for AppError {
    fn from(err: SendError) -> Self {
        match &err {
            SendError::Provider { .. } => AppError::ProviderError(err.to_string()),
            SendError::Transport(source) => AppError::TransportError(format!("{source:#}")),
        }
    }
}

impl AppError {
    /// Bind the error to the running environment, which decides whether details leave the process
    pub fn in_env(self, environment: Environment) -> ApiError {
        ApiError {
            error: self,
            expose_details: environment.exposes_error_details(),
        }
    }
}

/// JSON error body: `{"error": ..., "details"?: ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    expose_details: bool,
}

impl ApiError {
    pub fn error(&self) -> &AppError {
        &self.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self.error {
            AppError::ValidationError(msg) => {
                tracing::debug!(reason = %msg, "Rejected contact submission");
                (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
            }
            AppError::ProviderError(msg) => {
                tracing::error!(error = %msg, "Email provider rejected message");
                (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
            }
            AppError::TransportError(msg) => {
                tracing::error!(error = %msg, "Email provider unreachable");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        let details = match self.error {
            AppError::ValidationError(_) => None,
            AppError::ProviderError(msg)
            | AppError::TransportError(msg)
            | AppError::InternalError(msg) => self.expose_details.then_some(msg),
        };

        (
            status_code,
            Json(ErrorBody {
                error: message,
                details,
            }),
        )
            .into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> HttpResponse<Body> {
    let reason = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = %reason, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR_MESSAGE,
            details: None,
        }),
    )
        .into_response()
}
