use std::convert::Infallible;

use axum::{
    Json,
    extract::{Form, FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};
use gym_site_contact::{ContactForm, ContactSubmission};
use gym_site_mailer::SendReceipt;
use serde::Serialize;

use crate::{
    error::{ApiError, AppError},
    routes::AppState,
};

/// Success body: `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Contact form read from either a urlencoded or a multipart body
///
/// Never rejects: an unreadable body yields an empty form so that the handler
/// answers with its own validation error.
pub struct ContactFormBody(pub ContactForm);

impl<S> FromRequest<S> for ContactFormBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        let form = if is_multipart {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Unreadable multipart body");
                    ContactForm::default()
                }
            }
        } else {
            match Form::<ContactForm>::from_request(req, state).await {
                Ok(Form(form)) => form,
                Err(rejection) => {
                    tracing::debug!(error = %rejection, "Unreadable form body");
                    ContactForm::default()
                }
            }
        };

        Ok(Self(form))
    }
}

async fn read_multipart(mut multipart: Multipart) -> ContactForm {
    let mut form = ContactForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed multipart field");
                break;
            }
        };

        let slot = match field.name() {
            Some("email") => &mut form.email,
            Some("subject") => &mut form.subject,
            Some("message") => &mut form.message,
            _ => continue,
        };

        match field.text().await {
            Ok(value) => *slot = Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Unreadable multipart field");
                break;
            }
        }
    }

    form
}

/// POST /api/enviar - Contact form submission
///
/// Validates the three fields, emails the rendered template back to the
/// submitter and answers with the provider receipt.
pub async fn action(
    State(app_state): State<AppState>,
    ContactFormBody(form): ContactFormBody,
) -> Result<Json<ApiSuccess<SendReceipt>>, ApiError> {
    match submit(&app_state, form).await {
        Ok(receipt) => Ok(Json(ApiSuccess::new(receipt))),
        Err(e) => Err(e.in_env(app_state.config.app.environment)),
    }
}

async fn submit(app_state: &AppState, form: ContactForm) -> Result<SendReceipt, AppError> {
    let submission = ContactSubmission::try_from(form)?;

    let email_config = &app_state.config.email;
    let content = submission.content(&email_config.from_name);
    let envelope = submission.into_envelope(&email_config.sender(), content)?;

    tracing::info!(subject = %envelope.subject, "Sending contact email");
    tracing::debug!(to = ?envelope.to, "Contact email recipients");

    let receipt = app_state.mailer.send(&envelope).await?;

    tracing::info!(id = %receipt.id, "Contact email sent");

    Ok(receipt)
}
