use gym_site_mailer::EmailEnvelope;
use serde::Deserialize;
use validator::Validate;

use crate::{ContactEmail, ContentSource, Result};

/// Raw contact form as posted by the site; any field may be absent
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Contact form with every required field present and non-empty, message capped at 2000 chars
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = crate::Error;

    fn try_from(form: ContactForm) -> Result<Self> {
        let submission = Self {
            email: form.email.unwrap_or_default(),
            subject: form.subject.unwrap_or_default(),
            message: form.message.unwrap_or_default(),
        };

        submission.validate()?;

        Ok(submission)
    }
}

impl ContactSubmission {
    /// Body source for the fixed contact template
    pub fn content(&self, brand: &str) -> ContentSource {
        ContentSource::Template(ContactEmail::new(brand, &self.subject, &self.message))
    }

    /// Resolve `content` to HTML and address the message back to the submitter
    pub fn into_envelope(self, sender: &str, content: ContentSource) -> Result<EmailEnvelope> {
        let html = content.into_html()?;

        Ok(EmailEnvelope {
            from: sender.to_owned(),
            to: vec![self.email],
            subject: self.subject,
            html,
        })
    }
}
