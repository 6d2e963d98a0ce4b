mod content;
mod error;
mod submission;

pub use content::{ContactEmail, ContentSource};
pub use error::{Error, Result};
pub use submission::{ContactForm, ContactSubmission};
