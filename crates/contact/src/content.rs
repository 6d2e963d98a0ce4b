use time::OffsetDateTime;

use crate::Result;

/// Input of the fixed contact email template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub brand: String,
    pub subject: String,
    pub message: String,
    pub year: i32,
}

impl ContactEmail {
    /// Template input stamped with the current UTC year
    pub fn new(brand: &str, subject: &str, message: &str) -> Self {
        Self {
            brand: brand.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
            year: OffsetDateTime::now_utc().year(),
        }
    }
}

/// Where the HTML body of an email comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Already rendered, used as-is
    Html(String),
    /// Rendered with the built-in contact template
    Template(ContactEmail),
}

impl ContentSource {
    pub fn into_html(self) -> Result<String> {
        match self {
            ContentSource::Html(html) => Ok(html),
            ContentSource::Template(email) => render(&email),
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "templates")] {
        use askama::Template;

        /// Values are escaped by `escape_text` before they reach the template
        #[derive(Template)]
        #[template(path = "emails/contact.html")]
        struct ContactEmailTemplate {
            brand: String,
            subject: String,
            message: String,
            year: i32,
        }

        fn render(email: &ContactEmail) -> Result<String> {
            let template = ContactEmailTemplate {
                brand: escape_text(&email.brand),
                subject: escape_text(&email.subject),
                message: escape_text(&email.message),
                year: email.year,
            };

            Ok(template.render()?)
        }

        /// Escape text placed inside an HTML element.
        ///
        /// Only `<` that could open a tag and `&` that could open a character reference are
        /// rewritten, so quotes, apostrophes and a lone `&` reach the reader verbatim.
        fn escape_text(text: &str) -> String {
            let mut escaped = String::with_capacity(text.len());
            let mut chars = text.chars().peekable();

            while let Some(c) = chars.next() {
                let next = chars.peek().copied();
                match c {
                    '<' if next.is_none_or(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?')) => {
                        escaped.push_str("&lt;")
                    }
                    '&' if next.is_none_or(|n| n.is_ascii_alphanumeric() || n == '#') => {
                        escaped.push_str("&amp;")
                    }
                    _ => escaped.push(c),
                }
            }

            escaped
        }
    } else {
        fn render(_email: &ContactEmail) -> Result<String> {
            Err(crate::Error::RendererUnavailable)
        }
    }
}
