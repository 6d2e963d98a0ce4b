#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("failed to render email template: {0}")]
    Render(String),

    #[error("email template renderer is not available in this build")]
    RendererUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "templates")]
impl From<askama::Error> for Error {
    fn from(value: askama::Error) -> Self {
        Self::Render(value.to_string())
    }
}
