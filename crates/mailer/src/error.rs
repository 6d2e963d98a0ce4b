#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The provider answered with a structured error object
    #[error("provider rejected message ({status} {name}): {message}")]
    Provider {
        status: u16,
        name: String,
        message: String,
    },

    /// The provider could not be reached or its answer could not be read
    #[error("transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SendError>;

impl From<reqwest::Error> for SendError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.into())
    }
}

impl SendError {
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}
