/// Coarse classification of a [`LoaderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An entry the layout requires is missing. Malformed input, not transient.
    NotFound,
    /// The backing store is unreadable, corrupt, or already released.
    Io,
    /// Invalid launcher configuration.
    Config,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt archive {location}: {message}")]
    Corrupt { location: String, message: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Archive already closed: {0}")]
    Closed(String),
    #[error("Invalid manifest: {0}")]
    Manifest(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LoaderError {
    pub fn corrupt(location: impl Into<String>, message: impl ToString) -> Self {
        LoaderError::Corrupt {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::NotFound(_) => ErrorKind::NotFound,
            LoaderError::Config(_) => ErrorKind::Config,
            LoaderError::Io(_)
            | LoaderError::Corrupt { .. }
            | LoaderError::InvalidUrl(_)
            | LoaderError::Closed(_)
            | LoaderError::Manifest(_) => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
