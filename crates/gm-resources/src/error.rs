//! Error types for gm-resources.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// The dispatcher error behind this one, if any.
    pub fn client_error(&self) -> Option<&gridmail_client::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<gridmail_client::Error>())
    }

    /// HTTP status code of the failed call, if the service answered.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(gridmail_client::Error::status)
    }

    /// Returns true if the call was aborted through its cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        self.client_error().is_some_and(gridmail_client::Error::is_cancelled)
    }

    /// Returns true if the service rejected the call with HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        self.client_error()
            .is_some_and(gridmail_client::Error::is_rate_limited)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<gridmail_client::Error> for Error {
    fn from(err: gridmail_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
