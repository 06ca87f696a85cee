use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the scheduling client.
///
/// Validation errors are raised before any request is sent; conflict errors
/// carry the server's message verbatim; transport errors cover connection
/// failures. Nothing is retried automatically; every error returns control
/// to a re-enterable state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed wire timestamp {value:?}")]
    Time { value: String },

    #[error("unknown timezone {0:?}")]
    Timezone(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    pub fn bad_time(value: impl Into<String>) -> Self {
        Error::Time { value: value.into() }
    }
}
