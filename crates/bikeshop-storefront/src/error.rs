use bikeshop_client::ClientError;
use thiserror::Error;

/// Failure of a store or form action, carrying the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Server-supplied message when there is one, otherwise `fallback`.
    #[must_use]
    pub fn from_client(err: &ClientError, fallback: &str) -> Self {
        Self::new(err.user_message(fallback))
    }
}

impl From<FormError> for ActionError {
    fn from(err: FormError) -> Self {
        Self::new(err.to_string())
    }
}

/// Client-side form checks. These run before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A validation rule failed; the message is shown as-is.
    #[error("{0}")]
    Invalid(String),

    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    #[error("invalid value for {label}: {reason}")]
    InvalidValue { label: String, reason: String },

    #[error("Please select only image files (JPEG, PNG, WebP)")]
    UnsupportedImage { file_name: String },
}
