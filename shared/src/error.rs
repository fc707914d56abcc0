use thiserror::Error;

/// Shown whenever the backend gives us nothing better to say.
pub const GENERIC_ERROR_MESSAGE: &str = "Oops, something went wrong";

/// Transport-level failure of an upload, search or ping request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

impl ApiError {
    /// Text for the notification sink: the server's own message when it sent
    /// one, the generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("file rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("an upload is already in flight")]
    Busy,

    #[error("an image is already uploaded, remove it first")]
    AlreadyUploaded,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("no search can be edited or submitted right now")]
    NotComposing,

    #[error("no source image has been uploaded")]
    NoSourceImage,

    #[error("query parameter must be a non-negative number, got {0}")]
    NegativeParameter(f64),

    #[error("KNN needs a whole number of neighbours, got {0}")]
    FractionalK(f64),

    #[error("KNN neighbour count {0} is too large")]
    KTooLarge(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}
