use thiserror::Error;

/// Errors returned by the progress client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Connection, DNS, TLS or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Whether the server rejected the request itself (4xx).
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}
