//! Analysis client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend reported failure: {0}")]
    Backend(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if the request never got a usable answer (network, timeout, 5xx).
    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Http(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the failure is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClientError::backend("no frames").to_string(),
            "Backend reported failure: no frames"
        );
        assert_eq!(
            ClientError::Status { status: 502, body: "bad gateway".into() }.to_string(),
            "Unexpected status 502: bad gateway"
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Status { status: 503, body: String::new() }.is_transport());
        assert!(!ClientError::Status { status: 422, body: String::new() }.is_transport());
        assert!(!ClientError::parse("bad json").is_transport());
        assert!(!ClientError::MissingCredential("OPENAI_API_KEY").is_timeout());
    }
}
