//! Error types for the placement API client.
//!
//! # Design
//! Each failure stage has its own variant: the request never completed
//! (`Transport`), the server answered with a non-2xx status (`Http`), or a
//! success body did not match the expected shape (`Decode`). The `Display`
//! text of `Http` is exactly the server-supplied `detail` (or `HTTP <status>`)
//! so pages can show it verbatim.

use thiserror::Error;

/// Errors returned by the client, its parsers and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A success body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_message_only() {
        let err = ApiError::Http {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "Not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn non_http_errors_have_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }
}
