//! Control API error type
//!
//! Every failure of the transport layer is surfaced as one [`ApiError`] so
//! callers have a single handling path. `Display` yields the exact text the
//! console shows to the operator.

use thiserror::Error;

/// Generic text for requests that never produced an HTTP response.
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the control API";

/// Generic text for success responses whose body could not be understood.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "Unexpected response from the control API";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server (connection refused, DNS,
    /// reset) or the read timed out.
    #[error("{message}")]
    Transport { message: String },

    /// Non-2xx response. `message` is the server's `detail` verbatim, or
    /// `HTTP <status>: <reason>` when no detail could be extracted.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },

    /// A mutating request did not complete within the action timeout.
    #[error("Action timed out; simulator state may be inconsistent")]
    TimedOut,

    #[error("Invalid control API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Text shown to the operator for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for server-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::TimedOut)
    }
}

impl From<ApiError> for simcon_core::Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidBaseUrl(url) => simcon_core::Error::invalid_base_url(url),
            other => simcon_core::Error::api(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_detail_verbatim() {
        let err = ApiError::server(500, "db locked");
        assert_eq!(err.to_string(), "db locked");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_timed_out_has_distinct_text() {
        let err = ApiError::TimedOut;
        assert!(err.is_timeout());
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn test_conversion_into_core_error() {
        let err: simcon_core::Error = ApiError::server(404, "Not Found").into();
        assert!(matches!(err, simcon_core::Error::Api { .. }));

        let err: simcon_core::Error = ApiError::InvalidBaseUrl(String::new()).into();
        assert!(matches!(err, simcon_core::Error::InvalidBaseUrl { .. }));
    }
}
