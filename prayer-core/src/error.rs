use thiserror::Error;

/// Caller-supplied input failed local validation.
///
/// Raised before any I/O happens, so it is never wrapped in an
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid argument: {message}")]
pub struct InvalidArgument {
    pub message: String,
}

impl InvalidArgument {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

/// Operational failure while talking to the upstream prayer-times service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, TLS, ...).
    #[error("Network error reaching prayer times service: {message}")]
    Network { message: String },

    /// The request exceeded the client timeout and was abandoned.
    #[error("Request to prayer times service timed out")]
    Timeout,

    /// Upstream answered with a non-success status code.
    #[error("Prayer times service responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Success status, but the payload could not be mapped.
    #[error("Malformed upstream response: {message}")]
    Malformed { message: String },
}

impl FetchError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network { message: message.into() }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed { message: message.into() }
    }

    /// Classify a reqwest transport error.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::network(err.to_string())
        }
    }

    /// Status code carried by an upstream error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_is_displayed() {
        let err = InvalidArgument::new("City cannot be empty");
        assert_eq!(err.to_string(), "Invalid argument: City cannot be empty");
    }

    #[test]
    fn upstream_error_mentions_status() {
        let err = FetchError::Upstream { status: 500, body: String::new() };
        assert!(err.to_string().contains("500"));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn non_upstream_errors_have_no_status() {
        assert_eq!(FetchError::Timeout.status(), None);
        assert_eq!(FetchError::malformed("missing data").status(), None);
        assert!(FetchError::network("refused").to_string().contains("refused"));
    }
}
