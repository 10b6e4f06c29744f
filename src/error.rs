use thiserror::Error;

/// Maximum characters of a response body carried into diagnostics.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when calling ALKS.
///
/// The `Display` output of every variant is the bare message text, so callers
/// that match on the message keep working. Use [`AlksError::kind`] to branch
/// on the category instead.
#[derive(Debug, Error)]
pub enum AlksError {
    /// The service rejected the call and explained why, via `statusMessage`
    /// or the first entry of `errors`.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Non-2xx response without a usable message; carries the reason phrase.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// The requested role does not exist in the account.
    #[error("{0}")]
    NotFound(String),

    /// Connection, DNS, TLS or timeout failure from reqwest.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// A successful response did not carry the fields the operation expects.
    #[error("{0}")]
    Decode(String),

    /// The client configuration cannot be used to build a request.
    #[error("{0}")]
    Config(String),
}

/// Category of an [`AlksError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Service,
    Status,
    NotFound,
    Network,
    Decode,
    Config,
}

impl AlksError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlksError::Service { .. } => ErrorKind::Service,
            AlksError::Status { .. } => ErrorKind::Status,
            AlksError::NotFound(_) => ErrorKind::NotFound,
            AlksError::Network(_) => ErrorKind::Network,
            AlksError::Decode(_) => ErrorKind::Decode,
            AlksError::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the HTTP status if the error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AlksError::Service { status, .. } | AlksError::Status { status, .. } => Some(*status),
            AlksError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AlksError {
    fn from(err: serde_json::Error) -> Self {
        AlksError::Decode(format!("unexpected response shape: {err}"))
    }
}

/// A specialized Result type for ALKS operations.
pub type Result<T> = std::result::Result<T, AlksError>;

/// Truncates a string to at most `max_chars` characters on a valid UTF-8 boundary.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display_is_message() {
        let err = AlksError::Service {
            status: 401,
            message: "this is the statusMessage".to_string(),
        };
        assert_eq!(err.to_string(), "this is the statusMessage");
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn status_error_display_is_reason() {
        let err = AlksError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn not_found_has_no_status() {
        let err = AlksError::NotFound("Role r does not exist in this account".to_string());
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.status().is_none());
    }

    #[test]
    fn json_error_becomes_decode() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = AlksError::from(json_err);
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().starts_with("unexpected response shape"));
    }

    #[test]
    fn truncate_str_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_long() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_str_multibyte() {
        let s = "中文测试数据";
        assert_eq!(truncate_str(s, 4), "中文测试");
    }
}
