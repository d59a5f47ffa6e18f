use serde::{Deserialize, Serialize};

/// Error type for every outbound call made by this crate.
///
/// Each variant carries a `provider` field naming the remote side that produced
/// the error (`"aliyun"` for the DNS API, `"webhook"` for notifications).
///
/// # Taxonomy
///
/// - Transport: [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout).
/// - Protocol: everything the remote side answered with but that does not
///   constitute success ([`HttpStatus`](Self::HttpStatus),
///   [`ParseError`](Self::ParseError), [`RecordMismatch`](Self::RecordMismatch),
///   and the mapped API error codes).
///
/// Nothing in this crate retries automatically. Callers decide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Remote side that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Remote side that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The remote side answered with an unexpected HTTP status and no
    /// structured error body.
    HttpStatus {
        /// Remote side that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body (truncated).
        detail: String,
    },

    /// The access key is unknown or the signature was rejected.
    InvalidCredentials {
        /// Remote side that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found.
    RecordNotFound {
        /// Remote side that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The record is locked and cannot change status.
    RecordLocked {
        /// Remote side that produced the error.
        provider: String,
        /// ID of the locked record.
        record_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        /// Remote side that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or a throttling code).
    RateLimited {
        /// Remote side that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A successful-looking response referenced a different record than the
    /// one requested.
    RecordMismatch {
        /// Remote side that produced the error.
        provider: String,
        /// Record ID that was sent.
        expected: String,
        /// Record ID found in the response, if any.
        actual: Option<String>,
    },

    /// Failed to parse the response body.
    ParseError {
        /// Remote side that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The HTTP client could not be constructed.
    ClientBuild {
        /// Remote side the client was meant for.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// An unrecognized error code from the API.
    Unknown {
        /// Remote side that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、记录不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordNotFound { .. }
                | Self::RecordLocked { .. }
                | Self::PermissionDenied { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Whether the failure happened before any response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider, status, ..
            } => {
                write!(f, "[{provider}] Unexpected HTTP status {status}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' not found")
            }
            Self::RecordLocked {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' is locked")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::RecordMismatch {
                provider,
                expected,
                actual,
            } => match actual {
                Some(actual) => write!(
                    f,
                    "[{provider}] Response record '{actual}' does not match requested '{expected}'"
                ),
                None => write!(
                    f,
                    "[{provider}] Response carries no record id (requested '{expected}')"
                ),
            },
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::ClientBuild { provider, detail } => {
                write!(f, "[{provider}] Failed to build HTTP client: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
            } => match raw_code {
                Some(code) => write!(f, "[{provider}] {code}: {raw_message}"),
                None => write!(f, "[{provider}] {raw_message}"),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "aliyun".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[aliyun] Network error: connection refused");
    }

    #[test]
    fn display_http_status_omits_body() {
        let e = ProviderError::HttpStatus {
            provider: "aliyun".to_string(),
            status: 500,
            detail: "<html>internal</html>".to_string(),
        };
        assert_eq!(e.to_string(), "[aliyun] Unexpected HTTP status 500");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "aliyun".to_string(),
            raw_message: Some("Specified signature is not matched".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Invalid credentials: Specified signature is not matched"
        );
    }

    #[test]
    fn display_record_mismatch() {
        let e = ProviderError::RecordMismatch {
            provider: "aliyun".to_string(),
            expected: "1".to_string(),
            actual: Some("2".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Response record '2' does not match requested '1'"
        );

        let e = ProviderError::RecordMismatch {
            provider: "aliyun".to_string(),
            expected: "1".to_string(),
            actual: None,
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] Response carries no record id (requested '1')"
        );
    }

    #[test]
    fn display_rate_limited() {
        let with_retry = ProviderError::RateLimited {
            provider: "aliyun".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(with_retry.to_string(), "[aliyun] Rate limited (retry after 30s)");

        let without = ProviderError::RateLimited {
            provider: "aliyun".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(without.to_string(), "[aliyun] Rate limited");
    }

    #[test]
    fn display_unknown_with_code() {
        let e = ProviderError::Unknown {
            provider: "aliyun".to_string(),
            raw_code: Some("InternalError".to_string()),
            raw_message: "The request processing has failed".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[aliyun] InternalError: The request processing has failed"
        );
    }

    #[test]
    fn serialize_tagged_by_code() {
        let e = ProviderError::Timeout {
            provider: "webhook".to_string(),
            detail: "10s elapsed".to_string(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["provider"], "webhook");
    }

    #[test]
    fn transport_classification() {
        assert!(
            ProviderError::Timeout {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_transport()
        );
        assert!(
            !ProviderError::ParseError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_transport()
        );
        assert!(
            !ProviderError::HttpStatus {
                provider: "t".into(),
                status: 503,
                detail: String::new(),
            }
            .is_transport()
        );
    }

    #[test]
    fn expected_errors_are_caller_side() {
        assert!(
            ProviderError::RecordNotFound {
                provider: "t".into(),
                record_id: "1".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::NetworkError {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }
}
