//! Fetch Errors
//!
//! One error per failed request, tagged with the endpoint path.

use thiserror::Error;

/// Errors from a single dashboard API request.
///
/// The variants only matter for diagnostics; every one of them leads the
/// renderer into the same degraded state.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Path of the endpoint that failed
    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            endpoint: "/api/dashboard/statistics".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "/api/dashboard/statistics returned HTTP 503");
        assert_eq!(err.endpoint(), "/api/dashboard/statistics");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_decode_error_keeps_endpoint() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let err = FetchError::Decode {
            endpoint: "/api/dashboard/reviews/1".to_string(),
            source,
        };
        assert_eq!(err.endpoint(), "/api/dashboard/reviews/1");
        assert!(err.to_string().starts_with("invalid response from /api/dashboard/reviews/1"));
    }
}
