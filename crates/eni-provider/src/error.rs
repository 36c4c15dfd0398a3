//! Error types for provider calls.
//!
//! Every [`ProviderClient`](crate::ProviderClient) method reports failure
//! through [`ProviderError`]. No cause classification happens at this layer;
//! callers that care about throttling vs. not-found inspect [`ProviderError::code`]
//! themselves.

use thiserror::Error;

/// Result type alias for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors reported by a provider client.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider received the request and rejected it.
    #[error("provider API error {code}: {message}")]
    Api {
        /// Provider-assigned error code (e.g. "InvalidNetworkInterfaceID.NotFound").
        code: String,
        /// Human-readable message from the provider.
        message: String,
    },

    /// The request never produced a provider response.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the connectivity failure.
        message: String,
    },
}

impl ProviderError {
    /// Creates an API rejection error.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Provider-assigned error code, when the provider produced one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => Some(code),
            ProviderError::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ProviderError::api("InvalidAttachmentID.NotFound", "no such attachment");
        assert_eq!(
            err.to_string(),
            "provider API error InvalidAttachmentID.NotFound: no such attachment"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = ProviderError::transport("connection refused");
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn test_code_accessor() {
        assert_eq!(
            ProviderError::api("RequestLimitExceeded", "slow down").code(),
            Some("RequestLimitExceeded")
        );
        assert_eq!(ProviderError::transport("timed out").code(), None);
    }
}
