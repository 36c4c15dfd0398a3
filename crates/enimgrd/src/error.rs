//! Error types for manager operations.
//!
//! Every failure surfaces the provider's error exactly once, either as-is
//! (create and read queries) or wrapped with a stage prefix so callers can
//! tell which lifecycle step failed without inspecting the cause. The
//! original provider error stays reachable through `source()`. No
//! classification of causes happens here.

use eni_provider::ProviderError;
use thiserror::Error;

/// Result type alias for manager operations.
pub type EniResult<T> = Result<T, EniError>;

/// Errors surfaced by [`EniMgr`](crate::EniMgr) operations.
#[derive(Debug, Error)]
pub enum EniError {
    /// Provider failure surfaced without extra context.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Provider failure during a specific lifecycle stage.
    #[error("failed to {action}: {source}")]
    Operation {
        /// The stage that failed (e.g. "attach ENI").
        action: &'static str,
        /// The underlying provider error.
        #[source]
        source: ProviderError,
    },

    /// The provider reported success but omitted a required field.
    #[error("provider returned no {field} in {operation} response")]
    MissingField {
        /// The operation whose response was incomplete.
        operation: &'static str,
        /// The missing field.
        field: &'static str,
    },

    /// A subnet lookup matched nothing.
    #[error("subnet '{subnet_id}' not found")]
    SubnetNotFound {
        /// The subnet identifier that did not resolve.
        subnet_id: String,
    },
}

impl EniError {
    /// Creates a stage-wrapped provider error.
    pub(crate) fn operation(action: &'static str, source: ProviderError) -> Self {
        Self::Operation { action, source }
    }

    /// Creates a missing-field error.
    pub(crate) fn missing_field(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }

    /// The underlying provider error, when there is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            EniError::Provider(source) => Some(source),
            EniError::Operation { source, .. } => Some(source),
            EniError::MissingField { .. } | EniError::SubnetNotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_operation_display_carries_stage_prefix() {
        let err = EniError::operation(
            "attach ENI",
            ProviderError::api("RequestLimitExceeded", "slow down"),
        );
        assert_eq!(
            err.to_string(),
            "failed to attach ENI: provider API error RequestLimitExceeded: slow down"
        );
    }

    #[test]
    fn test_operation_source_is_inspectable() {
        let err = EniError::operation("detach ENI", ProviderError::transport("timed out"));
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "transport error: timed out");
        assert_eq!(
            err.provider_error().and_then(ProviderError::code),
            None
        );
    }

    #[test]
    fn test_provider_passthrough_is_transparent() {
        let err = EniError::from(ProviderError::api("InvalidSubnetID.NotFound", "no subnet"));
        assert_eq!(
            err.to_string(),
            "provider API error InvalidSubnetID.NotFound: no subnet"
        );
        assert_eq!(
            err.provider_error().and_then(ProviderError::code),
            Some("InvalidSubnetID.NotFound")
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = EniError::missing_field("attach", "attachment id");
        assert_eq!(
            err.to_string(),
            "provider returned no attachment id in attach response"
        );
    }
}
