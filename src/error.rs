//! Error types for the Pingdom provider.

use thiserror::Error;

use crate::pingdom::PingdomError;
use crate::schema::Diagnostic;

/// Errors that can occur while serving the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider configuration is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A data source was read before the provider handed it a client.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The requested data source type is unknown.
    #[error("Unknown data source type: {0}")]
    UnknownDataSource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A gRPC transport error occurred.
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The Pingdom API call failed.
    #[error("Pingdom API error: {0}")]
    Api(#[from] PingdomError),

    /// Invalid request from the host.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An internal provider error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Short, user-facing summary for the error category.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid configuration",
            Self::Configuration(_) => "Provider configuration failed",
            Self::NotConfigured(_) => "Provider not configured",
            Self::UnknownDataSource(_) => "Unknown data source",
            Self::Serialization(_) => "Unable to decode value",
            Self::Transport(_) => "Plugin transport error",
            Self::Api(_) => "Error reading Pingdom checks",
            Self::InvalidRequest(_) => "Invalid request",
            Self::Internal(_) => "Internal provider error",
        }
    }

    /// Render the error as an error diagnostic for the host.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let detail = match self {
            Self::Serialization(err) => err.to_string(),
            Self::Transport(err) => err.to_string(),
            Self::Api(err) => err.to_string(),
            Self::Validation(msg)
            | Self::Configuration(msg)
            | Self::NotConfigured(msg)
            | Self::UnknownDataSource(msg)
            | Self::InvalidRequest(msg)
            | Self::Internal(msg) => msg.clone(),
        };
        Diagnostic::error(self.summary()).with_detail(detail)
    }
}

impl From<ProviderError> for tonic::Status {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Validation(msg) => tonic::Status::invalid_argument(msg),
            ProviderError::Configuration(msg) => tonic::Status::failed_precondition(msg),
            ProviderError::NotConfigured(msg) => tonic::Status::failed_precondition(msg),
            ProviderError::UnknownDataSource(msg) => tonic::Status::not_found(msg),
            ProviderError::Serialization(err) => {
                tonic::Status::invalid_argument(format!("Serialization error: {}", err))
            }
            ProviderError::Transport(err) => {
                tonic::Status::unavailable(format!("Transport error: {}", err))
            }
            ProviderError::Api(err) => tonic::Status::unavailable(err.to_string()),
            ProviderError::InvalidRequest(msg) => tonic::Status::invalid_argument(msg),
            ProviderError::Internal(msg) => tonic::Status::internal(msg),
        }
    }
}
