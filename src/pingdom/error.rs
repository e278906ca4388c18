//! Errors raised by the Pingdom API client.

use thiserror::Error;

use super::models::ApiErrorBody;

/// Errors that can occur when talking to the Pingdom API.
#[derive(Debug, Error)]
pub enum PingdomError {
    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The API token cannot be carried in an HTTP header.
    #[error("API token contains characters that are not allowed in an HTTP header")]
    InvalidToken,

    /// The request never produced a response (connect, TLS, body read).
    #[error("request to Pingdom API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Pingdom API returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Pingdom's error message, or the status reason.
        message: String,
    },

    /// The success body could not be decoded.
    #[error("unable to decode Pingdom API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The success body decoded but lacked the expected payload.
    #[error("Pingdom API response did not include {0}")]
    MissingPayload(&'static str),
}

impl PingdomError {
    /// Build a status error from a non-success response body.
    ///
    /// Pingdom wraps errors as `{"error": {"statuscode", "statusdesc", "errormessage"}}`;
    /// when the body doesn't match, the canonical reason phrase is used instead.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .and_then(|detail| detail.errormessage.or(detail.statusdesc))
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Whether the failure happened below HTTP (no response was received).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_response_uses_pingdom_message() {
        let body = r#"{"error":{"statuscode":403,"statusdesc":"Forbidden","errormessage":"Invalid token"}}"#;
        let err = PingdomError::from_response(StatusCode::FORBIDDEN, body);
        assert_eq!(err.to_string(), "Pingdom API returned HTTP 403: Invalid token");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_from_response_falls_back_to_reason() {
        let err = PingdomError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Pingdom API returned HTTP 502: Bad Gateway");

        let body = r#"{"error":{"statuscode":500,"errormessage":""}}"#;
        let err = PingdomError::from_response(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(
            err.to_string(),
            "Pingdom API returned HTTP 500: Internal Server Error"
        );
    }
}
