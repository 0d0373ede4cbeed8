use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::transport::TransportError;

/// Error body the API sends with 400, 401, 403, 404 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorResponse {
    /// HTTP status of the failed request. 401 and 403 bodies leave it out,
    /// so the client fills it in from the response status.
    pub status_code: u16,
    /// Empty on 401 and 403 errors.
    pub error_code: String,
    pub message: String,
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.error_code.is_empty() {
            write!(f, "{} API error: {}", self.status_code, self.message)
        } else {
            write!(
                f,
                "{} ({}) API error: {}",
                self.status_code, self.error_code, self.message
            )
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Debug, Error)]
pub enum ClimaCellError {
    #[error("Failed to send weather data request to {}", .endpoint.path())]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: TransportError,
    },

    #[error("Failed to deserialize {endpoint} response data")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Api(#[from] ErrorResponse),

    #[error("Failed to deserialize {endpoint} error response (status {status})")]
    ErrorDecode {
        endpoint: Endpoint,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected HTTP response status code from {endpoint}: {status}")]
    UnexpectedStatus {
        endpoint: Endpoint,
        status: StatusCode,
    },

    #[error("Failed to build HTTP client")]
    TransportInit(#[source] reqwest::Error),

    #[error("API key cannot be sent as an HTTP header")]
    InvalidApiKey(#[source] reqwest::header::InvalidHeaderValue),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Unknown endpoint '{0}'. Supported endpoints: {}.", Endpoint::names())]
    UnknownEndpoint(String),
}

impl ClimaCellError {
    /// The API's own error payload, if the request failed with one.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            ClimaCellError::Api(res) => Some(res),
            _ => None,
        }
    }

    /// The HTTP status behind this error, when a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClimaCellError::Api(res) => StatusCode::from_u16(res.status_code).ok(),
            ClimaCellError::ErrorDecode { status, .. }
            | ClimaCellError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_display() {
        let with_code = ErrorResponse {
            status_code: 400,
            error_code: "BadRequest".into(),
            message: "lat is out of range".into(),
        };
        assert_eq!(
            with_code.to_string(),
            "400 (BadRequest) API error: lat is out of range"
        );

        let without_code = ErrorResponse {
            status_code: 401,
            error_code: String::new(),
            message: "bad key".into(),
        };
        assert_eq!(without_code.to_string(), "401 API error: bad key");
    }

    #[test]
    fn error_response_decodes_partial_bodies() {
        let res: ErrorResponse = serde_json::from_str(r#"{"message": "bad key"}"#).unwrap();
        assert_eq!(res.status_code, 0);
        assert_eq!(res.error_code, "");
        assert_eq!(res.message, "bad key");

        let res: ErrorResponse = serde_json::from_str(
            r#"{"statusCode": 404, "errorCode": "NotFound", "message": "no such location"}"#,
        )
        .unwrap();
        assert_eq!(res.status_code, 404);
        assert_eq!(res.error_code, "NotFound");
    }

    #[test]
    fn api_error_is_displayed_as_is() {
        let err = ClimaCellError::from(ErrorResponse {
            status_code: 500,
            error_code: "Internal".into(),
            message: "oops".into(),
        });
        assert_eq!(err.to_string(), "500 (Internal) API error: oops");
        assert_eq!(err.api_error().map(|e| e.status_code), Some(500));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn unknown_endpoint_lists_supported_names() {
        let msg = ClimaCellError::UnknownEndpoint("monthly".into()).to_string();
        assert!(msg.contains("Unknown endpoint 'monthly'"));
        assert!(msg.contains("nowcast"));
        assert!(msg.contains("historical-climacell"));
    }
}
