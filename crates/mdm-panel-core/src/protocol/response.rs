//! Response envelope handling.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

/// Envelope wrapping every API response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Turn the envelope into the payload, treating `success: false` as a rejection.
    pub fn into_result(self, status: Option<u16>) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                status,
                message: self
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "Request failed".to_string()),
            })
        }
    }
}

/// Decode a response body for a request that must return data.
pub fn parse_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    parse_envelope::<T>(status, body)?.ok_or_else(|| ApiError::InvalidResponse {
        message: "Response carried no data".to_string(),
    })
}

/// Decode a response body for a request whose data is ignored.
pub fn parse_ack(status: u16, body: &str) -> Result<(), ApiError> {
    parse_envelope::<serde_json::Value>(status, body).map(|_| ())
}

fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    let ok = (200..300).contains(&status);

    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) if ok => envelope.into_result(Some(status)),
        // Error statuses with an envelope still carry the server's message.
        Ok(envelope) => match envelope.into_result(Some(status)) {
            Err(e) => Err(e),
            Ok(_) => Err(rejected(status, body)),
        },
        Err(e) if ok => Err(ApiError::InvalidResponse {
            message: format!("Failed to parse JSON: {}", e),
        }),
        Err(_) => Err(rejected(status, body)),
    }
}

fn rejected(status: u16, body: &str) -> ApiError {
    let body = body.trim();
    ApiError::Rejected {
        status: Some(status),
        message: if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        },
    }
}
