use crate::error::{Error, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

/// What the image service reported on stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome {
    /// `success: true`, with the whole object kept for the response body.
    Success(Map<String, Value>),
    Failure { error: String },
}

impl ServiceOutcome {
    pub fn parse(stdout: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(stdout)
            .map_err(|e| Error::SubprocessFailure(format!("Invalid JSON output: {}", e)))?;
        Self::try_from(value)
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ServiceOutcome::Failure {
            error: error.into(),
        }
    }
}

impl TryFrom<Value> for ServiceOutcome {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::SubprocessFailure(format!(
                    "Expected a JSON object, got {}",
                    other
                )))
            }
        };

        match object.get("success") {
            Some(Value::Bool(true)) => Ok(ServiceOutcome::Success(object)),
            Some(Value::Bool(false)) => {
                let error = match object.remove("error") {
                    Some(Value::String(message)) => message,
                    Some(other) => other.to_string(),
                    None => "Image service reported failure".to_string(),
                };
                Ok(ServiceOutcome::Failure { error })
            }
            _ => Err(Error::SubprocessFailure(
                "Output has no boolean `success` field".to_string(),
            )),
        }
    }
}

impl IntoResponse for ServiceOutcome {
    fn into_response(self) -> Response {
        match self {
            ServiceOutcome::Success(body) => {
                (StatusCode::OK, Json(Value::Object(body))).into_response()
            }
            ServiceOutcome::Failure { error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": error })),
            )
                .into_response(),
        }
    }
}
