use lambda_http::http::StatusCode;
use lambda_http::{Error as LambdaError, Response as LambdaResponse};
use serde_json::json;

use crate::common::store::StoreError;

/// Handler-level error. `HttpError` carries a ready error response that the
/// service closure returns to the platform as a normal invocation result;
/// `LambdaError` aborts the invocation.
#[derive(Debug)]
pub enum Error {
    HttpError(LambdaResponse<String>),
    LambdaError(LambdaError),
}

impl Error {
    /// 404 with the `{"Message": ...}` envelope.
    pub fn not_found(message: &str) -> Self {
        Self::envelope(StatusCode::NOT_FOUND, json!({ "Message": message }))
    }

    /// 400 with an `{"error": ...}` envelope, for malformed request payloads.
    pub fn bad_request(message: &str) -> Self {
        Self::envelope(StatusCode::BAD_REQUEST, json!({ "error": message }))
    }

    /// 500 with the raw fault text in the body.
    pub fn internal(fault: impl std::fmt::Display) -> Self {
        Self::envelope(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": fault.to_string() }),
        )
    }

    fn envelope(status: StatusCode, body: serde_json::Value) -> Self {
        let result = LambdaResponse::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string());

        match result {
            Ok(response) => Error::HttpError(response),
            Err(err) => Error::LambdaError(err.into()),
        }
    }
}

impl From<lambda_http::http::Error> for Error {
    fn from(err: lambda_http::http::Error) -> Self {
        Error::LambdaError(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LambdaError(err.into())
    }
}

impl<E: std::error::Error + Send + Sync + 'static> From<Box<E>> for Error {
    fn from(err: Box<E>) -> Self {
        Error::LambdaError(err)
    }
}

// Store faults surface as a 500 with the fault details embedded. No
// classification of individual SDK failures.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn response(error: Error) -> LambdaResponse<String> {
        match error {
            Error::HttpError(response) => response,
            Error::LambdaError(err) => panic!("expected http error, got {err}"),
        }
    }

    #[test]
    fn not_found_builds_message_envelope() {
        let response = response(Error::not_found("Invalid movie Id"));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["Message"], "Invalid movie Id");
    }

    #[test]
    fn internal_embeds_fault_text() {
        let response = response(Error::internal("GetItem failed: timeout"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["error"], "GetItem failed: timeout");
    }

    #[test]
    fn store_errors_become_500_envelopes() {
        let response = response(Error::from(StoreError::Request(
            "Scan failed: boom".to_string(),
        )));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["error"], "Scan failed: boom");
    }

    #[test]
    fn bad_request_uses_error_field() {
        let response = response(Error::bad_request("Request payload is empty"));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body["error"], "Request payload is empty");
    }
}
