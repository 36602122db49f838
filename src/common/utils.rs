use lambda_http::http::StatusCode;
use lambda_http::{
    Request as LambdaRequest, RequestExt, RequestPayloadExt, Response as LambdaResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::errors::Error;

const EMPTY_PAYLOAD_ERROR: &str = "Request payload is empty";
pub const MISSING_MOVIE_ID_ERROR: &str = "Missing or non-numeric movie id";

/// Deserialize the JSON request body, turning an empty or malformed payload
/// into a 400 envelope.
pub fn extract_request<T: DeserializeOwned>(request: &LambdaRequest) -> Result<T, Error> {
    match request.payload::<T>() {
        Ok(Some(val)) => Ok(val),
        Ok(None) => Err(Error::bad_request(EMPTY_PAYLOAD_ERROR)),
        Err(err) => Err(Error::bad_request(&err.to_string())),
    }
}

/// Parse the numeric id from the `{movieId}` path segment. Absence or a parse
/// failure is a 404 issued before any store access.
pub fn movie_id_from_path(request: &LambdaRequest) -> Result<i64, Error> {
    let params = request.path_parameters();
    params
        .first("movieId")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| Error::not_found(MISSING_MOVIE_ID_ERROR))
}

/// Same contract as `movie_id_from_path`, for routes that take the id as a
/// query string parameter.
pub fn movie_id_from_query(request: &LambdaRequest) -> Result<i64, Error> {
    let params = request.query_string_parameters();
    params
        .first("movieId")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| Error::not_found(MISSING_MOVIE_ID_ERROR))
}

/// A query flag is set only by the literal value `true`; anything else, or
/// absence, leaves it unset.
pub fn query_flag(request: &LambdaRequest, name: &str) -> bool {
    let params = request.query_string_parameters();
    params.first(name) == Some("true")
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<LambdaResponse<String>, Error> {
    let response = LambdaResponse::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(serde_json::to_string(body)?)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::Body;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    fn assert_status(error: Error, expected: StatusCode) -> String {
        match error {
            Error::HttpError(response) => {
                assert_eq!(response.status(), expected);
                response.body().clone()
            }
            Error::LambdaError(err) => panic!("expected http error, got {err}"),
        }
    }

    fn request_with_path_id(raw: &str) -> LambdaRequest {
        LambdaRequest::default().with_path_parameters(HashMap::from([(
            "movieId".to_string(),
            raw.to_string(),
        )]))
    }

    #[test]
    fn path_id_parses() {
        assert_eq!(movie_id_from_path(&request_with_path_id("1234")).unwrap(), 1234);
    }

    #[test]
    fn missing_path_id_is_404() {
        let error = movie_id_from_path(&LambdaRequest::default()).unwrap_err();
        let body = assert_status(error, StatusCode::NOT_FOUND);
        assert!(body.contains(MISSING_MOVIE_ID_ERROR));
    }

    #[test]
    fn non_numeric_path_id_is_404() {
        let error = movie_id_from_path(&request_with_path_id("shawshank")).unwrap_err();
        assert_status(error, StatusCode::NOT_FOUND);
    }

    #[test]
    fn query_id_parses() {
        let request = LambdaRequest::default().with_query_string_parameters(HashMap::from([(
            "movieId".to_string(),
            "42".to_string(),
        )]));
        assert_eq!(movie_id_from_query(&request).unwrap(), 42);
    }

    #[test]
    fn missing_query_id_is_404() {
        let error = movie_id_from_query(&LambdaRequest::default()).unwrap_err();
        assert_status(error, StatusCode::NOT_FOUND);
    }

    #[test]
    fn query_flag_requires_literal_true() {
        let flagged = |value: &str| {
            let request = LambdaRequest::default().with_query_string_parameters(HashMap::from([(
                "cast".to_string(),
                value.to_string(),
            )]));
            query_flag(&request, "cast")
        };

        assert!(flagged("true"));
        assert!(!flagged("false"));
        assert!(!flagged("1"));
        assert!(!query_flag(&LambdaRequest::default(), "cast"));
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Payload {
        id: i64,
    }

    #[test]
    fn extract_request_parses_json_body() {
        let request = lambda_http::http::Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(r#"{"id": 7}"#))
            .unwrap();

        assert_eq!(extract_request::<Payload>(&request).unwrap(), Payload { id: 7 });
    }

    #[test]
    fn empty_payload_is_400() {
        let error = extract_request::<Payload>(&LambdaRequest::default()).unwrap_err();
        let body = assert_status(error, StatusCode::BAD_REQUEST);
        assert!(body.contains(EMPTY_PAYLOAD_ERROR));
    }

    #[test]
    fn json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, &Payload { id: 7 }).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.body(), r#"{"id":7}"#);
    }
}
