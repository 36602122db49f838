use aws_config::BehaviorVersion;
use lambda_http::http::StatusCode;
use lambda_http::{
    run, service_fn, Error as LambdaError, Request as LambdaRequest, Response as LambdaResponse,
};
use serde::Serialize;
use tracing::info;

mod common;
use crate::common::config::Config;
use crate::common::errors::Error;
use crate::common::store::MovieStore;
use crate::common::utils::{json_response, movie_id_from_path, query_flag};
use crate::common::{CastEntry, Movie};

const INVALID_MOVIE_ID_ERROR: &str = "Invalid movie Id";

#[derive(Debug, Serialize)]
struct Response {
    movie: Movie,
    /// Present exactly when the request asked for the join; an empty cast
    /// still serializes as `[]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    cast: Option<Vec<CastEntry>>,
}

async fn get_movie(
    movie_id: i64,
    include_cast: bool,
    store: &MovieStore,
) -> Result<Response, Error> {
    let Some(movie) = store.get_movie(movie_id).await? else {
        return Err(Error::not_found(INVALID_MOVIE_ID_ERROR));
    };

    // Sequential second fetch; a fault here propagates to the 500 path and
    // discards the primary result rather than returning partial data.
    let cast = if include_cast && store.has_cast_table() {
        Some(store.list_cast(movie_id).await?)
    } else {
        None
    };

    Ok(Response { movie, cast })
}

#[tracing::instrument(skip(store))]
async fn process_request(
    request: LambdaRequest,
    store: &MovieStore,
) -> Result<LambdaResponse<String>, Error> {
    let movie_id = movie_id_from_path(&request)?;
    let include_cast = query_flag(&request, "cast");

    info!("Fetching movie {movie_id} (cast join: {include_cast})");
    let response = get_movie(movie_id, include_cast, store).await?;

    json_response(StatusCode::OK, &response)
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();

    let config = Config::from_env();
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = MovieStore::new(aws_sdk_dynamodb::Client::new(&aws_config), &config);

    run(service_fn(|request: LambdaRequest| async {
        let result = process_request(request, &store).await;

        match result {
            Ok(val) => Ok(val),
            Err(Error::HttpError(val)) => Ok(val),
            Err(Error::LambdaError(err)) => Err(err),
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_movie() -> Movie {
        Movie {
            id: 1234,
            title: "The Shawshank Redemption".to_string(),
            attributes: serde_json::Map::new(),
        }
    }

    #[test]
    fn cast_field_is_omitted_when_not_requested() {
        let body = serde_json::to_value(Response {
            movie: sample_movie(),
            cast: None,
        })
        .unwrap();

        assert_eq!(body["movie"]["id"], json!(1234));
        assert!(body.get("cast").is_none());
    }

    #[test]
    fn requested_cast_is_present_even_when_empty() {
        let body = serde_json::to_value(Response {
            movie: sample_movie(),
            cast: Some(Vec::new()),
        })
        .unwrap();

        assert_eq!(body["cast"], Value::Array(Vec::new()));
    }

    #[test]
    fn cast_entries_serialize_in_camel_case() {
        let body = serde_json::to_value(Response {
            movie: sample_movie(),
            cast: Some(vec![CastEntry {
                movie_id: 1234,
                actor_name: "Tim Robbins".to_string(),
                role_name: "Andy Dufresne".to_string(),
            }]),
        })
        .unwrap();

        assert_eq!(body["cast"][0]["actorName"], json!("Tim Robbins"));
        assert_eq!(body["cast"][0]["roleName"], json!("Andy Dufresne"));
    }
}
