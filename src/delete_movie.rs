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
use crate::common::utils::{json_response, movie_id_from_path};

#[derive(Debug, Serialize)]
struct Response {
    #[serde(rename = "Message")]
    message: String,
}

#[tracing::instrument(skip(store))]
async fn process_request(
    request: LambdaRequest,
    store: &MovieStore,
) -> Result<LambdaResponse<String>, Error> {
    let movie_id = movie_id_from_path(&request)?;

    info!("Deleting movie {movie_id}");
    // Unconditional delete; an absent key still acknowledges success. Cast
    // entries under the id are left in place (no cascade).
    store.delete_movie(movie_id).await?;

    json_response(
        StatusCode::OK,
        &Response {
            message: format!("Movie {movie_id} deleted"),
        },
    )
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
