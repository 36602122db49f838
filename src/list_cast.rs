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
use crate::common::utils::{json_response, movie_id_from_query};
use crate::common::CastEntry;

#[derive(Debug, Serialize)]
struct Response {
    cast: Vec<CastEntry>,
}

#[tracing::instrument(skip(store))]
async fn process_request(
    request: LambdaRequest,
    store: &MovieStore,
) -> Result<LambdaResponse<String>, Error> {
    let movie_id = movie_id_from_query(&request)?;

    info!("Listing cast for movie {movie_id}");
    // Ordering is whatever the table's sort key yields; the handler does not
    // re-sort.
    let cast = store.list_cast(movie_id).await?;

    json_response(StatusCode::OK, &Response { cast })
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
