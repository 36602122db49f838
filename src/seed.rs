//! One-time seed load for the movies and cast tables.
//!
//! Not a Lambda entry point; run locally against provisioned tables:
//! `cargo run --bin seed -- seed/movies.json`

use std::collections::HashMap;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use serde::Deserialize;
use tracing::{info, warn};

mod common;
use crate::common::config::Config;
use crate::common::conversions::{cast_to_item, movie_to_item};
use crate::common::{CastEntry, Movie};

const SEED_FILE_DEFAULT: &str = "seed/movies.json";

// DynamoDB caps BatchWriteItem at 25 items per request.
const BATCH_SIZE: usize = 25;

#[derive(Debug, Deserialize)]
struct SeedData {
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub cast: Vec<CastEntry>,
}

async fn write_batches(
    client: &Client,
    table_name: &str,
    items: Vec<HashMap<String, AttributeValue>>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut written = 0;

    for chunk in items.chunks(BATCH_SIZE) {
        let mut requests = Vec::with_capacity(chunk.len());
        for item in chunk {
            let put = PutRequest::builder().set_item(Some(item.clone())).build()?;
            requests.push(WriteRequest::builder().put_request(put).build());
        }

        client
            .batch_write_item()
            .request_items(table_name, requests)
            .send()
            .await
            .map_err(Box::new)?;

        written += chunk.len();
    }

    Ok(written)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let seed_file = std::env::args()
        .nth(1)
        .unwrap_or(SEED_FILE_DEFAULT.to_string());
    let seed: SeedData = serde_json::from_str(&std::fs::read_to_string(&seed_file)?)?;

    let config = Config::from_env();
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = Client::new(&aws_config);

    let movie_items = seed
        .movies
        .iter()
        .map(movie_to_item)
        .collect::<Result<Vec<_>, _>>()?;
    let written = write_batches(&client, &config.movies_table, movie_items).await?;
    info!("Seeded {written} movies into {}", config.movies_table);

    match &config.cast_table {
        Some(cast_table) => {
            let cast_items = seed.cast.iter().map(cast_to_item).collect();
            let written = write_batches(&client, cast_table, cast_items).await?;
            info!("Seeded {written} cast entries into {cast_table}");
        }
        None if seed.cast.is_empty() => {}
        None => warn!("CAST_TABLE is not configured; skipping cast entries"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fixture_parses() {
        let data: SeedData =
            serde_json::from_str(include_str!("../seed/movies.json")).unwrap();

        assert!(data.movies.iter().any(|m| m.id == 1234));
        assert!(data.cast.iter().any(|c| c.movie_id == 1234));
    }

    #[test]
    fn cast_section_is_optional() {
        let data: SeedData = serde_json::from_str(
            r#"{"movies": [{"id": 1, "title": "Solo"}]}"#,
        )
        .unwrap();

        assert_eq!(data.movies.len(), 1);
        assert!(data.cast.is_empty());
    }
}
