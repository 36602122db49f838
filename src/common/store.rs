//! Thin data access layer over the two DynamoDB tables.
//!
//! Every method issues exactly one SDK call; there is no retry, caching, or
//! transaction logic here. Faults are flattened into `StoreError` and carried
//! verbatim to the 500 envelope.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::common::config::Config;
use crate::common::conversions::{item_to_cast, item_to_movie, movie_to_item};
use crate::common::{CastEntry, Movie};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Request(String),
    #[error("malformed item: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct MovieStore {
    client: Client,
    movies_table: String,
    cast_table: Option<String>,
}

impl MovieStore {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            movies_table: config.movies_table.clone(),
            cast_table: config.cast_table.clone(),
        }
    }

    pub fn has_cast_table(&self) -> bool {
        self.cast_table.is_some()
    }

    /// Fetch a movie by exact key. `None` means no such record.
    pub async fn get_movie(&self, movie_id: i64) -> Result<Option<Movie>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.movies_table)
            .key("id", AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Request(format!("GetItem failed: {err:?}")))?;

        match result.item {
            Some(item) => Ok(Some(item_to_movie(&item)?)),
            None => Ok(None),
        }
    }

    /// Full-table scan. Single call, no pagination; only correct for the
    /// bounded datasets this catalog holds.
    pub async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(&self.movies_table)
            .send()
            .await
            .map_err(|err| StoreError::Request(format!("Scan failed: {err:?}")))?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_movie).collect()
    }

    /// Unconditional write: an existing item with the same key is replaced.
    pub async fn put_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        let item = movie_to_item(movie)?;

        self.client
            .put_item()
            .table_name(&self.movies_table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| StoreError::Request(format!("PutItem failed: {err:?}")))?;

        Ok(())
    }

    /// Unconditional delete; deleting an absent key succeeds.
    pub async fn delete_movie(&self, movie_id: i64) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.movies_table)
            .key("id", AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Request(format!("DeleteItem failed: {err:?}")))?;

        Ok(())
    }

    /// All cast entries under a movie id, in the table's native sort order.
    pub async fn list_cast(&self, movie_id: i64) -> Result<Vec<CastEntry>, StoreError> {
        let cast_table = self
            .cast_table
            .as_deref()
            .ok_or_else(|| StoreError::Request("CAST_TABLE is not configured".to_string()))?;

        let result = self
            .client
            .query()
            .table_name(cast_table)
            .key_condition_expression("movieId = :movieId")
            .expression_attribute_values(":movieId", AttributeValue::N(movie_id.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Request(format!("Query failed: {err:?}")))?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_cast).collect()
    }
}
