pub mod config;
pub mod conversions;
pub mod errors;
pub mod store;
pub mod utils;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog record. `id` is the table's numeric partition key; everything
/// besides `id` and `title` is carried verbatim through the flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// One row of the cast table: composite key (movieId, actorName), with a
/// provisioning-time sort index on roleName.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastEntry {
    pub movie_id: i64,
    pub actor_name: String,
    pub role_name: String,
}
