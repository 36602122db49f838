const MOVIES_TABLE_DEFAULT: &str = "movies-table";

/// Deployment-time parameters, read from the environment once in `main` and
/// passed into the handler. Handlers never read the environment mid-request.
#[derive(Debug, Clone)]
pub struct Config {
    pub movies_table: String,
    /// Absent when the deployment declares no cast table; the optional join
    /// in `get-movie` is skipped in that case.
    pub cast_table: Option<String>,
    pub user_pool_id: Option<String>,
    pub user_pool_client_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            movies_table: std::env::var("MOVIES_TABLE")
                .unwrap_or(MOVIES_TABLE_DEFAULT.into()),
            cast_table: std::env::var("CAST_TABLE").ok(),
            user_pool_id: std::env::var("COGNITO_USER_POOL_ID").ok(),
            user_pool_client_id: std::env::var("COGNITO_CLIENT_ID").ok(),
        }
    }
}
