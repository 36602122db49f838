use aws_config::BehaviorVersion;
use aws_sdk_cognitoidentityprovider::types::AttributeType;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use lambda_http::http::StatusCode;
use lambda_http::{
    run, service_fn, Error as LambdaError, Request as LambdaRequest, Response as LambdaResponse,
};
use serde::{Deserialize, Serialize};
use tracing::info;

mod common;
use crate::common::config::Config;
use crate::common::errors::Error;
use crate::common::utils::{extract_request, json_response};

#[derive(Debug, Deserialize)]
struct Request {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    pub user_sub: String,
    pub user_confirmed: bool,
}

/// Register a new principal with the user pool. The provider is authoritative
/// for the whole identity lifecycle; nothing is persisted here.
async fn sign_up(
    request: Request,
    cognito: &CognitoClient,
    client_id: &str,
) -> Result<Response, Error> {
    let email = AttributeType::builder()
        .name("email")
        .value(&request.email)
        .build()
        .map_err(Box::new)?;

    let output = cognito
        .sign_up()
        .client_id(client_id)
        .username(&request.username)
        .password(&request.password)
        .user_attributes(email)
        .send()
        .await
        .map_err(|err| Error::internal(format!("SignUp failed: {err:?}")))?;

    Ok(Response {
        user_sub: output.user_sub().to_string(),
        user_confirmed: output.user_confirmed(),
    })
}

// The request body carries a password, so nothing from it is recorded on the
// span.
#[tracing::instrument(skip_all)]
async fn process_request(
    request: LambdaRequest,
    cognito: &CognitoClient,
    config: &Config,
) -> Result<LambdaResponse<String>, Error> {
    let signup_request = extract_request::<Request>(&request)?;
    let client_id = config
        .user_pool_client_id
        .as_deref()
        .ok_or_else(|| Error::internal("COGNITO_CLIENT_ID is not configured"))?;

    info!("Registering user {}", signup_request.username);
    let response = sign_up(signup_request, cognito, client_id).await?;

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
    let cognito = CognitoClient::new(&aws_config);

    run(service_fn(|request: LambdaRequest| async {
        let result = process_request(request, &cognito, &config).await;

        match result {
            Ok(val) => Ok(val),
            Err(Error::HttpError(val)) => Ok(val),
            Err(Error::LambdaError(err)) => Err(err),
        }
    }))
    .await
}
