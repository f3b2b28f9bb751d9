//! Salesforce REST and Bulk API client
//!
//! Authenticates with the OAuth2 username-password flow or a pre-issued
//! access token, then serves [`PlatformApi`] over reqwest.

use super::api::PlatformApi;
use super::models::{
    ApiError, BatchInfo, BatchResultRow, BatchState, BulkApiError, JobInfo, JobRequest,
    JobStateRequest, OAuthError, ObjectDescribe, QueryResponse, TokenResponse, UpdateResult,
};
use crate::config::{secret_string, AuthType, SalesforceConfig, SecretString};
use crate::domain::{ObjectType, Record, Result, SalesforceError, SfVaultError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;
use zeroize::Zeroizing;

const SESSION_HEADER: &str = "X-SFDC-Session";

/// Authenticated Salesforce API client
///
/// # Example
///
/// ```no_run
/// use sfvault::adapters::salesforce::SalesforceClient;
/// use sfvault::config::load_config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("sfvault.toml")?;
/// let client = SalesforceClient::connect(&config.salesforce).await?;
/// # Ok(())
/// # }
/// ```
pub struct SalesforceClient {
    http: Client,
    instance_url: Url,
    access_token: SecretString,
    api_version: String,
    poll_interval: Duration,
}

impl SalesforceClient {
    /// Authenticate according to `config.auth_type` and build a client
    ///
    /// # Errors
    ///
    /// Returns a configuration error when credentials are missing, and
    /// `SalesforceError::AuthenticationFailed` when the login is rejected.
    pub async fn connect(config: &SalesforceConfig) -> Result<Self> {
        let http = build_http_client(config)?;

        match config.auth_type {
            AuthType::Token => {
                let instance_url = config.instance_url.as_deref().ok_or_else(|| {
                    SfVaultError::Configuration(
                        "salesforce.instance_url is required for token auth".to_string(),
                    )
                })?;
                let access_token = config.access_token.clone().ok_or_else(|| {
                    SfVaultError::Configuration(
                        "salesforce.access_token is required for token auth".to_string(),
                    )
                })?;

                tracing::info!(instance_url = %instance_url, "Using pre-issued access token");
                Self::from_parts(http, instance_url, access_token, config)
            }
            AuthType::Password => {
                let token = login_password(&http, config).await?;

                tracing::info!(
                    instance_url = %token.instance_url,
                    "Authenticated with Salesforce"
                );
                Self::from_parts(
                    http,
                    &token.instance_url,
                    secret_string(token.access_token),
                    config,
                )
            }
        }
    }

    /// Build a client around an existing session, skipping the login call
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `instance_url` is not a valid URL.
    pub fn with_access_token(
        instance_url: &str,
        access_token: SecretString,
        config: &SalesforceConfig,
    ) -> Result<Self> {
        Self::from_parts(build_http_client(config)?, instance_url, access_token, config)
    }

    fn from_parts(
        http: Client,
        instance_url: &str,
        access_token: SecretString,
        config: &SalesforceConfig,
    ) -> Result<Self> {
        let instance_url = Url::parse(instance_url).map_err(|e| {
            SfVaultError::Configuration(format!("Invalid instance URL '{instance_url}': {e}"))
        })?;

        Ok(Self {
            http,
            instance_url,
            access_token,
            api_version: config.api_version.clone(),
            poll_interval: Duration::from_millis(config.bulk_poll_interval_ms),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.instance_url.join(path).map_err(|e| {
            SalesforceError::InvalidResponse(format!("Cannot build URL from '{path}': {e}")).into()
        })
    }

    fn rest_path(&self) -> String {
        format!("/services/data/v{}", self.api_version)
    }

    fn bulk_job_path(&self) -> String {
        format!("/services/async/{}/job", self.api_version)
    }

    fn token(&self) -> &str {
        self.access_token.expose_secret().as_ref()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token())
            .send()
            .await
            .map_err(connection_error)?;

        parse_json(check_response(response).await?).await
    }

    async fn bulk_get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(SESSION_HEADER, self.token())
            .send()
            .await
            .map_err(connection_error)?;

        parse_json(check_response(response).await?).await
    }

    async fn bulk_post<T, B>(&self, url: Url, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(url)
            .header(SESSION_HEADER, self.token())
            .json(body)
            .send()
            .await
            .map_err(connection_error)?;

        parse_json(check_response(response).await?).await
    }

    async fn wait_for_batch(&self, mut batch: BatchInfo) -> Result<BatchInfo> {
        let url = self.endpoint(&format!(
            "{}/{}/batch/{}",
            self.bulk_job_path(),
            batch.job_id,
            batch.id
        ))?;

        while !batch.state.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            batch = self.bulk_get(url.clone()).await?;
            tracing::debug!(
                job_id = %batch.job_id,
                batch_id = %batch.id,
                state = ?batch.state,
                "Polled bulk batch"
            );
        }

        Ok(batch)
    }
}

#[async_trait]
impl PlatformApi for SalesforceClient {
    async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        let mut url = self.endpoint(&format!("{}/query", self.rest_path()))?;
        url.query_pairs_mut().append_pair("q", soql);

        let mut records = Vec::new();
        loop {
            let page: QueryResponse = self.get_json(url).await.map_err(query_error)?;
            records.extend(page.records);

            if page.done {
                break;
            }

            match page.next_records_url {
                Some(next) => url = self.endpoint(&next)?,
                None => {
                    return Err(SalesforceError::InvalidResponse(
                        "Query reported more records but returned no nextRecordsUrl".to_string(),
                    )
                    .into())
                }
            }
        }

        tracing::trace!(rows = records.len(), soql = %soql, "Query completed");
        Ok(records)
    }

    async fn describe(&self, object: &ObjectType) -> Result<ObjectDescribe> {
        let url = self.endpoint(&format!(
            "{}/sobjects/{}/describe",
            self.rest_path(),
            object
        ))?;

        self.get_json(url).await.map_err(|e| match e {
            SfVaultError::Salesforce(SalesforceError::ClientError { status, message }) => {
                SalesforceError::DescribeFailed {
                    object: object.to_string(),
                    message: format!("{status} - {message}"),
                }
                .into()
            }
            other => other,
        })
    }

    async fn bulk_update(&self, object: &ObjectType, rows: &[Record]) -> Result<Vec<UpdateResult>> {
        let jobs = self.bulk_job_path();

        let job: JobInfo = self
            .bulk_post(
                self.endpoint(&jobs)?,
                &JobRequest {
                    operation: "update",
                    object: object.as_str(),
                    content_type: "JSON",
                },
            )
            .await?;

        tracing::debug!(job_id = %job.id, object = %object, rows = rows.len(), "Created bulk job");

        let batch: BatchInfo = self
            .bulk_post(self.endpoint(&format!("{jobs}/{}/batch", job.id))?, rows)
            .await?;

        let _closed: JobInfo = self
            .bulk_post(
                self.endpoint(&format!("{jobs}/{}", job.id))?,
                &JobStateRequest { state: "Closed" },
            )
            .await?;

        let batch = self.wait_for_batch(batch).await?;
        if batch.state != BatchState::Completed {
            return Err(SalesforceError::BulkJobFailed(format!(
                "batch {} of job {} ended as {:?}: {}",
                batch.id,
                job.id,
                batch.state,
                batch.state_message.unwrap_or_default()
            ))
            .into());
        }

        let results: Vec<BatchResultRow> = self
            .bulk_get(self.endpoint(&format!("{jobs}/{}/batch/{}/result", job.id, batch.id))?)
            .await?;

        Ok(results.into_iter().map(UpdateResult::from).collect())
    }

    fn instance_url(&self) -> &str {
        self.instance_url.as_str()
    }
}

fn build_http_client(config: &SalesforceConfig) -> Result<Client> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(30));

    if !config.tls_verify {
        tracing::warn!("TLS certificate verification is disabled for Salesforce");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| SfVaultError::Configuration(format!("Failed to build HTTP client: {e}")))
}

async fn login_password(http: &Client, config: &SalesforceConfig) -> Result<TokenResponse> {
    let missing = |name: &str| {
        SfVaultError::Configuration(format!("salesforce.{name} is required for password auth"))
    };

    let client_id = config.client_id.as_deref().ok_or_else(|| missing("client_id"))?;
    let client_secret = config
        .client_secret
        .as_ref()
        .ok_or_else(|| missing("client_secret"))?;
    let username = config.username.as_deref().ok_or_else(|| missing("username"))?;
    let password = config.password.as_ref().ok_or_else(|| missing("password"))?;

    let mut login_secret = Zeroizing::new(password.expose_secret().to_string());
    if let Some(token) = &config.security_token {
        login_secret.push_str(token.expose_secret().as_ref());
    }

    let url = format!(
        "{}/services/oauth2/token",
        config.login_url.trim_end_matches('/')
    );

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "password"),
            ("client_id", client_id),
            ("client_secret", client_secret.expose_secret().as_ref()),
            ("username", username),
            ("password", login_secret.as_str()),
        ])
        .send()
        .await
        .map_err(connection_error)?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<OAuthError>(&body) {
            Ok(err) => match err.error_description {
                Some(desc) => format!("{}: {}", err.error, desc),
                None => err.error,
            },
            Err(_) => format!("{status}: {body}"),
        };
        return Err(SalesforceError::AuthenticationFailed(message).into());
    }

    parse_json(response).await
}

async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    Err(match status {
        StatusCode::UNAUTHORIZED => SalesforceError::AuthenticationFailed(message),
        s if s.is_server_error() => SalesforceError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => SalesforceError::ClientError {
            status: s.as_u16(),
            message,
        },
    }
    .into())
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| SalesforceError::InvalidResponse(e.to_string()).into())
}

/// Extract a readable message from a REST or Bulk API error body
fn error_message(body: &str) -> String {
    if let Ok(errors) = serde_json::from_str::<Vec<ApiError>>(body) {
        if !errors.is_empty() {
            return errors
                .into_iter()
                .map(|e| match e.error_code {
                    Some(code) => format!("{code}: {}", e.message),
                    None => e.message,
                })
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    if let Ok(err) = serde_json::from_str::<BulkApiError>(body) {
        return format!("{}: {}", err.exception_code, err.exception_message);
    }

    body.to_string()
}

fn connection_error(err: reqwest::Error) -> SfVaultError {
    SalesforceError::ConnectionFailed(err.to_string()).into()
}

fn query_error(err: SfVaultError) -> SfVaultError {
    match err {
        SfVaultError::Salesforce(SalesforceError::ClientError { status, message }) => {
            SalesforceError::QueryFailed(format!("{status} - {message}")).into()
        }
        other => other,
    }
}
