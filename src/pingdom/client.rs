//! HTTP client for the Pingdom 3.1 REST API.

use std::fmt;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::error::PingdomError;
use super::models::{CheckList, ListChecksParams, ListTransactionChecksParams, TransactionCheckList};

/// Base URL of the public Pingdom API.
pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com/api/3.1";

const USER_AGENT: &str = concat!("terraform-provider-pingdom/", env!("CARGO_PKG_VERSION"));

/// The Pingdom operations the data sources depend on.
///
/// [`PingdomClient`] is the production implementation; tests substitute
/// their own.
#[async_trait::async_trait]
pub trait PingdomApi: Send + Sync + 'static {
    /// List standard uptime checks (`GET /checks`).
    async fn list_checks(&self, params: &ListChecksParams) -> Result<CheckList, PingdomError>;

    /// List transaction checks (`GET /tms/check`).
    async fn list_transaction_checks(
        &self,
        params: &ListTransactionChecksParams,
    ) -> Result<TransactionCheckList, PingdomError>;
}

/// Authenticated Pingdom client.
///
/// The bearer token is installed as a default header on construction, so
/// every request carries it and the client itself never exposes it.
#[derive(Clone)]
pub struct PingdomClient {
    base_url: Url,
    http: Client,
}

impl PingdomClient {
    /// Build a client for `endpoint` (or [`DEFAULT_BASE_URL`]) authenticating with `api_token`.
    pub fn new(endpoint: Option<&str>, api_token: &str) -> Result<Self, PingdomError> {
        let base_url = parse_base_url(endpoint.unwrap_or(DEFAULT_BASE_URL))?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .map_err(|_| PingdomError::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { base_url, http })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, PingdomError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(%url, "sending Pingdom API request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "Pingdom API responded");

        if !status.is_success() {
            return Err(PingdomError::from_response(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl PingdomApi for PingdomClient {
    async fn list_checks(&self, params: &ListChecksParams) -> Result<CheckList, PingdomError> {
        self.get("checks", params).await
    }

    async fn list_transaction_checks(
        &self,
        params: &ListTransactionChecksParams,
    ) -> Result<TransactionCheckList, PingdomError> {
        self.get("tms/check", params).await
    }
}

impl fmt::Debug for PingdomClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingdomClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Validate an endpoint: absolute `http`/`https` URL with a host.
pub fn parse_base_url(endpoint: &str) -> Result<Url, PingdomError> {
    let invalid = |reason: String| PingdomError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }
    Ok(url)
}
