//! The Pingdom provider.
//!
//! [`PingdomProvider`] resolves the API token, builds the one shared
//! [`PingdomClient`] at configure time and hands it to every data source it
//! instantiates for a read.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::datasource::{
    ChecksDataSource, DataSource, DataSourceFactory, ProviderData, SharedApi,
    TransactionChecksDataSource,
};
use crate::error::ProviderError;
use crate::pingdom::{PingdomClient, PingdomError};
use crate::schema::{Attribute, Diagnostic, ProviderSchema, Schema};
use crate::server::ProviderService;
use crate::types::ProviderMetadata;

/// Provider type name; prefix of every data source name.
pub const TYPE_NAME: &str = "pingdom";

/// Environment variable consulted when `api_token` isn't configured.
pub const TOKEN_ENV_VAR: &str = "PINGDOM_API_TOKEN";

/// The provider configuration block.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PingdomProviderConfig {
    /// Base URL of the Pingdom API.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer token.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl PingdomProviderConfig {
    /// Decode the host's configuration object; `null` means an empty block.
    pub fn decode(config: Value) -> Result<Self, ProviderError> {
        if config.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(config).map_err(|e| {
            ProviderError::Validation(format!("invalid provider configuration: {}", e))
        })
    }

    /// The configured endpoint, if any. Blank counts as unset.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Pick the token: the configured value, else `env_value`.
    ///
    /// Surrounding whitespace is dropped and blank counts as unset.
    pub fn resolve_token(&self, env_value: Option<String>) -> Option<String> {
        fn trimmed(token: &str) -> Option<String> {
            Some(token.trim()).filter(|t| !t.is_empty()).map(str::to_string)
        }
        self.api_token
            .as_deref()
            .and_then(trimmed)
            .or_else(|| env_value.as_deref().and_then(trimmed))
    }
}

impl fmt::Debug for PingdomProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingdomProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Provider exposing Pingdom checks as data sources.
pub struct PingdomProvider {
    version: String,
    token_env_var: String,
    data: RwLock<Option<ProviderData>>,
}

impl PingdomProvider {
    /// An unconfigured provider reporting `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            token_env_var: TOKEN_ENV_VAR.to_string(),
            data: RwLock::new(None),
        }
    }

    /// Read the fallback token from `name` instead of [`TOKEN_ENV_VAR`].
    pub fn with_token_env_var(mut self, name: impl Into<String>) -> Self {
        self.token_env_var = name.into();
        self
    }

    /// Constructors of every data source the provider offers.
    pub fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![ChecksDataSource::boxed, TransactionChecksDataSource::boxed]
    }

    /// Resource type names. This provider has none.
    pub fn resources(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether a configure call has succeeded.
    pub async fn is_configured(&self) -> bool {
        self.data.read().await.is_some()
    }

    fn data_source(&self, type_name: &str) -> Result<Box<dyn DataSource>, ProviderError> {
        self.data_sources()
            .into_iter()
            .map(|factory| factory())
            .find(|ds| ds.metadata(TYPE_NAME) == type_name)
            .ok_or_else(|| ProviderError::UnknownDataSource(type_name.to_string()))
    }

    /// Build the shared client, or the diagnostics explaining why not.
    fn build_client(&self, config: &PingdomProviderConfig) -> Result<SharedApi, Vec<Diagnostic>> {
        let env_token = std::env::var(&self.token_env_var).ok();
        let Some(token) = config.resolve_token(env_token) else {
            return Err(vec![Diagnostic::error("Missing API Token")
                .with_detail(format!(
                    "The provider cannot create the Pingdom API client without a token. \
                     Set the api_token attribute in the provider block or the {} \
                     environment variable.",
                    self.token_env_var
                ))
                .with_attribute("api_token")]);
        };

        match PingdomClient::new(config.endpoint(), &token) {
            Ok(client) => {
                info!(endpoint = %client.base_url(), "Pingdom client configured");
                Ok(Arc::new(client))
            }
            Err(e @ PingdomError::InvalidEndpoint { .. }) => Err(vec![Diagnostic::error(
                "Invalid Pingdom Endpoint",
            )
            .with_detail(e.to_string())
            .with_attribute("endpoint")]),
            Err(e @ PingdomError::InvalidToken) => Err(vec![Diagnostic::error("Invalid API Token")
                .with_detail(e.to_string())
                .with_attribute("api_token")]),
            Err(e) => Err(vec![
                Diagnostic::error("Unable to Create Pingdom API Client").with_detail(e.to_string())
            ]),
        }
    }
}

fn provider_config_schema() -> Schema {
    Schema::v0()
        .with_attribute(
            "endpoint",
            Attribute::optional_string().with_description("Pingdom API endpoint"),
        )
        .with_attribute(
            "api_token",
            Attribute::optional_string()
                .sensitive()
                .with_description("Pingdom API token for authentication"),
        )
}

#[async_trait::async_trait]
impl ProviderService for PingdomProvider {
    fn schema(&self) -> ProviderSchema {
        self.data_sources().into_iter().map(|factory| factory()).fold(
            ProviderSchema::new().with_provider_config(provider_config_schema()),
            |schema, ds| schema.with_data_source(ds.metadata(TYPE_NAME), ds.schema()),
        )
    }

    fn metadata(&self) -> ProviderMetadata {
        let mut data_sources: Vec<String> = self
            .data_sources()
            .into_iter()
            .map(|factory| factory().metadata(TYPE_NAME))
            .collect();
        data_sources.sort();
        ProviderMetadata {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
            resources: self.resources(),
            data_sources,
        }
    }

    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        // Any failed configure leaves the provider unconfigured.
        let mut data = self.data.write().await;
        *data = None;

        let config = PingdomProviderConfig::decode(config)?;
        debug!(?config, "configuring provider");

        match self.build_client(&config) {
            Ok(api) => {
                *data = Some(Arc::new(api));
                Ok(vec![])
            }
            Err(diagnostics) => {
                warn!(diagnostics = diagnostics.len(), "provider configuration failed");
                Ok(diagnostics)
            }
        }
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let mut data_source = self.data_source(data_source_type)?;

        let provider_data = self.data.read().await.clone();
        let diagnostics = data_source.configure(provider_data.as_ref());
        if let Some(diag) = diagnostics.into_iter().find(Diagnostic::is_error) {
            let message = match diag.detail {
                Some(detail) => format!("{}: {}", diag.summary, detail),
                None => diag.summary,
            };
            return Err(ProviderError::Configuration(message));
        }

        data_source.read(config).await
    }
}
