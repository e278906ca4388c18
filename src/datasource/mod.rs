//! Read-only data sources.
//!
//! Each data source goes through the host's four phases: [`DataSource::metadata`]
//! names it, [`DataSource::schema`] declares its attributes,
//! [`DataSource::configure`] hands it the provider's shared client, and
//! [`DataSource::read`] turns configuration into state.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ProviderError;
use crate::pingdom::PingdomApi;
use crate::schema::{Diagnostic, Schema};

pub mod checks;
pub mod model;
pub mod transaction_checks;

pub use checks::ChecksDataSource;
pub use model::{CheckValue, ChecksConfig, ChecksState, Page, PageInfo};
pub use transaction_checks::TransactionChecksDataSource;

/// Data the provider shares with every data source after it is configured.
///
/// Kept type-erased the way the host framework passes it; data sources check
/// the concrete type in [`DataSource::configure`].
pub type ProviderData = Arc<dyn Any + Send + Sync>;

/// The authenticated client data sources expect inside [`ProviderData`].
pub type SharedApi = Arc<dyn PingdomApi>;

/// Constructor registered with the provider for one data source type.
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

/// A read-only data source.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name of the data source for the given provider type name.
    fn metadata(&self, provider_type_name: &str) -> String;

    /// Configuration and state schema.
    fn schema(&self) -> Schema;

    /// Receive the provider's shared data.
    ///
    /// `None` means the provider hasn't been configured (yet); that is not an
    /// error here, the data source simply stays unconfigured.
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Vec<Diagnostic>;

    /// Read the data source, returning the full state object.
    async fn read(&self, config: Value) -> Result<Value, ProviderError>;
}

/// Extract the shared client from provider data.
///
/// Wrong-typed data is reported instead of silently leaving the data source
/// without a client.
pub(crate) fn shared_api(
    provider_data: Option<&ProviderData>,
) -> Result<Option<SharedApi>, Diagnostic> {
    let Some(data) = provider_data else {
        return Ok(None);
    };
    match data.downcast_ref::<SharedApi>() {
        Some(api) => Ok(Some(Arc::clone(api))),
        None => Err(Diagnostic::error("Unexpected Data Source Configure Type")
            .with_detail(
                "Expected an authenticated Pingdom client as provider data. \
                 This is a bug in the provider, please report it.",
            )),
    }
}

/// Store the client from provider data in `slot`, reporting wrong-typed data.
pub(crate) fn configure_api(
    slot: &mut Option<SharedApi>,
    provider_data: Option<&ProviderData>,
) -> Vec<Diagnostic> {
    match shared_api(provider_data) {
        Ok(api) => {
            *slot = api;
            Vec::new()
        }
        Err(diag) => vec![diag],
    }
}

/// Common start of every read: the configured client and the decoded filter.
pub(crate) fn begin_read(
    api: Option<&SharedApi>,
    config: Value,
) -> Result<(&SharedApi, ChecksConfig), ProviderError> {
    let api = api.ok_or_else(|| {
        ProviderError::NotConfigured(
            "the Pingdom client is not available, configure the provider first".to_string(),
        )
    })?;
    Ok((api, ChecksConfig::decode(config)?))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::Value;

    use super::{ProviderData, SharedApi};
    use crate::pingdom::{
        CheckList, ListChecksParams, ListTransactionChecksParams, PingdomApi, PingdomError,
        TransactionCheckList,
    };

    /// Canned reply for [`MockApi`].
    pub(crate) enum Reply {
        Json(Value),
        Fail { status: u16, message: &'static str },
    }

    /// In-memory Pingdom API that records the query of every call.
    pub(crate) struct MockApi {
        reply: Reply,
        pub(crate) calls: Mutex<Vec<Value>>,
    }

    impl MockApi {
        pub(crate) fn json(body: Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::Json(body),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn failing(status: u16, message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Reply::Fail { status, message },
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn provider_data(self: &Arc<Self>) -> ProviderData {
            let api: SharedApi = self.clone();
            Arc::new(api)
        }

        fn respond<T: DeserializeOwned, Q: Serialize>(&self, query: &Q) -> Result<T, PingdomError> {
            self.calls
                .lock()
                .unwrap()
                .push(serde_json::to_value(query).unwrap());
            match &self.reply {
                Reply::Json(body) => Ok(serde_json::from_value(body.clone())?),
                Reply::Fail { status, message } => Err(PingdomError::Status {
                    status: *status,
                    message: message.to_string(),
                }),
            }
        }
    }

    #[async_trait::async_trait]
    impl PingdomApi for MockApi {
        async fn list_checks(&self, params: &ListChecksParams) -> Result<CheckList, PingdomError> {
            self.respond(params)
        }

        async fn list_transaction_checks(
            &self,
            params: &ListTransactionChecksParams,
        ) -> Result<TransactionCheckList, PingdomError> {
            self.respond(params)
        }
    }
}
