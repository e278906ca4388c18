//! `<provider>_transaction_checks`: Pingdom transaction (TMS) checks.

use serde_json::Value;
use tracing::debug;

use super::model::{checks_schema, ChecksState, Page, PageInfo};
use super::{begin_read, configure_api, DataSource, ProviderData, SharedApi};
use crate::error::ProviderError;
use crate::pingdom::{models::tag_filter, ListTransactionChecksParams, PingdomError};
use crate::schema::{Diagnostic, Schema};

/// Page size requested from `GET /tms/check`; the API maximum.
pub const PAGE_SIZE: u32 = 1000;

/// Data source listing transaction checks.
#[derive(Default)]
pub struct TransactionChecksDataSource {
    api: Option<SharedApi>,
}

impl TransactionChecksDataSource {
    /// An unconfigured instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory registered with the provider.
    pub fn boxed() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

#[async_trait::async_trait]
impl DataSource for TransactionChecksDataSource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_transaction_checks", provider_type_name)
    }

    fn schema(&self) -> Schema {
        checks_schema("Lists Pingdom transaction checks")
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Vec<Diagnostic> {
        configure_api(&mut self.api, provider_data)
    }

    async fn read(&self, config: Value) -> Result<Value, ProviderError> {
        let (api, config) = begin_read(self.api.as_ref(), config)?;

        let requested = Page::first(PAGE_SIZE);
        let params = ListTransactionChecksParams {
            extended_tags: Some(false),
            limit: Some(requested.limit),
            offset: Some(requested.offset),
            tags: tag_filter(config.tags.as_deref()),
        };
        debug!(tags = ?params.tags, limit = requested.limit, "listing transaction checks");

        let response = api.list_transaction_checks(&params).await?;
        let checks = response
            .checks
            .ok_or(PingdomError::MissingPayload("a checks list"))?;
        debug!(count = checks.len(), "received transaction checks");

        let reported = PageInfo {
            limit: response.limit,
            offset: response.offset,
        };
        ChecksState::assemble(config.tags, &checks, reported, requested).to_value()
    }
}
