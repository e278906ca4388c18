//! `<provider>_checks`: Pingdom standard uptime checks.

use serde_json::Value;
use tracing::debug;

use super::model::{checks_schema, ChecksState, Page, PageInfo};
use super::{begin_read, configure_api, DataSource, ProviderData, SharedApi};
use crate::error::ProviderError;
use crate::pingdom::{models::tag_filter, ListChecksParams, PingdomError};
use crate::schema::{Diagnostic, Schema};

/// Page size requested from `GET /checks`; the API maximum.
pub const PAGE_SIZE: u32 = 25000;

/// Data source listing standard checks.
#[derive(Default)]
pub struct ChecksDataSource {
    api: Option<SharedApi>,
}

impl ChecksDataSource {
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
impl DataSource for ChecksDataSource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_checks", provider_type_name)
    }

    fn schema(&self) -> Schema {
        checks_schema("Lists Pingdom uptime checks")
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Vec<Diagnostic> {
        configure_api(&mut self.api, provider_data)
    }

    async fn read(&self, config: Value) -> Result<Value, ProviderError> {
        let (api, config) = begin_read(self.api.as_ref(), config)?;

        let requested = Page::first(PAGE_SIZE);
        let params = ListChecksParams {
            include_tags: Some(true),
            limit: Some(requested.limit),
            offset: Some(requested.offset),
            tags: tag_filter(config.tags.as_deref()),
        };
        debug!(tags = ?params.tags, "listing checks");

        let response = api.list_checks(&params).await?;
        let checks = response
            .checks
            .ok_or(PingdomError::MissingPayload("a checks list"))?;
        debug!(count = checks.len(), "received checks");

        // The list endpoint reports counts, not the page it applied
        ChecksState::assemble(config.tags, &checks, PageInfo::default(), requested).to_value()
    }
}
