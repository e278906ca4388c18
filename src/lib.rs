//! Pingdom provider plugin
//!
//! Exposes Pingdom monitoring checks as read-only data sources over the
//! `provider.v1` gRPC protocol (`proto/provider.proto`). This is the crate's
//! own plugin protocol, not Terraform's `tfplugin6`; a host must speak
//! `provider.v1` to load it.
//!
//! - `pingdom_checks`: standard uptime checks
//! - `pingdom_transaction_checks`: transaction (TMS) checks
//!
//! Both accept an optional `tags` filter and produce an ordered `checks` list
//! of `{name, id, region, active, tags}` objects, plus `limit`, `offset` and
//! `extended_tags`. Fields Pingdom leaves out come back as `null`.
//!
//! # Provider Configuration
//!
//! The host sends configuration as JSON:
//!
//! ```json
//! {"endpoint": "https://api.pingdom.com/api/3.1", "api_token": "..."}
//! ```
//!
//! Both attributes are optional; the token falls back to `PINGDOM_API_TOKEN`.
//! A read of `pingdom_transaction_checks` takes `{"tags": ["prod"]}`.
//!
//! # Handshake Protocol
//!
//! When the plugin starts via [`serve`], it prints one line to stdout:
//!
//! ```text
//! PINGDOM_PROVIDER|1|127.0.0.1:50051
//! ```
//!
//! Format: `PINGDOM_PROVIDER|<protocol_version>|<address>`
//!
//! # Provider Protocol
//!
//! - **GetMetadata**: type name, version and data source names
//! - **GetSchema**: provider config and data source schemas
//! - **ValidateProviderConfig** / **ValidateDataSourceConfig**: schema checks
//! - **Configure**: resolves the API token and builds the shared client
//! - **ReadDataSource**: lists checks and returns the state
//! - **Stop**: graceful shutdown

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod datasource;
pub mod error;
pub mod logging;
pub mod pingdom;
pub mod provider;
pub mod schema;
pub mod server;
pub mod testing;
pub mod types;
pub mod validation;

#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod generated;

// Re-export main types at crate root
pub use datasource::{DataSource, ProviderData};
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use pingdom::{PingdomApi, PingdomClient, PingdomError};
pub use provider::{PingdomProvider, PingdomProviderConfig};
pub use schema::ProviderSchema;
pub use server::{
    serve, serve_on, serve_on_with_options, serve_with_options, ProviderService, ServeOptions,
};
pub use types::{
    ProviderMetadata, HANDSHAKE_PREFIX, MAGIC_COOKIE_KEY, MAGIC_COOKIE_VALUE, PROTOCOL_VERSION,
};
pub use validation::validate;
