//! Pingdom API access: client, wire models and errors.

pub mod client;
pub mod error;
pub mod models;

pub use client::{parse_base_url, PingdomApi, PingdomClient, DEFAULT_BASE_URL};
pub use error::PingdomError;
pub use models::{
    Check, CheckCounts, CheckList, CheckTag, ListChecksParams, ListTransactionChecksParams,
    TransactionCheck, TransactionCheckList,
};
