//! Wire models for the Pingdom 3.1 API.
//!
//! Every field is optional: the API omits fields freely and the provider
//! must never mistake an omitted value for a real one.

use serde::{Deserialize, Serialize};

/// A transaction (TMS) check as returned by `GET /tms/check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCheck {
    /// Check identifier.
    pub id: Option<i64>,
    /// Check name.
    pub name: Option<String>,
    /// Region the check runs from (e.g. `us-east`).
    pub region: Option<String>,
    /// Whether the check is enabled.
    pub active: Option<bool>,
    /// Tag names (plain strings unless `extended_tags` was requested).
    pub tags: Option<Vec<String>>,
    /// Last result status (`successful`, `failing`, ...).
    pub status: Option<String>,
    /// Run interval in minutes.
    pub interval: Option<i64>,
    /// Check type (`script`, `recording`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Creation time, unix seconds.
    pub created_at: Option<i64>,
    /// Last modification time, unix seconds.
    pub modified_at: Option<i64>,
}

/// One page of transaction checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCheckList {
    /// The checks on this page, in API order.
    pub checks: Option<Vec<TransactionCheck>>,
    /// Page size the API applied.
    pub limit: Option<i64>,
    /// Offset the API applied.
    pub offset: Option<i64>,
}

/// A tag attached to a standard check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckTag {
    /// Tag name.
    pub name: Option<String>,
    /// `u` for user-defined, `a` for automatic.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A standard uptime check as returned by `GET /checks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
    /// Check identifier.
    pub id: Option<i64>,
    /// Check name.
    pub name: Option<String>,
    /// Target host name.
    pub hostname: Option<String>,
    /// `up`, `down`, `unconfirmed_down`, `unknown` or `paused`.
    pub status: Option<String>,
    /// Check resolution in minutes.
    pub resolution: Option<i64>,
    /// Check type (`http`, `tcp`, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Tags, present when `include_tags=true` was requested.
    pub tags: Option<Vec<CheckTag>>,
}

/// Counters returned alongside the standard check list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCounts {
    /// Total number of checks on the account.
    pub total: Option<i64>,
    /// Number of checks after the limit was applied.
    pub limited: Option<i64>,
    /// Number of checks matching the filter.
    pub filtered: Option<i64>,
}

/// The standard check list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckList {
    /// The checks, in API order.
    pub checks: Option<Vec<Check>>,
    /// Result counters.
    pub counts: Option<CheckCounts>,
}

/// Error envelope used by every Pingdom endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub statusdesc: Option<String>,
    pub errormessage: Option<String>,
}

/// Query parameters for `GET /tms/check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListTransactionChecksParams {
    /// Return tags as objects instead of names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_tags: Option<bool>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Comma-separated tag filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Query parameters for `GET /checks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListChecksParams {
    /// Include tag objects in each check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<bool>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Comma-separated tag filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Join a tag filter the way Pingdom expects it; empty filters are dropped.
pub fn tag_filter(tags: Option<&[String]>) -> Option<String> {
    tags.filter(|tags| !tags.is_empty()).map(|tags| tags.join(","))
}
