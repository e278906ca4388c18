//! State model shared by the check data sources.
//!
//! [`CheckValue`] is the typed value of one check; the `From` impls are the
//! mapping from Pingdom records. [`ChecksState::assemble`] builds the full
//! state object from one page of records.
//!
//! Absent API fields stay `None` and are written as explicit `null`s, so an
//! unknown `active` is never confused with `active = false`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::pingdom::{Check, TransactionCheck};
use crate::schema::{Attribute, AttributeType, Schema};

/// One check in data source state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckValue {
    /// Check name.
    pub name: Option<String>,
    /// Check identifier.
    pub id: Option<i64>,
    /// Region the check runs from.
    pub region: Option<String>,
    /// Whether the check is enabled.
    pub active: Option<bool>,
    /// Tag names.
    pub tags: Option<Vec<String>>,
}

impl From<&TransactionCheck> for CheckValue {
    fn from(check: &TransactionCheck) -> Self {
        Self {
            name: check.name.clone(),
            id: check.id,
            region: check.region.clone(),
            active: check.active,
            tags: check.tags.clone(),
        }
    }
}

impl From<&Check> for CheckValue {
    fn from(check: &Check) -> Self {
        Self {
            name: check.name.clone(),
            id: check.id,
            // The standard check list carries no region
            region: None,
            active: check.status.as_deref().map(|status| status != "paused"),
            tags: check
                .tags
                .as_ref()
                .map(|tags| tags.iter().filter_map(|tag| tag.name.clone()).collect()),
        }
    }
}

/// Configuration accepted by the check data sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChecksConfig {
    /// Tag filter forwarded to Pingdom.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ChecksConfig {
    /// Decode the host's configuration object; `null` means an empty block.
    pub fn decode(config: Value) -> Result<Self, ProviderError> {
        if config.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(config).map_err(|e| {
            ProviderError::Validation(format!("invalid data source configuration: {}", e))
        })
    }
}

/// The page the provider asks Pingdom for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
}

impl Page {
    /// The first page of the given size.
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

/// Pagination as reported back by Pingdom, when it reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Reported page size.
    pub limit: Option<i64>,
    /// Reported offset.
    pub offset: Option<i64>,
}

/// Full state of a check data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksState {
    /// The tag filter, echoed from configuration.
    pub tags: Option<Vec<String>>,
    /// Checks in API order.
    pub checks: Vec<CheckValue>,
    /// Page size, rendered as a decimal string.
    pub limit: String,
    /// Page offset, rendered as a decimal string.
    pub offset: String,
    /// Whether tags were requested in extended form. Always false.
    pub extended_tags: bool,
}

impl ChecksState {
    /// Map a page of records into state, keeping their order.
    ///
    /// Pagination values the API didn't report fall back to what was requested.
    pub fn assemble<'a, T>(
        tags: Option<Vec<String>>,
        records: &'a [T],
        reported: PageInfo,
        requested: Page,
    ) -> Self
    where
        CheckValue: From<&'a T>,
    {
        Self {
            tags,
            checks: records.iter().map(CheckValue::from).collect(),
            limit: reported
                .limit
                .unwrap_or_else(|| i64::from(requested.limit))
                .to_string(),
            offset: reported
                .offset
                .unwrap_or_else(|| i64::from(requested.offset))
                .to_string(),
            extended_tags: false,
        }
    }

    /// Encode as the host's state object.
    pub fn to_value(&self) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Schema shared by the check data sources.
pub fn checks_schema(description: &str) -> Schema {
    let check_type = AttributeType::object([
        ("name", AttributeType::String),
        ("id", AttributeType::Int64),
        ("region", AttributeType::String),
        ("active", AttributeType::Bool),
        ("tags", AttributeType::list(AttributeType::String)),
    ]);

    Schema::v0()
        .with_description(description)
        .with_attribute(
            "tags",
            Attribute::optional_list(AttributeType::String)
                .with_description("Only return checks carrying one of these tags"),
        )
        .with_attribute(
            "checks",
            Attribute::computed_list(check_type)
                .with_description("Checks in the order Pingdom returned them"),
        )
        .with_attribute(
            "limit",
            Attribute::computed_string().with_description("Page size of the result"),
        )
        .with_attribute(
            "offset",
            Attribute::computed_string().with_description("Offset of the result page"),
        )
        .with_attribute(
            "extended_tags",
            Attribute::computed_bool()
                .with_description("Whether tags were returned in extended form"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pingdom::CheckTag;
    use serde_json::json;

    fn tms(name: &str) -> TransactionCheck {
        TransactionCheck {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_transaction_check_all_fields_present() {
        let check = TransactionCheck {
            id: Some(42),
            name: Some("checkout".to_string()),
            region: Some("us-east".to_string()),
            active: Some(true),
            tags: Some(vec!["prod".to_string()]),
            status: Some("successful".to_string()),
            ..Default::default()
        };

        let value = CheckValue::from(&check);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({
                "name": "checkout",
                "id": 42,
                "region": "us-east",
                "active": true,
                "tags": ["prod"]
            })
        );
    }

    #[test]
    fn test_transaction_check_absent_fields_are_null() {
        let value = CheckValue::from(&TransactionCheck::default());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"name": null, "id": null, "region": null, "active": null, "tags": null})
        );
    }

    #[test]
    fn test_inactive_is_not_unknown() {
        let check = TransactionCheck {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(CheckValue::from(&check).active, Some(false));
        assert_eq!(CheckValue::from(&TransactionCheck::default()).active, None);
    }

    #[test]
    fn test_standard_check_mapping() {
        let check = Check {
            id: Some(7),
            name: Some("homepage".to_string()),
            status: Some("paused".to_string()),
            tags: Some(vec![
                CheckTag {
                    name: Some("web".to_string()),
                    kind: Some("u".to_string()),
                },
                CheckTag::default(),
            ]),
            ..Default::default()
        };

        let value = CheckValue::from(&check);
        assert_eq!(value.id, Some(7));
        assert_eq!(value.region, None);
        assert_eq!(value.active, Some(false));
        assert_eq!(value.tags, Some(vec!["web".to_string()]));

        let up = Check {
            status: Some("up".to_string()),
            ..Default::default()
        };
        assert_eq!(CheckValue::from(&up).active, Some(true));
        assert_eq!(CheckValue::from(&Check::default()).active, None);
        assert_eq!(CheckValue::from(&Check::default()).tags, None);
    }

    #[test]
    fn test_assemble_preserves_order() {
        let records = vec![tms("A"), tms("B"), tms("C")];
        let state = ChecksState::assemble(None, &records, PageInfo::default(), Page::first(100));

        let names: Vec<_> = state
            .checks
            .iter()
            .map(|c| c.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_assemble_empty_page() {
        let records: Vec<TransactionCheck> = Vec::new();
        let reported = PageInfo {
            limit: Some(1000),
            offset: Some(0),
        };
        let state = ChecksState::assemble(None, &records, reported, Page::first(1000));

        assert!(state.checks.is_empty());
        assert_eq!(state.limit, "1000");
        assert_eq!(state.offset, "0");
        assert!(!state.extended_tags);
    }

    #[test]
    fn test_assemble_pagination_fallback() {
        let records = vec![tms("A")];
        let reported = PageInfo {
            limit: None,
            offset: Some(25),
        };
        let requested = Page {
            limit: 50,
            offset: 0,
        };
        let state = ChecksState::assemble(None, &records, reported, requested);

        assert_eq!(state.limit, "50");
        assert_eq!(state.offset, "25");
    }

    #[test]
    fn test_state_encoding_echoes_tags() {
        let state = ChecksState::assemble(
            Some(vec!["prod".to_string()]),
            &Vec::<TransactionCheck>::new(),
            PageInfo::default(),
            Page::first(10),
        );
        assert_eq!(
            state.to_value().unwrap(),
            json!({
                "tags": ["prod"],
                "checks": [],
                "limit": "10",
                "offset": "0",
                "extended_tags": false
            })
        );
    }

    #[test]
    fn test_config_decode() {
        assert_eq!(ChecksConfig::decode(Value::Null).unwrap(), ChecksConfig::default());

        let config = ChecksConfig::decode(json!({"tags": ["prod"], "checks": null})).unwrap();
        assert_eq!(config.tags, Some(vec!["prod".to_string()]));

        let err = ChecksConfig::decode(json!({"tags": "prod"})).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn test_schema_declares_outputs() {
        let schema = checks_schema("Pingdom checks");
        let attrs = &schema.block.attributes;
        assert!(attrs["tags"].flags.optional);
        for name in ["checks", "limit", "offset", "extended_tags"] {
            assert!(attrs[name].flags.computed, "{} should be computed", name);
        }
    }
}
