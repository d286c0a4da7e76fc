//! Agent records as served by the directory.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::grouping::UNCATEGORIZED;

/// How an agent can be accessed.
///
/// Values outside the known set are kept verbatim in `Other` so that filter
/// matching stays exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessModel {
    OpenSource,
    ClosedSource,
    Api,
    Other(String),
    #[default]
    Unspecified,
}

impl AccessModel {
    /// Wire label for this access model.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenSource => "Open Source",
            Self::ClosedSource => "Closed Source",
            Self::Api => "API",
            Self::Other(label) => label,
            Self::Unspecified => "",
        }
    }
}

impl From<String> for AccessModel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Open Source" => Self::OpenSource,
            "Closed Source" => Self::ClosedSource,
            "API" => Self::Api,
            "" => Self::Unspecified,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for AccessModel {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<AccessModel> for String {
    fn from(model: AccessModel) -> Self {
        model.as_str().to_string()
    }
}

impl fmt::Display for AccessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an agent is priced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Other(String),
    #[default]
    Unspecified,
}

impl PricingModel {
    /// Wire label for this pricing model.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Paid",
            Self::Other(label) => label,
            Self::Unspecified => "",
        }
    }
}

impl From<String> for PricingModel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Free" => Self::Free,
            "Freemium" => Self::Freemium,
            "Paid" => Self::Paid,
            "" => Self::Unspecified,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for PricingModel {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<PricingModel> for String {
    fn from(model: PricingModel) -> Self {
        model.as_str().to_string()
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation status. Only `Accepted` agents are publicly listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentStatus {
    Requested,
    Accepted,
    Rejected,
    OnHold,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A listed AI agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AgentRecord")]
pub struct Agent {
    /// Opaque unique identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Category (open set); empty when the record has none
    pub category: String,
    /// Industry (open set); empty when the record has none
    pub industry: String,
    pub access_model: AccessModel,
    pub pricing_model: PricingModel,
    /// Free-form price text from older records, e.g. "$99/month"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Tags in display order
    pub tags: Vec<String>,
    /// Like counter
    pub likes: u64,
    /// Wishlist counter
    pub saved_by_count: u64,
    /// Popularity score used by the popularity sort
    pub popularity_score: Option<f64>,
    /// Moderation status
    pub status: AgentStatus,
    pub short_description: Option<String>,
    pub website_url: Option<String>,
    pub logo: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
}

/// Agent as it appears on the wire.
///
/// Records may carry both `_id` and `id`, and older ones carry a `price`
/// string next to or instead of `pricingModel`. Each key gets its own slot
/// and [`Agent`] is assembled from them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    industry: String,
    #[serde(default, deserialize_with = "null_as_default")]
    access_model: AccessModel,
    #[serde(default)]
    pricing_model: Option<PricingModel>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    saved_by_count: u64,
    #[serde(default)]
    popularity_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: AgentStatus,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    website_url: Option<String>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
}

impl TryFrom<AgentRecord> for Agent {
    type Error = String;

    fn try_from(record: AgentRecord) -> Result<Self, Self::Error> {
        let id = record
            .object_id
            .or(record.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;

        let pricing_model = match record.pricing_model {
            Some(model) if model != PricingModel::Unspecified => model,
            _ => record
                .price
                .as_deref()
                .map(PricingModel::from)
                .unwrap_or_default(),
        };

        Ok(Self {
            id,
            name: record.name,
            category: record.category,
            industry: record.industry,
            access_model: record.access_model,
            pricing_model,
            price: record.price,
            tags: record.tags,
            likes: record.likes,
            saved_by_count: record.saved_by_count,
            popularity_score: record.popularity_score,
            status: record.status,
            short_description: record.short_description,
            website_url: record.website_url,
            logo: record.logo,
            thumbnail: record.thumbnail,
            video_url: record.video_url,
        })
    }
}

impl Agent {
    /// Create an accepted agent with empty descriptive fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            industry: String::new(),
            access_model: AccessModel::Unspecified,
            pricing_model: PricingModel::Unspecified,
            price: None,
            tags: Vec::new(),
            likes: 0,
            saved_by_count: 0,
            popularity_score: None,
            status: AgentStatus::Accepted,
            short_description: None,
            website_url: None,
            logo: None,
            thumbnail: None,
            video_url: None,
        }
    }

    /// Popularity score with absent treated as zero.
    #[must_use]
    pub fn popularity(&self) -> f64 {
        self.popularity_score.unwrap_or(0.0)
    }

    /// Category used for grouping.
    #[must_use]
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }

    /// Whether the agent may appear in public listings.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status == AgentStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_deserialize() {
        let json = r#"{
            "_id": "65f1c0a2",
            "name": "CodePilot",
            "category": "Coding",
            "industry": "Tech",
            "accessModel": "API",
            "pricingModel": "Freemium",
            "tags": ["ide", "review"],
            "likes": 12,
            "savedByCount": 3,
            "popularityScore": 87.5,
            "status": "accepted",
            "logo": "https://cdn.example/logo.png"
        }"#;

        let agent: Agent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(agent.id, "65f1c0a2");
        assert_eq!(agent.access_model, AccessModel::Api);
        assert_eq!(agent.pricing_model, PricingModel::Freemium);
        assert_eq!(agent.tags, vec!["ide", "review"]);
        assert_eq!(agent.likes, 12);
        assert_eq!(agent.saved_by_count, 3);
        assert!(agent.is_listed());
        assert!(agent.video_url.is_none());
    }

    #[test]
    fn test_agent_defaults_for_sparse_record() {
        let json = r#"{
            "id": "a-1",
            "name": "Sparse",
            "category": null,
            "likes": null,
            "price": "Paid",
            "status": "onHold"
        }"#;

        let agent: Agent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(agent.category, "");
        assert_eq!(agent.category_label(), UNCATEGORIZED);
        assert_eq!(agent.likes, 0);
        assert_eq!(agent.pricing_model, PricingModel::Paid);
        assert_eq!(agent.access_model, AccessModel::Unspecified);
        assert_eq!(agent.status, AgentStatus::OnHold);
        assert!(!agent.is_listed());
        assert!((agent.popularity() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_labels_are_kept_verbatim() {
        let json = r#"{
            "_id": "a-2",
            "name": "Odd",
            "accessModel": "Hybrid",
            "pricingModel": "Subscription",
            "status": "archived"
        }"#;

        let agent: Agent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(agent.access_model, AccessModel::Other("Hybrid".to_string()));
        assert_eq!(agent.pricing_model.as_str(), "Subscription");
        assert_eq!(agent.status, AgentStatus::Unknown);
    }

    #[test]
    fn test_object_id_and_id_together() {
        let json = r#"{ "_id": "a-1", "id": "a-1", "name": "Virtuals", "status": "accepted" }"#;

        let agent: Agent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(agent.id, "a-1");
    }

    #[test]
    fn test_price_text_next_to_pricing_model() {
        let json = r#"{
            "_id": "a-1",
            "name": "Legacy",
            "status": "accepted",
            "pricingModel": "Paid",
            "price": "$99/month"
        }"#;

        let agent: Agent = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(agent.pricing_model, PricingModel::Paid);
        assert_eq!(agent.price.as_deref(), Some("$99/month"));

        let reencoded = serde_json::to_value(&agent).expect("Should serialize");
        assert_eq!(reencoded["_id"], "a-1");
        assert_eq!(reencoded["price"], "$99/month");
    }

    #[test]
    fn test_record_without_any_id_is_rejected() {
        let json = r#"{ "name": "Nameless" }"#;
        let err = serde_json::from_str::<Agent>(json).unwrap_err();
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_record_without_name_is_rejected() {
        let json = r#"{ "_id": "a-3" }"#;
        assert!(serde_json::from_str::<Agent>(json).is_err());
    }

    #[test]
    fn test_labels_round_trip_through_string() {
        for label in ["Open Source", "Closed Source", "API"] {
            assert_eq!(AccessModel::from(label).as_str(), label);
        }
        for label in ["Free", "Freemium", "Paid"] {
            assert_eq!(PricingModel::from(label).to_string(), label);
        }
    }
}
