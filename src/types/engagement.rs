//! Like and wishlist toggle models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Relation a user can toggle on an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Like,
    Wishlist,
}

impl Relation {
    /// Field of the returned agent that carries the updated counter.
    #[must_use]
    pub fn count_field(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Wishlist => "savedByCount",
        }
    }
}

/// Effect of a toggle call on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleOutcome {
    /// The relation was created by this call.
    Added,
    /// The relation existed and this call removed it.
    Removed,
}

impl ToggleOutcome {
    /// Toggle endpoints answer 200 when the relation is added and 201 when
    /// it is removed.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200 => Some(Self::Added),
            201 => Some(Self::Removed),
            _ => None,
        }
    }
}

/// Server-confirmed result of a like or wishlist toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Agent the toggle applied to
    pub agent_id: String,
    /// Which relation was toggled
    pub relation: Relation,
    /// Added or removed
    pub outcome: ToggleOutcome,
    /// Authoritative counter value after the toggle
    pub count: u64,
}

impl ToggleResponse {
    /// Decode a toggle response from its status code and
    /// `{ "agent": { "likes" | "savedByCount": n } }` body.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` for an unexpected success status or a body
    /// without the counter.
    pub fn from_wire(
        agent_id: &str,
        relation: Relation,
        status: u16,
        body: &Value,
    ) -> Result<Self, Error> {
        let outcome = ToggleOutcome::from_status(status)
            .ok_or_else(|| Error::Http(format!("Unexpected toggle status: HTTP {status}")))?;

        let field = relation.count_field();
        let count = body
            .get("agent")
            .and_then(|agent| agent.get(field))
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Http(format!("Missing agent.{field} in response")))?;

        Ok(Self {
            agent_id: agent_id.to_string(),
            relation,
            outcome,
            count,
        })
    }
}
