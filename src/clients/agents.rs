//! Agents resource client.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{Agent, FilterOptions};

/// Client for agent listing operations.
pub struct AgentsClient {
    transport: Arc<HttpTransport>,
}

impl AgentsClient {
    /// Create a new agents client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List every agent in the directory, whatever its moderation status.
    ///
    /// Records that cannot be decoded are skipped with a warning rather than
    /// failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list.
    pub async fn list(&self) -> Result<Vec<Agent>, Error> {
        let response: Value = self.transport.get(&["agents", "all"]).await?;
        decode_agents(response)
    }

    /// Get the option lists for the four filter dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn filters(&self) -> Result<FilterOptions, Error> {
        self.transport.get(&["agents", "filters"]).await
    }
}

/// Decode an agent listing, accepting either a bare array or `{ "data": [...] }`.
pub(crate) fn decode_agents(response: Value) -> Result<Vec<Agent>, Error> {
    let records = match response {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => return Err(Error::Http("Missing agent list in response".to_string())),
        },
        _ => return Err(Error::Http("Expected an agent list in response".to_string())),
    };

    let total = records.len();
    let agents: Vec<Agent> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Agent>(record) {
            Ok(agent) => Some(agent),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed agent record");
                None
            }
        })
        .collect();

    if agents.len() < total {
        warn!(
            skipped = total - agents.len(),
            total, "Agent listing contained malformed records"
        );
    }

    Ok(agents)
}
