//! Like and wishlist resource client.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{Relation, ToggleResponse};

/// Client for the like and wishlist toggle endpoints.
pub struct EngagementClient {
    transport: Arc<HttpTransport>,
}

impl EngagementClient {
    /// Create a new engagement client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Toggle the caller's like on an agent.
    ///
    /// The same call adds the like or, when the caller already liked the
    /// agent, removes it; the response says which happened.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` without a valid session and
    /// `ApiError::Conflict` when the backend rejects a repeated like.
    pub async fn like(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.toggle(Relation::Like, agent_id).await
    }

    /// Toggle an agent's membership in the caller's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` without a valid session.
    pub async fn toggle_wishlist(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.toggle(Relation::Wishlist, agent_id).await
    }

    async fn toggle(&self, relation: Relation, agent_id: &str) -> Result<ToggleResponse, Error> {
        let route = match relation {
            Relation::Like => "like",
            Relation::Wishlist => "wishlist",
        };

        let (status, body): (_, Value) = self
            .transport
            .post(&["users", route, agent_id])
            .await?;
        ToggleResponse::from_wire(agent_id, relation, status.as_u16(), &body)
    }
}
