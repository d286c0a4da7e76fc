//! Session resource client.

use std::sync::Arc;

use serde_json::Value;

use super::agents::decode_agents;
use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{Agent, User};

/// Client for the current session.
pub struct SessionClient {
    transport: Arc<HttpTransport>,
}

impl SessionClient {
    /// Create a new session client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the signed-in user, or `None` for an anonymous caller.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than a missing or rejected session.
    pub async fn current_user(&self) -> Result<Option<User>, Error> {
        let response: Value = match self.transport.get(&["users", "current_user"]).await {
            Ok(response) => response,
            Err(Error::Api(api)) if api.requires_auth() => return Ok(None),
            Err(e) => return Err(e),
        };

        match response.get("user") {
            None | Some(Value::Null) => Ok(None),
            Some(user) => Ok(Some(serde_json::from_value(user.clone())?)),
        }
    }

    /// Agents the signed-in user has liked.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` without a valid session.
    pub async fn liked_agents(&self) -> Result<Vec<Agent>, Error> {
        let response: Value = self.transport.get(&["users", "liked-agents"]).await?;
        agents_under(response, "likedAgents")
    }

    /// Agents in the signed-in user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` without a valid session.
    pub async fn wishlist(&self) -> Result<Vec<Agent>, Error> {
        let response: Value = self.transport.get(&["users", "wishlist"]).await?;
        agents_under(response, "wishlist")
    }
}

/// Pull the agent list stored under `key`. A missing or null list is empty.
fn agents_under(mut response: Value, key: &str) -> Result<Vec<Agent>, Error> {
    match response.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => decode_agents(list),
    }
}
