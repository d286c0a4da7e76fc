//! Boundary contract with the agent directory service.

use async_trait::async_trait;

use crate::error::Error;
use crate::types::{Agent, FilterOptions, ToggleResponse, User};

/// Remote operations the collection view model depends on.
///
/// [`crate::DirectoryClient`] talks to the real service over HTTP;
/// [`crate::testing::MockDirectory`] is a scripted in-memory stand-in.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Every agent record, regardless of moderation status.
    async fn list_agents(&self) -> Result<Vec<Agent>, Error>;

    /// Toggle the caller's like on an agent.
    async fn like(&self, agent_id: &str) -> Result<ToggleResponse, Error>;

    /// Toggle an agent's membership in the caller's wishlist.
    async fn toggle_wishlist(&self, agent_id: &str) -> Result<ToggleResponse, Error>;

    /// Option lists for the filter dimensions.
    async fn filter_options(&self) -> Result<FilterOptions, Error>;

    /// The signed-in user, if any.
    async fn current_user(&self) -> Result<Option<User>, Error>;

    /// Agents the signed-in user has liked.
    async fn liked_agents(&self) -> Result<Vec<Agent>, Error>;

    /// Agents in the signed-in user's wishlist.
    async fn wishlist(&self) -> Result<Vec<Agent>, Error>;
}
