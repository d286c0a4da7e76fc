//! Directory API client.
//!
//! Provides the primary interface for talking to the agent directory service.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::{AgentsClient, EngagementClient, SessionClient};
use crate::error::Error;
use crate::service::DirectoryService;
use crate::transport::{HttpTransport, RetryConfig};
use crate::types::{Agent, FilterOptions, ToggleResponse, User};

/// Default base URL for the directory API.
pub const DEFAULT_BASE_URL: &str = "https://backend-1-sval.onrender.com/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main client for the directory API.
///
/// Aggregates the resource clients over one shared transport.
///
/// # Example
///
/// ```rust,ignore
/// use agent_directory::DirectoryClient;
///
/// let client = DirectoryClient::from_env()?;
/// let agents = client.agents().list().await?;
/// let liked = client.engagement().like(&agents[0].id).await?;
/// ```
pub struct DirectoryClient {
    transport: Arc<HttpTransport>,
    agents: AgentsClient,
    engagement: EngagementClient,
    session: SessionClient,
}

impl DirectoryClient {
    /// Create a new directory client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (default: [`DEFAULT_BASE_URL`])
    /// * `session` - Session cookie forwarded on every request
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Retry behavior for reads (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(
        base_url: Option<&str>,
        session: Option<&str>,
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(
            base_url,
            session,
            timeout,
            retry_config,
        )?);

        Ok(Self {
            agents: AgentsClient::new(Arc::clone(&transport)),
            engagement: EngagementClient::new(Arc::clone(&transport)),
            session: SessionClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `AGENT_DIRECTORY_BASE_URL` - Base URL for the API (optional)
    /// * `AGENT_DIRECTORY_SESSION` - Session cookie, e.g. `token=...` (optional)
    /// * `AGENT_DIRECTORY_TIMEOUT_SECS` - Request timeout in seconds (optional, default: 30)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with_config(None)
    }

    /// Create a client from environment variables with a custom retry policy.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env_with_config(retry_config: Option<RetryConfig>) -> Result<Self, Error> {
        let base_url = env::var("AGENT_DIRECTORY_BASE_URL").ok();
        let session = env::var("AGENT_DIRECTORY_SESSION").ok();

        let timeout = match env::var("AGENT_DIRECTORY_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Self::new(
            base_url.as_deref(),
            session.as_deref(),
            timeout,
            retry_config,
        )
    }

    /// Get the underlying HTTP transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Get the agents client.
    #[must_use]
    pub fn agents(&self) -> &AgentsClient {
        &self.agents
    }

    /// Get the like/wishlist client.
    #[must_use]
    pub fn engagement(&self) -> &EngagementClient {
        &self.engagement
    }

    /// Get the session client.
    #[must_use]
    pub fn session(&self) -> &SessionClient {
        &self.session
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn list_agents(&self) -> Result<Vec<Agent>, Error> {
        self.agents.list().await
    }

    async fn like(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.engagement.like(agent_id).await
    }

    async fn toggle_wishlist(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.engagement.toggle_wishlist(agent_id).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, Error> {
        self.agents.filters().await
    }

    async fn current_user(&self) -> Result<Option<User>, Error> {
        self.session.current_user().await
    }

    async fn liked_agents(&self) -> Result<Vec<Agent>, Error> {
        self.session.liked_agents().await
    }

    async fn wishlist(&self) -> Result<Vec<Agent>, Error> {
        self.session.wishlist().await
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Configuration(format!(
            "Invalid AGENT_DIRECTORY_TIMEOUT_SECS: {raw}. Must be a positive number of seconds"
        ))),
    }
}
