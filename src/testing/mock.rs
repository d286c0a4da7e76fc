//! Mock directory service for testing.
//!
//! Provides a `MockDirectory` that implements [`DirectoryService`] in memory
//! without making actual API calls. Likes and wishlist entries behave like
//! the real service: each call flips the caller's relation and moves the
//! counter by one.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ApiError, Error};
use crate::service::DirectoryService;
use crate::types::{Agent, FilterOptions, Relation, ToggleOutcome, ToggleResponse, User};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "agents.list", "engagement.like")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return
    pub data: Option<T>,
    /// Error to return instead of data
    pub error: Option<ApiError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            call_count: 0,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Create a new mock response with an error.
    pub fn with_error(error: ApiError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&mut self, default: T) -> Result<T, Error> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(Error::Api(error.clone()));
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Internal state for the mock service.
#[derive(Default)]
struct MockState {
    calls: Vec<MockCall>,
    agents: Vec<Agent>,
    likes: HashMap<String, u64>,
    saves: HashMap<String, u64>,
    liked: HashSet<String>,
    saved: HashSet<String>,
    list_response: Option<ApiError>,
    list_delay: Option<Duration>,
    like_failures: VecDeque<ApiError>,
    wishlist_failures: VecDeque<ApiError>,
    like_delays: VecDeque<Duration>,
    wishlist_delays: VecDeque<Duration>,
    filters_response: MockResponse<FilterOptions>,
    current_user: MockResponse<Option<User>>,
}

impl MockState {
    fn record_call(&mut self, method: &str, args: Vec<String>) {
        self.calls.push(MockCall::new(method, args));
    }

    fn toggle(&mut self, relation: Relation, agent_id: &str) -> Result<ToggleResponse, Error> {
        let queued = match relation {
            Relation::Like => self.like_failures.pop_front(),
            Relation::Wishlist => self.wishlist_failures.pop_front(),
        };
        if let Some(error) = queued {
            return Err(Error::Api(error));
        }

        let (members, counts) = match relation {
            Relation::Like => (&mut self.liked, &mut self.likes),
            Relation::Wishlist => (&mut self.saved, &mut self.saves),
        };

        let Some(count) = counts.get_mut(agent_id) else {
            return Err(Error::Api(ApiError::NotFound {
                code: "NOT_FOUND".to_string(),
                message: "Agent not found".to_string(),
                request_id: None,
            }));
        };

        let outcome = if members.remove(agent_id) {
            *count = count.saturating_sub(1);
            ToggleOutcome::Removed
        } else {
            members.insert(agent_id.to_string());
            *count += 1;
            ToggleOutcome::Added
        };

        Ok(ToggleResponse {
            agent_id: agent_id.to_string(),
            relation,
            outcome,
            count: *count,
        })
    }

    /// Snapshot of the agents whose ids are in `members`.
    fn snapshot_of(&self, members: &HashSet<String>) -> Vec<Agent> {
        self.snapshot()
            .into_iter()
            .filter(|agent| members.contains(&agent.id))
            .collect()
    }

    /// Agents as the service would currently report them.
    fn snapshot(&self) -> Vec<Agent> {
        self.agents
            .iter()
            .cloned()
            .map(|mut agent| {
                if let Some(&likes) = self.likes.get(&agent.id) {
                    agent.likes = likes;
                }
                if let Some(&saves) = self.saves.get(&agent.id) {
                    agent.saved_by_count = saves;
                }
                agent
            })
            .collect()
    }
}

/// In-memory directory service for tests.
///
/// Cloning shares the underlying state, so a test can keep a handle while
/// the store owns another.
#[derive(Clone, Default)]
pub struct MockDirectory {
    state: Arc<Mutex<MockState>>,
}

impl MockDirectory {
    /// Create an empty mock directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock directory serving `agents`.
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        let mock = Self::new();
        mock.set_agents(agents);
        mock
    }

    /// Replace the served agents. Counters are reseeded from the records
    /// and the caller's likes and wishlist are cleared.
    pub fn set_agents(&self, agents: Vec<Agent>) {
        let mut state = self.lock();
        state.likes = agents.iter().map(|a| (a.id.clone(), a.likes)).collect();
        state.saves = agents
            .iter()
            .map(|a| (a.id.clone(), a.saved_by_count))
            .collect();
        state.liked.clear();
        state.saved.clear();
        state.agents = agents;
    }

    /// Make list_agents() fail with `error` until cleared with `None`.
    pub fn configure_list_error(&self, error: Option<ApiError>) {
        self.lock().list_response = error;
    }

    /// Delay list_agents() responses.
    pub fn configure_list_delay(&self, delay: Option<Duration>) {
        self.lock().list_delay = delay;
    }

    /// Fail the next like() call with `error`. Queued errors are consumed
    /// in order.
    pub fn fail_next_like(&self, error: ApiError) {
        self.lock().like_failures.push_back(error);
    }

    /// Fail the next toggle_wishlist() call with `error`.
    pub fn fail_next_wishlist(&self, error: ApiError) {
        self.lock().wishlist_failures.push_back(error);
    }

    /// Hold back the response of the next like() call by `delay`.
    ///
    /// The toggle is applied when the call arrives; only the reply is late.
    /// Queued delays are consumed in order.
    pub fn delay_next_like(&self, delay: Duration) {
        self.lock().like_delays.push_back(delay);
    }

    /// Hold back the response of the next toggle_wishlist() call by `delay`.
    pub fn delay_next_wishlist(&self, delay: Duration) {
        self.lock().wishlist_delays.push_back(delay);
    }

    /// Configure the response for filter_options() calls.
    pub fn configure_filter_options(&self, response: MockResponse<FilterOptions>) {
        self.lock().filters_response = response;
    }

    /// Configure the response for current_user() calls.
    pub fn configure_current_user(&self, response: MockResponse<Option<User>>) {
        self.lock().current_user = response;
    }

    /// Whether the caller currently likes `agent_id`.
    #[must_use]
    pub fn is_liked(&self, agent_id: &str) -> bool {
        self.lock().liked.contains(agent_id)
    }

    /// Whether `agent_id` is in the caller's wishlist.
    #[must_use]
    pub fn is_saved(&self, agent_id: &str) -> bool {
        self.lock().saved.contains(agent_id)
    }

    /// Check if a method was called.
    ///
    /// # Arguments
    ///
    /// * `method` - Method name (e.g., "agents.list", "engagement.like")
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().calls.iter().any(|call| call.method == method)
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let state = self.lock();
        match method {
            Some(m) => state.calls.iter().filter(|call| call.method == m).cloned().collect(),
            None => state.calls.clone(),
        }
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn toggle(
        &self,
        method: &str,
        relation: Relation,
        agent_id: &str,
    ) -> Result<ToggleResponse, Error> {
        let (result, delay) = {
            let mut state = self.lock();
            state.record_call(method, vec![agent_id.to_string()]);
            let result = state.toggle(relation, agent_id);
            let delay = match relation {
                Relation::Like => state.like_delays.pop_front(),
                Relation::Wishlist => state.wishlist_delays.pop_front(),
            };
            (result, delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl DirectoryService for MockDirectory {
    async fn list_agents(&self) -> Result<Vec<Agent>, Error> {
        let delay = {
            let mut state = self.lock();
            state.record_call("agents.list", vec![]);
            state.list_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.lock();
        match &state.list_response {
            Some(error) => Err(Error::Api(error.clone())),
            None => Ok(state.snapshot()),
        }
    }

    async fn like(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.toggle("engagement.like", Relation::Like, agent_id).await
    }

    async fn toggle_wishlist(&self, agent_id: &str) -> Result<ToggleResponse, Error> {
        self.toggle("engagement.toggle_wishlist", Relation::Wishlist, agent_id).await
    }

    async fn filter_options(&self) -> Result<FilterOptions, Error> {
        let mut state = self.lock();
        state.record_call("agents.filters", vec![]);
        state.filters_response.get_result(FilterOptions::default())
    }

    async fn current_user(&self) -> Result<Option<User>, Error> {
        let mut state = self.lock();
        state.record_call("session.current_user", vec![]);
        state.current_user.get_result(None)
    }

    async fn liked_agents(&self) -> Result<Vec<Agent>, Error> {
        let mut state = self.lock();
        state.record_call("session.liked_agents", vec![]);
        Ok(state.snapshot_of(&state.liked))
    }

    async fn wishlist(&self) -> Result<Vec<Agent>, Error> {
        let mut state = self.lock();
        state.record_call("session.wishlist", vec![]);
        Ok(state.snapshot_of(&state.saved))
    }
}
