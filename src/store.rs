//! Collection store: the client-side copy of the agent directory.
//!
//! Holds the accepted agents and their like/wishlist counters and funnels
//! every write through its own operations. Share it as
//! `Arc<CollectionStore>`; state is behind a mutex that is never held across
//! an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::service::DirectoryService;
use crate::types::{Agent, FilterOptions};

/// Lifecycle of the agent collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
struct StoreState {
    status: FetchStatus,
    error: Option<String>,
    agents: Vec<Agent>,
    like_counts: HashMap<String, u64>,
    save_counts: HashMap<String, u64>,
    filter_options: Option<FilterOptions>,
}

pub struct CollectionStore {
    service: Arc<dyn DirectoryService>,
    state: Mutex<StoreState>,
}

impl CollectionStore {
    pub fn new(service: Arc<dyn DirectoryService>) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// The service this store reads from.
    #[must_use]
    pub fn service(&self) -> &Arc<dyn DirectoryService> {
        &self.service
    }

    /// Fetch the full collection and replace the stored list.
    ///
    /// Keeps only accepted agents and reseeds both counter maps from the
    /// fresh records. On failure the store moves to `Failed` with the
    /// message retained and the previous list left in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::FetchInFlight` if another fetch has not finished yet,
    /// otherwise the service error.
    pub async fn fetch(&self) -> Result<usize, Error> {
        let mut guard = {
            let mut state = self.lock();
            if state.status == FetchStatus::Loading {
                warn!("Agent fetch requested while another is in flight");
                return Err(Error::FetchInFlight);
            }
            let previous = state.status;
            state.status = FetchStatus::Loading;
            LoadingGuard {
                store: self,
                previous,
                settled: false,
            }
        };

        debug!("Fetching agent collection");
        let result = self.service.list_agents().await;
        guard.settled = true;

        let mut state = self.lock();
        match result {
            Ok(records) => {
                let total = records.len();
                let agents: Vec<Agent> = records.into_iter().filter(Agent::is_listed).collect();

                state.like_counts = agents.iter().map(|a| (a.id.clone(), a.likes)).collect();
                state.save_counts = agents
                    .iter()
                    .map(|a| (a.id.clone(), a.saved_by_count))
                    .collect();
                state.agents = agents;
                state.status = FetchStatus::Succeeded;
                state.error = None;

                info!(
                    listed = state.agents.len(),
                    total, "Agent collection loaded"
                );
                Ok(state.agents.len())
            }
            Err(e) => {
                warn!(error = %e, "Agent collection fetch failed");
                state.status = FetchStatus::Failed;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Set an agent's like counter to a server-confirmed value.
    ///
    /// Returns `false` and changes nothing for an unknown agent.
    pub fn mutate_like(&self, agent_id: &str, count: u64) -> bool {
        let mut state = self.lock();
        let StoreState {
            agents, like_counts, ..
        } = &mut *state;

        match like_counts.get_mut(agent_id) {
            Some(current) => {
                *current = count;
                if let Some(agent) = agents.iter_mut().find(|a| a.id == agent_id) {
                    agent.likes = count;
                }
                true
            }
            None => {
                debug!(agent_id, "Ignoring like update for unknown agent");
                false
            }
        }
    }

    /// Set an agent's wishlist counter to a server-confirmed value.
    ///
    /// Returns `false` and changes nothing for an unknown agent.
    pub fn mutate_save(&self, agent_id: &str, count: u64) -> bool {
        let mut state = self.lock();
        let StoreState {
            agents, save_counts, ..
        } = &mut *state;

        match save_counts.get_mut(agent_id) {
            Some(current) => {
                *current = count;
                if let Some(agent) = agents.iter_mut().find(|a| a.id == agent_id) {
                    agent.saved_by_count = count;
                }
                true
            }
            None => {
                debug!(agent_id, "Ignoring wishlist update for unknown agent");
                false
            }
        }
    }

    /// Load the filter option lists, reusing the cached ones once every
    /// list is populated.
    ///
    /// # Errors
    ///
    /// Returns the service error; the cache is left untouched.
    pub async fn load_filter_options(&self) -> Result<FilterOptions, Error> {
        if let Some(cached) = self.lock().filter_options.as_ref() {
            if cached.is_complete() {
                return Ok(cached.clone());
            }
        }

        let options = self.service.filter_options().await?;
        self.lock().filter_options = Some(options.clone());
        Ok(options)
    }

    #[must_use]
    pub fn filter_options(&self) -> Option<FilterOptions> {
        self.lock().filter_options.clone()
    }

    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.lock().status
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Snapshot of the listed agents.
    #[must_use]
    pub fn agents(&self) -> Vec<Agent> {
        self.lock().agents.clone()
    }

    /// Run `f` against the listed agents without copying them.
    pub fn with_agents<R>(&self, f: impl FnOnce(&[Agent]) -> R) -> R {
        f(&self.lock().agents)
    }

    #[must_use]
    pub fn like_count(&self, agent_id: &str) -> Option<u64> {
        self.lock().like_counts.get(agent_id).copied()
    }

    #[must_use]
    pub fn save_count(&self, agent_id: &str) -> Option<u64> {
        self.lock().save_counts.get(agent_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().agents.is_empty()
    }

    /// The `n` most liked agents by current counter, ties in list order.
    #[must_use]
    pub fn top_liked(&self, n: usize) -> Vec<Agent> {
        let state = self.lock();
        let likes = |agent: &Agent| state.like_counts.get(&agent.id).copied().unwrap_or(0);

        let mut ranked: Vec<&Agent> = state.agents.iter().collect();
        ranked.sort_by(|a, b| likes(b).cmp(&likes(a)));
        ranked.into_iter().take(n).cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Puts the status back if a fetch future is dropped before the service
/// answers, so the store does not stay `Loading` forever.
struct LoadingGuard<'a> {
    store: &'a CollectionStore,
    previous: FetchStatus,
    settled: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Agent fetch cancelled before completion");
            self.store.lock().status = self.previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ApiError;
    use crate::testing::{MockDirectory, MockResponse};
    use crate::types::AgentStatus;

    fn agent(id: &str, likes: u64, status: AgentStatus) -> Agent {
        let mut agent = Agent::new(id, id);
        agent.likes = likes;
        agent.status = status;
        agent
    }

    fn store_with(agents: Vec<Agent>) -> (MockDirectory, CollectionStore) {
        let mock = MockDirectory::with_agents(agents);
        let store = CollectionStore::new(Arc::new(mock.clone()));
        (mock, store)
    }

    #[tokio::test]
    async fn test_fetch_keeps_only_accepted() {
        let (_, store) = store_with(vec![
            agent("a1", 1, AgentStatus::Accepted),
            agent("a2", 2, AgentStatus::Requested),
            agent("a3", 3, AgentStatus::Rejected),
        ]);
        assert_eq!(store.status(), FetchStatus::Idle);

        assert_eq!(store.fetch().await.unwrap(), 1);
        assert_eq!(store.status(), FetchStatus::Succeeded);
        assert_eq!(store.like_count("a1"), Some(1));
        assert_eq!(store.like_count("a2"), None);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let (mock, store) = store_with(vec![agent("a1", 1, AgentStatus::Accepted)]);
        store.fetch().await.unwrap();

        mock.configure_list_error(Some(ApiError::Server {
            code: "INTERNAL_ERROR".to_string(),
            message: "Database unavailable".to_string(),
            request_id: None,
        }));
        assert!(store.fetch().await.is_err());

        assert_eq!(store.status(), FetchStatus::Failed);
        assert_eq!(store.len(), 1);
        assert!(store
            .error()
            .is_some_and(|e| e.contains("Database unavailable")));
    }

    #[tokio::test]
    async fn test_concurrent_fetch_is_rejected() {
        let (mock, store) = store_with(vec![agent("a1", 1, AgentStatus::Accepted)]);
        mock.configure_list_delay(Some(Duration::from_millis(50)));

        let (first, second) = tokio::join!(store.fetch(), async {
            tokio::task::yield_now().await;
            store.fetch().await
        });

        assert_eq!(first.unwrap(), 1);
        assert!(matches!(second, Err(Error::FetchInFlight)));
        assert_eq!(mock.call_count("agents.list"), 1);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_restores_status() {
        let (mock, store) = store_with(vec![agent("a1", 1, AgentStatus::Accepted)]);
        mock.configure_list_delay(Some(Duration::from_secs(5)));

        let timed_out = tokio::time::timeout(Duration::from_millis(10), store.fetch()).await;
        assert!(timed_out.is_err());
        assert_eq!(store.status(), FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_mutate_updates_counter_and_record() {
        let (_, store) = store_with(vec![agent("a1", 10, AgentStatus::Accepted)]);
        store.fetch().await.unwrap();

        assert!(store.mutate_like("a1", 11));
        assert!(store.mutate_save("a1", 4));
        assert_eq!(store.like_count("a1"), Some(11));
        assert_eq!(store.save_count("a1"), Some(4));

        let agents = store.agents();
        assert_eq!(agents[0].likes, 11);
        assert_eq!(agents[0].saved_by_count, 4);
    }

    #[tokio::test]
    async fn test_mutate_unknown_agent_is_noop() {
        let (_, store) = store_with(vec![agent("a1", 10, AgentStatus::Accepted)]);
        store.fetch().await.unwrap();

        assert!(!store.mutate_like("ghost", 3));
        assert!(!store.mutate_save("ghost", 3));
        assert_eq!(store.like_count("ghost"), None);
        assert_eq!(store.like_count("a1"), Some(10));
    }

    #[tokio::test]
    async fn test_refetch_reseeds_counters() {
        let (_, store) = store_with(vec![agent("a1", 10, AgentStatus::Accepted)]);
        store.fetch().await.unwrap();
        store.mutate_like("a1", 99);

        store.fetch().await.unwrap();
        assert_eq!(store.like_count("a1"), Some(10));
    }

    #[tokio::test]
    async fn test_top_liked_orders_by_counter() {
        let (_, store) = store_with(vec![
            agent("a1", 5, AgentStatus::Accepted),
            agent("a2", 9, AgentStatus::Accepted),
            agent("a3", 5, AgentStatus::Accepted),
        ]);
        store.fetch().await.unwrap();
        store.mutate_like("a3", 12);

        let ids: Vec<String> = store.top_liked(2).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a3", "a2"]);
    }

    #[tokio::test]
    async fn test_filter_options_cached_once_complete() {
        let (mock, store) = store_with(vec![]);
        mock.configure_filter_options(MockResponse::with_data(FilterOptions {
            categories: vec!["Coding".to_string()],
            industries: vec!["Finance".to_string()],
            pricing_models: vec!["Free".to_string()],
            access_models: vec!["API".to_string()],
        }));

        store.load_filter_options().await.unwrap();
        store.load_filter_options().await.unwrap();

        assert_eq!(mock.call_count("agents.filters"), 1);
        assert!(store.filter_options().is_some());
    }

    #[tokio::test]
    async fn test_incomplete_filter_options_are_refetched() {
        let (mock, store) = store_with(vec![]);

        store.load_filter_options().await.unwrap();
        store.load_filter_options().await.unwrap();

        assert_eq!(mock.call_count("agents.filters"), 2);
    }
}
