//! Client SDK and collection view model for the AI agent directory.
//!
//! Fetches the public agent collection once, narrows it with filters,
//! ordering and pagination, groups it by category, and keeps like and
//! wishlist counters in step with what the service confirms.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use agent_directory::{Browser, CollectionStore, DirectoryClient, Engagement, FilterDimension};
//!
//! # async fn run() -> Result<(), agent_directory::Error> {
//! let client = DirectoryClient::from_env()?;
//! let store = Arc::new(CollectionStore::new(Arc::new(client)));
//! store.fetch().await?;
//!
//! let mut browser = Browser::default();
//! browser.select(FilterDimension::Category, "Coding");
//! let page = store.with_agents(|agents| {
//!     browser.view(agents).agents.iter().map(|a| a.id.clone()).collect::<Vec<_>>()
//! });
//!
//! if let Some(id) = page.first() {
//!     let notice = Engagement::new(Arc::clone(&store)).like(id).await;
//!     println!("{}", notice.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod client;
pub mod clients;
pub mod engagement;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod notice;
pub mod service;
pub mod store;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use browser::Browser;
pub use client::DirectoryClient;
pub use clients::{AgentsClient, EngagementClient, SessionClient};
pub use engagement::Engagement;
pub use engine::{
    derive_view, filter, page_window, paginate, sort, total_pages, AgentPage, Criterion,
    FilterCriteria, FilterDimension, SortOption,
};
pub use error::{ApiError, Error};
pub use grouping::{group_by_category, CategoryGroup, CategoryGroups};
pub use notice::{Notice, NoticeLevel};
pub use service::DirectoryService;
pub use store::{CollectionStore, FetchStatus};
pub use transport::{HttpTransport, RetryConfig};
pub use types::{
    AccessModel, Agent, AgentStatus, FilterOptions, PricingModel, Relation, ToggleOutcome,
    ToggleResponse, User,
};
