//! Resource clients for the directory API.

pub mod agents;
pub mod engagement;
pub mod session;

// Re-exports
pub use agents::AgentsClient;
pub use engagement::EngagementClient;
pub use session::SessionClient;
