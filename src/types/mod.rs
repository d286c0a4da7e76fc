//! Data model types for the agent directory.

pub mod agents;
pub mod engagement;
pub mod filters;
pub mod session;

use serde::{Deserialize, Deserializer};

// Re-exports
pub use agents::{AccessModel, Agent, AgentStatus, PricingModel};
pub use engagement::{Relation, ToggleOutcome, ToggleResponse};
pub use filters::FilterOptions;
pub use session::User;

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
