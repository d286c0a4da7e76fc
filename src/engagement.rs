//! Like and wishlist actions against the collection store.
//!
//! Counters are only ever set from the value the service confirms. Nothing
//! is changed before the response arrives, and a failed call leaves the
//! store untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::notice::Notice;
use crate::store::CollectionStore;
use crate::types::{Relation, ToggleOutcome, ToggleResponse};

/// User-facing wording for one relation.
struct Messages {
    added: &'static str,
    removed: &'static str,
    duplicate: &'static str,
    auth_required: &'static str,
    failed: &'static str,
}

const LIKE_MESSAGES: Messages = Messages {
    added: "Agent liked successfully!",
    removed: "Like removed successfully!",
    duplicate: "You have already liked this agent!",
    auth_required: "Please log in to like agents.",
    failed: "Failed to update likes.",
};

const WISHLIST_MESSAGES: Messages = Messages {
    added: "Agent added to wishlist!",
    removed: "Agent removed from wishlist!",
    duplicate: "This agent is already in your wishlist.",
    auth_required: "Please log in to save agents.",
    failed: "Failed to update wishlist.",
};

impl Relation {
    fn messages(self) -> &'static Messages {
        match self {
            Self::Like => &LIKE_MESSAGES,
            Self::Wishlist => &WISHLIST_MESSAGES,
        }
    }
}

/// Runs like and wishlist toggles and applies the confirmed counts.
#[derive(Clone)]
pub struct Engagement {
    store: Arc<CollectionStore>,
}

impl Engagement {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// Toggle the caller's like on `agent_id`.
    pub async fn like(&self, agent_id: &str) -> Notice {
        let result = self.store.service().like(agent_id).await;
        self.settle(Relation::Like, agent_id, result)
    }

    /// Toggle `agent_id` in the caller's wishlist.
    pub async fn save(&self, agent_id: &str) -> Notice {
        let result = self.store.service().toggle_wishlist(agent_id).await;
        self.settle(Relation::Wishlist, agent_id, result)
    }

    fn settle(
        &self,
        relation: Relation,
        agent_id: &str,
        result: Result<ToggleResponse, Error>,
    ) -> Notice {
        let messages = relation.messages();

        match result {
            Ok(response) => {
                let known = match relation {
                    Relation::Like => self.store.mutate_like(agent_id, response.count),
                    Relation::Wishlist => self.store.mutate_save(agent_id, response.count),
                };
                if !known {
                    debug!(agent_id, ?relation, "Toggled agent is not in the store");
                }
                info!(
                    agent_id,
                    ?relation,
                    outcome = ?response.outcome,
                    count = response.count,
                    "Toggle confirmed"
                );

                let message = match response.outcome {
                    ToggleOutcome::Added => messages.added,
                    ToggleOutcome::Removed => messages.removed,
                };
                Notice::success(message).with_outcome(response.outcome)
            }
            Err(Error::Api(api)) if api.is_duplicate_action() => {
                debug!(agent_id, ?relation, "Toggle rejected as duplicate");
                Notice::info(messages.duplicate)
            }
            Err(Error::Api(api)) if api.requires_auth() => {
                debug!(agent_id, ?relation, "Toggle requires sign-in");
                Notice::auth_required(messages.auth_required)
            }
            Err(Error::Api(api)) => {
                warn!(agent_id, ?relation, error = %api, "Toggle failed");
                if api.message().is_empty() {
                    Notice::error(messages.failed)
                } else {
                    Notice::error(api.message())
                }
            }
            Err(e) => {
                warn!(agent_id, ?relation, error = %e, "Toggle failed");
                Notice::error(messages.failed)
            }
        }
    }
}
