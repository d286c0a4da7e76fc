//! Filter option lists offered by the directory.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Values the directory offers for each filter dimension.
///
/// Not validated against the agents actually listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industries: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pricing_models: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_models: Vec<String>,
}

impl FilterOptions {
    /// All four option lists are populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.categories.is_empty()
            && !self.industries.is_empty()
            && !self.pricing_models.is_empty()
            && !self.access_models.is_empty()
    }
}
