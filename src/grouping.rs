//! Category grouping for sectioned display.

use std::collections::HashMap;

use crate::types::Agent;

/// Label for agents without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Agents shown per category section on the directory home page.
pub const DEFAULT_PREVIEW_LIMIT: usize = 6;

/// Members of one category, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub agents: Vec<&'a Agent>,
}

/// Categories in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroups<'a> {
    groups: Vec<CategoryGroup<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> CategoryGroups<'a> {
    /// Members of `category`, if any agent carries it.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[&'a Agent]> {
        self.index
            .get(category)
            .map(|&i| self.groups[i].agents.as_slice())
    }

    /// Category names in display order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryGroup<'a>> {
        self.groups.iter()
    }

    /// The same groups truncated to their first `limit` members.
    #[must_use]
    pub fn preview(&self, limit: usize) -> CategoryGroups<'a> {
        CategoryGroups {
            groups: self
                .groups
                .iter()
                .map(|g| CategoryGroup {
                    category: g.category.clone(),
                    agents: g.agents.iter().take(limit).copied().collect(),
                })
                .collect(),
            index: self.index.clone(),
        }
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of agents across all groups.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.groups.iter().map(|g| g.agents.len()).sum()
    }
}

impl<'a> IntoIterator for CategoryGroups<'a> {
    type Item = CategoryGroup<'a>;
    type IntoIter = std::vec::IntoIter<CategoryGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partition agents by category. Empty categories go under
/// [`UNCATEGORIZED`].
pub fn group_by_category<'a, I>(agents: I) -> CategoryGroups<'a>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut groups = CategoryGroups::default();

    for agent in agents {
        let label = agent.category_label();
        match groups.index.get(label) {
            Some(&i) => groups.groups[i].agents.push(agent),
            None => {
                groups.index.insert(label.to_string(), groups.groups.len());
                groups.groups.push(CategoryGroup {
                    category: label.to_string(),
                    agents: vec![agent],
                });
            }
        }
    }

    groups
}
