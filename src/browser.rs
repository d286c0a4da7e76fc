//! Selection state of the directory listing.

use crate::engine::{
    self, AgentPage, FilterCriteria, FilterDimension, SortOption, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_WINDOW,
};
use crate::grouping::{self, CategoryGroups};
use crate::types::Agent;

/// Filter, sort and page selection for one listing.
///
/// Every change to the criteria or the sort order sends the listing back to
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    criteria: FilterCriteria,
    sort: SortOption,
    page: usize,
    page_size: usize,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Browser {
    /// A browser with no filters on page 1. A zero page size is raised to 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::any(),
            sort: SortOption::Default,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn sort_option(&self) -> SortOption {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Apply a dropdown selection to one dimension.
    pub fn select(&mut self, dimension: FilterDimension, label: &str) {
        self.criteria.select(dimension, label);
        self.page = 1;
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
    }

    pub fn reset_dimension(&mut self, dimension: FilterDimension) {
        self.criteria.reset(dimension);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.page = 1;
    }

    /// Jump to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_add(1), total_pages);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// The current page of `agents`. A page left past the end by a shrinking
    /// collection shows the last page instead.
    #[must_use]
    pub fn view<'a>(&self, agents: &'a [Agent]) -> AgentPage<'a> {
        let view = engine::derive_view(
            agents,
            &self.criteria,
            self.sort,
            self.page,
            self.page_size,
        );
        if view.total_pages > 0 && view.page > view.total_pages {
            engine::derive_view(
                agents,
                &self.criteria,
                self.sort,
                view.total_pages,
                self.page_size,
            )
        } else {
            view
        }
    }

    /// All matching agents, sorted, grouped by category.
    #[must_use]
    pub fn grouped<'a>(&self, agents: &'a [Agent]) -> CategoryGroups<'a> {
        let matching = engine::sorted(engine::filter(agents, &self.criteria), self.sort);
        grouping::group_by_category(matching)
    }

    /// Page links around the current page.
    #[must_use]
    pub fn page_links(&self, total_pages: usize) -> Vec<usize> {
        engine::page_window(self.page, total_pages, DEFAULT_PAGE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: usize) -> Vec<Agent> {
        (0..n)
            .map(|i| {
                let mut agent = Agent::new(format!("a{i}"), format!("Agent {i}"));
                agent.category = if i % 2 == 0 { "Coding" } else { "Sales" }.to_string();
                agent.popularity_score = Some(i as f64);
                agent
            })
            .collect()
    }

    #[test]
    fn test_changes_reset_to_first_page() {
        let mut browser = Browser::default();
        browser.go_to(3, 5);
        assert_eq!(browser.page(), 3);

        browser.select(FilterDimension::Category, "Coding");
        assert_eq!(browser.page(), 1);

        browser.go_to(2, 5);
        browser.set_sort(SortOption::Popularity);
        assert_eq!(browser.page(), 1);

        browser.go_to(2, 5);
        browser.reset_dimension(FilterDimension::Category);
        assert_eq!(browser.page(), 1);
        assert!(browser.criteria().is_unfiltered());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut browser = Browser::default();
        browser.previous_page();
        assert_eq!(browser.page(), 1);

        browser.next_page(2);
        browser.next_page(2);
        assert_eq!(browser.page(), 2);

        browser.go_to(0, 0);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_view_pages_filtered_agents() {
        let agents = catalog(50);
        let mut browser = Browser::new(10);
        browser.select(FilterDimension::Category, "Coding");
        browser.next_page(3);

        let view = browser.view(&agents);
        assert_eq!(view.total_count, 25);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page, 2);
        assert_eq!(view.agents.first().map(|a| a.id.as_str()), Some("a20"));
    }

    #[test]
    fn test_view_falls_back_to_last_page() {
        let agents = catalog(50);
        let mut browser = Browser::new(10);
        browser.go_to(5, 5);

        let view = browser.view(&agents[..15]);
        assert_eq!(view.page, 2);
        assert_eq!(view.agents.len(), 5);
    }

    #[test]
    fn test_grouped_respects_sort() {
        let agents = catalog(6);
        let mut browser = Browser::default();
        browser.set_sort(SortOption::Popularity);

        let groups = browser.grouped(&agents);
        let names: Vec<&str> = groups.categories().collect();
        assert_eq!(names, vec!["Sales", "Coding"]);

        let coding: Vec<&str> = groups
            .get("Coding")
            .unwrap()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(coding, vec!["a4", "a2", "a0"]);
    }

    #[test]
    fn test_page_links() {
        let mut browser = Browser::default();
        browser.go_to(9, 10);
        assert_eq!(browser.page_links(10), vec![5, 6, 7, 8, 9, 10]);
    }
}
