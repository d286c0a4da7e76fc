//! Property-based tests for the collection view model.
//!
//! These tests validate filtering, ordering, paging and grouping across
//! arbitrary collections.

use proptest::prelude::*;

use agent_directory::engine::DEFAULT_PAGE_WINDOW;
use agent_directory::grouping::UNCATEGORIZED;
use agent_directory::{
    derive_view, filter, group_by_category, page_window, paginate, sort, total_pages,
    AccessModel, Agent, FilterCriteria, FilterDimension, PricingModel, SortOption,
};

const CATEGORIES: [&str; 4] = ["Coding", "Sales", "Research", ""];
const INDUSTRIES: [&str; 3] = ["Finance", "Healthcare", ""];
const PRICING: [&str; 4] = ["Free", "Freemium", "Paid", ""];
const ACCESS: [&str; 4] = ["Open Source", "Closed Source", "API", ""];

/// Strategy for one agent record. Scores come from a small set so ties are
/// common.
fn agent_fields() -> impl Strategy<Value = (usize, usize, usize, usize, Option<u8>)> {
    (
        0..CATEGORIES.len(),
        0..INDUSTRIES.len(),
        0..PRICING.len(),
        0..ACCESS.len(),
        prop::option::of(0u8..5),
    )
}

/// Strategy for a collection with unique ids in input order.
fn catalog() -> impl Strategy<Value = Vec<Agent>> {
    prop::collection::vec(agent_fields(), 0..60).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (c, ind, p, a, score))| {
                let mut agent = Agent::new(format!("agent-{i}"), format!("Agent {i}"));
                agent.category = CATEGORIES[c].to_string();
                agent.industry = INDUSTRIES[ind].to_string();
                agent.pricing_model = PricingModel::from(PRICING[p]);
                agent.access_model = AccessModel::from(ACCESS[a]);
                agent.popularity_score = score.map(f64::from);
                agent
            })
            .collect()
    })
}

/// Strategy for dropdown selections, wildcards included.
fn criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::select(vec!["Category", "Coding", "Sales", "Research"]),
        prop::sample::select(vec!["Industry", "Finance", "Healthcare"]),
        prop::sample::select(vec!["Pricing", "Free", "Freemium", "Paid"]),
        prop::sample::select(vec!["Model", "Access", "Open Source", "Closed Source", "API"]),
    )
        .prop_map(|(c, i, p, a)| FilterCriteria::from_selection(c, i, p, a))
}

fn index_of(agent: &Agent) -> usize {
    agent
        .id
        .trim_start_matches("agent-")
        .parse()
        .unwrap_or(usize::MAX)
}

proptest! {
    /// Filtering keeps exactly the matching agents, in input order.
    #[test]
    fn test_filter_is_exact(agents in catalog(), criteria in criteria()) {
        let kept = filter(&agents, &criteria);

        prop_assert!(kept.iter().all(|a| criteria.matches(a)));
        prop_assert_eq!(kept.len(), agents.iter().filter(|a| criteria.matches(a)).count());

        let order: Vec<usize> = kept.iter().map(|a| index_of(a)).collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    /// All-wildcard criteria are the identity.
    #[test]
    fn test_wildcards_keep_everything(agents in catalog()) {
        let criteria = FilterCriteria::from_selection("Category", "Industry", "Pricing", "Model");
        prop_assert!(criteria.is_unfiltered());

        let kept = filter(&agents, &criteria);
        prop_assert_eq!(kept.len(), agents.len());
    }

    /// Changing one dimension leaves the others alone.
    #[test]
    fn test_dimensions_are_independent(criteria in criteria(), label in "[A-Z][a-z]{2,8}") {
        let mut changed = criteria.clone();
        changed.select(FilterDimension::Industry, &label);

        prop_assert_eq!(&changed.category, &criteria.category);
        prop_assert_eq!(&changed.pricing_model, &criteria.pricing_model);
        prop_assert_eq!(&changed.access_model, &criteria.access_model);
    }

    /// Popularity order is descending, stable on ties and idempotent.
    #[test]
    fn test_popularity_sort_is_stable(agents in catalog()) {
        let mut ordered: Vec<&Agent> = agents.iter().collect();
        sort(&mut ordered, SortOption::Popularity);

        for pair in ordered.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.popularity() >= b.popularity());
            if a.popularity() == b.popularity() {
                prop_assert!(index_of(a) < index_of(b));
            }
        }

        let mut again = ordered.clone();
        sort(&mut again, SortOption::Popularity);
        prop_assert_eq!(again, ordered);
    }

    /// Default order leaves the input untouched.
    #[test]
    fn test_default_sort_keeps_input_order(agents in catalog()) {
        let mut ordered: Vec<&Agent> = agents.iter().collect();
        sort(&mut ordered, SortOption::Default);
        let expected: Vec<&Agent> = agents.iter().collect();
        prop_assert_eq!(ordered, expected);
    }

    /// Pages partition the list with no gaps or overlap.
    #[test]
    fn test_pages_cover_the_list(
        items in prop::collection::vec(any::<u16>(), 0..200),
        page_size in 1usize..30,
    ) {
        let pages = total_pages(items.len(), page_size);
        prop_assert_eq!(pages, items.len().div_ceil(page_size));

        let mut joined = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, page_size);
            prop_assert!(!slice.is_empty() && slice.len() <= page_size);
            joined.extend_from_slice(slice);
        }
        prop_assert_eq!(joined, items.clone());
        prop_assert!(paginate(&items, pages + 1, page_size).is_empty());
        prop_assert!(paginate(&items, 0, page_size).is_empty());
    }

    /// A derived page agrees with filtering and paging done by hand.
    #[test]
    fn test_view_matches_manual_pipeline(
        agents in catalog(),
        criteria in criteria(),
        page in 1usize..5,
    ) {
        let view = derive_view(&agents, &criteria, SortOption::Popularity, page, 7);

        let mut expected = filter(&agents, &criteria);
        sort(&mut expected, SortOption::Popularity);

        prop_assert_eq!(view.total_count, expected.len());
        prop_assert_eq!(view.total_pages, total_pages(expected.len(), 7));
        prop_assert_eq!(view.agents, paginate(&expected, page, 7).to_vec());
    }

    /// Every agent lands in exactly one group, under its own category.
    #[test]
    fn test_grouping_is_complete(agents in catalog()) {
        let groups = group_by_category(&agents);
        prop_assert_eq!(groups.agent_count(), agents.len());

        for group in groups.iter() {
            prop_assert!(!group.agents.is_empty());
            for agent in &group.agents {
                prop_assert_eq!(agent.category_label(), group.category.as_str());
            }
            let order: Vec<usize> = group.agents.iter().map(|a| index_of(a)).collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }

        let has_blank = agents.iter().any(|a| a.category.is_empty());
        prop_assert_eq!(groups.get(UNCATEGORIZED).is_some(), has_blank);
    }

    /// The pager shows the current page and stays within range.
    #[test]
    fn test_page_window_bounds(total in 1usize..100, current_seed in any::<usize>()) {
        let current = current_seed % total + 1;
        let links = page_window(current, total, DEFAULT_PAGE_WINDOW);

        prop_assert_eq!(links.len(), total.min(DEFAULT_PAGE_WINDOW));
        prop_assert!(links.contains(&current));
        prop_assert!(links.iter().all(|&p| (1..=total).contains(&p)));
        prop_assert!(links.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
