//! Filter, sort and paginate over the agent collection.
//!
//! Everything here is a pure function of its inputs: the same agents,
//! criteria, sort option and page always produce the same view.

use std::cmp::Ordering;

use crate::types::{AccessModel, Agent, PricingModel};

/// Agents per page in the directory listing.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page links shown at once by the listing's pager.
pub const DEFAULT_PAGE_WINDOW: usize = 6;

/// Wildcard labels the filter dropdowns show when nothing is selected.
pub const CATEGORY_WILDCARD: &str = "Category";
pub const INDUSTRY_WILDCARD: &str = "Industry";
pub const PRICING_WILDCARD: &str = "Pricing";
pub const ACCESS_WILDCARDS: [&str; 2] = ["Model", "Access"];

/// A constraint on one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criterion<T> {
    /// No constraint.
    Any,
    /// The field must equal this value exactly.
    Exactly(T),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: PartialEq> Criterion<T> {
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => expected == value,
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl<T> Criterion<T> {
    /// Build a criterion from a dropdown label, treating the given wildcard
    /// labels and the empty string as "no constraint".
    pub fn from_label(label: &str, wildcards: &[&str]) -> Self
    where
        T: From<String>,
    {
        if label.is_empty() || wildcards.contains(&label) {
            Self::Any
        } else {
            Self::Exactly(T::from(label.to_string()))
        }
    }
}

/// One of the four filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Category,
    Industry,
    PricingModel,
    AccessModel,
}

/// Active filter selections. Dimensions are independent and ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Criterion<String>,
    pub industry: Criterion<String>,
    pub pricing_model: Criterion<PricingModel>,
    pub access_model: Criterion<AccessModel>,
}

impl FilterCriteria {
    /// Criteria that let every agent through.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Build criteria from the four dropdown labels.
    #[must_use]
    pub fn from_selection(category: &str, industry: &str, pricing: &str, access: &str) -> Self {
        let mut criteria = Self::any();
        criteria.select(FilterDimension::Category, category);
        criteria.select(FilterDimension::Industry, industry);
        criteria.select(FilterDimension::PricingModel, pricing);
        criteria.select(FilterDimension::AccessModel, access);
        criteria
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Criterion::Exactly(category.into());
        self
    }

    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Criterion::Exactly(industry.into());
        self
    }

    #[must_use]
    pub fn with_pricing_model(mut self, pricing: impl Into<PricingModel>) -> Self {
        self.pricing_model = Criterion::Exactly(pricing.into());
        self
    }

    #[must_use]
    pub fn with_access_model(mut self, access: impl Into<AccessModel>) -> Self {
        self.access_model = Criterion::Exactly(access.into());
        self
    }

    /// Set one dimension from its dropdown label; other dimensions are kept.
    pub fn select(&mut self, dimension: FilterDimension, label: &str) {
        match dimension {
            FilterDimension::Category => {
                self.category = Criterion::from_label(label, &[CATEGORY_WILDCARD]);
            }
            FilterDimension::Industry => {
                self.industry = Criterion::from_label(label, &[INDUSTRY_WILDCARD]);
            }
            FilterDimension::PricingModel => {
                self.pricing_model = Criterion::from_label(label, &[PRICING_WILDCARD]);
            }
            FilterDimension::AccessModel => {
                self.access_model = Criterion::from_label(label, &ACCESS_WILDCARDS);
            }
        }
    }

    /// Return one dimension to the wildcard.
    pub fn reset(&mut self, dimension: FilterDimension) {
        match dimension {
            FilterDimension::Category => self.category = Criterion::Any,
            FilterDimension::Industry => self.industry = Criterion::Any,
            FilterDimension::PricingModel => self.pricing_model = Criterion::Any,
            FilterDimension::AccessModel => self.access_model = Criterion::Any,
        }
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_any()
            && self.industry.is_any()
            && self.pricing_model.is_any()
            && self.access_model.is_any()
    }

    #[must_use]
    pub fn matches(&self, agent: &Agent) -> bool {
        self.category.matches(&agent.category)
            && self.industry.matches(&agent.industry)
            && self.pricing_model.matches(&agent.pricing_model)
            && self.access_model.matches(&agent.access_model)
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Keep collection order.
    #[default]
    Default,
    /// Highest popularity score first; ties keep collection order.
    Popularity,
}

impl SortOption {
    /// Parse the sort dropdown label; unknown labels fall back to `Default`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Popularity" => Self::Popularity,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Popularity => "Popularity",
        }
    }
}

/// One page of the filtered, sorted collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentPage<'a> {
    /// Agents on this page
    pub agents: Vec<&'a Agent>,
    /// 1-indexed page number that was requested
    pub page: usize,
    pub page_size: usize,
    /// Matches across all pages
    pub total_count: usize,
    /// Zero when nothing matches
    pub total_pages: usize,
}

impl AgentPage<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Agents passing every criterion, in input order.
#[must_use]
pub fn filter<'a>(agents: &'a [Agent], criteria: &FilterCriteria) -> Vec<&'a Agent> {
    agents.iter().filter(|agent| criteria.matches(agent)).collect()
}

/// Reorder in place. The sort is stable.
pub fn sort(agents: &mut [&Agent], option: SortOption) {
    match option {
        SortOption::Default => {}
        SortOption::Popularity => agents.sort_by(|a, b| compare_popularity(a, b)),
    }
}

/// Owned variant of [`sort`].
#[must_use]
pub fn sorted<'a>(mut agents: Vec<&'a Agent>, option: SortOption) -> Vec<&'a Agent> {
    sort(&mut agents, option);
    agents
}

fn compare_popularity(a: &Agent, b: &Agent) -> Ordering {
    b.popularity().total_cmp(&a.popularity())
}

/// Number of pages needed for `count` items.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// The items on 1-indexed `page`. Page 0 and pages past the end are empty.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Filter, sort and slice the collection into one page.
#[must_use]
pub fn derive_view<'a>(
    agents: &'a [Agent],
    criteria: &FilterCriteria,
    sort_option: SortOption,
    page: usize,
    page_size: usize,
) -> AgentPage<'a> {
    let matching = sorted(filter(agents, criteria), sort_option);
    let total_count = matching.len();

    AgentPage {
        agents: paginate(&matching, page, page_size).to_vec(),
        page,
        page_size,
        total_count,
        total_pages: total_pages(total_count, page_size),
    }
}

/// Page numbers for the pager: up to `window` consecutive pages around
/// `current`, shifted to stay within `1..=total`.
#[must_use]
pub fn page_window(current: usize, total: usize, window: usize) -> Vec<usize> {
    if total == 0 || window == 0 {
        return Vec::new();
    }

    let mut start = current.saturating_sub(window / 2).max(1);
    let end = total.min(start.saturating_add(window - 1));

    if end < start || end - start < window - 1 {
        start = end.saturating_sub(window - 1).max(1);
    }

    (start..=end).collect()
}
