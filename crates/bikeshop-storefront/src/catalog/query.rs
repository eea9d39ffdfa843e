use bikeshop_core::{QueryParams, SortKey};

use super::filters::{Availability, Filters};

/// Filter state plus page and sort for one listing view.
///
/// Every filter or sort change sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery<F> {
    filters: F,
    page: u32,
    limit: u32,
    sort: SortKey,
}

impl<F: Filters> ListingQuery<F> {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            filters: F::default(),
            page: 1,
            limit: limit.max(1),
            sort: SortKey::default(),
        }
    }

    #[must_use]
    pub fn filters(&self) -> &F {
        &self.filters
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn active_filters(&self) -> usize {
        self.filters.active_count()
    }

    /// Edits the filters in place and resets to page 1.
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.filters);
        self.page = 1;
    }

    pub fn toggle(&mut self, facet: F::Facet, value: &str) {
        self.update_filters(|f| f.toggle(facet, value));
    }

    pub fn toggle_availability(&mut self, edit: impl FnOnce(&mut Availability)) {
        self.update_filters(|f| edit(f.availability_mut()));
    }

    pub fn set_price_min(&mut self, raw: &str) {
        self.update_filters(|f| f.price_mut().set_min_input(raw));
    }

    pub fn set_price_max(&mut self, raw: &str) {
        self.update_filters(|f| f.price_mut().set_max_input(raw));
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(F::clear);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Moves to `page`; pages start at 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Query parameters for the listing call: `page`, `limit`, and `sort`
    /// always, then every non-default facet.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.push("sort", self.sort.as_param());
        self.filters.apply_to(&mut params);
        params
    }
}
