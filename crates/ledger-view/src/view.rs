use std::{ops::Range, sync::Arc};

use ledger_types::{AssetList, AssetRecord};

use crate::{
    pagination::{PageSize, Paginator},
    search::filter_indices,
    totals::{KpiTotals, aggregate},
};

/// Operator-controlled view parameters: the search query and the page cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    query: String,
    paginator: Paginator,
}

impl ViewState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub const fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    /// Replaces the query. A different query always goes back to page 1.
    pub fn set_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.paginator.reset();
        true
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.paginator.set_page_size(page_size);
    }

    pub const fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn key(&self, list_version: u64) -> ViewKey {
        ViewKey {
            list_version,
            query: self.query.clone(),
            page_size: self.paginator.page_size(),
            current_page: self.paginator.current_page(),
        }
    }
}

/// Everything the derived view depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub list_version: u64,
    pub query: String,
    pub page_size: PageSize,
    pub current_page: usize,
}

/// Filter result and its totals for one `(list_version, query)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
    totals: KpiTotals,
}

impl FilteredView {
    pub fn derive(list: &AssetList, query: &str) -> Self {
        let indices = filter_indices(list.records(), query);
        let totals = aggregate(indices.iter().map(|&idx| &list.records()[idx]));
        Self { indices, totals }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub const fn totals(&self) -> &KpiTotals {
        &self.totals
    }

    /// Filtered records in list order. `list` must be the list this view was
    /// derived from.
    pub fn records<'a>(&'a self, list: &'a AssetList) -> impl Iterator<Item = &'a AssetRecord> + 'a {
        self.indices.iter().map(move |&idx| &list.records()[idx])
    }
}

/// Derived state for one [`ViewKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub filtered: Arc<FilteredView>,
    /// Range over the filtered records that forms the visible page.
    pub visible: Range<usize>,
    pub current_page: usize,
    pub total_pages: usize,
}

impl DerivedView {
    pub fn visible_records<'a>(
        &'a self,
        list: &'a AssetList,
    ) -> impl Iterator<Item = &'a AssetRecord> + 'a {
        self.filtered.indices[self.visible.clone()]
            .iter()
            .map(move |&idx| &list.records()[idx])
    }
}

/// How often each memoized stage actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub filter_runs: usize,
    pub page_runs: usize,
}

/// Memoizes [`DerivedView`] on its [`ViewKey`]. Filtering and totals are
/// only redone when the list version or query change; paging is redone when
/// any key component changes.
#[derive(Debug, Default)]
pub struct ViewCache {
    filtered: Option<(u64, String, Arc<FilteredView>)>,
    page: Option<(ViewKey, DerivedView)>,
    stats: CacheStats,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn derive(&mut self, list: &AssetList, state: &ViewState) -> DerivedView {
        let key = state.key(list.version());
        if let Some((cached_key, view)) = &self.page
            && *cached_key == key
        {
            return view.clone();
        }

        let filtered = self.filtered(list, state.query());
        let paginator = state.paginator();
        let view = DerivedView {
            visible: paginator.visible_range(filtered.len()),
            current_page: paginator.current_page(),
            total_pages: paginator.total_pages(filtered.len()),
            filtered,
        };
        self.stats.page_runs += 1;
        self.page = Some((key, view.clone()));
        view
    }

    fn filtered(&mut self, list: &AssetList, query: &str) -> Arc<FilteredView> {
        if let Some((version, cached_query, view)) = &self.filtered
            && *version == list.version()
            && cached_query == query
        {
            return Arc::clone(view);
        }

        let view = Arc::new(FilteredView::derive(list, query));
        self.stats.filter_runs += 1;
        tracing::debug!(
            version = list.version(),
            query,
            matched = view.len(),
            "Re-derived filtered view"
        );
        self.filtered = Some((list.version(), query.to_string(), Arc::clone(&view)));
        view
    }
}
