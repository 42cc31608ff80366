use std::{future::Future, sync::Arc, time::Duration};

use chrono::NaiveDate;
use ledger_client::AssetService;
use ledger_export::{ExportArtifact, ExportError, Exporter};
use ledger_store::{
    DataStore, LoadOutcome, RecomputeController, RecomputeState, StatusKind, TriggerOutcome,
};
use ledger_types::{AssetList, Month};
use ledger_view::{DerivedView, PageInputError, PageSize, ViewCache, ViewState};
use tracing::warn;

use crate::render::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    First,
    Previous,
    Next,
    Last,
}

/// One operator's view over the shared working set.
///
/// Loads and recomputes go through the shared [`DataStore`] and may run in
/// the background; the search query, page cursor and derived-view memo are
/// owned here.
pub struct Session {
    store: Arc<DataStore>,
    recompute: Arc<RecomputeController>,
    exporter: Exporter,
    view: ViewState,
    cache: ViewCache,
}

impl Session {
    pub fn new(service: Arc<dyn AssetService>, exporter: Exporter, status_ttl: Duration) -> Self {
        let store = Arc::new(DataStore::new(service, status_ttl));
        let recompute = Arc::new(RecomputeController::new(Arc::clone(&store)));
        Self {
            store,
            recompute,
            exporter,
            view: ViewState::default(),
            cache: ViewCache::new(),
        }
    }

    pub const fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    pub const fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub async fn load(&self) -> LoadOutcome {
        self.store.load().await
    }

    /// A load that does not borrow the session, for running in the
    /// background.
    pub fn load_task(&self) -> impl Future<Output = LoadOutcome> + Send + use<> {
        let store = Arc::clone(&self.store);
        async move { store.load().await }
    }

    pub async fn recompute(&self, month: Month) -> TriggerOutcome {
        self.recompute.trigger(month).await
    }

    pub fn recompute_task(
        &self,
        month: Month,
    ) -> impl Future<Output = TriggerOutcome> + Send + use<> {
        let controller = Arc::clone(&self.recompute);
        async move { controller.trigger(month).await }
    }

    pub fn search(&mut self, query: &str) -> bool {
        self.view.set_query(query)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.view.set_page_size(page_size);
    }

    /// Derived view of the current working set under the current query and
    /// page cursor.
    pub fn derive(&mut self) -> (Arc<AssetList>, DerivedView) {
        let list = self.store.snapshot();
        let view = self.cache.derive(&list, &self.view);
        (list, view)
    }

    pub fn navigate(&mut self, navigation: Navigation) -> bool {
        let total_pages = self.derive().1.total_pages;
        let paginator = self.view.paginator_mut();
        match navigation {
            Navigation::First => paginator.first_page(),
            Navigation::Previous => paginator.previous_page(),
            Navigation::Next => paginator.next_page(total_pages),
            Navigation::Last => paginator.last_page(total_pages),
        }
    }

    pub fn jump_to(&mut self, input: &str) -> Result<usize, PageInputError> {
        let total_pages = self.derive().1.total_pages;
        self.view.paginator_mut().jump_to_input(input, total_pages)
    }

    /// Exports the filtered (not paginated) list and posts the outcome to
    /// the status line.
    pub async fn export(&mut self, today: NaiveDate) -> Result<ExportArtifact, ExportError> {
        let (list, view) = self.derive();
        let result = self
            .exporter
            .export(view.filtered.records(&list), today)
            .await;

        match &result {
            Ok(artifact) => self
                .store
                .post_status(StatusKind::Success, artifact.status_text()),
            Err(err) => {
                warn!(error = %err, kind = %err.kind(), "Export failed");
                self.store.post_status(StatusKind::Error, err.status_text());
            }
        }
        result
    }

    pub fn screen(&mut self) -> Screen {
        let (list, view) = self.derive();
        Screen {
            list,
            view,
            query: self.view.query().to_string(),
            loading: self.store.is_loading(),
            requesting: match self.recompute.state() {
                RecomputeState::Requesting(month) => Some(month),
                RecomputeState::Idle => None,
            },
            selected_month: self.store.selected_month(),
            dataset_month: self.store.dataset_month(),
            status: self.store.status(),
        }
    }
}
