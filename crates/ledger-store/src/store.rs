use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use ledger_client::{AssetService, ClientError};
use ledger_types::{AssetList, AssetRecord, ErrorKind, Month};
use tracing::{debug, info, warn};

use crate::{
    messages,
    recompute::TriggerOutcome,
    sequence::{RequestSequencer, RequestTicket},
    status::{StatusBoard, StatusKind, StatusMessage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { records: usize, version: u64 },
    Failed(ErrorKind),
    /// A newer request was issued while this one was in flight.
    Stale,
}

struct StoreState {
    assets: Arc<AssetList>,
    last_version: u64,
    sequencer: RequestSequencer,
    pending_loads: usize,
    selected_month: Option<Month>,
    dataset_month: Option<Month>,
}

impl StoreState {
    fn replace_assets(&mut self, records: Vec<AssetRecord>) -> (usize, u64) {
        self.last_version += 1;
        let count = records.len();
        self.assets = Arc::new(AssetList::new(self.last_version, records));
        (count, self.last_version)
    }
}

/// Authoritative holder of the asset working set.
///
/// The list is replaced wholesale by [`DataStore::load`] or by an applied
/// recompute. Every request takes a ticket from a shared sequencer and its
/// response is applied only if no newer request was issued meanwhile, so
/// `load` and recompute resolve by "latest issued wins".
pub struct DataStore {
    service: Arc<dyn AssetService>,
    state: Mutex<StoreState>,
    status: StatusBoard,
}

impl DataStore {
    pub fn new(service: Arc<dyn AssetService>, status_ttl: Duration) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState {
                assets: Arc::new(AssetList::empty()),
                last_version: 0,
                sequencer: RequestSequencer::new(),
                pending_loads: 0,
                selected_month: None,
                dataset_month: None,
            }),
            status: StatusBoard::new(status_ttl),
        }
    }

    pub fn service(&self) -> Arc<dyn AssetService> {
        Arc::clone(&self.service)
    }

    /// The current working set. Cheap to call; the list itself is shared.
    pub fn snapshot(&self) -> Arc<AssetList> {
        Arc::clone(&self.lock().assets)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().pending_loads > 0
    }

    /// Month highlighted by the last recompute request, applied or not.
    pub fn selected_month(&self) -> Option<Month> {
        self.lock().selected_month
    }

    /// Month whose recompute produced the current working set, if any.
    pub fn dataset_month(&self) -> Option<Month> {
        self.lock().dataset_month
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.current()
    }

    pub fn post_status(&self, kind: StatusKind, text: impl Into<String>) {
        self.status.post(kind, text);
    }

    /// Fetches the full list and replaces the working set with it.
    ///
    /// On failure the previous list stays in place and an error status is
    /// posted.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = {
            let mut state = self.lock();
            state.pending_loads += 1;
            state.sequencer.issue()
        };
        info!(ticket = ticket.value(), "Loading asset list");

        let pending = PendingLoad { store: self };
        let result = self.service.list_assets().await;
        drop(pending);

        self.finish_load(ticket, result)
    }

    fn finish_load(
        &self,
        ticket: RequestTicket,
        result: Result<Vec<AssetRecord>, ClientError>,
    ) -> LoadOutcome {
        let mut state = self.lock();
        if !state.sequencer.is_current(ticket) {
            drop(state);
            debug!(ticket = ticket.value(), "Discarding stale asset list response");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let (records, version) = state.replace_assets(records);
                state.selected_month = None;
                state.dataset_month = None;
                drop(state);
                info!(records, version, "Datos recibidos: asset list replaced");
                LoadOutcome::Loaded { records, version }
            }
            Err(err) => {
                drop(state);
                warn!(error = %err, "Failed to load asset list");
                self.status.post(StatusKind::Error, messages::LOAD_FAILED);
                LoadOutcome::Failed(err.kind())
            }
        }
    }

    /// Highlights `month` and takes a ticket for its recompute request.
    pub(crate) fn begin_recompute(&self, month: Month) -> RequestTicket {
        let mut state = self.lock();
        state.selected_month = Some(month);
        state.sequencer.issue()
    }

    pub(crate) fn finish_recompute(
        &self,
        ticket: RequestTicket,
        month: Month,
        result: Result<Vec<AssetRecord>, ClientError>,
    ) -> TriggerOutcome {
        let mut state = self.lock();
        if !state.sequencer.is_current(ticket) {
            drop(state);
            debug!(
                ticket = ticket.value(),
                month = month.number(),
                "Discarding stale recompute response"
            );
            return TriggerOutcome::Stale { month };
        }

        match result {
            Ok(records) => {
                let (records, version) = state.replace_assets(records);
                state.selected_month = Some(month);
                state.dataset_month = Some(month);
                drop(state);
                info!(
                    records,
                    version,
                    month = month.number(),
                    "Recomputed asset list applied"
                );
                self.status
                    .post(StatusKind::Success, messages::recompute_ready(month));
                TriggerOutcome::Applied { month, records }
            }
            Err(err) => {
                drop(state);
                let kind = err.kind();
                warn!(error = %err, month = month.number(), "Recompute failed");
                self.status
                    .post(StatusKind::Error, messages::recompute_failed(kind));
                TriggerOutcome::Failed { month, kind }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the loading flag raised while a load is in flight, including when
/// the load future is dropped before completing.
struct PendingLoad<'a> {
    store: &'a DataStore,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        let mut state = self.store.lock();
        state.pending_loads = state.pending_loads.saturating_sub(1);
    }
}
