use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ledger_types::{ErrorKind, Month};
use tracing::{debug, info};

use crate::store::DataStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecomputeState {
    #[default]
    Idle,
    Requesting(Month),
}

/// How a call to [`RecomputeController::trigger`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The recomputed list replaced the working set.
    Applied { month: Month, records: usize },
    /// The request failed; the working set is unchanged.
    Failed { month: Month, kind: ErrorKind },
    /// A newer request was issued before this response arrived.
    Stale { month: Month },
    /// Another recompute was already in flight; no request was made.
    Ignored { in_flight: Month },
}

/// Drives the "recompute through month N" request. At most one request is
/// in flight at a time and triggers arriving meanwhile are ignored.
pub struct RecomputeController {
    store: Arc<DataStore>,
    state: Mutex<RecomputeState>,
}

impl RecomputeController {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            store,
            state: Mutex::default(),
        }
    }

    pub fn state(&self) -> RecomputeState {
        *lock(&self.state)
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.state(), RecomputeState::Requesting(_))
    }

    pub async fn trigger(&self, month: Month) -> TriggerOutcome {
        {
            let mut state = lock(&self.state);
            if let RecomputeState::Requesting(in_flight) = *state {
                debug!(
                    month = month.number(),
                    in_flight = in_flight.number(),
                    "Recompute already in flight, ignoring trigger"
                );
                return TriggerOutcome::Ignored { in_flight };
            }
            *state = RecomputeState::Requesting(month);
        }
        let _idle = ReturnToIdle { state: &self.state };

        let ticket = self.store.begin_recompute(month);
        info!(
            ticket = ticket.value(),
            month = month.number(),
            "Requesting recompute"
        );

        let result = self.store.service().recompute_through(month).await;
        self.store.finish_recompute(ticket, month, result)
    }
}

struct ReturnToIdle<'a> {
    state: &'a Mutex<RecomputeState>,
}

impl Drop for ReturnToIdle<'_> {
    fn drop(&mut self) {
        *lock(self.state) = RecomputeState::Idle;
    }
}

fn lock(state: &Mutex<RecomputeState>) -> MutexGuard<'_, RecomputeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ledger_client::testing::{Reply, ScriptedAssetService};
    use ledger_types::AssetRecord;
    use rust_decimal::dec;

    use super::*;
    use crate::{
        messages,
        status::{StatusBoard, StatusKind},
        store::LoadOutcome,
    };

    fn assets(codes: &[&str]) -> Vec<AssetRecord> {
        codes.iter().map(|code| AssetRecord::new(*code)).collect()
    }

    async fn loaded(
        service: &Arc<ScriptedAssetService>,
        codes: &[&str],
    ) -> (Arc<DataStore>, RecomputeController) {
        service.push_list(Reply::Assets(assets(codes)));
        let store = Arc::new(DataStore::new(service.clone(), StatusBoard::DEFAULT_TTL));
        assert!(matches!(store.load().await, LoadOutcome::Loaded { .. }));
        let controller = RecomputeController::new(Arc::clone(&store));
        (store, controller)
    }

    #[tokio::test]
    async fn test_success_replaces_set_and_selects_month() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A", "B"]).await;
        let recomputed = vec![AssetRecord {
            total_depreciation_current_year: Some(dec!(42)),
            ..AssetRecord::new("A")
        }];
        service.push_recompute(Reply::Assets(recomputed));

        let outcome = controller.trigger(Month::Jun).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Applied {
                month: Month::Jun,
                records: 1
            }
        );
        assert_eq!(service.recompute_calls(), vec![Month::Jun]);
        assert_eq!(store.selected_month(), Some(Month::Jun));
        assert_eq!(store.dataset_month(), Some(Month::Jun));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.records()[0].total_depreciation_current_year,
            Some(dec!(42))
        );
        let status = store.status().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, "Vista preliminar de Jun generada.");
        assert_eq!(controller.state(), RecomputeState::Idle);
    }

    #[tokio::test]
    async fn test_server_failure_keeps_set_and_month() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A", "B", "C"]).await;
        service.push_recompute(Reply::Status(500));

        let outcome = controller.trigger(Month::Mar).await;

        assert_eq!(
            outcome,
            TriggerOutcome::Failed {
                month: Month::Mar,
                kind: ErrorKind::ServerError
            }
        );
        assert_eq!(store.snapshot().version(), 1);
        assert_eq!(store.snapshot().len(), 3);
        assert_eq!(store.selected_month(), Some(Month::Mar));
        assert_eq!(store.dataset_month(), None);
        let status = store.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, messages::RECOMPUTE_FAILED);
        assert_eq!(controller.state(), RecomputeState::Idle);
    }

    #[tokio::test]
    async fn test_network_failure_reports_connection_error() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A"]).await;
        service.push_recompute(Reply::Timeout);

        let outcome = controller.trigger(Month::Dec).await;

        assert!(matches!(
            outcome,
            TriggerOutcome::Failed {
                kind: ErrorKind::NetworkFailure,
                ..
            }
        ));
        assert_eq!(store.status().unwrap().text, messages::RECOMPUTE_UNREACHABLE);
    }

    #[tokio::test]
    async fn test_trigger_while_requesting_is_ignored() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A"]).await;
        let gate = service.push_recompute_gated(Reply::Assets(assets(&["A", "B"])));

        let (first, second) = tokio::join!(controller.trigger(Month::Mar), async {
            assert_eq!(controller.state(), RecomputeState::Requesting(Month::Mar));
            let second = controller.trigger(Month::Apr).await;
            gate.notify_one();
            second
        });

        assert_eq!(
            second,
            TriggerOutcome::Ignored {
                in_flight: Month::Mar
            }
        );
        assert!(matches!(first, TriggerOutcome::Applied { month: Month::Mar, .. }));
        assert_eq!(service.recompute_calls(), vec![Month::Mar]);
        assert_eq!(store.selected_month(), Some(Month::Mar));
        assert!(!controller.is_requesting());
    }

    #[tokio::test]
    async fn test_load_issued_later_wins_over_recompute() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A"]).await;
        let gate = service.push_recompute_gated(Reply::Assets(assets(&["RECOMPUTED"])));
        service.push_list(Reply::Assets(assets(&["FRESH-1", "FRESH-2"])));

        let (recompute, load) = tokio::join!(controller.trigger(Month::Feb), async {
            let load = store.load().await;
            gate.notify_one();
            load
        });

        assert!(matches!(load, LoadOutcome::Loaded { records: 2, .. }));
        assert_eq!(recompute, TriggerOutcome::Stale { month: Month::Feb });
        assert_eq!(store.snapshot().records()[0].code, "FRESH-1");
        assert_eq!(store.selected_month(), None);
        assert_eq!(store.dataset_month(), None);
        assert_eq!(store.status(), None);
    }

    #[tokio::test]
    async fn test_recompute_issued_later_wins_over_load() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A"]).await;
        let gate = service.push_list_gated(Reply::Assets(assets(&["RELOADED"])));
        service.push_recompute(Reply::Assets(assets(&["RECOMPUTED"])));

        let (load, recompute) = tokio::join!(store.load(), async {
            let recompute = controller.trigger(Month::Nov).await;
            gate.notify_one();
            recompute
        });

        assert_eq!(load, LoadOutcome::Stale);
        assert!(matches!(recompute, TriggerOutcome::Applied { month: Month::Nov, .. }));
        assert_eq!(store.snapshot().records()[0].code, "RECOMPUTED");
        assert_eq!(store.selected_month(), Some(Month::Nov));
    }

    #[tokio::test]
    async fn test_dropped_trigger_returns_to_idle() {
        let service = Arc::new(ScriptedAssetService::new());
        let (store, controller) = loaded(&service, &["A"]).await;
        let _gate = service.push_recompute_gated(Reply::Assets(assets(&["B"])));

        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), controller.trigger(Month::May)).await;

        assert!(timed_out.is_err());
        assert_eq!(controller.state(), RecomputeState::Idle);
        assert_eq!(store.snapshot().records()[0].code, "A");
    }
}
