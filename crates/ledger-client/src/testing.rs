//! Scripted [`AssetService`] for exercising callers without a live service.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use ledger_types::{AssetRecord, Month};
use tokio::sync::Notify;

use crate::{error::ClientError, traits::AssetService};

/// What a scripted call resolves to.
#[derive(Debug, Clone)]
pub enum Reply {
    Assets(Vec<AssetRecord>),
    Status(u16),
    Timeout,
}

struct Scripted {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

/// Replies are consumed in FIFO order per endpoint. A gated reply is held
/// until its `Notify` is signalled, which lets tests interleave responses.
#[derive(Default)]
pub struct ScriptedAssetService {
    list_replies: Mutex<VecDeque<Scripted>>,
    recompute_replies: Mutex<VecDeque<Scripted>>,
    list_calls: AtomicUsize,
    recompute_calls: Mutex<Vec<Month>>,
}

impl ScriptedAssetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, reply: Reply) {
        push(&self.list_replies, reply, None);
    }

    pub fn push_list_gated(&self, reply: Reply) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        push(&self.list_replies, reply, Some(Arc::clone(&gate)));
        gate
    }

    pub fn push_recompute(&self, reply: Reply) {
        push(&self.recompute_replies, reply, None);
    }

    pub fn push_recompute_gated(&self, reply: Reply) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        push(&self.recompute_replies, reply, Some(Arc::clone(&gate)));
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn recompute_calls(&self) -> Vec<Month> {
        self.recompute_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn push(queue: &Mutex<VecDeque<Scripted>>, reply: Reply, gate: Option<Arc<Notify>>) {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_back(Scripted { reply, gate });
}

async fn resolve(queue: &Mutex<VecDeque<Scripted>>) -> Result<Vec<AssetRecord>, ClientError> {
    let next = queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front();
    let Some(Scripted { reply, gate }) = next else {
        return Err(ClientError::ServerError { status: 599 });
    };

    if let Some(gate) = gate {
        gate.notified().await;
    }

    match reply {
        Reply::Assets(records) => Ok(records),
        Reply::Status(status) => Err(ClientError::ServerError { status }),
        Reply::Timeout => Err(ClientError::Timeout(Duration::from_secs(30))),
    }
}

#[async_trait::async_trait]
impl AssetService for ScriptedAssetService {
    async fn list_assets(&self) -> Result<Vec<AssetRecord>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        resolve(&self.list_replies).await
    }

    async fn recompute_through(&self, month: Month) -> Result<Vec<AssetRecord>, ClientError> {
        self.recompute_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(month);
        resolve(&self.recompute_replies).await
    }
}
