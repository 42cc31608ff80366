use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient operator-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub expires_at: Instant,
}

struct ActiveStatus {
    message: StatusMessage,
    generation: u64,
    expiry: CancellationToken,
}

#[derive(Default)]
struct Slot {
    active: Option<ActiveStatus>,
    generation: u64,
}

/// Holds at most one status message and clears it after `ttl`.
///
/// Posting a new message cancels the pending expiry of the previous one, so
/// an older timer can never erase a newer message.
pub struct StatusBoard {
    ttl: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl StatusBoard {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::default(),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&self, kind: StatusKind, text: impl Into<String>) {
        let expires_at = Instant::now() + self.ttl;
        let expiry = CancellationToken::new();

        let generation = {
            let mut slot = lock(&self.slot);
            if let Some(previous) = slot.active.take() {
                previous.expiry.cancel();
            }
            slot.generation += 1;
            slot.active = Some(ActiveStatus {
                message: StatusMessage {
                    kind,
                    text: text.into(),
                    expires_at,
                },
                generation: slot.generation,
                expiry: expiry.clone(),
            });
            slot.generation
        };

        self.schedule_expiry(generation, expires_at, expiry);
    }

    /// The live message, if any. Expired messages are never returned even if
    /// their timer has not run yet.
    pub fn current(&self) -> Option<StatusMessage> {
        let slot = lock(&self.slot);
        slot.active
            .as_ref()
            .map(|active| active.message.clone())
            .filter(|message| message.expires_at > Instant::now())
    }

    pub fn dismiss(&self) {
        if let Some(previous) = lock(&self.slot).active.take() {
            previous.expiry.cancel();
        }
    }

    fn schedule_expiry(&self, generation: u64, expires_at: Instant, expiry: CancellationToken) {
        // Outside a runtime the expiry check in `current` is all we get.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let slot = Arc::downgrade(&self.slot);
        runtime.spawn(async move {
            tokio::select! {
                () = expiry.cancelled() => {}
                () = tokio::time::sleep_until(expires_at) => {
                    if let Some(slot) = slot.upgrade() {
                        let mut slot = lock(&slot);
                        if slot
                            .active
                            .as_ref()
                            .is_some_and(|active| active.generation == generation)
                        {
                            slot.active = None;
                        }
                    }
                }
            }
        });
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl Drop for StatusBoard {
    fn drop(&mut self) {
        self.dismiss();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
