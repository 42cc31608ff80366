use std::{sync::Arc, time::Duration};

use moka::future::Cache;
use tracing::{info, warn};

use crate::{
    codec::{CodecLoader, SpreadsheetCodec},
    error::CodecLoadError,
};

/// Lazily loaded, shared spreadsheet codec.
///
/// The first caller triggers the load; callers arriving while it runs wait
/// for the same load and observe its outcome. A failed load is not kept, so
/// the next call starts a fresh attempt.
pub struct LazyCodec {
    loader: Arc<dyn CodecLoader>,
    codec: Cache<(), Arc<dyn SpreadsheetCodec>>,
    load_timeout: Option<Duration>,
}

impl LazyCodec {
    pub fn new(loader: Arc<dyn CodecLoader>) -> Self {
        Self {
            loader,
            codec: Cache::builder().max_capacity(1).build(),
            load_timeout: None,
        }
    }

    #[must_use]
    pub const fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.codec.contains_key(&())
    }

    pub async fn get(&self) -> Result<Arc<dyn SpreadsheetCodec>, Arc<CodecLoadError>> {
        let loader = Arc::clone(&self.loader);
        let load_timeout = self.load_timeout;

        self.codec
            .try_get_with((), async move {
                info!("Loading spreadsheet codec");
                let loaded = match load_timeout {
                    Some(limit) => tokio::time::timeout(limit, loader.load())
                        .await
                        .unwrap_or(Err(CodecLoadError::Timeout(limit))),
                    None => loader.load().await,
                };
                if let Err(err) = &loaded {
                    warn!(error = %err, "Spreadsheet codec failed to load");
                }
                loaded
            })
            .await
    }
}
