use std::time::Duration;

use ledger_types::Month;
use url::Url;

use crate::error::ClientError;

const ASSETS_PATH: &str = "api/activos";

/// Connection settings for the remote service. Built once at startup and
/// shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    base_url: Url,
    assets_url: Url,
    request_timeout: Option<Duration>,
}

impl ServiceConfig {
    /// `base_url` is the service root, e.g. `http://localhost:8080`. A path
    /// prefix (`https://host/ledger`) is kept.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        let assets_url = Url::parse(&format!(
            "{}/{ASSETS_PATH}",
            base_url.as_str().trim_end_matches('/')
        ))?;

        Ok(Self {
            base_url,
            assets_url,
            request_timeout: None,
        })
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// `GET` endpoint returning the full asset list.
    pub const fn assets_url(&self) -> &Url {
        &self.assets_url
    }

    /// `POST` endpoint recomputing depreciation through `month`.
    pub fn recompute_url(&self, month: Month) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!(
            "{}/calcular/{}",
            self.assets_url.as_str(),
            month.number()
        ))?)
    }
}
