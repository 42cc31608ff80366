use ledger_types::{AssetRecord, Month, ValidationReport};
use reqwest::{
    Client, RequestBuilder,
    header::{CACHE_CONTROL, EXPIRES, PRAGMA},
};

use crate::{config::ServiceConfig, dto::AssetRecordDTO, error::ClientError, traits::AssetService};

pub struct HttpAssetClient {
    http_client: Client,
    config: ServiceConfig,
}

impl HttpAssetClient {
    pub fn new(config: ServiceConfig) -> Result<Self, ClientError> {
        let http_client = http_client()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn fetch_records(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<AssetRecord>, ClientError> {
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::ServerError {
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().await?;
            let dtos: Vec<AssetRecordDTO> = serde_json::from_slice(&body)?;
            Ok::<_, ClientError>(dtos.into_iter().map(AssetRecord::from).collect::<Vec<_>>())
        };

        let records = match self.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| ClientError::Timeout(limit))??,
            None => exchange.await?,
        };

        log_validation_issues(&records);
        Ok(records)
    }
}

#[async_trait::async_trait]
impl AssetService for HttpAssetClient {
    async fn list_assets(&self) -> Result<Vec<AssetRecord>, ClientError> {
        let request = self
            .http_client
            .get(self.config.assets_url().clone())
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0");

        let records = self.fetch_records(request).await?;
        tracing::info!(records = records.len(), "Fetched asset list");
        Ok(records)
    }

    async fn recompute_through(&self, month: Month) -> Result<Vec<AssetRecord>, ClientError> {
        let request = self.http_client.post(self.config.recompute_url(month)?);

        let records = self.fetch_records(request).await?;
        tracing::info!(
            records = records.len(),
            month = month.number(),
            "Fetched recomputed asset list"
        );
        Ok(records)
    }
}

fn log_validation_issues(records: &[AssetRecord]) {
    let report = ValidationReport::from_records(records);
    if !report.is_clean() {
        tracing::warn!(
            records_with_issues = report.records_with_issues,
            total_issues = report.total_issues,
            sample = ?report.sample_codes,
            "Service returned assets with out-of-range values"
        );
    }
}

pub fn http_client() -> Result<Client, ClientError> {
    Client::builder().build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        ClientError::ClientBuild
    })
}
