//! REST backend client using reqwest

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::ledger::{Client, Payable, Receivable};

/// Everything the financial views need, fetched together
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub clients: Vec<Client>,
    pub payables: Vec<Payable>,
    pub receivables: Vec<Receivable>,
}

/// Wrapper around a reqwest client pointed at the backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    inner: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: BackendConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { inner, config })
    }

    /// Get the backend configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.url(path);
        let response = self.inner.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Backend(format!("GET {} returned {}", url, status)));
        }

        Ok(response.json().await?)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.get_list("/clients").await
    }

    pub async fn list_payables(&self) -> Result<Vec<Payable>> {
        self.get_list("/cash-pay").await
    }

    pub async fn list_receivables(&self) -> Result<Vec<Receivable>> {
        self.get_list("/cash-receive").await
    }

    /// Fetch clients, payables and receivables concurrently
    pub async fn fetch_ledger(&self) -> Result<LedgerSnapshot> {
        let (clients, payables, receivables) = tokio::try_join!(
            self.list_clients(),
            self.list_payables(),
            self.list_receivables()
        )?;

        Ok(LedgerSnapshot {
            clients,
            payables,
            receivables,
        })
    }
}
