//! Record store: loads account, journal, and price exports from disk.
//!
//! This is the async data-access boundary. Records are fetched here and
//! handed to the synchronous engines as plain slices.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{AccountSnapshot, PricePoint, TradeRecord};

/// JSON record files rooted at a data directory.
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths resolve against the data directory.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        }
    }

    pub async fn load_accounts(&self, file: &Path) -> Result<Vec<AccountSnapshot>> {
        self.read_json(file).await.context("Failed to load accounts")
    }

    pub async fn load_trades(&self, file: &Path) -> Result<Vec<TradeRecord>> {
        self.read_json(file).await.context("Failed to load journal trades")
    }

    /// Load a chronological price series (bare closes or price objects).
    pub async fn load_prices(&self, file: &Path) -> Result<Vec<PricePoint>> {
        self.read_json(file).await.context("Failed to load price series")
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &Path) -> Result<T> {
        let path = self.resolve(file);

        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let records = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Loaded records");
        Ok(records)
    }
}
