//! JSON fixture-file repository.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hbi_core::{
    BidRecord, CommitmentRecord, DocumentRecord, PipelineItem, Spcr, TradePartnerRecord, Validate,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::traits::{enforce_validation, DashboardRepository, FixtureSet};
use crate::config::{DataConfig, ValidationMode};
use crate::error::DataError;

pub const PIPELINE_FILE: &str = "pipeline.json";
pub const TRADE_PARTNERS_FILE: &str = "trade_partners.json";
pub const BIDS_FILE: &str = "bids.json";
pub const DOCUMENTS_FILE: &str = "documents.json";
pub const COMMITMENTS_FILE: &str = "commitments.json";
pub const SPCRS_FILE: &str = "spcrs.json";

/// Reads each collection from a JSON array file in a fixtures directory.
///
/// A missing file is an empty collection. Records are validated on every
/// read according to the configured [`ValidationMode`].
pub struct FixtureRepository {
    dir: PathBuf,
    validation: ValidationMode,
    id: String,
}

impl FixtureRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            id: format!("fixtures:{}", dir.display()),
            dir,
            validation: ValidationMode::default(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.fixtures_dir.clone()).with_validation(config.validation)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every collection at once.
    pub async fn load_all(&self) -> Result<FixtureSet, DataError> {
        let (pipeline, trade_partners, bids, documents, commitments, spcrs) = futures::try_join!(
            self.fetch_pipeline(),
            self.fetch_trade_partners(),
            self.fetch_bids(),
            self.fetch_documents(),
            self.fetch_commitments(),
            self.fetch_spcrs(),
        )?;
        Ok(FixtureSet {
            pipeline,
            trade_partners,
            bids,
            documents,
            commitments,
            spcrs,
        })
    }

    async fn load<T>(&self, file: &str) -> Result<Vec<T>, DataError>
    where
        T: DeserializeOwned + Validate,
    {
        let path = self.dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Fixture file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(DataError::Io { path, source }),
        };

        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| DataError::Parse {
                path: path.clone(),
                source,
            })?;
        let loaded = records.len();
        let records = enforce_validation(records, file, self.validation)?;

        info!(
            file = file,
            loaded = loaded,
            kept = records.len(),
            "Loaded fixture records"
        );
        Ok(records)
    }
}

#[async_trait]
impl DashboardRepository for FixtureRepository {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    async fn fetch_pipeline(&self) -> Result<Vec<PipelineItem>, DataError> {
        self.load(PIPELINE_FILE).await
    }

    async fn fetch_trade_partners(&self) -> Result<Vec<TradePartnerRecord>, DataError> {
        self.load(TRADE_PARTNERS_FILE).await
    }

    async fn fetch_bids(&self) -> Result<Vec<BidRecord>, DataError> {
        self.load(BIDS_FILE).await
    }

    async fn fetch_documents(&self) -> Result<Vec<DocumentRecord>, DataError> {
        self.load(DOCUMENTS_FILE).await
    }

    async fn fetch_commitments(&self) -> Result<Vec<CommitmentRecord>, DataError> {
        self.load(COMMITMENTS_FILE).await
    }

    async fn fetch_spcrs(&self) -> Result<Vec<Spcr>, DataError> {
        self.load(SPCRS_FILE).await
    }
}
