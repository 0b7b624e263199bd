//! In-memory repository over a [`FixtureSet`].

use async_trait::async_trait;
use hbi_core::{
    BidRecord, CommitmentRecord, DocumentRecord, PipelineItem, Spcr, TradePartnerRecord,
};
use tokio::sync::RwLock;

use super::traits::{enforce_validation, DashboardRepository, FixtureSet};
use crate::config::ValidationMode;
use crate::error::DataError;

/// Serves records held in memory. Records can be replaced at runtime.
pub struct InMemoryRepository {
    id: String,
    records: RwLock<FixtureSet>,
}

impl InMemoryRepository {
    /// Create from records that are trusted as-is.
    pub fn new(records: FixtureSet) -> Self {
        Self {
            id: "memory".to_string(),
            records: RwLock::new(records),
        }
    }

    /// Create from untrusted records, validating every collection.
    pub fn validated(records: FixtureSet, mode: ValidationMode) -> Result<Self, DataError> {
        let records = FixtureSet {
            pipeline: enforce_validation(records.pipeline, "pipeline", mode)?,
            trade_partners: enforce_validation(records.trade_partners, "trade_partners", mode)?,
            bids: enforce_validation(records.bids, "bids", mode)?,
            documents: enforce_validation(records.documents, "documents", mode)?,
            commitments: enforce_validation(records.commitments, "commitments", mode)?,
            spcrs: enforce_validation(records.spcrs, "spcrs", mode)?,
        };
        Ok(Self::new(records))
    }

    /// Replace all records.
    pub async fn replace(&self, records: FixtureSet) {
        *self.records.write().await = records;
    }
}

#[async_trait]
impl DashboardRepository for InMemoryRepository {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn fetch_pipeline(&self) -> Result<Vec<PipelineItem>, DataError> {
        Ok(self.records.read().await.pipeline.clone())
    }

    async fn fetch_trade_partners(&self) -> Result<Vec<TradePartnerRecord>, DataError> {
        Ok(self.records.read().await.trade_partners.clone())
    }

    async fn fetch_bids(&self) -> Result<Vec<BidRecord>, DataError> {
        Ok(self.records.read().await.bids.clone())
    }

    async fn fetch_documents(&self) -> Result<Vec<DocumentRecord>, DataError> {
        Ok(self.records.read().await.documents.clone())
    }

    async fn fetch_commitments(&self) -> Result<Vec<CommitmentRecord>, DataError> {
        Ok(self.records.read().await.commitments.clone())
    }

    async fn fetch_spcrs(&self) -> Result<Vec<Spcr>, DataError> {
        Ok(self.records.read().await.spcrs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbi_core::PipelineConfig;

    fn item(division: &str, value: f64, weighted: f64) -> PipelineItem {
        PipelineItem {
            division: division.to_string(),
            config: PipelineConfig {
                pipeline_value: value,
                probability_weighted: weighted,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_replace_records() {
        let repo = InMemoryRepository::new(FixtureSet::default());
        assert!(repo.fetch_pipeline().await.unwrap().is_empty());

        repo.replace(FixtureSet {
            pipeline: vec![item("Healthcare", 10.0, 5.0)],
            ..Default::default()
        })
        .await;
        assert_eq!(repo.fetch_pipeline().await.unwrap().len(), 1);
    }

    #[test]
    fn test_validated_drops_bad_items() {
        let set = FixtureSet {
            pipeline: vec![item("Healthcare", 10.0, 5.0), item("Education", 10.0, 50.0)],
            ..Default::default()
        };
        let repo = InMemoryRepository::validated(set.clone(), ValidationMode::Lenient).unwrap();
        let kept = tokio_test::block_on(repo.fetch_pipeline()).unwrap();
        assert_eq!(kept.len(), 1);

        assert!(InMemoryRepository::validated(set, ValidationMode::Strict).is_err());
    }
}
