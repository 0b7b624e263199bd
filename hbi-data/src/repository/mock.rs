//! Mock repository for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use hbi_core::{
    BidRecord, CommitmentRecord, DocumentRecord, PipelineItem, Spcr, TradePartnerRecord,
};

use super::traits::{DashboardRepository, FixtureSet};
use crate::error::DataError;

/// Mock repository for testing.
///
/// Serves a fixed record set, can be switched off, and counts fetches.
pub struct MockRepository {
    records: FixtureSet,
    available: AtomicBool,
    call_count: AtomicU32,
}

impl MockRepository {
    pub fn new(records: FixtureSet) -> Self {
        Self {
            records,
            available: AtomicBool::new(true),
            call_count: AtomicU32::new(0),
        }
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Toggle availability after construction.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Get the number of fetch calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn serve<T: Clone>(&self, records: &[T]) -> Result<Vec<T>, DataError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.available.load(Ordering::SeqCst) {
            return Err(DataError::Unavailable("Mock repository disabled".to_string()));
        }
        Ok(records.to_vec())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new(FixtureSet::default())
    }
}

#[async_trait]
impl DashboardRepository for MockRepository {
    fn id(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn fetch_pipeline(&self) -> Result<Vec<PipelineItem>, DataError> {
        self.serve(&self.records.pipeline)
    }

    async fn fetch_trade_partners(&self) -> Result<Vec<TradePartnerRecord>, DataError> {
        self.serve(&self.records.trade_partners)
    }

    async fn fetch_bids(&self) -> Result<Vec<BidRecord>, DataError> {
        self.serve(&self.records.bids)
    }

    async fn fetch_documents(&self) -> Result<Vec<DocumentRecord>, DataError> {
        self.serve(&self.records.documents)
    }

    async fn fetch_commitments(&self) -> Result<Vec<CommitmentRecord>, DataError> {
        self.serve(&self.records.commitments)
    }

    async fn fetch_spcrs(&self) -> Result<Vec<Spcr>, DataError> {
        self.serve(&self.records.spcrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_repository() {
        let repo = MockRepository::default();

        assert!(repo.is_available().await);
        assert_eq!(repo.call_count(), 0);

        assert!(repo.fetch_bids().await.unwrap().is_empty());
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let repo = MockRepository::default().with_available(false);

        assert!(!repo.is_available().await);
        assert!(matches!(
            repo.fetch_documents().await,
            Err(DataError::Unavailable(_))
        ));

        repo.set_available(true);
        repo.reset_call_count();
        assert!(repo.fetch_documents().await.is_ok());
        assert_eq!(repo.call_count(), 1);
    }
}
