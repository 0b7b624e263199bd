//! Core traits for dashboard data sources.

use async_trait::async_trait;
use hbi_core::{
    BidRecord, CommitmentRecord, DocumentRecord, PipelineItem, Spcr, TradePartnerRecord, Validate,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ValidationMode;
use crate::error::DataError;

/// Source of dashboard records.
///
/// Implementations return the same record shapes whether they read fixture
/// files, hold records in memory, or call a real backend.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Get the repository identifier.
    fn id(&self) -> &str;

    /// Check if the repository can currently serve requests.
    async fn is_available(&self) -> bool;

    async fn fetch_pipeline(&self) -> Result<Vec<PipelineItem>, DataError>;

    async fn fetch_trade_partners(&self) -> Result<Vec<TradePartnerRecord>, DataError>;

    async fn fetch_bids(&self) -> Result<Vec<BidRecord>, DataError>;

    async fn fetch_documents(&self) -> Result<Vec<DocumentRecord>, DataError>;

    async fn fetch_commitments(&self) -> Result<Vec<CommitmentRecord>, DataError>;

    async fn fetch_spcrs(&self) -> Result<Vec<Spcr>, DataError>;
}

/// Every record collection the dashboards read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSet {
    #[serde(default)]
    pub pipeline: Vec<PipelineItem>,
    #[serde(default)]
    pub trade_partners: Vec<TradePartnerRecord>,
    #[serde(default)]
    pub bids: Vec<BidRecord>,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default)]
    pub commitments: Vec<CommitmentRecord>,
    #[serde(default)]
    pub spcrs: Vec<Spcr>,
}

/// Apply a validation mode to a loaded collection.
///
/// Strict mode rejects the collection if any record has an issue. Lenient mode
/// drops invalid records and logs each issue.
pub fn enforce_validation<T: Validate>(
    records: Vec<T>,
    source_name: &str,
    mode: ValidationMode,
) -> Result<Vec<T>, DataError> {
    match mode {
        ValidationMode::Strict => {
            let issues: Vec<_> = records.iter().flat_map(|record| record.validate()).collect();
            if issues.is_empty() {
                Ok(records)
            } else {
                Err(DataError::Invalid {
                    source_name: source_name.to_string(),
                    issues,
                })
            }
        }
        ValidationMode::Lenient => Ok(records
            .into_iter()
            .filter(|record| {
                let issues = record.validate();
                for issue in &issues {
                    warn!(
                        source = source_name,
                        record_id = %issue.record_id,
                        field = %issue.field,
                        "Dropping invalid record: {}",
                        issue.message
                    );
                }
                issues.is_empty()
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbi_core::{CommitmentStatus, RecordError};

    fn commitment(id: &str, committed: f64, invoiced: f64) -> CommitmentRecord {
        CommitmentRecord {
            id: id.to_string(),
            project: "Jupiter Medical Pavilion".to_string(),
            vendor_name: "Sunshine Drywall".to_string(),
            trade_category: "Drywall".to_string(),
            budget_amount: 400_000.0,
            committed_amount: committed,
            invoiced_amount: invoiced,
            status: CommitmentStatus::Executed,
            procore_synced: false,
        }
    }

    #[test]
    fn test_lenient_drops_invalid_records() {
        let records = vec![
            commitment("c1", 380_000.0, 100_000.0),
            commitment("c2", 380_000.0, 500_000.0),
        ];
        let kept =
            enforce_validation(records, "commitments.json", ValidationMode::Lenient).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "c1");
    }

    #[test]
    fn test_strict_rejects_collection() {
        let records = vec![
            commitment("c1", 380_000.0, 100_000.0),
            commitment("c2", 380_000.0, 500_000.0),
        ];
        let err =
            enforce_validation(records, "commitments.json", ValidationMode::Strict).unwrap_err();
        match err {
            DataError::Invalid { source_name, issues } => {
                assert_eq!(source_name, "commitments.json");
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].record_id, "c2");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Same verdict as the core collection check
        let records = vec![commitment("c2", 380_000.0, 500_000.0)];
        assert!(matches!(
            hbi_core::validate_all(&records),
            Err(RecordError::Invalid(_))
        ));
    }
}
