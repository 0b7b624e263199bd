//! Procurement analytics over buyout commitments.

use serde::Serialize;

use super::{percent, Distribution};
use crate::types::CommitmentRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementSummary {
    pub total_commitments: usize,
    pub total_budget: f64,
    pub total_committed: f64,
    pub total_invoiced: f64,
    /// `total_budget - total_committed` (negative when over budget)
    pub savings: f64,
    /// Savings as a percentage of budget
    pub savings_rate: f64,
    /// Invoiced as a percentage of committed (0-100)
    pub percent_invoiced: f64,
    pub procore_synced: usize,
    /// Status to commitment count and committed value
    pub by_status: Distribution,
    pub by_trade_category: Distribution,
}

impl ProcurementSummary {
    pub fn from_commitments(commitments: &[CommitmentRecord]) -> Self {
        let mut summary = Self {
            total_commitments: commitments.len(),
            ..Default::default()
        };

        for commitment in commitments {
            summary.total_budget += commitment.budget_amount;
            summary.total_committed += commitment.committed_amount;
            summary.total_invoiced += commitment.invoiced_amount;
            if commitment.procore_synced {
                summary.procore_synced += 1;
            }
            summary
                .by_status
                .record(commitment.status.as_str(), commitment.committed_amount);
            summary
                .by_trade_category
                .record(&commitment.trade_category, commitment.committed_amount);
        }

        summary.savings = summary.total_budget - summary.total_committed;
        summary.savings_rate = percent(summary.savings, summary.total_budget);
        summary.percent_invoiced = percent(summary.total_invoiced, summary.total_committed);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommitmentStatus;

    fn commitment(id: &str, budget: f64, committed: f64, invoiced: f64) -> CommitmentRecord {
        CommitmentRecord {
            id: id.to_string(),
            project: "Palm Beach Tower".to_string(),
            vendor_name: "Coastal Electric".to_string(),
            trade_category: "Electrical".to_string(),
            budget_amount: budget,
            committed_amount: committed,
            invoiced_amount: invoiced,
            status: CommitmentStatus::Executed,
            procore_synced: id == "c1",
        }
    }

    #[test]
    fn test_procurement_totals() {
        let summary = ProcurementSummary::from_commitments(&[
            commitment("c1", 1_000_000.0, 900_000.0, 450_000.0),
            commitment("c2", 500_000.0, 520_000.0, 0.0),
        ]);

        assert_eq!(summary.total_budget, 1_500_000.0);
        assert_eq!(summary.total_committed, 1_420_000.0);
        assert_eq!(summary.savings, 80_000.0);
        assert!((summary.savings_rate - 5.333).abs() < 0.001);
        assert!((summary.percent_invoiced - 31.69).abs() < 0.01);
        assert_eq!(summary.procore_synced, 1);
        assert_eq!(summary.by_status.get("executed").unwrap().count, 2);
    }

    #[test]
    fn test_empty_commitments_have_zero_rates() {
        let summary = ProcurementSummary::from_commitments(&[]);
        assert_eq!(summary.savings_rate, 0.0);
        assert_eq!(summary.percent_invoiced, 0.0);
    }
}
