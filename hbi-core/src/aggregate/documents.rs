//! Contract document review summary.

use serde::Serialize;

use super::{mean, Distribution};
use crate::types::{AiAnalysisStatus, DocumentRecord, RiskLevel};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub total_documents: usize,
    /// Mean compliance score (0-100)
    pub average_compliance_score: f64,
    pub high_risk_documents: usize,
    pub pending_analysis: usize,
    /// Risk level to document count; value is the summed compliance score
    pub by_risk_level: Distribution,
    pub by_status: Distribution,
}

impl DocumentSummary {
    pub fn from_documents(documents: &[DocumentRecord]) -> Self {
        let mut summary = Self {
            total_documents: documents.len(),
            ..Default::default()
        };
        let mut compliance_sum = 0.0;

        for doc in documents {
            compliance_sum += doc.compliance_score;
            if doc.risk_level == RiskLevel::High {
                summary.high_risk_documents += 1;
            }
            if matches!(
                doc.ai_analysis_status,
                AiAnalysisStatus::Pending | AiAnalysisStatus::InProgress
            ) {
                summary.pending_analysis += 1;
            }
            summary
                .by_risk_level
                .record(doc.risk_level.as_str(), doc.compliance_score);
            summary.by_status.record(&doc.status, doc.compliance_score);
        }

        summary.average_compliance_score = mean(compliance_sum, documents.len());
        summary
    }
}
