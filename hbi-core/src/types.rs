//! Domain records for the construction dashboards.
//!
//! Field names follow the camelCase JSON of the dashboard fixtures so records
//! deserialize directly from them. With the `typescript` feature enabled, the
//! records can be exported to TypeScript using ts-rs for the web frontend.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Risk rating shared by documents and bids.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Get string representation (matches the JSON value)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Severity rank used when sorting (higher = riskier)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

// =============================================================================
// Contract documents
// =============================================================================

/// Progress of the automated contract analysis for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum AiAnalysisStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl AiAnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// A contract document under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    /// Document kind (contract, change order, subcontract, ...)
    #[serde(rename = "type")]
    pub document_type: String,
    pub status: String,
    pub upload_date: String,
    pub reviewer: String,
    pub priority: String,
    /// Compliance score (0-100)
    pub compliance_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub ai_analysis_status: AiAnalysisStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub key_risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub project: String,
}

// =============================================================================
// Trade partners
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum PartnerStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        }
    }
}

/// Prequalification tier of a trade partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum PartnerTier {
    Preferred,
    Approved,
    Conditional,
}

impl PartnerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Approved => "approved",
            Self::Conditional => "conditional",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PrimaryContact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    #[serde(default)]
    pub year_established: Option<u32>,
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub annual_revenue: Option<f64>,
    #[serde(default)]
    pub bonding_capacity: Option<f64>,
}

/// Scorecard metrics for a trade partner.
///
/// `overall_rating` is on a 0-5 scale; the remaining rates and scores are
/// percentages (0-100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PartnerPerformance {
    pub overall_rating: f64,
    pub total_projects: u32,
    pub active_projects: u32,
    pub completion_rate: f64,
    pub on_time_delivery: f64,
    pub budget_adherence: f64,
    pub quality_score: f64,
    pub safety_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TradePartnerRecord {
    pub id: String,
    pub company_name: String,
    pub trade_type: String,
    #[serde(default)]
    pub primary_contact: PrimaryContact,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub business_info: BusinessInfo,
    pub performance: PartnerPerformance,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub status: PartnerStatus,
    pub tier: PartnerTier,
}

// =============================================================================
// Bids
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum BidStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    Awarded,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under-review",
            Self::Shortlisted => "shortlisted",
            Self::Awarded => "awarded",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BidLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub total_price: f64,
}

impl BidLineItem {
    /// Tolerance used when checking `total_price == quantity * unit_price`.
    pub const PRICE_TOLERANCE: f64 = 0.01;

    /// Extended price computed from quantity and unit price.
    pub fn expected_total(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Check that the stated total matches quantity times unit price.
    pub fn is_consistent(&self) -> bool {
        (self.total_price - self.expected_total()).abs() <= Self::PRICE_TOLERANCE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    pub id: String,
    /// Project name (referential only)
    pub project_id: String,
    pub trade_category: String,
    pub vendor_name: String,
    pub bid_amount: f64,
    pub status: BidStatus,
    #[serde(default)]
    pub line_items: Vec<BidLineItem>,
    /// Evaluation score (0-100)
    pub evaluation_score: f64,
    pub risk_level: RiskLevel,
    /// Historical rating of the vendor (0-5)
    #[serde(default)]
    pub past_performance: f64,
}

impl BidRecord {
    /// Line items whose stated total disagrees with quantity times unit price.
    pub fn inconsistent_line_items(&self) -> impl Iterator<Item = &BidLineItem> {
        self.line_items.iter().filter(|item| !item.is_consistent())
    }
}

// =============================================================================
// Pre-construction pipeline
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub stage: String,
    pub count: u32,
    pub value: f64,
}

/// A recently won or lost pursuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PursuitOutcome {
    pub project: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub pipeline_value: f64,
    pub probability_weighted: f64,
    #[serde(default)]
    pub stages: Vec<PipelineStage>,
    #[serde(default)]
    pub recent_wins: Vec<PursuitOutcome>,
    #[serde(default)]
    pub recent_losses: Vec<PursuitOutcome>,
}

/// Pre-construction pipeline for one division.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PipelineItem {
    #[serde(default)]
    pub division: String,
    pub config: PipelineConfig,
}

// =============================================================================
// Procurement commitments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    Draft,
    Pending,
    Executed,
    Closed,
}

impl CommitmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Executed => "executed",
            Self::Closed => "closed",
        }
    }
}

/// A subcontract or purchase order committed against a project budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CommitmentRecord {
    pub id: String,
    pub project: String,
    pub vendor_name: String,
    pub trade_category: String,
    pub budget_amount: f64,
    pub committed_amount: f64,
    #[serde(default)]
    pub invoiced_amount: f64,
    pub status: CommitmentStatus,
    /// Whether the commitment has been mirrored to Procore (mocked)
    #[serde(default)]
    pub procore_synced: bool,
}

impl CommitmentRecord {
    /// Buyout savings against budget (negative when over budget).
    pub fn savings(&self) -> f64 {
        self.budget_amount - self.committed_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_consistency() {
        let good = BidLineItem {
            description: "Conduit".to_string(),
            quantity: 120.0,
            unit: "LF".to_string(),
            unit_price: 4.25,
            total_price: 510.0,
        };
        assert!(good.is_consistent());

        let bad = BidLineItem {
            total_price: 600.0,
            ..good
        };
        assert!(!bad.is_consistent());
    }

    #[test]
    fn test_pipeline_item_minimal_json() {
        let item: PipelineItem = serde_json::from_str(
            r#"{"config":{"pipelineValue":1000000,"probabilityWeighted":500000}}"#,
        )
        .unwrap();
        assert_eq!(item.division, "");
        assert_eq!(item.config.pipeline_value, 1_000_000.0);
        assert!(item.config.stages.is_empty());
    }

    #[test]
    fn test_document_type_field_name() {
        let doc: DocumentRecord = serde_json::from_str(
            r#"{
                "id": "doc-1",
                "name": "Prime Contract",
                "type": "contract",
                "status": "under-review",
                "uploadDate": "2024-03-02",
                "reviewer": "J. Ortiz",
                "priority": "high",
                "complianceScore": 88,
                "riskLevel": "Medium",
                "project": "Palm Beach Tower"
            }"#,
        )
        .unwrap();
        assert_eq!(doc.document_type, "contract");
        assert_eq!(doc.risk_level, RiskLevel::Medium);
        assert_eq!(doc.ai_analysis_status, AiAnalysisStatus::Pending);
    }

    #[test]
    fn test_risk_rank_ordering() {
        assert!(RiskLevel::High.rank() > RiskLevel::Medium.rank());
        assert!(RiskLevel::Medium.rank() > RiskLevel::Low.rank());
    }
}
