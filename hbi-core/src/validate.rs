//! Record invariants checked at the data-loading boundary.
//!
//! Fixture and repository data is untyped JSON until it reaches this crate.
//! Every record type implements [`Validate`] so loaders can reject or drop
//! records that break an invariant before any aggregation runs on them.

use serde::Serialize;

use crate::types::*;
use crate::workflow::Spcr;

/// A single broken invariant on a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Identifier of the offending record
    pub record_id: String,
    /// Field (dotted path) that failed
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.record_id, self.field, self.message)
    }
}

/// Error returned when a collection contains invalid records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// One or more invariants failed
    #[error("{} invalid record field(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),
}

/// Trait for records that carry invariants.
pub trait Validate {
    /// Identifier used in validation reports.
    fn record_id(&self) -> &str;

    /// Check all invariants, returning every violation found.
    fn validate(&self) -> Vec<ValidationIssue>;

    /// Convenience check.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Validate every record, collecting the issues of all of them.
pub fn validate_all<T: Validate>(records: &[T]) -> Result<(), RecordError> {
    let issues: Vec<ValidationIssue> = records.iter().flat_map(|r| r.validate()).collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(RecordError::Invalid(issues))
    }
}

fn check_range(
    issues: &mut Vec<ValidationIssue>,
    id: &str,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !value.is_finite() || value < min || value > max {
        issues.push(ValidationIssue::new(
            id,
            field,
            format!("must be within [{min}, {max}], got {value}"),
        ));
    }
}

fn check_non_negative(issues: &mut Vec<ValidationIssue>, id: &str, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        issues.push(ValidationIssue::new(
            id,
            field,
            format!("must be a non-negative amount, got {value}"),
        ));
    }
}

impl Validate for DocumentRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_range(&mut issues, &self.id, "complianceScore", self.compliance_score, 0.0, 100.0);
        issues
    }
}

impl Validate for TradePartnerRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let perf = &self.performance;
        check_range(
            &mut issues,
            &self.id,
            "performance.overallRating",
            perf.overall_rating,
            0.0,
            5.0,
        );
        if perf.active_projects > perf.total_projects {
            issues.push(ValidationIssue::new(
                &self.id,
                "performance.activeProjects",
                format!(
                    "{} active projects exceeds {} total",
                    perf.active_projects, perf.total_projects
                ),
            ));
        }
        for (field, value) in [
            ("performance.completionRate", perf.completion_rate),
            ("performance.onTimeDelivery", perf.on_time_delivery),
            ("performance.budgetAdherence", perf.budget_adherence),
            ("performance.qualityScore", perf.quality_score),
            ("performance.safetyScore", perf.safety_score),
        ] {
            check_range(&mut issues, &self.id, field, value, 0.0, 100.0);
        }
        issues
    }
}

impl Validate for BidRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_non_negative(&mut issues, &self.id, "bidAmount", self.bid_amount);
        check_range(&mut issues, &self.id, "evaluationScore", self.evaluation_score, 0.0, 100.0);
        for (index, item) in self.line_items.iter().enumerate() {
            if !item.is_consistent() {
                issues.push(ValidationIssue::new(
                    &self.id,
                    format!("lineItems[{index}].totalPrice"),
                    format!(
                        "{} does not equal quantity x unitPrice ({})",
                        item.total_price,
                        item.expected_total()
                    ),
                ));
            }
        }
        issues
    }
}

impl Validate for PipelineItem {
    fn record_id(&self) -> &str {
        &self.division
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let config = &self.config;
        check_non_negative(
            &mut issues,
            &self.division,
            "config.pipelineValue",
            config.pipeline_value,
        );
        check_non_negative(
            &mut issues,
            &self.division,
            "config.probabilityWeighted",
            config.probability_weighted,
        );
        if config.probability_weighted > config.pipeline_value {
            issues.push(ValidationIssue::new(
                &self.division,
                "config.probabilityWeighted",
                format!(
                    "weighted value {} exceeds pipeline value {}",
                    config.probability_weighted, config.pipeline_value
                ),
            ));
        }
        issues
    }
}

impl Validate for CommitmentRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_non_negative(&mut issues, &self.id, "budgetAmount", self.budget_amount);
        check_non_negative(&mut issues, &self.id, "committedAmount", self.committed_amount);
        check_non_negative(&mut issues, &self.id, "invoicedAmount", self.invoiced_amount);
        if self.invoiced_amount > self.committed_amount {
            issues.push(ValidationIssue::new(
                &self.id,
                "invoicedAmount",
                format!(
                    "invoiced {} exceeds committed {}",
                    self.invoiced_amount, self.committed_amount
                ),
            ));
        }
        issues
    }
}

impl Validate for Spcr {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.position.trim().is_empty() {
            issues.push(ValidationIssue::new(&self.id, "position", "must not be empty"));
        }
        if self.explanation.trim().is_empty() {
            issues.push(ValidationIssue::new(&self.id, "explanation", "must not be empty"));
        }
        check_non_negative(&mut issues, &self.id, "budget", self.budget);
        if self.end_date < self.start_date {
            issues.push(ValidationIssue::new(
                &self.id,
                "endDate",
                format!("{} is before start date {}", self.end_date, self.start_date),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(active: u32, total: u32, rating: f64) -> TradePartnerRecord {
        TradePartnerRecord {
            id: "tp-1".to_string(),
            company_name: "Coastal Electric".to_string(),
            trade_type: "Electrical".to_string(),
            primary_contact: PrimaryContact::default(),
            location: Location::default(),
            business_info: BusinessInfo::default(),
            performance: PartnerPerformance {
                overall_rating: rating,
                total_projects: total,
                active_projects: active,
                completion_rate: 98.0,
                on_time_delivery: 92.0,
                budget_adherence: 95.0,
                quality_score: 90.0,
                safety_score: 97.0,
            },
            certifications: vec![],
            specialties: vec![],
            status: PartnerStatus::Active,
            tier: PartnerTier::Preferred,
        }
    }

    #[test]
    fn test_active_projects_bounded_by_total() {
        assert!(partner(3, 10, 4.5).is_valid());

        let issues = partner(11, 10, 4.5).validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "performance.activeProjects");
    }

    #[test]
    fn test_rating_out_of_range() {
        let issues = partner(1, 2, 5.5).validate();
        assert_eq!(issues[0].field, "performance.overallRating");
    }

    #[test]
    fn test_weighted_exceeds_pipeline() {
        let item = PipelineItem {
            division: "Healthcare".to_string(),
            config: PipelineConfig {
                pipeline_value: 100.0,
                probability_weighted: 150.0,
                ..Default::default()
            },
        };
        let err = validate_all(&[item]).unwrap_err();
        let RecordError::Invalid(issues) = err;
        assert_eq!(issues[0].record_id, "Healthcare");
    }

    #[test]
    fn test_bid_line_item_mismatch_reported() {
        let bid = BidRecord {
            id: "bid-7".to_string(),
            project_id: "Palm Beach Tower".to_string(),
            trade_category: "Electrical".to_string(),
            vendor_name: "Coastal Electric".to_string(),
            bid_amount: 1000.0,
            status: BidStatus::Submitted,
            line_items: vec![BidLineItem {
                description: "Panels".to_string(),
                quantity: 2.0,
                unit: "EA".to_string(),
                unit_price: 300.0,
                total_price: 500.0,
            }],
            evaluation_score: 80.0,
            risk_level: RiskLevel::Low,
            past_performance: 4.0,
        };
        let issues = bid.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "lineItems[0].totalPrice");
    }
}
