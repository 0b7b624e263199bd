//! [`Queryable`] implementations for the dashboard records.
//!
//! Facet and sort key names are the JSON field names the tables bind to.

use chrono::Datelike;

use super::{Queryable, SortValue};
use crate::types::*;
use crate::workflow::Spcr;

impl Queryable for DocumentRecord {
    const FACETS: &'static [&'static str] =
        &["type", "status", "priority", "riskLevel", "aiAnalysisStatus", "project"];
    const SORT_KEYS: &'static [&'static str] = &[
        "name",
        "type",
        "status",
        "uploadDate",
        "reviewer",
        "priority",
        "complianceScore",
        "riskLevel",
        "project",
    ];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.document_type.as_str(),
            self.reviewer.as_str(),
            self.project.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "type" => Some(&self.document_type),
            "status" => Some(&self.status),
            "priority" => Some(&self.priority),
            "riskLevel" => Some(self.risk_level.as_str()),
            "aiAnalysisStatus" => Some(self.ai_analysis_status.as_str()),
            "project" => Some(&self.project),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "name" => SortValue::Text(&self.name),
            "type" => SortValue::Text(&self.document_type),
            "status" => SortValue::Text(&self.status),
            // ISO dates order correctly as text
            "uploadDate" => SortValue::Text(&self.upload_date),
            "reviewer" => SortValue::Text(&self.reviewer),
            "priority" => SortValue::Text(&self.priority),
            "complianceScore" => SortValue::Number(self.compliance_score),
            "riskLevel" => SortValue::Number(f64::from(self.risk_level.rank())),
            "project" => SortValue::Text(&self.project),
            _ => return None,
        })
    }
}

impl Queryable for TradePartnerRecord {
    const FACETS: &'static [&'static str] = &["tradeType", "status", "tier", "state"];
    const SORT_KEYS: &'static [&'static str] = &[
        "companyName",
        "tradeType",
        "overallRating",
        "totalProjects",
        "activeProjects",
        "onTimeDelivery",
        "budgetAdherence",
        "qualityScore",
        "safetyScore",
        "bondingCapacity",
    ];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.company_name.as_str(),
            self.trade_type.as_str(),
            self.primary_contact.name.as_str(),
            self.location.city.as_str(),
        ];
        fields.extend(self.specialties.iter().map(String::as_str));
        fields
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "tradeType" => Some(&self.trade_type),
            "status" => Some(self.status.as_str()),
            "tier" => Some(self.tier.as_str()),
            "state" => Some(&self.location.state),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        let perf = &self.performance;
        Some(match key {
            "companyName" => SortValue::Text(&self.company_name),
            "tradeType" => SortValue::Text(&self.trade_type),
            "overallRating" => SortValue::Number(perf.overall_rating),
            "totalProjects" => SortValue::Number(f64::from(perf.total_projects)),
            "activeProjects" => SortValue::Number(f64::from(perf.active_projects)),
            "onTimeDelivery" => SortValue::Number(perf.on_time_delivery),
            "budgetAdherence" => SortValue::Number(perf.budget_adherence),
            "qualityScore" => SortValue::Number(perf.quality_score),
            "safetyScore" => SortValue::Number(perf.safety_score),
            "bondingCapacity" => SortValue::Number(self.business_info.bonding_capacity?),
            _ => return None,
        })
    }
}

impl Queryable for BidRecord {
    const FACETS: &'static [&'static str] =
        &["projectId", "tradeCategory", "status", "riskLevel"];
    const SORT_KEYS: &'static [&'static str] = &[
        "vendorName",
        "projectId",
        "tradeCategory",
        "bidAmount",
        "evaluationScore",
        "pastPerformance",
        "riskLevel",
        "status",
    ];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.vendor_name.as_str(),
            self.project_id.as_str(),
            self.trade_category.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "projectId" => Some(&self.project_id),
            "tradeCategory" => Some(&self.trade_category),
            "status" => Some(self.status.as_str()),
            "riskLevel" => Some(self.risk_level.as_str()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "vendorName" => SortValue::Text(&self.vendor_name),
            "projectId" => SortValue::Text(&self.project_id),
            "tradeCategory" => SortValue::Text(&self.trade_category),
            "bidAmount" => SortValue::Number(self.bid_amount),
            "evaluationScore" => SortValue::Number(self.evaluation_score),
            "pastPerformance" => SortValue::Number(self.past_performance),
            "riskLevel" => SortValue::Number(f64::from(self.risk_level.rank())),
            "status" => SortValue::Text(self.status.as_str()),
            _ => return None,
        })
    }
}

impl Queryable for PipelineItem {
    const FACETS: &'static [&'static str] = &["division"];
    const SORT_KEYS: &'static [&'static str] =
        &["division", "pipelineValue", "probabilityWeighted", "winCount"];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.division.as_str()];
        fields.extend(self.config.recent_wins.iter().map(|w| w.project.as_str()));
        fields.extend(self.config.recent_losses.iter().map(|l| l.project.as_str()));
        fields
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "division" => Some(&self.division),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "division" => SortValue::Text(&self.division),
            "pipelineValue" => SortValue::Number(self.config.pipeline_value),
            "probabilityWeighted" => SortValue::Number(self.config.probability_weighted),
            "winCount" => SortValue::Number(self.config.recent_wins.len() as f64),
            _ => return None,
        })
    }
}

impl Queryable for CommitmentRecord {
    const FACETS: &'static [&'static str] = &["project", "tradeCategory", "status"];
    const SORT_KEYS: &'static [&'static str] = &[
        "vendorName",
        "project",
        "tradeCategory",
        "budgetAmount",
        "committedAmount",
        "invoicedAmount",
        "savings",
        "status",
    ];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.vendor_name.as_str(),
            self.project.as_str(),
            self.trade_category.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "project" => Some(&self.project),
            "tradeCategory" => Some(&self.trade_category),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "vendorName" => SortValue::Text(&self.vendor_name),
            "project" => SortValue::Text(&self.project),
            "tradeCategory" => SortValue::Text(&self.trade_category),
            "budgetAmount" => SortValue::Number(self.budget_amount),
            "committedAmount" => SortValue::Number(self.committed_amount),
            "invoicedAmount" => SortValue::Number(self.invoiced_amount),
            "savings" => SortValue::Number(self.savings()),
            "status" => SortValue::Text(self.status.as_str()),
            _ => return None,
        })
    }
}

impl Queryable for Spcr {
    const FACETS: &'static [&'static str] = &["project_id", "type", "workflowStage"];
    const SORT_KEYS: &'static [&'static str] =
        &["position", "project_id", "startDate", "endDate", "budget", "workflowStage"];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.position.as_str(),
            self.project_id.as_str(),
            self.explanation.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<&str> {
        match key {
            "project_id" => Some(&self.project_id),
            "type" => Some(self.spcr_type.as_str()),
            "workflowStage" => Some(self.workflow_stage.as_str()),
            _ => None,
        }
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        Some(match key {
            "position" => SortValue::Text(&self.position),
            "project_id" => SortValue::Text(&self.project_id),
            "startDate" => SortValue::Number(f64::from(self.start_date.num_days_from_ce())),
            "endDate" => SortValue::Number(f64::from(self.end_date.num_days_from_ce())),
            "budget" => SortValue::Number(self.budget),
            "workflowStage" => SortValue::Number(f64::from(self.workflow_stage.ordinal())),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{apply_query, RecordQuery, SortDirection};
    use crate::types::*;

    fn partner(id: &str, name: &str, trade: &str, rating: f64) -> TradePartnerRecord {
        TradePartnerRecord {
            id: id.to_string(),
            company_name: name.to_string(),
            trade_type: trade.to_string(),
            primary_contact: PrimaryContact {
                name: "Dana Ruiz".to_string(),
                ..Default::default()
            },
            location: Location {
                city: "West Palm Beach".to_string(),
                state: "FL".to_string(),
            },
            business_info: BusinessInfo::default(),
            performance: PartnerPerformance {
                overall_rating: rating,
                total_projects: 12,
                active_projects: 3,
                completion_rate: 99.0,
                on_time_delivery: 94.0,
                budget_adherence: 96.0,
                quality_score: 93.0,
                safety_score: 98.0,
            },
            certifications: vec!["OSHA 30".to_string()],
            specialties: vec!["Switchgear".to_string()],
            status: PartnerStatus::Active,
            tier: PartnerTier::Preferred,
        }
    }

    #[test]
    fn test_trade_type_filter_returns_matching_record_unchanged() {
        let electrical = partner("tp-1", "Coastal Electric", "Electrical", 4.6);
        let plumbing = partner("tp-2", "Gulf Plumbing", "Plumbing", 4.1);
        let partners = vec![electrical.clone(), plumbing];

        let result = apply_query(
            &partners,
            &RecordQuery::new().with_filter("tradeType", "Electrical"),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], &electrical);
    }

    #[test]
    fn test_partner_search_reaches_specialties() {
        let partners = vec![
            partner("tp-1", "Coastal Electric", "Electrical", 4.6),
            partner("tp-2", "Gulf Plumbing", "Plumbing", 4.1),
        ];
        let result = apply_query(&partners, &RecordQuery::new().with_search("switchgear"));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_missing_bonding_capacity_sorts_last() {
        let mut bonded = partner("tp-1", "Coastal Electric", "Electrical", 4.6);
        bonded.business_info.bonding_capacity = Some(5_000_000.0);
        let unbonded = partner("tp-2", "Atlas Concrete", "Concrete", 4.1);
        let partners = vec![unbonded, bonded];

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let result = apply_query(
                &partners,
                &RecordQuery::new().sorted_by("bondingCapacity", direction),
            );
            assert_eq!(result[0].id, "tp-1");
            assert_eq!(result[1].id, "tp-2");
        }
    }

    #[test]
    fn test_bid_sort_by_amount_desc() {
        let make = |id: &str, amount: f64| BidRecord {
            id: id.to_string(),
            project_id: "Palm Beach Tower".to_string(),
            trade_category: "Electrical".to_string(),
            vendor_name: format!("Vendor {id}"),
            bid_amount: amount,
            status: BidStatus::UnderReview,
            line_items: vec![],
            evaluation_score: 80.0,
            risk_level: RiskLevel::Medium,
            past_performance: 4.2,
        };
        let bids = vec![make("a", 10.0), make("b", 30.0), make("c", 20.0)];
        let query = RecordQuery::new()
            .with_filter("status", "under-review")
            .sorted_by("bidAmount", SortDirection::Desc);
        let ids: Vec<&str> = apply_query(&bids, &query).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
