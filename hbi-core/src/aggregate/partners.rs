//! Trade partner scorecard summary.

use serde::Serialize;

use super::{mean, Distribution};
use crate::query::locale_compare;
use crate::types::{PartnerStatus, PartnerTier, TradePartnerRecord};

/// Default number of partners listed as top performers.
pub const DEFAULT_TOP_PERFORMERS: usize = 5;

/// Short card for a highly rated partner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerHighlight {
    pub id: String,
    pub company_name: String,
    pub trade_type: String,
    pub overall_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePartnerSummary {
    pub total_partners: usize,
    pub active_partners: usize,
    pub preferred_partners: usize,
    /// Mean overall rating (0-5)
    pub average_rating: f64,
    /// Mean on-time delivery (0-100)
    pub average_on_time_delivery: f64,
    /// Mean safety score (0-100)
    pub average_safety_score: f64,
    /// Active project load across all partners
    pub active_projects: u64,
    pub by_trade_type: Distribution,
    pub by_tier: Distribution,
    pub top_performers: Vec<PartnerHighlight>,
}

impl TradePartnerSummary {
    pub fn from_partners(partners: &[TradePartnerRecord]) -> Self {
        Self::with_top_performers(partners, DEFAULT_TOP_PERFORMERS)
    }

    /// Summarize, listing up to `top_n` partners by rating.
    pub fn with_top_performers(partners: &[TradePartnerRecord], top_n: usize) -> Self {
        let mut summary = Self {
            total_partners: partners.len(),
            ..Default::default()
        };

        let mut rating_sum = 0.0;
        let mut on_time_sum = 0.0;
        let mut safety_sum = 0.0;

        for partner in partners {
            let perf = &partner.performance;
            rating_sum += perf.overall_rating;
            on_time_sum += perf.on_time_delivery;
            safety_sum += perf.safety_score;
            summary.active_projects += u64::from(perf.active_projects);

            if partner.status == PartnerStatus::Active {
                summary.active_partners += 1;
            }
            if partner.tier == PartnerTier::Preferred {
                summary.preferred_partners += 1;
            }

            summary
                .by_trade_type
                .add(&partner.trade_type, 1, f64::from(perf.active_projects));
            summary
                .by_tier
                .add(partner.tier.as_str(), 1, f64::from(perf.active_projects));
        }

        summary.average_rating = mean(rating_sum, partners.len());
        summary.average_on_time_delivery = mean(on_time_sum, partners.len());
        summary.average_safety_score = mean(safety_sum, partners.len());
        summary.top_performers = top_performers(partners, top_n);
        summary
    }
}

fn top_performers(partners: &[TradePartnerRecord], top_n: usize) -> Vec<PartnerHighlight> {
    let mut ranked: Vec<&TradePartnerRecord> = partners.iter().collect();
    ranked.sort_by(|a, b| {
        b.performance
            .overall_rating
            .total_cmp(&a.performance.overall_rating)
            .then_with(|| locale_compare(&a.company_name, &b.company_name))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|p| PartnerHighlight {
            id: p.id.clone(),
            company_name: p.company_name.clone(),
            trade_type: p.trade_type.clone(),
            overall_rating: p.performance.overall_rating,
        })
        .collect()
}
