//! Pre-construction pipeline summary.

use serde::Serialize;

use super::{percent, rate, Distribution};
use crate::types::PipelineItem;

/// Pipeline totals for one division.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionBreakdown {
    pub division: String,
    pub pipeline_value: f64,
    pub probability_weighted: f64,
    /// Weighted value as a percentage of pipeline value (0-100)
    pub probability: f64,
    pub wins: usize,
    pub losses: usize,
}

/// Aggregate view of all division pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total_pipeline_value: f64,
    pub probability_weighted_value: f64,
    /// Weighted value as a percentage of total pipeline value (0-100)
    pub average_probability: f64,
    pub total_wins: usize,
    pub total_losses: usize,
    /// Wins as a percentage of decided pursuits (0-100)
    pub win_rate: f64,
    pub won_value: f64,
    pub lost_value: f64,
    /// Stage name to pursuit count and value, summed across divisions
    pub stage_distribution: Distribution,
    pub division_breakdown: Vec<DivisionBreakdown>,
}

impl PipelineSummary {
    pub fn from_items(items: &[PipelineItem]) -> Self {
        let mut summary = Self::default();

        for item in items {
            let config = &item.config;
            summary.total_pipeline_value += config.pipeline_value;
            summary.probability_weighted_value += config.probability_weighted;
            summary.total_wins += config.recent_wins.len();
            summary.total_losses += config.recent_losses.len();
            summary.won_value += config.recent_wins.iter().map(|w| w.value).sum::<f64>();
            summary.lost_value += config.recent_losses.iter().map(|l| l.value).sum::<f64>();

            for stage in &config.stages {
                summary
                    .stage_distribution
                    .add(&stage.stage, u64::from(stage.count), stage.value);
            }

            summary.division_breakdown.push(DivisionBreakdown {
                division: item.division.clone(),
                pipeline_value: config.pipeline_value,
                probability_weighted: config.probability_weighted,
                probability: percent(config.probability_weighted, config.pipeline_value),
                wins: config.recent_wins.len(),
                losses: config.recent_losses.len(),
            });
        }

        summary.average_probability =
            percent(summary.probability_weighted_value, summary.total_pipeline_value);
        summary.win_rate = rate(summary.total_wins, summary.total_losses);
        summary
    }

    /// Total pursuits across every stage.
    pub fn pursuit_count(&self) -> u64 {
        self.stage_distribution.total_count()
    }
}
