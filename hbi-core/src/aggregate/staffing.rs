//! Staffing change request summary.

use serde::Serialize;

use super::{rate, Distribution};
use crate::workflow::Spcr;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingSummary {
    pub total_requests: usize,
    /// Requests not yet in a terminal stage
    pub open_requests: usize,
    pub approved_requests: usize,
    pub rejected_requests: usize,
    /// `approved / (approved + rejected) * 100`
    pub approval_rate: f64,
    pub requested_budget: f64,
    pub approved_budget: f64,
    /// Workflow stage to request count; value is the summed budget
    pub by_stage: Distribution,
    pub by_type: Distribution,
}

impl StaffingSummary {
    pub fn from_requests(requests: &[Spcr]) -> Self {
        let mut summary = Self {
            total_requests: requests.len(),
            ..Default::default()
        };

        for spcr in requests {
            let stage = spcr.workflow_stage;
            summary.requested_budget += spcr.budget;
            if stage.is_approved() {
                summary.approved_requests += 1;
                summary.approved_budget += spcr.budget;
            } else if stage.is_rejected() {
                summary.rejected_requests += 1;
            } else {
                summary.open_requests += 1;
            }
            summary.by_stage.record(stage.as_str(), spcr.budget);
            summary.by_type.record(spcr.spcr_type.as_str(), spcr.budget);
        }

        summary.approval_rate = rate(summary.approved_requests, summary.rejected_requests);
        summary
    }
}
