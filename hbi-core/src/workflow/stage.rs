//! Approval stages and the legal transitions between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use super::WorkflowError;

/// Stage of a staffing plan change request.
///
/// ```text
/// submitted -> pe-review -> pe-approved -> executive-review -> final-approved
///                        \-> pe-rejected                    \-> final-rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStage {
    Submitted,
    PeReview,
    PeApproved,
    PeRejected,
    ExecutiveReview,
    FinalApproved,
    FinalRejected,
}

/// Who a request is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum Reviewer {
    ProjectExecutive,
    Executive,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 7] = [
        Self::Submitted,
        Self::PeReview,
        Self::PeApproved,
        Self::PeRejected,
        Self::ExecutiveReview,
        Self::FinalApproved,
        Self::FinalRejected,
    ];

    /// Wire name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::PeReview => "pe-review",
            Self::PeApproved => "pe-approved",
            Self::PeRejected => "pe-rejected",
            Self::ExecutiveReview => "executive-review",
            Self::FinalApproved => "final-approved",
            Self::FinalRejected => "final-rejected",
        }
    }

    /// Position in the approval flow, used for ordering.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Submitted => 0,
            Self::PeReview => 1,
            Self::PeApproved => 2,
            Self::PeRejected => 3,
            Self::ExecutiveReview => 4,
            Self::FinalApproved => 5,
            Self::FinalRejected => 6,
        }
    }

    /// Stages reachable in one step.
    pub fn next_stages(&self) -> &'static [WorkflowStage] {
        match self {
            Self::Submitted => &[Self::PeReview],
            Self::PeReview => &[Self::PeApproved, Self::PeRejected],
            Self::PeApproved => &[Self::ExecutiveReview],
            Self::ExecutiveReview => &[Self::FinalApproved, Self::FinalRejected],
            Self::PeRejected | Self::FinalApproved | Self::FinalRejected => &[],
        }
    }

    pub fn can_transition_to(&self, to: WorkflowStage) -> bool {
        self.next_stages().contains(&to)
    }

    /// Check a single step against the transition table.
    pub fn check_transition(&self, to: WorkflowStage) -> Result<(), WorkflowError> {
        if self.is_terminal() {
            return Err(WorkflowError::Terminal(*self));
        }
        if !self.can_transition_to(to) {
            return Err(WorkflowError::IllegalTransition { from: *self, to });
        }
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.next_stages().is_empty()
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::FinalApproved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::PeRejected | Self::FinalRejected)
    }

    /// Reviewer whose action moves the request forward, if any.
    pub fn pending_reviewer(&self) -> Option<Reviewer> {
        match self {
            Self::Submitted | Self::PeReview | Self::PeApproved => {
                Some(Reviewer::ProjectExecutive)
            }
            Self::ExecutiveReview => Some(Reviewer::Executive),
            Self::PeRejected | Self::FinalApproved | Self::FinalRejected => None,
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStage {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| WorkflowError::UnknownStage(s.to_string()))
    }
}

impl Reviewer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectExecutive => "project-executive",
            Self::Executive => "executive",
        }
    }
}
