//! Staffing plan change request (SPCR) approval workflow.
//!
//! A request is created from a [`SpcrDraft`], then moves through
//! [`WorkflowStage`]s only along the legal transitions. Every move appends a
//! comment recording who acted and what they did.

mod spcr;
mod stage;

pub use spcr::{create_spcr, Actor, ReviewAction, Spcr, SpcrComment, SpcrDraft, SpcrType};
pub use stage::{Reviewer, WorkflowStage};

use crate::validate::ValidationIssue;

/// Errors raised by workflow transitions.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Stage string outside the workflow vocabulary
    #[error("Unknown workflow stage: {0}")]
    UnknownStage(String),

    /// Transition not in the table
    #[error("Illegal transition from {from} to {to}")]
    IllegalTransition {
        from: WorkflowStage,
        to: WorkflowStage,
    },

    /// The request has already been decided
    #[error("Request is in terminal stage {0}")]
    Terminal(WorkflowStage),

    /// Review action that does not apply at the current stage
    #[error("Action {action} is not allowed in stage {stage}")]
    ActionNotAllowed {
        action: ReviewAction,
        stage: WorkflowStage,
    },
}

/// Errors raised when creating a request.
#[derive(Debug, thiserror::Error)]
pub enum SpcrError {
    /// The draft breaks one or more field rules
    #[error("Invalid change request: {}", format_issues(.0))]
    InvalidDraft(Vec<ValidationIssue>),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}
