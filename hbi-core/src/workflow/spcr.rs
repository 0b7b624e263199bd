//! Change request records and their operations.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use super::{SpcrError, WorkflowError, WorkflowStage};
use crate::validate::Validate;

/// Direction of the staffing change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum SpcrType {
    Increase,
    Decrease,
}

impl SpcrType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

/// What a reviewer did. Recorded on every comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum ReviewAction {
    Submit,
    StartReview,
    Approve,
    Reject,
    Escalate,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::StartReview => "start-review",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Escalate => "escalate",
        }
    }

    /// Stage this action leads to from `stage`, if it applies there.
    pub fn target(&self, stage: WorkflowStage) -> Option<WorkflowStage> {
        use WorkflowStage::*;
        match (self, stage) {
            (Self::StartReview, Submitted) => Some(PeReview),
            (Self::Approve, PeReview) => Some(PeApproved),
            (Self::Reject, PeReview) => Some(PeRejected),
            (Self::Escalate, PeApproved) => Some(ExecutiveReview),
            (Self::Approve, ExecutiveReview) => Some(FinalApproved),
            (Self::Reject, ExecutiveReview) => Some(FinalRejected),
            _ => None,
        }
    }

    /// Action implied by a direct stage change.
    fn for_transition(to: WorkflowStage) -> Self {
        match to {
            WorkflowStage::Submitted => Self::Submit,
            WorkflowStage::PeReview => Self::StartReview,
            WorkflowStage::PeApproved | WorkflowStage::FinalApproved => Self::Approve,
            WorkflowStage::PeRejected | WorkflowStage::FinalRejected => Self::Reject,
            WorkflowStage::ExecutiveReview => Self::Escalate,
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The person acting on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    /// Opaque role key, as supplied by the auth collaborator
    pub role: String,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SpcrComment {
    pub id: String,
    pub author: String,
    pub role: String,
    pub body: String,
    pub action: ReviewAction,
    pub created_at: DateTime<Utc>,
}

/// A staffing plan change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Spcr {
    pub id: String,
    /// Project name (referential only)
    #[serde(rename = "project_id")]
    pub project_id: String,
    #[serde(rename = "type")]
    pub spcr_type: SpcrType,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub explanation: String,
    pub budget: f64,
    pub workflow_stage: WorkflowStage,
    #[serde(default)]
    pub comments: Vec<SpcrComment>,
    #[serde(default)]
    pub requested_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpcrDraft {
    #[serde(rename = "project_id")]
    pub project_id: String,
    #[serde(rename = "type")]
    pub spcr_type: SpcrType,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub explanation: String,
    pub budget: f64,
}

/// Create a request from a draft, in stage `submitted`.
pub fn create_spcr(
    draft: SpcrDraft,
    requester: &Actor,
    now: DateTime<Utc>,
) -> Result<Spcr, SpcrError> {
    let mut spcr = Spcr {
        id: Uuid::new_v4().to_string(),
        project_id: draft.project_id,
        spcr_type: draft.spcr_type,
        position: draft.position.trim().to_string(),
        start_date: draft.start_date,
        end_date: draft.end_date,
        explanation: draft.explanation.trim().to_string(),
        budget: draft.budget,
        workflow_stage: WorkflowStage::Submitted,
        comments: Vec::new(),
        requested_by: requester.name.clone(),
        created_at: now,
        updated_at: now,
    };

    let issues = spcr.validate();
    if !issues.is_empty() {
        return Err(SpcrError::InvalidDraft(issues));
    }

    let body = format!("Requested {} {}", spcr.spcr_type.as_str(), spcr.position);
    spcr.push_comment(requester, ReviewAction::Submit, body, now);

    info!(
        spcr_id = %spcr.id,
        project = %spcr.project_id,
        position = %spcr.position,
        "Change request submitted"
    );

    Ok(spcr)
}

impl Spcr {
    /// Stages this request can move to next.
    pub fn allowed_transitions(&self) -> &'static [WorkflowStage] {
        self.workflow_stage.next_stages()
    }

    /// Review actions that apply at the current stage.
    pub fn allowed_actions(&self) -> Vec<ReviewAction> {
        [
            ReviewAction::StartReview,
            ReviewAction::Approve,
            ReviewAction::Reject,
            ReviewAction::Escalate,
        ]
        .into_iter()
        .filter(|action| action.target(self.workflow_stage).is_some())
        .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.workflow_stage.is_terminal()
    }

    /// Move to `to`, recording the actor's comment.
    ///
    /// On error the request is left unchanged.
    pub fn transition(
        &mut self,
        to: WorkflowStage,
        actor: &Actor,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        self.workflow_stage.check_transition(to)?;
        self.advance(to, ReviewAction::for_transition(to), actor, comment.into(), now);
        Ok(())
    }

    /// Apply a review action, moving to whichever stage it leads to.
    pub fn apply(
        &mut self,
        action: ReviewAction,
        actor: &Actor,
        comment: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<WorkflowStage, WorkflowError> {
        if self.is_terminal() {
            return Err(WorkflowError::Terminal(self.workflow_stage));
        }
        let to = action
            .target(self.workflow_stage)
            .ok_or(WorkflowError::ActionNotAllowed {
                action,
                stage: self.workflow_stage,
            })?;
        self.advance(to, action, actor, comment.into(), now);
        Ok(to)
    }

    fn advance(
        &mut self,
        to: WorkflowStage,
        action: ReviewAction,
        actor: &Actor,
        comment: String,
        now: DateTime<Utc>,
    ) {
        let from = self.workflow_stage;
        self.push_comment(actor, action, comment, now);
        self.workflow_stage = to;
        self.updated_at = now;

        info!(
            spcr_id = %self.id,
            from = %from,
            to = %to,
            actor = %actor.name,
            "Change request advanced"
        );
    }

    fn push_comment(&mut self, actor: &Actor, action: ReviewAction, body: String, now: DateTime<Utc>) {
        self.comments.push(SpcrComment {
            id: Uuid::new_v4().to_string(),
            author: actor.name.clone(),
            role: actor.role.clone(),
            body,
            action,
            created_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap()
    }

    fn draft() -> SpcrDraft {
        SpcrDraft {
            project_id: "Palm Beach Tower".to_string(),
            spcr_type: SpcrType::Increase,
            position: "Assistant Superintendent".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            explanation: "Second tower crane shift".to_string(),
            budget: 145_000.0,
        }
    }

    fn pm() -> Actor {
        Actor::new("Maria Lopez", "project-manager")
    }

    fn pe() -> Actor {
        Actor::new("Tom Reyes", "project-executive")
    }

    fn exec() -> Actor {
        Actor::new("Alex Grant", "executive")
    }

    #[test]
    fn test_create_starts_submitted_with_comment() {
        let spcr = create_spcr(draft(), &pm(), now()).unwrap();
        assert_eq!(spcr.workflow_stage, WorkflowStage::Submitted);
        assert_eq!(spcr.requested_by, "Maria Lopez");
        assert_eq!(spcr.comments.len(), 1);
        assert_eq!(spcr.comments[0].action, ReviewAction::Submit);
        assert!(Uuid::parse_str(&spcr.id).is_ok());
    }

    #[test]
    fn test_create_rejects_bad_draft() {
        let mut bad = draft();
        bad.position = "  ".to_string();
        bad.budget = -1.0;
        bad.end_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let SpcrError::InvalidDraft(issues) = create_spcr(bad, &pm(), now()).unwrap_err();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["position", "budget", "endDate"]);
    }

    #[test]
    fn test_full_approval_path() {
        let mut spcr = create_spcr(draft(), &pm(), now()).unwrap();

        spcr.apply(ReviewAction::StartReview, &pe(), "Reviewing", now()).unwrap();
        spcr.apply(ReviewAction::Approve, &pe(), "Crane schedule confirmed", now()).unwrap();
        spcr.apply(ReviewAction::Escalate, &pe(), "Over PE authority", now()).unwrap();
        let stage = spcr.apply(ReviewAction::Approve, &exec(), "Approved", now()).unwrap();

        assert_eq!(stage, WorkflowStage::FinalApproved);
        assert!(spcr.is_terminal());
        assert_eq!(spcr.comments.len(), 5);
        assert_eq!(spcr.comments[4].role, "executive");
        assert!(spcr.allowed_actions().is_empty());
    }

    #[test]
    fn test_illegal_transition_leaves_state_unchanged() {
        let mut spcr = create_spcr(draft(), &pm(), now()).unwrap();
        let before = spcr.clone();

        let err = spcr
            .transition(WorkflowStage::FinalApproved, &exec(), "Skip ahead", now())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
        assert_eq!(spcr, before);

        let err = spcr
            .apply(ReviewAction::Approve, &pe(), "Too early", now())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::ActionNotAllowed { .. }));
        assert_eq!(spcr, before);
    }

    #[test]
    fn test_pe_rejection_is_terminal() {
        let mut spcr = create_spcr(draft(), &pm(), now()).unwrap();
        spcr.transition(WorkflowStage::PeReview, &pe(), "", now()).unwrap();
        assert_eq!(
            spcr.allowed_transitions(),
            &[WorkflowStage::PeApproved, WorkflowStage::PeRejected]
        );
        spcr.transition(WorkflowStage::PeRejected, &pe(), "No budget", now()).unwrap();

        assert_eq!(spcr.comments.last().unwrap().action, ReviewAction::Reject);
        assert!(matches!(
            spcr.apply(ReviewAction::Escalate, &pe(), "", now()),
            Err(WorkflowError::Terminal(WorkflowStage::PeRejected))
        ));
    }

    #[test]
    fn test_wire_format_keeps_snake_project_id() {
        let spcr = create_spcr(draft(), &pm(), now()).unwrap();
        let json = serde_json::to_value(&spcr).unwrap();
        assert_eq!(json["project_id"], "Palm Beach Tower");
        assert_eq!(json["type"], "increase");
        assert_eq!(json["workflowStage"], "submitted");
        assert_eq!(json["startDate"], "2024-07-01");
    }
}
