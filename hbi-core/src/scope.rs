//! Role scope resolution for dashboard labels and badge counts.
//!
//! Maps the opaque role key from the auth collaborator to a display scope.
//! **This is presentation only and not a security boundary.** It decides
//! which headline and counts a user sees; it never decides what data they may
//! access. Real authorization has to be enforced server-side.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Coarse user role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRole {
    ProjectManager,
    ProjectExecutive,
    Estimator,
    Executive,
    Admin,
    /// Any role key the dashboards do not know about
    Other(String),
}

impl UserRole {
    /// Parse a role key. Never fails.
    pub fn parse(role: &str) -> Self {
        match role.trim() {
            "project-manager" => Self::ProjectManager,
            "project-executive" => Self::ProjectExecutive,
            "estimator" => Self::Estimator,
            "executive" => Self::Executive,
            "admin" => Self::Admin,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ProjectManager => "project-manager",
            Self::ProjectExecutive => "project-executive",
            Self::Estimator => "estimator",
            Self::Executive => "executive",
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    SingleProject,
    Portfolio,
    PreConstruction,
    Enterprise,
}

/// Counts available to the dashboards before scoping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTotals {
    pub projects: usize,
    pub partners: usize,
    /// Active pre-construction pursuits
    pub pursuits: usize,
}

/// How many projects each role is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeLimits {
    #[serde(default = "default_pm_projects")]
    pub project_manager_projects: usize,
    #[serde(default = "default_pe_projects")]
    pub project_executive_projects: usize,
}

fn default_pm_projects() -> usize {
    1
}

fn default_pe_projects() -> usize {
    6
}

impl Default for ScopeLimits {
    fn default() -> Self {
        Self {
            project_manager_projects: default_pm_projects(),
            project_executive_projects: default_pe_projects(),
        }
    }
}

/// Display scope for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RoleScope {
    pub role: String,
    pub scope: ScopeKind,
    pub description: String,
    pub project_count: usize,
    pub partner_count: usize,
}

/// Resolve the display scope for a role key. Total over any input.
pub fn resolve_scope(role: &str, totals: ScopeTotals, limits: &ScopeLimits) -> RoleScope {
    let role = UserRole::parse(role);
    let (scope, description, project_count) = match role {
        UserRole::ProjectManager => (
            ScopeKind::SingleProject,
            "Single project view",
            limits.project_manager_projects.min(totals.projects),
        ),
        UserRole::ProjectExecutive => (
            ScopeKind::Portfolio,
            "Portfolio of assigned projects",
            limits.project_executive_projects.min(totals.projects),
        ),
        UserRole::Estimator => (
            ScopeKind::PreConstruction,
            "Pre-construction pursuits and bids",
            totals.pursuits,
        ),
        UserRole::Executive | UserRole::Admin | UserRole::Other(_) => (
            ScopeKind::Enterprise,
            "All projects and trade partners",
            totals.projects,
        ),
    };

    RoleScope {
        role: role.to_string(),
        scope,
        description: description.to_string(),
        project_count,
        partner_count: totals.partners,
    }
}
