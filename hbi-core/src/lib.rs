//! Logic core for the HBI construction dashboards
//!
//! Everything here is synchronous and free of I/O. Records arrive already
//! deserialized; this crate validates them, narrows and orders them for tables,
//! and folds them into KPI summaries.
//!
//! # Key Components
//!
//! - [`aggregate`]: Summary statistics for pipeline, partner, bid, document, procurement and staffing views
//! - [`query`]: Search, filter and sort pipeline ([`RecordQuery`], [`apply_query`]) plus [`QueryMemo`]
//! - [`scope`]: Role scope resolver for labels and badge counts (presentation only)
//! - [`workflow`]: SPCR approval state machine
//! - [`Validate`]: Record invariants checked at the loading boundary
//!
//! # Example
//!
//! ```ignore
//! use hbi_core::{apply_query, PipelineSummary, RecordQuery, SortDirection};
//!
//! let query = RecordQuery::new()
//!     .with_search("health")
//!     .sorted_by("pipelineValue", SortDirection::Desc);
//! let visible = apply_query(&items, &query);
//! let summary = PipelineSummary::from_items(&items);
//! println!("{}", hbi_core::format_currency(summary.total_pipeline_value));
//! ```

pub mod aggregate;
pub mod debounce;
pub mod format;
pub mod insights;
pub mod navigation;
pub mod query;
pub mod scope;
pub mod types;
pub mod validate;
pub mod workflow;

// Re-export main types
pub use aggregate::{
    BidSummary, Distribution, DocumentSummary, PipelineSummary, ProcurementSummary,
    StaffingSummary, TradePartnerSummary,
};
pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use format::{format_currency, format_currency_full, format_percent};
pub use insights::{insights_for, Insight, InsightKind};
pub use navigation::DashboardTab;
pub use query::{
    apply_query, apply_query_owned, FilterValue, QueryMemo, Queryable, RecordQuery, SortDirection,
    SortSpec, SortValue,
};
pub use scope::{resolve_scope, RoleScope, ScopeKind, ScopeLimits, ScopeTotals, UserRole};
pub use types::*;
pub use validate::{validate_all, RecordError, Validate, ValidationIssue};
pub use workflow::{
    create_spcr, Actor, ReviewAction, Reviewer, Spcr, SpcrComment, SpcrDraft, SpcrError,
    SpcrType, WorkflowError, WorkflowStage,
};
