//! DashboardService - composes data access, auth and core logic into views.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use hbi_core::{
    apply_query_owned, format_currency, format_currency_full, format_percent, insights_for,
    resolve_scope, BidRecord, BidSummary, CommitmentRecord, DashboardTab, DocumentRecord,
    DocumentSummary, Insight, PipelineItem, PipelineSummary, ProcurementSummary, Queryable,
    RecordQuery, ReviewAction, RoleScope, ScopeTotals, SearchDebouncer, Spcr, SpcrDraft,
    StaffingSummary, TradePartnerRecord, TradePartnerSummary, WorkflowStage,
};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::auth::AuthProvider;
use crate::config::DashboardConfig;
use crate::error::{DataError, ServiceError};
use crate::repository::DashboardRepository;
use crate::staffing::StaffingStore;
use crate::view::ViewData;

/// A formatted headline figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
}

impl Kpi {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Records visible in a table, with the summary over exactly those records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView<T, S> {
    pub records: Vec<T>,
    /// Records before search and filters
    pub total_count: usize,
    pub visible_count: usize,
    pub summary: S,
    pub kpis: Vec<Kpi>,
}

impl<T, S> ViewData for RecordView<T, S> {
    fn is_empty_view(&self) -> bool {
        self.records.is_empty()
    }
}

/// Headline summaries for the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub scope: RoleScope,
    pub pipeline: PipelineSummary,
    pub partners: TradePartnerSummary,
    pub bids: BidSummary,
    pub documents: DocumentSummary,
    pub procurement: ProcurementSummary,
    pub kpis: Vec<Kpi>,
}

/// Main entry point for dashboard views.
pub struct DashboardService {
    config: DashboardConfig,
    repository: Arc<dyn DashboardRepository>,
    auth: Arc<dyn AuthProvider>,
    staffing: Arc<StaffingStore>,
    /// Set once the staffing store has been seeded from the repository
    staffing_seeded: OnceCell<usize>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DashboardRepository>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            config: DashboardConfig::default(),
            repository,
            auth,
            staffing: Arc::new(StaffingStore::new()),
            staffing_seeded: OnceCell::new(),
        }
    }

    /// Create with configuration.
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn staffing(&self) -> Arc<StaffingStore> {
        Arc::clone(&self.staffing)
    }

    /// Debouncer for a table's search box, using the configured quiet period.
    pub fn search_debouncer(&self) -> SearchDebouncer {
        SearchDebouncer::new(self.config.ui.search_debounce())
    }

    /// Check the repository and seed the staffing store.
    pub async fn initialize(&self) -> Result<(), ServiceError> {
        info!(repository = %self.repository.id(), "Initializing DashboardService");
        self.ensure_available().await?;
        let seeded = self.seed_staffing().await?;
        info!(spcrs = seeded, "DashboardService initialized");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Scope
    // ---------------------------------------------------------------------

    /// Role key of the signed-in user; empty when nobody is signed in.
    pub async fn current_role(&self) -> String {
        self.auth
            .current_user()
            .await
            .role()
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Display scope for the signed-in user. Presentation only.
    pub async fn role_scope(&self) -> Result<RoleScope, ServiceError> {
        let (pipeline, partners, bids, documents, commitments) = futures::try_join!(
            self.repository.fetch_pipeline(),
            self.repository.fetch_trade_partners(),
            self.repository.fetch_bids(),
            self.repository.fetch_documents(),
            self.repository.fetch_commitments(),
        )?;
        let totals = scope_totals(&pipeline, &partners, &bids, &documents, &commitments);
        let role = self.current_role().await;
        Ok(resolve_scope(&role, totals, &self.config.scope))
    }

    // ---------------------------------------------------------------------
    // Record views
    // ---------------------------------------------------------------------

    pub async fn overview(&self) -> Result<DashboardOverview, ServiceError> {
        let (pipeline, partners, bids, documents, commitments) = futures::try_join!(
            self.repository.fetch_pipeline(),
            self.repository.fetch_trade_partners(),
            self.repository.fetch_bids(),
            self.repository.fetch_documents(),
            self.repository.fetch_commitments(),
        )?;

        let totals = scope_totals(&pipeline, &partners, &bids, &documents, &commitments);
        let role = self.current_role().await;
        let pipeline = PipelineSummary::from_items(&pipeline);
        let procurement = ProcurementSummary::from_commitments(&commitments);

        let kpis = vec![
            Kpi::new("Total Pipeline", format_currency(pipeline.total_pipeline_value)),
            Kpi::new("Win Rate", format_percent(pipeline.win_rate, 1)),
            Kpi::new("Committed", format_currency(procurement.total_committed)),
            Kpi::new("Buyout Savings", format_currency(procurement.savings)),
        ];

        Ok(DashboardOverview {
            scope: resolve_scope(&role, totals, &self.config.scope),
            pipeline,
            partners: TradePartnerSummary::with_top_performers(
                &partners,
                self.config.ui.top_performers,
            ),
            bids: BidSummary::from_bids(&bids),
            documents: DocumentSummary::from_documents(&documents),
            procurement,
            kpis,
        })
    }

    pub async fn pipeline(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<PipelineItem, PipelineSummary>, ServiceError> {
        let items = self.repository.fetch_pipeline().await?;
        Ok(build_view("pipeline", &items, query, PipelineSummary::from_items, |s| {
            vec![
                Kpi::new("Total Pipeline", format_currency(s.total_pipeline_value)),
                Kpi::new("Probability Weighted", format_currency(s.probability_weighted_value)),
                Kpi::new("Average Probability", format_percent(s.average_probability, 1)),
                Kpi::new("Win Rate", format_percent(s.win_rate, 1)),
            ]
        }))
    }

    pub async fn trade_partners(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<TradePartnerRecord, TradePartnerSummary>, ServiceError> {
        let partners = self.repository.fetch_trade_partners().await?;
        let top_n = self.config.ui.top_performers;
        Ok(build_view(
            "trade_partners",
            &partners,
            query,
            |records| TradePartnerSummary::with_top_performers(records, top_n),
            |s| {
                vec![
                    Kpi::new("Active Partners", s.active_partners.to_string()),
                    Kpi::new("Average Rating", format!("{:.1}", s.average_rating)),
                    Kpi::new("On-Time Delivery", format_percent(s.average_on_time_delivery, 0)),
                    Kpi::new("Safety Score", format_percent(s.average_safety_score, 0)),
                ]
            },
        ))
    }

    pub async fn bids(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<BidRecord, BidSummary>, ServiceError> {
        let bids = self.repository.fetch_bids().await?;
        Ok(build_view("bids", &bids, query, BidSummary::from_bids, |s| {
            vec![
                Kpi::new("Bids Received", s.total_bids.to_string()),
                Kpi::new("Total Bid Value", format_currency(s.total_bid_amount)),
                Kpi::new("Average Bid", format_currency(s.average_bid)),
                Kpi::new("Average Score", format!("{:.0}", s.average_evaluation_score)),
            ]
        }))
    }

    pub async fn documents(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<DocumentRecord, DocumentSummary>, ServiceError> {
        let documents = self.repository.fetch_documents().await?;
        Ok(build_view("documents", &documents, query, DocumentSummary::from_documents, |s| {
            vec![
                Kpi::new("Documents", s.total_documents.to_string()),
                Kpi::new("Average Compliance", format_percent(s.average_compliance_score, 0)),
                Kpi::new("High Risk", s.high_risk_documents.to_string()),
                Kpi::new("Pending Analysis", s.pending_analysis.to_string()),
            ]
        }))
    }

    pub async fn procurement(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<CommitmentRecord, ProcurementSummary>, ServiceError> {
        let commitments = self.repository.fetch_commitments().await?;
        Ok(build_view(
            "commitments",
            &commitments,
            query,
            ProcurementSummary::from_commitments,
            |s| {
                vec![
                    Kpi::new("Budget", format_currency(s.total_budget)),
                    Kpi::new("Committed", format_currency(s.total_committed)),
                    Kpi::new("Savings", format_currency(s.savings)),
                    Kpi::new("Invoiced", format_percent(s.percent_invoiced, 1)),
                ]
            },
        ))
    }

    pub fn insights(&self, active_tab: &str) -> Vec<Insight> {
        insights_for(DashboardTab::from_route(active_tab))
            .into_iter()
            .copied()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Staffing change requests
    // ---------------------------------------------------------------------

    pub async fn spcrs(
        &self,
        query: &RecordQuery,
    ) -> Result<RecordView<Spcr, StaffingSummary>, ServiceError> {
        self.seed_staffing().await?;
        let records = self.staffing.query(query);
        let summary = StaffingSummary::from_requests(&records);
        let kpis = vec![
            Kpi::new("Open Requests", summary.open_requests.to_string()),
            Kpi::new("Approval Rate", format_percent(summary.approval_rate, 0)),
            Kpi::new("Requested", format_currency(summary.requested_budget)),
            Kpi::new("Approved Budget", format_currency_full(summary.approved_budget)),
        ];

        debug!(
            view = "spcrs",
            total = self.staffing.len(),
            visible = records.len(),
            "Built record view"
        );

        Ok(RecordView {
            total_count: self.staffing.len(),
            visible_count: records.len(),
            records,
            summary,
            kpis,
        })
    }

    pub async fn spcr(&self, id: &str) -> Result<Spcr, ServiceError> {
        self.seed_staffing().await?;
        self.staffing
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Requests waiting on the signed-in user's role.
    pub async fn pending_reviews(&self) -> Result<Vec<Spcr>, ServiceError> {
        self.seed_staffing().await?;
        let role = self.current_role().await;
        Ok(self.staffing.pending_for(&role))
    }

    /// Submit a new request as the signed-in user.
    pub async fn create_spcr(&self, draft: SpcrDraft) -> Result<Spcr, ServiceError> {
        self.seed_staffing().await?;
        let actor = self.actor().await?;
        self.staffing.create(draft, &actor, Utc::now())
    }

    /// Move a request to a named stage as the signed-in user.
    pub async fn transition_spcr(
        &self,
        id: &str,
        stage: &str,
        comment: &str,
    ) -> Result<Spcr, ServiceError> {
        let to: WorkflowStage = stage.parse()?;
        self.seed_staffing().await?;
        let actor = self.actor().await?;
        self.staffing.transition(id, to, &actor, comment, Utc::now())
    }

    /// Apply a review action as the signed-in user.
    pub async fn review_spcr(
        &self,
        id: &str,
        action: ReviewAction,
        comment: &str,
    ) -> Result<Spcr, ServiceError> {
        self.seed_staffing().await?;
        let actor = self.actor().await?;
        self.staffing.review(id, action, &actor, comment, Utc::now())
    }

    async fn actor(&self) -> Result<hbi_core::Actor, ServiceError> {
        self.auth
            .current_user()
            .await
            .user
            .map(|user| user.actor())
            .ok_or(ServiceError::NoUser)
    }

    async fn ensure_available(&self) -> Result<(), ServiceError> {
        if self.repository.is_available().await {
            Ok(())
        } else {
            Err(DataError::Unavailable(self.repository.id().to_string()).into())
        }
    }

    async fn seed_staffing(&self) -> Result<usize, ServiceError> {
        let count = self
            .staffing_seeded
            .get_or_try_init(|| async {
                let spcrs = self.repository.fetch_spcrs().await?;
                Ok::<_, ServiceError>(self.staffing.load(spcrs))
            })
            .await?;
        Ok(*count)
    }
}

/// Distinct project names referenced by any record.
fn scope_totals(
    pipeline: &[PipelineItem],
    partners: &[TradePartnerRecord],
    bids: &[BidRecord],
    documents: &[DocumentRecord],
    commitments: &[CommitmentRecord],
) -> ScopeTotals {
    let projects: BTreeSet<&str> = bids
        .iter()
        .map(|b| b.project_id.as_str())
        .chain(documents.iter().map(|d| d.project.as_str()))
        .chain(commitments.iter().map(|c| c.project.as_str()))
        .filter(|name| !name.trim().is_empty())
        .collect();

    ScopeTotals {
        projects: projects.len(),
        partners: partners.len(),
        pursuits: usize::try_from(PipelineSummary::from_items(pipeline).pursuit_count())
            .unwrap_or(usize::MAX),
    }
}

fn build_view<T, S>(
    name: &str,
    records: &[T],
    query: &RecordQuery,
    summarize: impl FnOnce(&[T]) -> S,
    kpis: impl FnOnce(&S) -> Vec<Kpi>,
) -> RecordView<T, S>
where
    T: Queryable + Clone,
{
    let visible = apply_query_owned(records, query);
    let summary = summarize(visible.as_slice());
    let kpis = kpis(&summary);

    debug!(
        view = name,
        total = records.len(),
        visible = visible.len(),
        "Built record view"
    );

    RecordView {
        total_count: records.len(),
        visible_count: visible.len(),
        records: visible,
        summary,
        kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, StaticAuthProvider};
    use crate::repository::{FixtureSet, MockRepository};
    use hbi_core::{PipelineConfig, ScopeKind};

    fn item(division: &str, value: f64, weighted: f64) -> PipelineItem {
        PipelineItem {
            division: division.to_string(),
            config: PipelineConfig {
                pipeline_value: value,
                probability_weighted: weighted,
                ..Default::default()
            },
        }
    }

    fn user(role: &str) -> AuthUser {
        AuthUser {
            role: role.to_string(),
            email: "pm@hbi.example".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
        }
    }

    fn service(repo: MockRepository, role: Option<&str>) -> DashboardService {
        let auth = match role {
            Some(role) => StaticAuthProvider::signed_in(user(role)),
            None => StaticAuthProvider::anonymous(),
        };
        DashboardService::new(Arc::new(repo), Arc::new(auth))
    }

    #[tokio::test]
    async fn test_pipeline_view_summarizes_visible_items() {
        let repo = MockRepository::new(FixtureSet {
            pipeline: vec![
                item("Healthcare", 1_000_000.0, 500_000.0),
                item("Education", 2_000_000.0, 1_800_000.0),
            ],
            ..Default::default()
        });
        let svc = service(repo, Some("executive"));

        let all = svc.pipeline(&RecordQuery::new()).await.unwrap();
        assert_eq!(all.summary.total_pipeline_value, 3_000_000.0);
        assert_eq!(all.summary.probability_weighted_value, 2_300_000.0);
        assert_eq!(all.kpis[0].value, "$3.0M");

        let health = svc
            .pipeline(&RecordQuery::new().with_search("health"))
            .await
            .unwrap();
        assert_eq!(health.total_count, 2);
        assert_eq!(health.visible_count, 1);
        assert_eq!(health.summary.total_pipeline_value, 1_000_000.0);
    }

    #[tokio::test]
    async fn test_anonymous_scope_is_enterprise() {
        let svc = service(MockRepository::default(), None);
        let scope = svc.role_scope().await.unwrap();
        assert_eq!(scope.scope, ScopeKind::Enterprise);
        assert_eq!(scope.project_count, 0);
    }

    #[tokio::test]
    async fn test_unavailable_repository() {
        let svc = service(MockRepository::default().with_available(false), Some("admin"));
        assert!(matches!(
            svc.initialize().await,
            Err(ServiceError::Data(DataError::Unavailable(_)))
        ));
        assert!(svc.bids(&RecordQuery::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_staffing_seeded_once() {
        let repo = Arc::new(MockRepository::default());
        let svc = DashboardService::new(
            repo.clone(),
            Arc::new(StaticAuthProvider::signed_in(user("project-manager"))),
        );

        svc.spcrs(&RecordQuery::new()).await.unwrap();
        svc.spcrs(&RecordQuery::new()).await.unwrap();
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn test_workflow_requires_user() {
        let svc = service(MockRepository::default(), None);
        let err = svc
            .review_spcr("spcr-1", ReviewAction::Approve, "")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NoUser));

        let err = svc.transition_spcr("spcr-1", "approved", "").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Workflow(hbi_core::WorkflowError::UnknownStage(_))
        ));
    }

    #[tokio::test]
    async fn test_spcr_view_reuses_memoized_query() {
        let svc = service(MockRepository::default(), Some("project-manager"));
        let query = RecordQuery::new().with_filter("workflowStage", "submitted");

        let empty = svc.spcrs(&query).await.unwrap();
        assert_eq!(empty.visible_count, 0);
        svc.spcrs(&query).await.unwrap();
        assert_eq!(svc.staffing().query_recomputes(), 1);

        svc.create_spcr(SpcrDraft {
            project_id: "Palm Beach Tower".to_string(),
            spcr_type: hbi_core::SpcrType::Increase,
            position: "Field Engineer".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            explanation: "Second shift".to_string(),
            budget: 1_260_000.0,
        })
        .await
        .unwrap();

        let view = svc.spcrs(&query).await.unwrap();
        assert_eq!(svc.staffing().query_recomputes(), 2);
        assert_eq!(view.visible_count, 1);
        assert_eq!(view.summary.open_requests, 1);
        assert_eq!(view.kpis[2].value, "$1.3M");
        assert_eq!(view.kpis[3].value, "$0");
    }

    #[test]
    fn test_search_debouncer_uses_configured_quiet_period() {
        let mut config = DashboardConfig::default();
        config.ui.search_debounce_ms = 40;
        let svc = service(MockRepository::default(), None).with_config(config);

        let start = std::time::Instant::now();
        let mut debouncer = svc.search_debouncer();
        debouncer.submit("bay", start);
        assert_eq!(debouncer.poll(start + std::time::Duration::from_millis(39)), None);
        assert_eq!(
            debouncer.poll(start + std::time::Duration::from_millis(40)),
            Some("bay".to_string())
        );

        let mut default = service(MockRepository::default(), None).search_debouncer();
        default.submit("bay", start);
        assert_eq!(default.poll(start + std::time::Duration::from_millis(100)), None);
    }

    #[test]
    fn test_insights_by_tab() {
        let svc = service(MockRepository::default(), None);
        assert!(!svc.insights("bids").is_empty());
        assert!(svc.insights("reports").is_empty());
    }
}
