//! Subcommands and their execution.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use hbi_core::{RecordQuery, ReviewAction, SortDirection, SpcrDraft, SpcrType};
use hbi_data::DashboardService;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Headline summaries across every dashboard
    Overview,

    /// Pre-construction pipeline by division
    Pipeline(ListArgs),

    /// Trade partner scorecards
    Partners(ListArgs),

    /// Bid leveling
    Bids(ListArgs),

    /// Contract document review
    Documents(ListArgs),

    /// Procurement commitments
    Procurement(ListArgs),

    /// Display scope for the current role
    Scope,

    /// Static insight panels for a tab
    Insights {
        /// Dashboard tab (overview, pre-construction, bids, ...)
        #[arg(short, long, default_value = "overview")]
        tab: String,
    },

    /// Staffing plan change requests
    #[command(subcommand)]
    Spcr(SpcrCommands),
}

#[derive(Debug, Subcommand)]
pub enum SpcrCommands {
    /// List change requests
    List(ListArgs),

    /// Requests waiting on the current role
    Pending,

    /// Show one change request
    Show {
        id: String,
    },

    /// Move a request to a stage (e.g. pe-review, final-approved)
    Transition {
        id: String,
        stage: String,
        #[arg(short, long, default_value = "")]
        comment: String,
    },

    /// Apply a review action
    Review {
        id: String,
        #[arg(value_enum)]
        action: ReviewArg,
        #[arg(short, long, default_value = "")]
        comment: String,
    },

    /// Submit a new change request
    Create(CreateArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReviewArg {
    StartReview,
    Approve,
    Reject,
    Escalate,
}

impl From<ReviewArg> for ReviewAction {
    fn from(arg: ReviewArg) -> Self {
        match arg {
            ReviewArg::StartReview => ReviewAction::StartReview,
            ReviewArg::Approve => ReviewAction::Approve,
            ReviewArg::Reject => ReviewAction::Reject,
            ReviewArg::Escalate => ReviewAction::Escalate,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpcrTypeArg {
    Increase,
    Decrease,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name
    #[arg(long)]
    project: String,
    #[arg(long = "type", value_enum)]
    spcr_type: SpcrTypeArg,
    #[arg(long)]
    position: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,
    #[arg(long)]
    explanation: String,
    #[arg(long)]
    budget: f64,
}

/// Search, filter and sort flags shared by list commands.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive search term
    #[arg(short, long, default_value = "")]
    search: String,

    /// Filter as key=value; repeatable. Use value "all" to disable.
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,

    /// Sort key (e.g. bidAmount, companyName)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

impl ListArgs {
    pub fn to_query(&self) -> anyhow::Result<RecordQuery> {
        let mut query = RecordQuery::new().with_search(self.search.clone());
        for filter in &self.filters {
            let Some((key, value)) = filter.split_once('=') else {
                bail!("Filter must be key=value, got {filter:?}");
            };
            query = query.with_filter(key.trim(), value);
        }
        if let Some(key) = &self.sort {
            let direction = if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            query = query.sorted_by(key.clone(), direction);
        }
        Ok(query)
    }
}

/// Run a command and render its result as pretty JSON.
pub async fn execute(service: &DashboardService, command: Commands) -> anyhow::Result<String> {
    debug!(command = ?command, "Executing command");

    match command {
        Commands::Overview => render(&service.overview().await?),
        Commands::Pipeline(args) => render(&service.pipeline(&args.to_query()?).await?),
        Commands::Partners(args) => render(&service.trade_partners(&args.to_query()?).await?),
        Commands::Bids(args) => render(&service.bids(&args.to_query()?).await?),
        Commands::Documents(args) => render(&service.documents(&args.to_query()?).await?),
        Commands::Procurement(args) => render(&service.procurement(&args.to_query()?).await?),
        Commands::Scope => render(&service.role_scope().await?),
        Commands::Insights { tab } => render(&service.insights(&tab)),
        Commands::Spcr(command) => execute_spcr(service, command).await,
    }
}

async fn execute_spcr(service: &DashboardService, command: SpcrCommands) -> anyhow::Result<String> {
    match command {
        SpcrCommands::List(args) => render(&service.spcrs(&args.to_query()?).await?),
        SpcrCommands::Pending => render(&service.pending_reviews().await?),
        SpcrCommands::Show { id } => render(&service.spcr(&id).await?),
        SpcrCommands::Transition { id, stage, comment } => {
            render(&service.transition_spcr(&id, &stage, &comment).await?)
        }
        SpcrCommands::Review {
            id,
            action,
            comment,
        } => render(&service.review_spcr(&id, action.into(), &comment).await?),
        SpcrCommands::Create(args) => {
            let draft = SpcrDraft {
                project_id: args.project,
                spcr_type: match args.spcr_type {
                    SpcrTypeArg::Increase => SpcrType::Increase,
                    SpcrTypeArg::Decrease => SpcrType::Decrease,
                },
                position: args.position,
                start_date: args.start,
                end_date: args.end,
                explanation: args.explanation,
                budget: args.budget,
            };
            render(&service.create_spcr(draft).await?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to render output")
}
