//! Data access and services for the HBI construction dashboards
//!
//! Wires the pure logic in `hbi-core` to its collaborators:
//!
//! - [`DashboardRepository`]: Async source of records (fixture files, in-memory, mock)
//! - [`AuthProvider`]: Opaque auth collaborator; only the role key is consumed
//! - [`StaffingStore`]: In-session change requests
//! - [`DashboardService`]: Builds filtered, summarized views for each dashboard tab
//! - [`ViewModel`]: Explicit load states that ignore updates after disposal
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hbi_data::{DashboardService, FixtureRepository, StaticAuthProvider};
//!
//! let repo = Arc::new(FixtureRepository::new("fixtures"));
//! let auth = Arc::new(StaticAuthProvider::anonymous());
//! let service = DashboardService::new(repo, auth);
//! service.initialize().await?;
//! let view = service.bids(&RecordQuery::new().with_filter("status", "awarded")).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod repository;
pub mod service;
pub mod staffing;
pub mod view;

// Re-export main types
pub use auth::{AuthProvider, AuthState, AuthUser, StaticAuthProvider};
pub use config::{DashboardConfig, DataConfig, UiConfig, ValidationMode};
pub use error::{DataError, ServiceError};
pub use repository::{
    DashboardRepository, FixtureRepository, FixtureSet, InMemoryRepository, MockRepository,
};
pub use service::{DashboardOverview, DashboardService, Kpi, RecordView};
pub use staffing::StaffingStore;
pub use view::{LoadState, ViewData, ViewModel};
