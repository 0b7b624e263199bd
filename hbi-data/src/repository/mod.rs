//! Dashboard data sources.
//!
//! Provides a trait-based interface over where records come from:
//! - JSON fixture files on disk
//! - In-memory record sets
//! - Mock repository for testing

pub mod fixture;
pub mod memory;
pub mod mock;
pub mod traits;

pub use fixture::FixtureRepository;
pub use memory::InMemoryRepository;
pub use mock::MockRepository;
pub use traits::{enforce_validation, DashboardRepository, FixtureSet};
