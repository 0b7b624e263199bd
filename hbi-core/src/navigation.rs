//! Dashboard tab selection.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Top-level dashboard tabs, selected by the `activeTab` route key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    Overview,
    PreConstruction,
    Documents,
    TradePartners,
    Bids,
    Procurement,
    Staffing,
    Reports,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 8] = [
        Self::Overview,
        Self::PreConstruction,
        Self::Documents,
        Self::TradePartners,
        Self::Bids,
        Self::Procurement,
        Self::Staffing,
        Self::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::PreConstruction => "pre-construction",
            Self::Documents => "documents",
            Self::TradePartners => "trade-partners",
            Self::Bids => "bids",
            Self::Procurement => "procurement",
            Self::Staffing => "staffing",
            Self::Reports => "reports",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::PreConstruction => "Pre-Construction",
            Self::Documents => "Contract Documents",
            Self::TradePartners => "Trade Partners",
            Self::Bids => "Bid Management",
            Self::Procurement => "Procurement",
            Self::Staffing => "Staffing",
            Self::Reports => "Reports",
        }
    }

    /// Parse an `activeTab` value. Unknown or empty keys select the default.
    ///
    /// Accepts a leading `#` so hash routes can be passed through as-is.
    pub fn from_route(active_tab: &str) -> Self {
        let key = active_tab.trim().trim_start_matches('#').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == key)
            .unwrap_or_default()
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_route() {
        assert_eq!(DashboardTab::from_route("bids"), DashboardTab::Bids);
        assert_eq!(DashboardTab::from_route("#trade-partners"), DashboardTab::TradePartners);
        assert_eq!(DashboardTab::from_route("Procurement"), DashboardTab::Procurement);
        assert_eq!(DashboardTab::from_route(""), DashboardTab::Overview);
        assert_eq!(DashboardTab::from_route("settings"), DashboardTab::Overview);
    }
}
