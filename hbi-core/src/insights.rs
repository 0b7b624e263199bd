//! HBI AI insight panels.
//!
//! The dashboards show fixed recommendation text. Nothing here is computed
//! from data; the blocks are returned verbatim.

use serde::Serialize;

use crate::navigation::DashboardTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Opportunity,
    Risk,
    Recommendation,
}

/// One static insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub tab: DashboardTab,
    pub kind: InsightKind,
    pub title: &'static str,
    pub body: &'static str,
}

const INSIGHTS: &[Insight] = &[
    Insight {
        tab: DashboardTab::Overview,
        kind: InsightKind::Recommendation,
        title: "Portfolio health",
        body: "Three projects are trending over their general conditions budget. Review staffing plans before the next monthly forecast.",
    },
    Insight {
        tab: DashboardTab::PreConstruction,
        kind: InsightKind::Opportunity,
        title: "Healthcare pursuits",
        body: "Healthcare win rate is 12 points above the company average. Prioritize the two pending hospital RFPs.",
    },
    Insight {
        tab: DashboardTab::PreConstruction,
        kind: InsightKind::Risk,
        title: "Fee pressure",
        body: "Recent losses cite fee as the deciding factor on three pursuits over $40M.",
    },
    Insight {
        tab: DashboardTab::Documents,
        kind: InsightKind::Risk,
        title: "Indemnification language",
        body: "Two subcontracts include broad-form indemnity clauses that exceed the standard HBI position.",
    },
    Insight {
        tab: DashboardTab::TradePartners,
        kind: InsightKind::Recommendation,
        title: "Electrical capacity",
        body: "Preferred electrical partners are near capacity. Prequalify one additional firm before Q3 buyout.",
    },
    Insight {
        tab: DashboardTab::Bids,
        kind: InsightKind::Opportunity,
        title: "Bid spread",
        body: "Mechanical bids show a 14% spread. Level scope before awarding to avoid change order exposure.",
    },
    Insight {
        tab: DashboardTab::Procurement,
        kind: InsightKind::Opportunity,
        title: "Buyout savings",
        body: "Consolidating drywall packages across two projects could save an estimated $185K.",
    },
    Insight {
        tab: DashboardTab::Staffing,
        kind: InsightKind::Recommendation,
        title: "Superintendent coverage",
        body: "Four change requests add field supervision in the same quarter. Consider a shared assistant superintendent.",
    },
];

/// Insight cards shown on a tab. Tabs without insights get an empty slice.
pub fn insights_for(tab: DashboardTab) -> Vec<&'static Insight> {
    INSIGHTS.iter().filter(|insight| insight.tab == tab).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_per_tab() {
        assert_eq!(insights_for(DashboardTab::PreConstruction).len(), 2);
        assert!(insights_for(DashboardTab::Reports).is_empty());
        assert!(INSIGHTS
            .iter()
            .all(|i| !i.title.is_empty() && !i.body.is_empty()));
    }
}
