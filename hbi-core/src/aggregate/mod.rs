//! Summary statistics behind the dashboard KPI cards.
//!
//! Every summary is a pure fold over a record slice:
//!
//! - sums and weighted sums of money fields
//! - rates expressed as percentages (0-100)
//! - averages over the records present
//! - keyed distributions of `{count, value}`
//!
//! Summaries never fail. An empty slice yields an all-zero summary, and every
//! division is guarded so no field is ever NaN or infinite.

pub mod bids;
pub mod documents;
pub mod partners;
pub mod pipeline;
pub mod procurement;
pub mod staffing;

pub use bids::{BidRange, BidSummary};
pub use documents::DocumentSummary;
pub use partners::{PartnerHighlight, TradePartnerSummary};
pub use pipeline::{DivisionBreakdown, PipelineSummary};
pub use procurement::ProcurementSummary;
pub use staffing::StaffingSummary;

use serde::Serialize;

/// `part / whole * 100`, or 0 when the whole is zero or not finite.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() {
        return 0.0;
    }
    finite_or_zero(part / whole * 100.0)
}

/// `a / (a + b) * 100`, or 0 when both counts are zero.
pub fn rate(a: usize, b: usize) -> f64 {
    percent(a as f64, (a + b) as f64)
}

/// Arithmetic mean, or 0 for an empty set.
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    finite_or_zero(sum / count as f64)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// One bucket of a keyed distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub key: String,
    pub count: u64,
    pub value: f64,
}

/// Keyed `{count, value}` distribution, ordered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    buckets: Vec<Bucket>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences worth `value` to the bucket for `key`.
    pub fn add(&mut self, key: &str, count: u64, value: f64) {
        match self.buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => {
                bucket.count += count;
                bucket.value += value;
            }
            None => self.buckets.push(Bucket {
                key: key.to_string(),
                count,
                value,
            }),
        }
    }

    /// Record a single occurrence.
    pub fn record(&mut self, key: &str, value: f64) {
        self.add(key, 1, value);
    }

    pub fn get(&self, key: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.key == key)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of counts over all buckets.
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
