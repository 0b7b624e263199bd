//! Bid leveling summary.

use serde::Serialize;

use super::{mean, Distribution};
use crate::types::BidRecord;

/// Low/high spread of bids received for one trade category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRange {
    pub trade_category: String,
    pub bid_count: usize,
    pub low_bid: f64,
    pub low_vendor: String,
    pub high_bid: f64,
    /// `high_bid - low_bid`
    pub spread: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidSummary {
    pub total_bids: usize,
    pub total_bid_amount: f64,
    pub average_bid: f64,
    /// Mean evaluation score (0-100)
    pub average_evaluation_score: f64,
    pub by_status: Distribution,
    pub by_trade_category: Distribution,
    /// One entry per trade category, in first-appearance order
    pub ranges: Vec<BidRange>,
    /// Line items whose total does not equal quantity times unit price
    pub inconsistent_line_items: usize,
}

impl BidSummary {
    pub fn from_bids(bids: &[BidRecord]) -> Self {
        let mut summary = Self {
            total_bids: bids.len(),
            ..Default::default()
        };
        let mut score_sum = 0.0;

        for bid in bids {
            summary.total_bid_amount += bid.bid_amount;
            score_sum += bid.evaluation_score;
            summary.by_status.record(bid.status.as_str(), bid.bid_amount);
            summary
                .by_trade_category
                .record(&bid.trade_category, bid.bid_amount);
            summary.inconsistent_line_items += bid.inconsistent_line_items().count();

            match summary
                .ranges
                .iter_mut()
                .find(|r| r.trade_category == bid.trade_category)
            {
                Some(range) => {
                    range.bid_count += 1;
                    if bid.bid_amount < range.low_bid {
                        range.low_bid = bid.bid_amount;
                        range.low_vendor = bid.vendor_name.clone();
                    }
                    if bid.bid_amount > range.high_bid {
                        range.high_bid = bid.bid_amount;
                    }
                    range.spread = range.high_bid - range.low_bid;
                }
                None => summary.ranges.push(BidRange {
                    trade_category: bid.trade_category.clone(),
                    bid_count: 1,
                    low_bid: bid.bid_amount,
                    low_vendor: bid.vendor_name.clone(),
                    high_bid: bid.bid_amount,
                    spread: 0.0,
                }),
            }
        }

        summary.average_bid = mean(summary.total_bid_amount, bids.len());
        summary.average_evaluation_score = mean(score_sum, bids.len());
        summary
    }

    /// Spread for a trade category, if any bids were received.
    pub fn range_for(&self, trade_category: &str) -> Option<&BidRange> {
        self.ranges
            .iter()
            .find(|r| r.trade_category == trade_category)
    }
}
