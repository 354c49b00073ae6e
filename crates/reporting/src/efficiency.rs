//! Per-influencer efficiency: revenue, spend, ROI, ROAS, cost per order,
//! and revenue per follower.

use influencer_core::{Category, Relations};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One row per influencer with attributed tracking and known metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerEfficiency {
    pub influencer_id: String,
    pub name: String,
    pub category: Category,
    pub platform: String,
    pub follower_count: u64,
    pub revenue: f64,
    pub orders: i64,
    pub total_payout: f64,
    /// `(revenue - payout) / payout * 100` (0.0 when payout is zero).
    pub roi: f64,
    /// `revenue / payout` (0.0 when payout is zero).
    pub roas: f64,
    /// `payout / orders` (0.0 when there are no orders).
    pub cost_per_order: f64,
    pub revenue_per_follower: f64,
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn roi_percent(revenue: f64, spend: f64) -> f64 {
    ratio_or_zero(revenue - spend, spend) * 100.0
}

pub fn roas(revenue: f64, spend: f64) -> f64 {
    ratio_or_zero(revenue, spend)
}

/// Aggregate tracking by influencer, left-join summed payouts, then
/// inner-join influencer metadata. Rows are ordered by influencer ID.
pub fn influencer_efficiency(relations: &Relations) -> Vec<InfluencerEfficiency> {
    let mut performance: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for record in &relations.tracking {
        if let Some(id) = record.influencer_id.as_deref() {
            let totals = performance.entry(id).or_insert((0.0, 0));
            totals.0 += record.revenue;
            totals.1 += record.orders;
        }
    }

    let payouts = relations.payout_totals();
    let influencers = relations.influencer_index();

    let mut rows = Vec::with_capacity(performance.len());
    let mut dropped = 0usize;
    for (id, (revenue, orders)) in performance {
        let Some(influencer) = influencers.get(id) else {
            dropped += 1;
            continue;
        };
        let total_payout = payouts.get(id).copied().unwrap_or(0.0);

        rows.push(InfluencerEfficiency {
            influencer_id: id.to_string(),
            name: influencer.name.clone(),
            category: influencer.category.clone(),
            platform: influencer.platform.clone(),
            follower_count: influencer.follower_count,
            revenue,
            orders,
            total_payout,
            roi: roi_percent(revenue, total_payout),
            roas: roas(revenue, total_payout),
            cost_per_order: ratio_or_zero(total_payout, orders as f64),
            revenue_per_follower: ratio_or_zero(revenue, influencer.follower_count as f64),
        });
    }

    if dropped > 0 {
        warn!(
            dropped,
            "Tracking references unknown influencers, excluded from efficiency metrics"
        );
    }
    debug!(influencers = rows.len(), "Computed influencer efficiency");
    rows
}
