//! Segment aggregation: groups tracking by an arbitrary key and attaches
//! spend, ROI, and ROAS per segment.
//!
//! Spend for a segment is the full payout total of every distinct influencer
//! with at least one tracking row in it. An influencer active in several
//! segments is counted in full under each, so segment spend does not sum to
//! total spend.

use influencer_core::{Category, Influencer, Relations, TrackingRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

use crate::efficiency::{ratio_or_zero, roas, roi_percent};

/// Aggregate metrics for one segment key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentMetrics<K> {
    pub key: K,
    pub revenue: f64,
    pub orders: i64,
    /// Distinct non-null influencer IDs, including ones without metadata.
    pub unique_influencers: usize,
    pub total_payout: f64,
    pub roi: f64,
    pub roas: f64,
    pub avg_revenue_per_influencer: f64,
    pub avg_order_value: f64,
}

#[derive(Default)]
struct Accumulator<'a> {
    revenue: f64,
    orders: i64,
    influencers: BTreeSet<&'a str>,
}

/// Group tracking rows by `key_of`, which sees each record together with its
/// joined influencer (if known). Returning `None` drops the record.
/// Segments are ordered by key.
pub fn aggregate_segments<K, F>(relations: &Relations, mut key_of: F) -> Vec<SegmentMetrics<K>>
where
    K: Ord,
    F: FnMut(&TrackingRecord, Option<&Influencer>) -> Option<K>,
{
    let index = relations.influencer_index();
    let payouts = relations.payout_totals();

    let mut groups: BTreeMap<K, Accumulator<'_>> = BTreeMap::new();
    for record in &relations.tracking {
        let influencer = record
            .influencer_id
            .as_deref()
            .and_then(|id| index.get(id).copied());
        let Some(key) = key_of(record, influencer) else {
            continue;
        };

        let acc = groups.entry(key).or_default();
        acc.revenue += record.revenue;
        acc.orders += record.orders;
        if let Some(id) = record.influencer_id.as_deref() {
            acc.influencers.insert(id);
        }
    }

    let segments: Vec<_> = groups
        .into_iter()
        .map(|(key, acc)| {
            let total_payout: f64 = acc
                .influencers
                .iter()
                .map(|id| payouts.get(id).copied().unwrap_or(0.0))
                .sum();
            let unique_influencers = acc.influencers.len();

            SegmentMetrics {
                key,
                revenue: acc.revenue,
                orders: acc.orders,
                unique_influencers,
                total_payout,
                roi: roi_percent(acc.revenue, total_payout),
                roas: roas(acc.revenue, total_payout),
                avg_revenue_per_influencer: ratio_or_zero(acc.revenue, unique_influencers as f64),
                avg_order_value: ratio_or_zero(acc.revenue, acc.orders as f64),
            }
        })
        .collect();

    debug!(segments = segments.len(), "Aggregated tracking segments");
    segments
}

pub fn campaign_performance(relations: &Relations) -> Vec<SegmentMetrics<String>> {
    aggregate_segments(relations, |record, _| Some(record.campaign.clone()))
}

/// Keyed by the tracking source platform.
pub fn platform_performance(relations: &Relations) -> Vec<SegmentMetrics<String>> {
    aggregate_segments(relations, |record, _| Some(record.source.clone()))
}

/// `"{category} + {platform}"`
pub fn persona_label(category: &Category, platform: &str) -> String {
    format!("{category} + {platform}")
}

/// Keyed by influencer persona; tracking without known influencers is dropped.
pub fn persona_performance(relations: &Relations) -> Vec<SegmentMetrics<String>> {
    aggregate_segments(relations, |_, influencer| {
        influencer.map(|i| persona_label(&i.category, &i.platform))
    })
}

/// Keyed by follower-size bucket; tracking without known influencers is dropped.
pub fn follower_bucket_performance(relations: &Relations) -> Vec<SegmentMetrics<FollowerBucket>> {
    aggregate_segments(relations, |_, influencer| {
        influencer.map(|i| FollowerBucket::of(i.follower_count))
    })
}

/// Audience size tier. Ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FollowerBucket {
    /// [0, 50k)
    Micro,
    /// [50k, 200k)
    Mid,
    /// [200k, 500k)
    Macro,
    /// [500k, ∞)
    Mega,
}

impl FollowerBucket {
    pub fn of(follower_count: u64) -> Self {
        match follower_count {
            0..=49_999 => Self::Micro,
            50_000..=199_999 => Self::Mid,
            200_000..=499_999 => Self::Macro,
            _ => Self::Mega,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Micro => "Micro (0-50K)",
            Self::Mid => "Mid (50K-200K)",
            Self::Macro => "Macro (200K-500K)",
            Self::Mega => "Mega (500K+)",
        }
    }
}

impl fmt::Display for FollowerBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
