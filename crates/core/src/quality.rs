//! Data-quality report: counts the conditions the analytics engine tolerates
//! silently (orphaned keys, duplicate IDs, negative amounts) so a loader or
//! operator can surface them.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::types::Relations;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub influencers: usize,
    pub posts: usize,
    pub tracking: usize,
    pub payouts: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DataQualityReport {
    pub row_counts: RowCounts,
    /// IDs that appear on more than one influencer row, sorted.
    pub duplicate_influencer_ids: Vec<String>,
    pub orphaned_post_ids: Vec<String>,
    pub orphaned_tracking_ids: Vec<String>,
    pub orphaned_payout_ids: Vec<String>,
    pub tracking_without_influencer: usize,
    pub negative_revenue_rows: usize,
    pub negative_order_rows: usize,
}

impl DataQualityReport {
    pub fn inspect(relations: &Relations) -> Self {
        let mut seen = HashSet::new();
        let mut duplicates = BTreeSet::new();
        for influencer in &relations.influencers {
            if !seen.insert(influencer.id.as_str()) {
                duplicates.insert(influencer.id.clone());
            }
        }

        let orphaned_post_ids =
            orphaned_ids(&seen, relations.posts.iter().map(|p| p.influencer_id.as_str()));
        let orphaned_tracking_ids = orphaned_ids(
            &seen,
            relations
                .tracking
                .iter()
                .filter_map(|t| t.influencer_id.as_deref()),
        );
        let orphaned_payout_ids =
            orphaned_ids(&seen, relations.payouts.iter().map(|p| p.influencer_id.as_str()));

        Self {
            row_counts: RowCounts {
                influencers: relations.influencers.len(),
                posts: relations.posts.len(),
                tracking: relations.tracking.len(),
                payouts: relations.payouts.len(),
            },
            duplicate_influencer_ids: duplicates.into_iter().collect(),
            orphaned_post_ids,
            orphaned_tracking_ids,
            orphaned_payout_ids,
            tracking_without_influencer: relations
                .tracking
                .iter()
                .filter(|t| t.influencer_id.is_none())
                .count(),
            negative_revenue_rows: relations.tracking.iter().filter(|t| t.revenue < 0.0).count(),
            negative_order_rows: relations.tracking.iter().filter(|t| t.orders < 0).count(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.duplicate_influencer_ids.is_empty()
            && self.orphaned_post_ids.is_empty()
            && self.orphaned_tracking_ids.is_empty()
            && self.orphaned_payout_ids.is_empty()
            && self.tracking_without_influencer == 0
            && self.negative_revenue_rows == 0
            && self.negative_order_rows == 0
    }
}

/// Distinct IDs not present in `known`, sorted.
fn orphaned_ids<'a>(known: &HashSet<&str>, ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    ids.filter(|id| !known.contains(id))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
