//! Cost-efficiency breakdown of influencer efficiency rows by follower
//! bucket, category, and platform.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::efficiency::InfluencerEfficiency;
use crate::segments::FollowerBucket;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEfficiency<K> {
    pub key: K,
    pub influencer_count: usize,
    pub avg_cost_per_order: f64,
    pub avg_revenue_per_follower: f64,
    pub avg_roi: f64,
    pub avg_roas: f64,
    pub revenue: f64,
    pub total_payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEfficiencyReport {
    /// Micro to Mega; buckets without influencers are omitted.
    pub by_follower_bucket: Vec<CostEfficiency<FollowerBucket>>,
    pub by_category: Vec<CostEfficiency<String>>,
    pub by_platform: Vec<CostEfficiency<String>>,
}

pub fn cost_efficiency(rows: &[InfluencerEfficiency]) -> CostEfficiencyReport {
    CostEfficiencyReport {
        by_follower_bucket: group_rows(rows, |row| FollowerBucket::of(row.follower_count)),
        by_category: group_rows(rows, |row| row.category.to_string()),
        by_platform: group_rows(rows, |row| row.platform.clone()),
    }
}

fn group_rows<K, F>(rows: &[InfluencerEfficiency], key_of: F) -> Vec<CostEfficiency<K>>
where
    K: Ord,
    F: Fn(&InfluencerEfficiency) -> K,
{
    let mut groups: BTreeMap<K, Vec<&InfluencerEfficiency>> = BTreeMap::new();
    for row in rows {
        groups.entry(key_of(row)).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len() as f64;
            let mean = |field: fn(&InfluencerEfficiency) -> f64| {
                members.iter().map(|r| field(r)).sum::<f64>() / count
            };

            CostEfficiency {
                influencer_count: members.len(),
                avg_cost_per_order: mean(|r| r.cost_per_order),
                avg_revenue_per_follower: mean(|r| r.revenue_per_follower),
                avg_roi: mean(|r| r.roi),
                avg_roas: mean(|r| r.roas),
                revenue: members.iter().map(|r| r.revenue).sum(),
                total_payout: members.iter().map(|r| r.total_payout).sum(),
                key,
            }
        })
        .collect()
}
