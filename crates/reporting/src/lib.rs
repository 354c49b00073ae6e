//! Influencer ROI analytics: per-influencer efficiency, segment
//! aggregation, ranking, incrementality, and insight synthesis over a
//! [`Relations`](influencer_core::Relations) snapshot.

pub mod analytics;
pub mod cohort;
pub mod cost;
pub mod efficiency;
pub mod engagement;
pub mod incrementality;
pub mod insights;
pub mod persona;
pub mod ranking;
pub mod segments;
pub mod trends;

#[cfg(test)]
mod fixtures;

pub use analytics::RoiAnalytics;
pub use efficiency::InfluencerEfficiency;
pub use insights::{ExecutiveSummary, Insight, InsightsSummary};
pub use ranking::{RankedInfluencer, RankingMetric};
pub use segments::{FollowerBucket, SegmentMetrics};
