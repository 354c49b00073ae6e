//! `RoiAnalytics`: one entry point over a relations snapshot and its
//! configuration. Every call recomputes from the snapshot.

use influencer_core::{AnalyticsConfig, DataQualityReport, Relations};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cohort::{cohort_analysis, onboarding_calendar, CohortReport};
use crate::cost::{cost_efficiency, CostEfficiencyReport};
use crate::efficiency::{influencer_efficiency, InfluencerEfficiency};
use crate::engagement::{engagement_analysis, EngagementReport};
use crate::incrementality::{estimate_incrementality, IncrementalityEstimate};
use crate::insights::{
    executive_summary, summarize, typed_insights, ExecutiveSummary, Insight, InsightInputs,
    InsightsSummary,
};
use crate::persona::{persona_scorecard, PersonaScore};
use crate::ranking::{poor_performers, top_performers, RankedInfluencer, RankingMetric};
use crate::segments::{
    campaign_performance, follower_bucket_performance, persona_performance, platform_performance,
    FollowerBucket, SegmentMetrics,
};
use crate::trends::{time_trends, TimeTrends};

pub struct RoiAnalytics {
    relations: Relations,
    config: AnalyticsConfig,
}

/// Intermediate results the insight synthesizer borrows from.
struct RunOutputs {
    efficiency: Vec<InfluencerEfficiency>,
    top: Vec<RankedInfluencer>,
    poor: Vec<InfluencerEfficiency>,
    campaigns: Vec<SegmentMetrics<String>>,
    platforms: Vec<SegmentMetrics<String>>,
    incrementality: IncrementalityEstimate,
}

impl RunOutputs {
    fn inputs(&self) -> InsightInputs<'_> {
        InsightInputs {
            efficiency: &self.efficiency,
            top_performers: &self.top,
            poor_performers: &self.poor,
            campaigns: &self.campaigns,
            platforms: &self.platforms,
            incrementality: &self.incrementality,
        }
    }
}

impl RoiAnalytics {
    pub fn new(relations: Relations, config: AnalyticsConfig) -> Self {
        info!(
            influencers = relations.influencers.len(),
            posts = relations.posts.len(),
            tracking = relations.tracking.len(),
            payouts = relations.payouts.len(),
            "ROI analytics initialized"
        );

        let quality = DataQualityReport::inspect(&relations);
        if !quality.is_clean() {
            warn!(
                duplicate_ids = quality.duplicate_influencer_ids.len(),
                orphaned_tracking = quality.orphaned_tracking_ids.len(),
                orphaned_payouts = quality.orphaned_payout_ids.len(),
                "Snapshot has data-quality findings"
            );
        }

        Self { relations, config }
    }

    pub fn with_defaults(relations: Relations) -> Self {
        Self::new(relations, AnalyticsConfig::default())
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn influencer_efficiency(&self) -> Vec<InfluencerEfficiency> {
        influencer_efficiency(&self.relations)
    }

    pub fn top_performers(&self, metric: RankingMetric, n: usize) -> Vec<RankedInfluencer> {
        top_performers(&self.influencer_efficiency(), metric, n, &self.config.ranking)
    }

    pub fn poor_performers(&self) -> Vec<InfluencerEfficiency> {
        poor_performers(&self.influencer_efficiency(), &self.config.thresholds)
    }

    pub fn campaign_performance(&self) -> Vec<SegmentMetrics<String>> {
        campaign_performance(&self.relations)
    }

    pub fn platform_performance(&self) -> Vec<SegmentMetrics<String>> {
        platform_performance(&self.relations)
    }

    pub fn persona_performance(&self) -> Vec<SegmentMetrics<String>> {
        persona_performance(&self.relations)
    }

    pub fn follower_segments(&self) -> Vec<SegmentMetrics<FollowerBucket>> {
        follower_bucket_performance(&self.relations)
    }

    pub fn time_trends(&self) -> TimeTrends {
        time_trends(&self.relations)
    }

    /// Cohorts drawn from a generator seeded with `cohort.seed`.
    pub fn cohorts(&self) -> CohortReport {
        let mut rng = StdRng::seed_from_u64(self.config.cohort.seed);
        self.cohorts_with(&mut rng)
    }

    pub fn cohorts_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CohortReport {
        let window = &self.config.cohort;
        let calendar = onboarding_calendar(window.window_start, window.window_end);
        cohort_analysis(&self.relations, &calendar, rng)
    }

    pub fn incrementality(&self) -> IncrementalityEstimate {
        estimate_incrementality(
            &self.relations,
            self.config.incrementality.baseline_conversion_rate,
        )
    }

    pub fn persona_scorecard(&self) -> Vec<PersonaScore> {
        persona_scorecard(
            &self.influencer_efficiency(),
            &self.config.ranking,
            &self.config.persona,
        )
    }

    pub fn cost_efficiency(&self) -> CostEfficiencyReport {
        cost_efficiency(&self.influencer_efficiency())
    }

    pub fn engagement(&self) -> EngagementReport {
        engagement_analysis(&self.relations)
    }

    pub fn data_quality(&self) -> DataQualityReport {
        DataQualityReport::inspect(&self.relations)
    }

    pub fn insights_summary(&self) -> InsightsSummary {
        summarize(&self.run().inputs())
    }

    pub fn insights(&self) -> Vec<Insight> {
        typed_insights(&self.run().inputs())
    }

    pub fn executive_summary(&self) -> ExecutiveSummary {
        executive_summary(&self.run().inputs())
    }

    fn run(&self) -> RunOutputs {
        let efficiency = self.influencer_efficiency();
        RunOutputs {
            top: top_performers(
                &efficiency,
                RankingMetric::Efficiency,
                self.config.ranking.top_n,
                &self.config.ranking,
            ),
            poor: poor_performers(&efficiency, &self.config.thresholds),
            campaigns: self.campaign_performance(),
            platforms: self.platform_performance(),
            incrementality: self.incrementality(),
            efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use influencer_core::config::PoorPerformerThresholds;

    #[test]
    fn test_facade_matches_free_functions() {
        let analytics = RoiAnalytics::with_defaults(sample_relations());
        assert_eq!(
            analytics.influencer_efficiency(),
            influencer_efficiency(analytics.relations())
        );
        assert_eq!(analytics.campaign_performance().len(), 3);
        assert_eq!(analytics.poor_performers().len(), 2);
        assert!((analytics.incrementality().incremental_revenue - 2817.5).abs() < 1e-6);
    }

    #[test]
    fn test_config_flows_through() {
        let mut config = AnalyticsConfig::default();
        config.thresholds = PoorPerformerThresholds { roi: 0.0, roas: 0.0 };
        config.ranking.top_n = 2;
        config.incrementality.baseline_conversion_rate = 0.0;

        let analytics = RoiAnalytics::new(sample_relations(), config);
        assert!(analytics.poor_performers().is_empty());
        assert_eq!(analytics.insights_summary().top_performers.len(), 2);
        assert!((analytics.incrementality().incremental_revenue - 2875.0).abs() < EPS);
    }

    #[test]
    fn test_seeded_cohorts_repeat() {
        let analytics = RoiAnalytics::with_defaults(sample_relations());
        assert_eq!(analytics.cohorts(), analytics.cohorts());
        assert_eq!(analytics.cohorts().assignments.len(), 4);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let analytics = RoiAnalytics::with_defaults(sample_relations());
        assert_eq!(analytics.insights_summary(), analytics.insights_summary());
        assert_eq!(analytics.executive_summary(), analytics.executive_summary());
        assert_eq!(analytics.time_trends(), analytics.time_trends());
    }

    #[test]
    fn test_empty_relations() {
        let analytics = RoiAnalytics::with_defaults(Relations::default());
        assert!(analytics.influencer_efficiency().is_empty());
        assert!(analytics.insights().is_empty());
        assert_eq!(analytics.insights_summary().best_campaign, "N/A");
        assert!(analytics.data_quality().is_clean());
    }
}
