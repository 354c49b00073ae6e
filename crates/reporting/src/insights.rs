//! Insight synthesis: maps aggregate extrema onto summary figures, typed
//! findings, and templated recommendations.
//!
//! Every function here is a pure mapping of already-computed results; none
//! of them touch the relations directly.

use influencer_core::Category;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::efficiency::{roi_percent, InfluencerEfficiency};
use crate::incrementality::IncrementalityEstimate;
use crate::ranking::RankedInfluencer;
use crate::segments::SegmentMetrics;

/// Placeholder for a best-of lookup over an empty set.
pub const NOT_AVAILABLE: &str = "N/A";

/// Everything the synthesizer reads, borrowed from one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    pub efficiency: &'a [InfluencerEfficiency],
    /// Leaders by efficiency score.
    pub top_performers: &'a [RankedInfluencer],
    pub poor_performers: &'a [InfluencerEfficiency],
    pub campaigns: &'a [SegmentMetrics<String>],
    pub platforms: &'a [SegmentMetrics<String>],
    pub incrementality: &'a IncrementalityEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallPerformance {
    pub total_revenue: f64,
    pub incremental_revenue: f64,
    pub total_spend: f64,
    pub incremental_roas: f64,
    pub overall_roi: f64,
}

impl OverallPerformance {
    pub fn from_estimate(estimate: &IncrementalityEstimate) -> Self {
        Self {
            total_revenue: estimate.total_revenue,
            incremental_revenue: estimate.incremental_revenue,
            total_spend: estimate.total_spend,
            incremental_roas: estimate.incremental_roas,
            overall_roi: roi_percent(estimate.total_revenue, estimate.total_spend),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformerSummary {
    pub name: String,
    pub category: Category,
    pub platform: String,
    pub revenue: f64,
    pub roi: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsSummary {
    pub overall_performance: OverallPerformance,
    pub top_performers: Vec<TopPerformerSummary>,
    pub poor_performer_count: usize,
    pub best_campaign: String,
    pub best_platform: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Opportunity,
    Risk,
    Optimization,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceHighlights {
    pub top_performer_count: usize,
    pub poor_performer_count: usize,
    pub best_campaign: String,
    /// ROI of `best_campaign`, 0.0 when there are no campaigns.
    pub campaign_roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub overview: OverallPerformance,
    pub highlights: PerformanceHighlights,
    pub key_insights: Vec<Insight>,
    pub recommendations: Vec<String>,
}

const EXECUTIVE_RECOMMENDATIONS: [&str; 4] = [
    "Focus investment on top-performing influencer segments",
    "Optimize or replace underperforming influencers",
    "Scale successful campaign formats",
    "Implement performance-based payout structures",
];

pub fn summarize(inputs: &InsightInputs<'_>) -> InsightsSummary {
    InsightsSummary {
        overall_performance: OverallPerformance::from_estimate(inputs.incrementality),
        top_performers: inputs
            .top_performers
            .iter()
            .map(|ranked| {
                let row = &ranked.influencer;
                TopPerformerSummary {
                    name: row.name.clone(),
                    category: row.category.clone(),
                    platform: row.platform.clone(),
                    revenue: row.revenue,
                    roi: row.roi,
                    roas: row.roas,
                }
            })
            .collect(),
        poor_performer_count: inputs.poor_performers.len(),
        best_campaign: best_key(inputs.campaigns, |c| c.roi),
        best_platform: best_key(inputs.platforms, |p| p.roi),
        recommendations: recommendations(inputs),
    }
}

/// Ordered free-text recommendations; each one is emitted only when its
/// source set is non-empty.
pub fn recommendations(inputs: &InsightInputs<'_>) -> Vec<String> {
    let mut out = Vec::new();

    let leaders = inputs.top_performers.iter().map(|r| &r.influencer);
    let category = modal(leaders.clone().map(|r| r.category.to_string()));
    let platform = modal(leaders.map(|r| r.platform.clone()));
    if let (Some(category), Some(platform)) = (category, platform) {
        out.push(format!(
            "Focus on {category} influencers on {platform} platform for highest ROI"
        ));
    }

    let poor = inputs.poor_performers.len();
    if poor > 0 {
        out.push(format!("Review and optimize {poor} underperforming influencers"));
    }

    if let Some(campaign) = first_max_by(inputs.campaigns, |c| c.roi) {
        out.push(format!(
            "Replicate success factors from '{}' campaign (ROI: {:.1}%)",
            campaign.key, campaign.roi
        ));
    }

    if let Some(platform) = first_max_by(inputs.platforms, |p| p.roas) {
        out.push(format!(
            "Increase investment in {} platform (ROAS: {:.2}x)",
            platform.key, platform.roas
        ));
    }

    out
}

/// Opportunity, risk, optimization and growth findings, in that order.
/// A finding whose source set is empty is skipped.
pub fn typed_insights(inputs: &InsightInputs<'_>) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(4);

    let top_category = best_mean_roi(inputs.efficiency, |r| r.category.to_string());
    let top_platform = best_mean_roi(inputs.efficiency, |r| r.platform.clone());
    if let (Some(category), Some(platform)) = (top_category, top_platform) {
        insights.push(Insight {
            kind: InsightKind::Opportunity,
            title: "High-ROI Segment Identified".to_string(),
            description: format!(
                "{category} influencers on {platform} show highest average ROI"
            ),
            action: format!("Increase budget allocation to {category} + {platform} combinations"),
            impact: Impact::High,
        });
    }

    if !inputs.poor_performers.is_empty() {
        let worst = modal(inputs.poor_performers.iter().map(|r| r.category.to_string()))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        insights.push(Insight {
            kind: InsightKind::Risk,
            title: "Underperforming Segment Alert".to_string(),
            description: format!(
                "{} influencers underperforming, majority in {worst}",
                inputs.poor_performers.len()
            ),
            action: format!("Review and optimize {worst} influencer strategy"),
            impact: Impact::Medium,
        });
    }

    if let Some(campaign) = first_max_by(inputs.campaigns, |c| c.roas) {
        insights.push(Insight {
            kind: InsightKind::Optimization,
            title: "Budget Reallocation Opportunity".to_string(),
            description: format!(
                "{} campaign shows highest ROAS ({:.2}x)",
                campaign.key, campaign.roas
            ),
            action: format!(
                "Reallocate budget from low-performing campaigns to {} format",
                campaign.key
            ),
            impact: Impact::High,
        });
    }

    if !inputs.top_performers.is_empty() {
        let count = inputs.top_performers.len();
        let avg_roi = inputs
            .top_performers
            .iter()
            .map(|r| r.influencer.roi)
            .sum::<f64>()
            / count as f64;
        insights.push(Insight {
            kind: InsightKind::Growth,
            title: "Scaling Opportunity".to_string(),
            description: format!("Top {count} performers average {avg_roi:.1}% ROI"),
            action: "Increase investment with top performers and find similar profiles"
                .to_string(),
            impact: Impact::High,
        });
    }

    insights
}

pub fn executive_summary(inputs: &InsightInputs<'_>) -> ExecutiveSummary {
    let best_campaign = first_max_by(inputs.campaigns, |c| c.roi);

    let mut key_insights = typed_insights(inputs);
    key_insights.truncate(3);

    ExecutiveSummary {
        overview: OverallPerformance::from_estimate(inputs.incrementality),
        highlights: PerformanceHighlights {
            top_performer_count: inputs.top_performers.len(),
            poor_performer_count: inputs.poor_performers.len(),
            best_campaign: best_campaign
                .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.key.clone()),
            campaign_roi: best_campaign.map_or(0.0, |c| c.roi),
        },
        key_insights,
        recommendations: EXECUTIVE_RECOMMENDATIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Extrema helpers
// ---------------------------------------------------------------------------

/// The first item holding the maximum value.
fn first_max_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let v = value(item);
        match best {
            Some((_, top)) if top >= v => {}
            _ => best = Some((item, v)),
        }
    }
    best.map(|(item, _)| item)
}

fn best_key(segments: &[SegmentMetrics<String>], value: impl Fn(&SegmentMetrics<String>) -> f64) -> String {
    first_max_by(segments, value).map_or_else(|| NOT_AVAILABLE.to_string(), |s| s.key.clone())
}

/// Most frequent value; ties go to the lexicographically smallest.
fn modal(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        match &best {
            Some((_, top)) if *top >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Key with the highest mean influencer ROI; the smallest key wins ties.
fn best_mean_roi(
    rows: &[InfluencerEfficiency],
    key_of: impl Fn(&InfluencerEfficiency) -> String,
) -> Option<String> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key_of(row)).or_insert((0.0, 0));
        entry.0 += row.roi;
        entry.1 += 1;
    }

    let means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect();
    first_max_by(&means, |(_, mean)| *mean).map(|(key, _)| key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efficiency::influencer_efficiency;
    use crate::incrementality::estimate_incrementality;
    use crate::fixtures::*;
    use crate::ranking::{poor_performers, top_performers, RankingMetric};
    use crate::segments::{campaign_performance, platform_performance};
    use influencer_core::config::{PoorPerformerThresholds, RankingConfig};

    struct Run {
        efficiency: Vec<InfluencerEfficiency>,
        top: Vec<RankedInfluencer>,
        poor: Vec<InfluencerEfficiency>,
        campaigns: Vec<SegmentMetrics<String>>,
        platforms: Vec<SegmentMetrics<String>>,
        incrementality: IncrementalityEstimate,
    }

    impl Run {
        fn sample() -> Self {
            let relations = sample_relations();
            let efficiency = influencer_efficiency(&relations);
            Self {
                top: top_performers(&efficiency, RankingMetric::Efficiency, 5, &RankingConfig::default()),
                poor: poor_performers(&efficiency, &PoorPerformerThresholds::default()),
                campaigns: campaign_performance(&relations),
                platforms: platform_performance(&relations),
                incrementality: estimate_incrementality(&relations, 0.02),
                efficiency,
            }
        }

        fn empty() -> Self {
            Self {
                efficiency: vec![],
                top: vec![],
                poor: vec![],
                campaigns: vec![],
                platforms: vec![],
                incrementality: IncrementalityEstimate::from_totals(0.0, 0, 0.0, 0.02),
            }
        }

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

    #[test]
    fn test_summary_overall_and_best_lookups() {
        let run = Run::sample();
        let summary = summarize(&run.inputs());

        let overall = &summary.overall_performance;
        assert!((overall.total_revenue - 2875.0).abs() < EPS);
        assert!((overall.total_spend - 690.0).abs() < EPS);
        assert!((overall.overall_roi - (2875.0 - 690.0) / 690.0 * 100.0).abs() < 1e-9);

        assert_eq!(summary.top_performers.len(), 4);
        assert_eq!(summary.top_performers[0].name, "Influencer_INF003");
        assert_eq!(summary.poor_performer_count, 2);
        assert_eq!(summary.best_campaign, "FitnessChallenge");
        assert_eq!(summary.best_platform, "Instagram");
    }

    #[test]
    fn test_recommendation_templates() {
        let run = Run::sample();
        assert_eq!(
            recommendations(&run.inputs()),
            vec![
                "Focus on Fitness influencers on Instagram platform for highest ROI",
                "Review and optimize 2 underperforming influencers",
                "Replicate success factors from 'FitnessChallenge' campaign (ROI: 900.0%)",
                "Increase investment in Instagram platform (ROAS: 5.57x)",
            ]
        );
    }

    #[test]
    fn test_typed_insights() {
        let run = Run::sample();
        let insights = typed_insights(&run.inputs());
        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Opportunity,
                InsightKind::Risk,
                InsightKind::Optimization,
                InsightKind::Growth
            ]
        );

        assert_eq!(
            insights[0].action,
            "Increase budget allocation to Fitness + Instagram combinations"
        );
        // Beauty and Gaming tie with one poor performer each.
        assert_eq!(
            insights[1].description,
            "2 influencers underperforming, majority in Beauty"
        );
        assert_eq!(insights[1].impact, Impact::Medium);
        assert_eq!(
            insights[2].description,
            "FitnessChallenge campaign shows highest ROAS (10.00x)"
        );
        assert_eq!(insights[3].description, "Top 4 performers average 305.0% ROI");
    }

    #[test]
    fn test_executive_summary() {
        let run = Run::sample();
        let summary = executive_summary(&run.inputs());
        assert_eq!(summary.highlights.top_performer_count, 4);
        assert_eq!(summary.highlights.poor_performer_count, 2);
        assert_eq!(summary.highlights.best_campaign, "FitnessChallenge");
        assert!((summary.highlights.campaign_roi - 900.0).abs() < EPS);
        assert_eq!(summary.key_insights.len(), 3);
        assert_eq!(summary.recommendations.len(), 4);
    }

    #[test]
    fn test_empty_inputs_use_sentinels() {
        let run = Run::empty();
        let summary = summarize(&run.inputs());
        assert_eq!(summary.best_campaign, NOT_AVAILABLE);
        assert_eq!(summary.best_platform, NOT_AVAILABLE);
        assert_eq!(summary.overall_performance.overall_roi, 0.0);
        assert!(summary.recommendations.is_empty());
        assert!(typed_insights(&run.inputs()).is_empty());

        let executive = executive_summary(&run.inputs());
        assert_eq!(executive.highlights.best_campaign, NOT_AVAILABLE);
        assert_eq!(executive.highlights.campaign_roi, 0.0);
        assert!(executive.key_insights.is_empty());
    }

    #[test]
    fn test_first_max_keeps_earliest_on_ties() {
        let values = [3.0, 7.0, 7.0, 1.0];
        let best = first_max_by(&values, |v| *v).unwrap();
        assert!(std::ptr::eq(best, &values[1]));
    }

    #[test]
    fn test_modal_ties_pick_smallest() {
        let values = ["b", "a", "b", "a"].map(String::from);
        assert_eq!(modal(values.into_iter()), Some("a".to_string()));
        assert_eq!(modal(std::iter::empty()), None);
    }

    #[test]
    fn test_insight_serializes_kind_as_type() {
        let run = Run::sample();
        let insights = typed_insights(&run.inputs());
        let json = serde_json::to_value(&insights[0]).unwrap();
        assert_eq!(json["type"], "opportunity");
        assert_eq!(json["impact"], "High");
    }
}
