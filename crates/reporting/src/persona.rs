//! Persona scorecard: ranks category/platform combinations by a composite
//! of mean influencer ROI, mean ROAS, and total revenue.

use influencer_core::config::{PersonaConfig, RankingConfig};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::efficiency::{ratio_or_zero, InfluencerEfficiency};
use crate::segments::persona_label;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaScore {
    pub persona: String,
    pub influencer_count: usize,
    pub revenue_sum: f64,
    pub revenue_mean: f64,
    pub roi_mean: f64,
    pub roas_mean: f64,
    pub total_payout: f64,
    pub orders: i64,
    pub efficiency_score: f64,
}

/// Personas sorted by descending score; equal scores keep persona order.
pub fn persona_scorecard(
    rows: &[InfluencerEfficiency],
    weights: &RankingConfig,
    persona: &PersonaConfig,
) -> Vec<PersonaScore> {
    let mut groups: BTreeMap<String, Vec<&InfluencerEfficiency>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(persona_label(&row.category, &row.platform))
            .or_default()
            .push(row);
    }

    let mut scores: Vec<_> = groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len() as f64;
            let revenue_sum: f64 = members.iter().map(|r| r.revenue).sum();
            let roi_mean = members.iter().map(|r| r.roi).sum::<f64>() / count;
            let roas_mean = members.iter().map(|r| r.roas).sum::<f64>() / count;

            PersonaScore {
                influencer_count: members.len(),
                revenue_sum,
                revenue_mean: revenue_sum / count,
                roi_mean,
                roas_mean,
                total_payout: members.iter().map(|r| r.total_payout).sum(),
                orders: members.iter().map(|r| r.orders).sum(),
                efficiency_score: weights.roi_weight * roi_mean
                    + weights.roas_weight * roas_mean
                    + ratio_or_zero(revenue_sum, persona.revenue_scale),
                persona: key,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.efficiency_score.total_cmp(&a.efficiency_score));
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efficiency::influencer_efficiency;
    use crate::fixtures::*;

    #[test]
    fn test_scorecard_order_and_values() {
        let rows = influencer_efficiency(&sample_relations());
        let scores = persona_scorecard(&rows, &RankingConfig::default(), &PersonaConfig::default());

        let personas: Vec<_> = scores.iter().map(|s| s.persona.as_str()).collect();
        assert_eq!(
            personas,
            vec!["Fitness + Instagram", "Beauty + YouTube", "Gaming + TikTok"]
        );

        let fitness = &scores[0];
        assert_eq!(fitness.influencer_count, 2);
        assert!((fitness.revenue_sum - 2400.0).abs() < EPS);
        assert!((fitness.revenue_mean - 1200.0).abs() < EPS);
        assert!((fitness.roi_mean - 600.0).abs() < EPS);
        assert!((fitness.roas_mean - 7.0).abs() < EPS);
        assert_eq!(fitness.orders, 11);
        // 0.4 * 600 + 20 * 7 + 2400 / 1000
        assert!((fitness.efficiency_score - 382.4).abs() < 1e-6);
    }

    #[test]
    fn test_zero_revenue_scale_drops_revenue_term() {
        let rows = influencer_efficiency(&sample_relations());
        let scores = persona_scorecard(
            &rows,
            &RankingConfig::default(),
            &PersonaConfig { revenue_scale: 0.0 },
        );
        assert!((scores[0].efficiency_score - 380.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_rows() {
        assert!(persona_scorecard(&[], &RankingConfig::default(), &PersonaConfig::default()).is_empty());
    }
}
