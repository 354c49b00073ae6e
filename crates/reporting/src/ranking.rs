//! Top-N ranking and poor-performer detection over influencer efficiency rows.

use influencer_core::config::{PoorPerformerThresholds, RankingConfig};
use influencer_core::RoiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::efficiency::InfluencerEfficiency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    Roi,
    Roas,
    Revenue,
    /// Composite score, see [`efficiency_score`].
    Efficiency,
}

impl RankingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roi => "roi",
            Self::Roas => "roas",
            Self::Revenue => "revenue",
            Self::Efficiency => "efficiency",
        }
    }

    pub fn value(&self, row: &InfluencerEfficiency, weights: &RankingConfig) -> f64 {
        match self {
            Self::Roi => row.roi,
            Self::Roas => row.roas,
            Self::Revenue => row.revenue,
            Self::Efficiency => efficiency_score(row, weights),
        }
    }
}

impl FromStr for RankingMetric {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roi" => Ok(Self::Roi),
            "roas" => Ok(Self::Roas),
            "revenue" => Ok(Self::Revenue),
            "efficiency" => Ok(Self::Efficiency),
            other => Err(RoiError::UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `roi_weight * roi + roas_weight * roas + revenue_per_follower_weight * rpf`.
///
/// The default weights (0.4 / 20 / 1000) bring a percentage, a small
/// multiplier, and a tiny per-follower figure onto a comparable scale.
pub fn efficiency_score(row: &InfluencerEfficiency, weights: &RankingConfig) -> f64 {
    weights.roi_weight * row.roi
        + weights.roas_weight * row.roas
        + weights.revenue_per_follower_weight * row.revenue_per_follower
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedInfluencer {
    /// 1-based position.
    pub rank: usize,
    pub metric: RankingMetric,
    pub score: f64,
    #[serde(flatten)]
    pub influencer: InfluencerEfficiency,
}

/// The `n` rows with the largest `metric`, descending. Equal scores keep
/// their input order; there is no secondary key.
pub fn top_performers(
    rows: &[InfluencerEfficiency],
    metric: RankingMetric,
    n: usize,
    weights: &RankingConfig,
) -> Vec<RankedInfluencer> {
    let mut scored: Vec<(f64, &InfluencerEfficiency)> = rows
        .iter()
        .map(|row| (metric.value(row, weights), row))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let ranked: Vec<_> = scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (score, row))| RankedInfluencer {
            rank: i + 1,
            metric,
            score,
            influencer: row.clone(),
        })
        .collect();

    debug!(%metric, requested = n, returned = ranked.len(), "Ranked top performers");
    ranked
}

/// Rows failing either bar (`roi < thresholds.roi` or
/// `roas < thresholds.roas`), ascending by ROI.
pub fn poor_performers(
    rows: &[InfluencerEfficiency],
    thresholds: &PoorPerformerThresholds,
) -> Vec<InfluencerEfficiency> {
    let mut poor: Vec<_> = rows
        .iter()
        .filter(|row| row.roi < thresholds.roi || row.roas < thresholds.roas)
        .cloned()
        .collect();
    poor.sort_by(|a, b| a.roi.total_cmp(&b.roi));

    debug!(count = poor.len(), "Identified poor performers");
    poor
}
