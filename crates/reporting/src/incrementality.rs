//! Incrementality: the share of revenue attributed to influencer activity
//! under a fixed baseline-conversion assumption.

use influencer_core::Relations;
use serde::Serialize;

use crate::efficiency::ratio_or_zero;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncrementalityEstimate {
    pub total_revenue: f64,
    pub total_orders: i64,
    /// `total_revenue * (1 - baseline_conversion_rate)`
    pub incremental_revenue: f64,
    pub total_spend: f64,
    /// `incremental_revenue / total_spend` (0.0 when spend is zero).
    pub incremental_roas: f64,
    pub baseline_conversion_rate: f64,
}

impl IncrementalityEstimate {
    pub fn from_totals(
        total_revenue: f64,
        total_orders: i64,
        total_spend: f64,
        baseline_conversion_rate: f64,
    ) -> Self {
        let incremental_revenue = total_revenue * (1.0 - baseline_conversion_rate);
        Self {
            total_revenue,
            total_orders,
            incremental_revenue,
            total_spend,
            incremental_roas: ratio_or_zero(incremental_revenue, total_spend),
            baseline_conversion_rate,
        }
    }
}

/// Totals span every tracking and payout row, including orphans.
pub fn estimate_incrementality(
    relations: &Relations,
    baseline_conversion_rate: f64,
) -> IncrementalityEstimate {
    IncrementalityEstimate::from_totals(
        relations.total_revenue(),
        relations.total_orders(),
        relations.total_spend(),
        baseline_conversion_rate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_incremental_roas_from_totals() {
        let estimate = IncrementalityEstimate::from_totals(10_000.0, 120, 2_000.0, 0.02);
        assert!((estimate.incremental_revenue - 9_800.0).abs() < 1e-6);
        assert!((estimate.incremental_roas - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_zero_spend_yields_zero_roas() {
        let estimate = IncrementalityEstimate::from_totals(10_000.0, 120, 0.0, 0.02);
        assert_eq!(estimate.incremental_roas, 0.0);
    }

    #[test]
    fn test_totals_include_orphans() {
        let estimate = estimate_incrementality(&sample_relations(), 0.02);
        assert!((estimate.total_revenue - 2875.0).abs() < EPS);
        assert_eq!(estimate.total_orders, 17);
        assert!((estimate.total_spend - 690.0).abs() < EPS);
        assert!((estimate.incremental_revenue - 2817.5).abs() < 1e-6);
        assert!((estimate.incremental_roas - 2817.5 / 690.0).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_override() {
        let estimate = estimate_incrementality(&sample_relations(), 0.1);
        assert!((estimate.incremental_revenue - 2587.5).abs() < 1e-6);
        assert!((estimate.baseline_conversion_rate - 0.1).abs() < f64::EPSILON);
    }
}
