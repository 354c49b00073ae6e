use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::RoiResult;

/// Root analytics configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `INFLUENCER_ROI__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub thresholds: PoorPerformerThresholds,
    #[serde(default)]
    pub incrementality: IncrementalityConfig,
    #[serde(default)]
    pub cohort: CohortConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
}

/// Weights of the composite efficiency score:
/// `roi_weight * roi + roas_weight * roas + revenue_per_follower_weight * rpf`.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_roi_weight")]
    pub roi_weight: f64,
    #[serde(default = "default_roas_weight")]
    pub roas_weight: f64,
    #[serde(default = "default_revenue_per_follower_weight")]
    pub revenue_per_follower_weight: f64,
    /// How many efficiency leaders feed the summary and insights.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// An influencer failing either bar is a poor performer.
#[derive(Debug, Clone, Deserialize)]
pub struct PoorPerformerThresholds {
    #[serde(default = "default_roi_threshold")]
    pub roi: f64,
    #[serde(default = "default_roas_threshold")]
    pub roas: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncrementalityConfig {
    /// Share of revenue assumed to happen without any influencer activity.
    #[serde(default = "default_baseline_conversion_rate")]
    pub baseline_conversion_rate: f64,
}

/// Onboarding simulation window for cohort analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct CohortConfig {
    #[serde(default = "default_cohort_seed")]
    pub seed: u64,
    #[serde(default = "default_window_start")]
    pub window_start: NaiveDate,
    #[serde(default = "default_window_end")]
    pub window_end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaConfig {
    /// Persona revenue is divided by this before entering the score.
    #[serde(default = "default_revenue_scale")]
    pub revenue_scale: f64,
}

// Default functions
fn default_roi_weight() -> f64 {
    0.4
}
fn default_roas_weight() -> f64 {
    20.0
}
fn default_revenue_per_follower_weight() -> f64 {
    1000.0
}
fn default_top_n() -> usize {
    5
}
fn default_roi_threshold() -> f64 {
    50.0
}
fn default_roas_threshold() -> f64 {
    2.0
}
fn default_baseline_conversion_rate() -> f64 {
    0.02
}
fn default_cohort_seed() -> u64 {
    42
}
fn default_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}
fn default_window_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
}
fn default_revenue_scale() -> f64 {
    1000.0
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            roi_weight: default_roi_weight(),
            roas_weight: default_roas_weight(),
            revenue_per_follower_weight: default_revenue_per_follower_weight(),
            top_n: default_top_n(),
        }
    }
}

impl Default for PoorPerformerThresholds {
    fn default() -> Self {
        Self {
            roi: default_roi_threshold(),
            roas: default_roas_threshold(),
        }
    }
}

impl Default for IncrementalityConfig {
    fn default() -> Self {
        Self {
            baseline_conversion_rate: default_baseline_conversion_rate(),
        }
    }
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            seed: default_cohort_seed(),
            window_start: default_window_start(),
            window_end: default_window_end(),
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            revenue_scale: default_revenue_scale(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from environment variables only.
    pub fn load() -> RoiResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an optional TOML file overlaid with
    /// environment variables.
    pub fn load_from(path: Option<&str>) -> RoiResult<Self> {
        debug!(file = ?path, "Loading analytics configuration");
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::with_name(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix("INFLUENCER_ROI")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
