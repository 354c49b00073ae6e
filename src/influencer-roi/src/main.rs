//! Influencer ROI: runs an analytics report over a JSON relations snapshot
//! and prints the result as JSON.

use clap::{Parser, ValueEnum};
use influencer_core::{AnalyticsConfig, Relations};
use influencer_reporting::{RankingMetric, RoiAnalytics};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "influencer-roi")]
#[command(about = "ROI and ROAS analytics for influencer marketing campaigns")]
#[command(version)]
struct Cli {
    /// JSON file with `influencers`, `posts`, `tracking` and `payouts` arrays
    #[arg(long, env = "INFLUENCER_ROI__SNAPSHOT")]
    snapshot: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    #[arg(long, value_enum, default_value_t = ReportKind::Summary)]
    report: ReportKind,

    /// Ranking metric for `top`: roi, roas, revenue or efficiency
    #[arg(long, default_value = "efficiency")]
    metric: String,

    /// Number of leaders to rank (overrides config)
    #[arg(long)]
    top_n: Option<usize>,

    /// Baseline conversion rate (overrides config)
    #[arg(long)]
    baseline_rate: Option<f64>,

    /// Cohort seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportKind {
    Summary,
    Executive,
    Insights,
    Efficiency,
    Top,
    Poor,
    Campaigns,
    Platforms,
    Personas,
    Scorecard,
    Followers,
    Trends,
    Cohorts,
    Incrementality,
    Engagement,
    Cost,
    Quality,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "influencer_roi=info,influencer_reporting=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AnalyticsConfig::load_from(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalyticsConfig::default()
    });

    if let Some(n) = cli.top_n {
        config.ranking.top_n = n;
    }
    if let Some(rate) = cli.baseline_rate {
        config.incrementality.baseline_conversion_rate = rate;
    }
    if let Some(seed) = cli.seed {
        config.cohort.seed = seed;
    }
    let metric: RankingMetric = cli.metric.parse()?;

    let relations = Relations::load_json(&cli.snapshot)?;
    info!(
        snapshot = %cli.snapshot.display(),
        report = ?cli.report,
        "Running report"
    );

    let analytics = RoiAnalytics::new(relations, config);
    let top_n = analytics.config().ranking.top_n;

    match cli.report {
        ReportKind::Summary => print_json(&analytics.insights_summary()),
        ReportKind::Executive => print_json(&analytics.executive_summary()),
        ReportKind::Insights => print_json(&analytics.insights()),
        ReportKind::Efficiency => print_json(&analytics.influencer_efficiency()),
        ReportKind::Top => print_json(&analytics.top_performers(metric, top_n)),
        ReportKind::Poor => print_json(&analytics.poor_performers()),
        ReportKind::Campaigns => print_json(&analytics.campaign_performance()),
        ReportKind::Platforms => print_json(&analytics.platform_performance()),
        ReportKind::Personas => print_json(&analytics.persona_performance()),
        ReportKind::Scorecard => print_json(&analytics.persona_scorecard()),
        ReportKind::Followers => print_json(&analytics.follower_segments()),
        ReportKind::Trends => print_json(&analytics.time_trends()),
        ReportKind::Cohorts => print_json(&analytics.cohorts()),
        ReportKind::Incrementality => print_json(&analytics.incrementality()),
        ReportKind::Engagement => print_json(&analytics.engagement()),
        ReportKind::Cost => print_json(&analytics.cost_efficiency()),
        ReportKind::Quality => print_json(&analytics.data_quality()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
