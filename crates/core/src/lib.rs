//! Relation model, configuration, and errors shared by the influencer ROI
//! analytics crates.

pub mod config;
pub mod error;
pub mod quality;
pub mod types;

pub use config::AnalyticsConfig;
pub use error::{RoiError, RoiResult};
pub use quality::DataQualityReport;
pub use types::{Category, Influencer, Payout, PayoutBasis, Post, Relations, TrackingRecord};
