//! Relation model: typed rows for the four input relations of an analysis run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{RoiError, RoiResult};

/// Content vertical of an influencer. Unknown verticals are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Fitness,
    Beauty,
    Gaming,
    Lifestyle,
    Food,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Fitness" => Self::Fitness,
            "Beauty" => Self::Beauty,
            "Gaming" => Self::Gaming,
            "Lifestyle" => Self::Lifestyle,
            "Food" => Self::Food,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fitness => "Fitness",
            Self::Beauty => "Beauty",
            Self::Gaming => "Gaming",
            Self::Lifestyle => "Lifestyle",
            Self::Food => "Food",
            Self::Other(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

/// Reference data for one influencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Influencer {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    pub name: String,
    pub category: Category,
    pub gender: String,
    pub follower_count: u64,
    pub platform: String,
}

/// A piece of sponsored content published by an influencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// May reference an influencer that no longer exists.
    pub influencer_id: String,
    pub platform: String,
    pub date: NaiveDate,
    #[serde(rename = "URL", alias = "url", default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
}

impl Post {
    /// `(likes + comments) / reach * 100`, or `None` for a post with no reach.
    pub fn engagement_rate(&self) -> Option<f64> {
        if self.reach == 0 {
            return None;
        }
        Some((self.likes + self.comments) as f64 / self.reach as f64 * 100.0)
    }
}

/// One attributed conversion event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub source: String,
    pub campaign: String,
    #[serde(default)]
    pub influencer_id: Option<String>,
    pub user_id: String,
    pub product: String,
    pub date: NaiveDate,
    pub orders: i64,
    pub revenue: f64,
}

/// How a payout was earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutBasis {
    Post,
    Order,
}

/// Compensation paid to an influencer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub influencer_id: String,
    pub basis: PayoutBasis,
    pub rate: f64,
    /// Only meaningful when `basis` is [`PayoutBasis::Order`].
    #[serde(default)]
    pub orders: i64,
    /// Authoritative amount; never recomputed from `rate * orders`.
    pub total_payout: f64,
}

/// Immutable snapshot of the four relations consumed by one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relations {
    #[serde(default)]
    pub influencers: Vec<Influencer>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub tracking: Vec<TrackingRecord>,
    #[serde(default)]
    pub payouts: Vec<Payout>,
}

impl Relations {
    pub fn new(
        influencers: Vec<Influencer>,
        posts: Vec<Post>,
        tracking: Vec<TrackingRecord>,
        payouts: Vec<Payout>,
    ) -> Self {
        Self {
            influencers,
            posts,
            tracking,
            payouts,
        }
    }

    /// Parse a JSON snapshot with `influencers`, `posts`, `tracking` and
    /// `payouts` arrays. Missing arrays are empty.
    pub fn from_json(json: &str) -> RoiResult<Self> {
        serde_json::from_str(json).map_err(|e| RoiError::Snapshot(e.to_string()))
    }

    pub fn load_json(path: impl AsRef<Path>) -> RoiResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let relations = Self::from_json(&raw).map_err(|e| match e {
            RoiError::Snapshot(msg) => RoiError::Snapshot(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        debug!(
            path = %path.display(),
            influencers = relations.influencers.len(),
            tracking = relations.tracking.len(),
            "Loaded relations snapshot"
        );
        Ok(relations)
    }

    /// Influencers keyed by ID. When an ID repeats, the first row wins.
    pub fn influencer_index(&self) -> HashMap<&str, &Influencer> {
        let mut index = HashMap::with_capacity(self.influencers.len());
        for influencer in &self.influencers {
            index.entry(influencer.id.as_str()).or_insert(influencer);
        }
        index
    }

    /// Summed `total_payout` per influencer ID.
    pub fn payout_totals(&self) -> HashMap<&str, f64> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for payout in &self.payouts {
            *totals.entry(payout.influencer_id.as_str()).or_insert(0.0) += payout.total_payout;
        }
        totals
    }

    /// Revenue across every tracking row, orphans included.
    pub fn total_revenue(&self) -> f64 {
        self.tracking.iter().map(|t| t.revenue).sum()
    }

    pub fn total_orders(&self) -> i64 {
        self.tracking.iter().map(|t| t.orders).sum()
    }

    /// Payout across every payout row, orphans included.
    pub fn total_spend(&self) -> f64 {
        self.payouts.iter().map(|p| p.total_payout).sum()
    }
}
