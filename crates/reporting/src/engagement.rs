//! Post engagement: per-post rates joined with influencer audience size,
//! grouped by influencer category and platform.

use chrono::NaiveDate;
use influencer_core::{Category, Relations};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::efficiency::ratio_or_zero;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostEngagement {
    pub influencer_id: String,
    pub category: Category,
    /// The influencer's home platform.
    pub platform: String,
    pub date: NaiveDate,
    pub reach: u64,
    pub likes: u64,
    pub comments: u64,
    /// `None` when the post has no reach.
    pub engagement_rate: Option<f64>,
    pub likes_per_follower: f64,
    /// `reach / follower_count * 100`
    pub reach_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSummary {
    pub key: String,
    pub post_count: usize,
    /// Mean over posts with a defined rate; `None` if there are none.
    pub avg_engagement_rate: Option<f64>,
    pub avg_likes_per_follower: f64,
    pub avg_reach_rate: f64,
    pub avg_reach: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementReport {
    pub by_category: Vec<EngagementSummary>,
    pub by_platform: Vec<EngagementSummary>,
    pub posts: Vec<PostEngagement>,
}

/// Posts without a known influencer are dropped.
pub fn engagement_analysis(relations: &Relations) -> EngagementReport {
    let index = relations.influencer_index();

    let posts: Vec<PostEngagement> = relations
        .posts
        .iter()
        .filter_map(|post| {
            let influencer = index.get(post.influencer_id.as_str())?;
            let followers = influencer.follower_count as f64;
            Some(PostEngagement {
                influencer_id: post.influencer_id.clone(),
                category: influencer.category.clone(),
                platform: influencer.platform.clone(),
                date: post.date,
                reach: post.reach,
                likes: post.likes,
                comments: post.comments,
                engagement_rate: post.engagement_rate(),
                likes_per_follower: ratio_or_zero(post.likes as f64, followers),
                reach_rate: ratio_or_zero(post.reach as f64, followers) * 100.0,
            })
        })
        .collect();

    debug!(
        posts = posts.len(),
        dropped = relations.posts.len() - posts.len(),
        "Computed post engagement"
    );

    EngagementReport {
        by_category: summarize_by(&posts, |p| p.category.to_string()),
        by_platform: summarize_by(&posts, |p| p.platform.clone()),
        posts,
    }
}

fn summarize_by<F>(posts: &[PostEngagement], key_of: F) -> Vec<EngagementSummary>
where
    F: Fn(&PostEngagement) -> String,
{
    let mut groups: BTreeMap<String, Vec<&PostEngagement>> = BTreeMap::new();
    for post in posts {
        groups.entry(key_of(post)).or_default().push(post);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let count = members.len() as f64;
            let rates: Vec<f64> = members.iter().filter_map(|p| p.engagement_rate).collect();
            let avg_engagement_rate =
                (!rates.is_empty()).then(|| rates.iter().sum::<f64>() / rates.len() as f64);

            EngagementSummary {
                post_count: members.len(),
                avg_engagement_rate,
                avg_likes_per_follower: members.iter().map(|p| p.likes_per_follower).sum::<f64>()
                    / count,
                avg_reach_rate: members.iter().map(|p| p.reach_rate).sum::<f64>() / count,
                avg_reach: members.iter().map(|p| p.reach as f64).sum::<f64>() / count,
                avg_likes: members.iter().map(|p| p.likes as f64).sum::<f64>() / count,
                avg_comments: members.iter().map(|p| p.comments as f64).sum::<f64>() / count,
                key,
            }
        })
        .collect()
}
