//! Row builders and a small campaign snapshot shared by the unit tests.

use chrono::NaiveDate;
use influencer_core::{Influencer, Payout, PayoutBasis, Post, Relations, TrackingRecord};

pub const EPS: f64 = 1e-9;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn influencer(id: &str, category: &str, platform: &str, followers: u64) -> Influencer {
    Influencer {
        id: id.to_string(),
        name: format!("Influencer_{id}"),
        category: category.into(),
        gender: "Female".to_string(),
        follower_count: followers,
        platform: platform.to_string(),
    }
}

pub fn tracking(
    influencer_id: Option<&str>,
    campaign: &str,
    source: &str,
    on: NaiveDate,
    orders: i64,
    revenue: f64,
) -> TrackingRecord {
    TrackingRecord {
        source: source.to_string(),
        campaign: campaign.to_string(),
        influencer_id: influencer_id.map(str::to_string),
        user_id: "USER10001".to_string(),
        product: "Protein Powder".to_string(),
        date: on,
        orders,
        revenue,
    }
}

pub fn payout(influencer_id: &str, total: f64) -> Payout {
    Payout {
        influencer_id: influencer_id.to_string(),
        basis: PayoutBasis::Post,
        rate: total,
        orders: 0,
        total_payout: total,
    }
}

pub fn post(influencer_id: &str, platform: &str, reach: u64, likes: u64, comments: u64) -> Post {
    Post {
        influencer_id: influencer_id.to_string(),
        platform: platform.to_string(),
        date: date(2024, 4, 1),
        url: format!("http://example.com/post/{influencer_id}"),
        caption: "Check out this amazing product! #HealthKart".to_string(),
        reach,
        likes,
        comments,
    }
}

/// Four influencers across three campaigns, with one orphaned tracking row,
/// one tracking row without an influencer, one orphaned payout, and one
/// influencer without payouts.
///
/// | id     | category | platform  | followers | revenue | orders | payout |
/// |--------|----------|-----------|-----------|---------|--------|--------|
/// | INF001 | Fitness  | Instagram | 40k       | 1500    | 6      | 300    |
/// | INF002 | Beauty   | YouTube   | 150k      | 300     | 3      | 250    |
/// | INF003 | Fitness  | Instagram | 300k      | 900     | 5      | 100    |
/// | INF004 | Gaming   | TikTok    | 800k      | 100     | 1      | 0      |
pub fn sample_relations() -> Relations {
    let roster = vec![
        influencer("INF001", "Fitness", "Instagram", 40_000),
        influencer("INF002", "Beauty", "YouTube", 150_000),
        influencer("INF003", "Fitness", "Instagram", 300_000),
        influencer("INF004", "Gaming", "TikTok", 800_000),
    ];

    let records = vec![
        tracking(Some("INF001"), "SummerSale", "Instagram", date(2024, 6, 3), 4, 1000.0),
        tracking(Some("INF001"), "NewYearPromo", "Instagram", date(2024, 1, 6), 2, 500.0),
        tracking(Some("INF002"), "SummerSale", "YouTube", date(2024, 6, 4), 3, 300.0),
        tracking(Some("INF003"), "FitnessChallenge", "Instagram", date(2024, 3, 10), 5, 900.0),
        tracking(Some("INF004"), "FitnessChallenge", "TikTok", date(2024, 3, 11), 1, 100.0),
        tracking(Some("INF999"), "SummerSale", "Instagram", date(2024, 6, 5), 1, 50.0),
        tracking(None, "SummerSale", "YouTube", date(2024, 6, 5), 1, 25.0),
    ];

    let payout_rows = vec![
        payout("INF001", 200.0),
        Payout {
            influencer_id: "INF001".to_string(),
            basis: PayoutBasis::Order,
            rate: 25.0,
            orders: 4,
            total_payout: 100.0,
        },
        payout("INF002", 250.0),
        payout("INF003", 100.0),
        payout("INF999", 40.0),
    ];

    let post_rows = vec![
        post("INF001", "Instagram", 10_000, 800, 200),
        post("INF003", "Instagram", 0, 10, 0),
        post("INF002", "YouTube", 5_000, 200, 50),
        post("INF404", "Twitter", 1_000, 10, 1),
    ];

    Relations::new(roster, post_rows, records, payout_rows)
}
