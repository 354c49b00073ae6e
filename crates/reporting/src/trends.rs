//! Seasonal trends: tracking aggregated by calendar month, ISO week, and
//! day of week.

use chrono::{Datelike, Month, Weekday};
use influencer_core::Relations;
use serde::Serialize;

use crate::segments::{aggregate_segments, SegmentMetrics};

/// Day of week with Monday-first ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month_name: &'static str,
    #[serde(flatten)]
    pub metrics: SegmentMetrics<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeTrends {
    /// Keyed by month number (1–12), years merged.
    pub monthly: Vec<MonthlyTrend>,
    /// Keyed by ISO week number, years merged.
    pub weekly: Vec<SegmentMetrics<u32>>,
    /// Monday first; days without tracking are omitted.
    pub day_of_week: Vec<SegmentMetrics<DayOfWeek>>,
}

pub fn time_trends(relations: &Relations) -> TimeTrends {
    let monthly = aggregate_segments(relations, |record, _| Some(record.date.month()))
        .into_iter()
        .map(|metrics| MonthlyTrend {
            month_name: month_name(metrics.key),
            metrics,
        })
        .collect();

    TimeTrends {
        monthly,
        weekly: aggregate_segments(relations, |record, _| Some(record.date.iso_week().week())),
        day_of_week: aggregate_segments(relations, |record, _| {
            Some(DayOfWeek::from(record.date.weekday()))
        }),
    }
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("Unknown", |m| m.name())
}
