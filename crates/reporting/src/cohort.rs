//! Cohort analysis: groups tracking by the month an influencer was onboarded.
//!
//! Onboarding dates are not part of the relations, so they are simulated:
//! each influencer draws one weekly (Sunday) date from the configured window.
//! The random source is passed in so a seeded generator gives repeatable
//! cohorts.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use influencer_core::Relations;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::segments::{aggregate_segments, SegmentMetrics};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortAssignment {
    pub influencer_id: String,
    pub onboarding_date: NaiveDate,
    /// `YYYY-MM` of the onboarding date.
    pub cohort_month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortReport {
    pub assignments: Vec<CohortAssignment>,
    pub cohorts: Vec<SegmentMetrics<String>>,
}

/// Every Sunday in `[start, end]`.
pub fn onboarding_calendar(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let offset = (7 - start.weekday().num_days_from_sunday()) % 7;
    let mut day = start + Duration::days(i64::from(offset));
    debug_assert_eq!(day.weekday(), Weekday::Sun);

    let mut dates = Vec::new();
    while day <= end {
        dates.push(day);
        day += Duration::days(7);
    }
    dates
}

/// Draw an onboarding date for each influencer row, in relation order.
pub fn assign_cohorts<R: Rng + ?Sized>(
    relations: &Relations,
    calendar: &[NaiveDate],
    rng: &mut R,
) -> Vec<CohortAssignment> {
    relations
        .influencers
        .iter()
        .filter_map(|influencer| {
            let onboarding_date = *calendar.choose(&mut *rng)?;
            Some(CohortAssignment {
                influencer_id: influencer.id.clone(),
                onboarding_date,
                cohort_month: onboarding_date.format("%Y-%m").to_string(),
            })
        })
        .collect()
}

/// Inner-join tracking with simulated cohorts and aggregate per cohort month.
pub fn cohort_analysis<R: Rng + ?Sized>(
    relations: &Relations,
    calendar: &[NaiveDate],
    rng: &mut R,
) -> CohortReport {
    let assignments = assign_cohorts(relations, calendar, rng);

    let mut month_of: HashMap<&str, &str> = HashMap::with_capacity(assignments.len());
    for assignment in &assignments {
        month_of
            .entry(assignment.influencer_id.as_str())
            .or_insert(assignment.cohort_month.as_str());
    }

    let cohorts = aggregate_segments(relations, |record, _| {
        let id = record.influencer_id.as_deref()?;
        month_of.get(id).map(|month| month.to_string())
    });
    debug!(
        assignments = assignments.len(),
        cohorts = cohorts.len(),
        "Computed onboarding cohorts"
    );

    CohortReport {
        assignments,
        cohorts,
    }
}
