//! Read-only summarization of a day's activities for presentation.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::budget::DAILY_BUDGET_MINUTES;
use crate::models::activity::{Activity, Category};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: Category,
    pub minutes: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_minutes: i64,
    pub remaining_minutes: i64,
    pub categories: Vec<CategorySlice>,
}

pub fn total_minutes(activities: &[Activity]) -> i64 {
    activities.iter().map(|a| a.minutes as i64).sum()
}

/// Sums minutes per category in one pass. Categories without
/// activities are absent from the map, not zero-filled.
pub fn category_totals(activities: &[Activity]) -> HashMap<Category, i64> {
    let mut totals = HashMap::new();
    for activity in activities {
        *totals.entry(activity.category).or_insert(0) += activity.minutes as i64;
    }
    totals
}

/// Share of `category_minutes` in `total`, as a percentage. Zero when
/// the total is zero.
pub fn percentage(category_minutes: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    category_minutes as f64 / total as f64 * 100.0
}

/// Full per-day summary: total, remaining budget, and the category
/// breakdown ordered descending by minutes, ties in category
/// declaration order.
pub fn summarize(date: NaiveDate, activities: &[Activity]) -> DaySummary {
    let total = total_minutes(activities);

    let mut categories: Vec<CategorySlice> = category_totals(activities)
        .into_iter()
        .map(|(category, minutes)| CategorySlice {
            category,
            minutes,
            percentage: round_tenth(percentage(minutes, total)),
        })
        .collect();
    categories.sort_by(|a, b| b.minutes.cmp(&a.minutes).then(a.category.cmp(&b.category)));

    DaySummary {
        date,
        total_minutes: total,
        remaining_minutes: DAILY_BUDGET_MINUTES - total,
        categories,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
