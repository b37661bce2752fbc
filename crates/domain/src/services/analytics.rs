//! Aggregate views over the submission list.
//!
//! All functions are pure: callers fetch the list once and derive every
//! figure from it.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::models::{
    Category, CountBucket, Department, FeedbackAnalytics, FeedbackStats, FeedbackStatus,
    FeedbackSubmission, FeedbackType, Priority, RecentSubmission,
};

/// Rows shown in the dashboard's "recent submissions" table.
pub const RECENT_LIMIT: usize = 10;

/// Window counted by [`FeedbackStats::this_week`].
const WEEK_DAYS: i64 = 7;

/// Computes the headline figures. `now` anchors the weekly window.
pub fn summarize(items: &[FeedbackSubmission], now: DateTime<Utc>) -> FeedbackStats {
    let week_start = now - Duration::days(WEEK_DAYS);
    let departments: HashSet<Department> = items.iter().map(|s| s.department).collect();

    FeedbackStats {
        total: items.len() as i64,
        pending: count(items, |s| s.status == FeedbackStatus::Pending),
        high_priority: count(items, |s| s.priority.is_high()),
        this_week: count(items, |s| s.submission_date >= week_start),
        departments: departments.len() as i64,
    }
}

/// The first [`RECENT_LIMIT`] entries of an already ordered list.
pub fn recent(items: &[FeedbackSubmission]) -> Vec<RecentSubmission> {
    items
        .iter()
        .take(RECENT_LIMIT)
        .map(RecentSubmission::from)
        .collect()
}

/// Counts submissions per value of every categorical field.
pub fn analyze(items: &[FeedbackSubmission]) -> FeedbackAnalytics {
    FeedbackAnalytics {
        total: items.len() as i64,
        by_category: buckets(&Category::ALL, items, |s| s.category, Category::as_str),
        by_priority: buckets(&Priority::ALL, items, |s| s.priority, Priority::as_str),
        by_type: buckets(
            &FeedbackType::ALL,
            items,
            |s| s.feedback_type,
            FeedbackType::as_str,
        ),
        by_department: buckets(
            &Department::ALL,
            items,
            |s| s.department,
            Department::as_str,
        ),
        by_status: buckets(
            &FeedbackStatus::ALL,
            items,
            |s| s.status,
            FeedbackStatus::as_str,
        ),
    }
}

fn count(items: &[FeedbackSubmission], pred: impl Fn(&FeedbackSubmission) -> bool) -> i64 {
    items.iter().filter(|s| pred(s)).count() as i64
}

/// Non-empty buckets, most frequent first. Equal counts keep declaration order.
fn buckets<T: Copy + PartialEq>(
    values: &[T],
    items: &[FeedbackSubmission],
    key: impl Fn(&FeedbackSubmission) -> T,
    label: fn(&T) -> &'static str,
) -> Vec<CountBucket> {
    let mut out: Vec<CountBucket> = values
        .iter()
        .map(|value| CountBucket {
            label: label(value),
            count: count(items, |s| key(s) == *value),
        })
        .filter(|b| b.count > 0)
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}
