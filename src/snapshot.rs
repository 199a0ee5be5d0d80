//! Snapshot Differencer.
//!
//! Maintains the once-per-WIP-week point-in-time copy of the job set and
//! computes period-over-period deltas against it. The engine only
//! decides whether a replacement snapshot is due and builds it; the
//! caller owns persistence (and any races between concurrent callers on
//! the same tenant).
//!
//! A WIP week is the 7-day bucket ending on the tenant's configured
//! weekday; the week starts the following calendar day. Two instants are
//! in the same week exactly when they canonicalize to the same week-end
//! date.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{JobRecord, JobsSnapshot};
use crate::earned::evaluate;

/// Canonicalizes a date to the end of its WIP week: the next occurrence
/// of `week_end_day`, counting the date itself.
pub fn wip_week_end(date: NaiveDate, week_end_day: Weekday) -> NaiveDate {
    let days_ahead = (7 + week_end_day.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64)
        % 7;
    date + Duration::days(days_ahead)
}

pub fn same_wip_week(a: NaiveDate, b: NaiveDate, week_end_day: Weekday) -> bool {
    wip_week_end(a, week_end_day) == wip_week_end(b, week_end_day)
}

/// Outcome of observing the live job set against the retained snapshot.
/// `new_snapshot` is populated exactly when a write is due; the caller
/// persists it (replacing the old one — only one snapshot is retained).
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDecision {
    pub due_for_replacement: bool,
    pub new_snapshot: Option<JobsSnapshot>,
}

/// Decides whether a fresh snapshot is due. No snapshot yet, or a
/// snapshot from a strictly earlier WIP week, means yes; a snapshot
/// from the current week — or a later one, if the clock regressed — is
/// kept as-is. Idempotent for identical inputs.
pub fn observe(
    previous: Option<&JobsSnapshot>,
    now: DateTime<Utc>,
    jobs: &[JobRecord],
    week_end_day: Weekday,
) -> SnapshotDecision {
    let due = match previous {
        None => true,
        Some(snapshot) => {
            wip_week_end(snapshot.timestamp.date_naive(), week_end_day)
                < wip_week_end(now.date_naive(), week_end_day)
        }
    };

    SnapshotDecision {
        due_for_replacement: due,
        new_snapshot: due.then(|| JobsSnapshot::capture(now, jobs)),
    }
}

/// Week-over-week movement of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekOverWeekDelta {
    /// Earned revenue now minus earned revenue over the snapshot jobs.
    pub earned_revenue_growth: Decimal,
    /// Net billing position now minus at the snapshot.
    pub billing_trend: Decimal,
}

fn earned_and_billing<'a, I>(jobs: I) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    jobs.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(earned, billing), job| {
            let ev = evaluate(job);
            (earned + ev.earned_revenue, billing + ev.billing_difference)
        },
    )
}

/// Computes deltas between the live jobs and a frozen snapshot by
/// running the identical earned-value math over both lists.
pub fn week_over_week(current: &[JobRecord], snapshot: &JobsSnapshot) -> WeekOverWeekDelta {
    let (earned_now, billing_now) = earned_and_billing(current);
    let (earned_then, billing_then) = earned_and_billing(&snapshot.jobs);

    WeekOverWeekDelta {
        earned_revenue_growth: earned_now - earned_then,
        billing_trend: billing_now - billing_then,
    }
}
