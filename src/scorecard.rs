//! Scorecard Ranker.
//!
//! Classifies each project manager's rolled-up book of work into
//! good/warning/critical tiers. Margin and schedule metrics look only at
//! Active jobs; the billing metric looks at every job, because
//! underbilling risk outlives a job's phase while margin and schedule
//! risk only mean anything while work is running.
//!
//! Thresholds are product policy, kept as named constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::JobRecord;
use crate::earned::evaluate;
use crate::metrics::{is_behind_schedule, profit_margin_percent};
use crate::portfolio::group_by_pm;

/// Average margin at or above this is a good book of work.
pub const MARGIN_GOOD_THRESHOLD_PCT: Decimal = dec!(20);
/// Average margin at or above this (but under good) is a warning.
pub const MARGIN_WARNING_THRESHOLD_PCT: Decimal = dec!(10);
/// Total underbilling below this amount is a warning rather than
/// critical; exactly zero is good.
pub const UNDERBILLED_WARNING_LIMIT: Decimal = dec!(50000);
/// This many Active jobs behind schedule is critical; one is a warning.
pub const BEHIND_SCHEDULE_CRITICAL_COUNT: usize = 2;

/// Risk tier for one scorecard dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Warning,
    Critical,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Good => "good",
            Tier::Warning => "warning",
            Tier::Critical => "critical",
        }
    }
}

/// One project manager's scorecard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmScorecard {
    pub project_manager: String,
    pub total_jobs: usize,
    pub active_jobs: usize,
    /// Mean margin over Active jobs only; zero when none are active.
    pub avg_margin_percent: Decimal,
    pub margin_tier: Tier,
    /// Under-billed portion summed over ALL jobs; over-billed jobs
    /// contribute zero (they are a different risk category).
    pub total_underbilled: Decimal,
    pub billing_tier: Tier,
    /// Active jobs flagged behind schedule.
    pub jobs_behind_schedule: usize,
    pub schedule_tier: Tier,
}

pub fn margin_tier(avg_margin_percent: Decimal) -> Tier {
    if avg_margin_percent >= MARGIN_GOOD_THRESHOLD_PCT {
        Tier::Good
    } else if avg_margin_percent >= MARGIN_WARNING_THRESHOLD_PCT {
        Tier::Warning
    } else {
        Tier::Critical
    }
}

pub fn billing_tier(total_underbilled: Decimal) -> Tier {
    if total_underbilled.is_zero() {
        Tier::Good
    } else if total_underbilled < UNDERBILLED_WARNING_LIMIT {
        Tier::Warning
    } else {
        Tier::Critical
    }
}

pub fn schedule_tier(jobs_behind_schedule: usize) -> Tier {
    match jobs_behind_schedule {
        0 => Tier::Good,
        n if n >= BEHIND_SCHEDULE_CRITICAL_COUNT => Tier::Critical,
        _ => Tier::Warning,
    }
}

/// Builds and ranks the per-PM scorecard rows, most active book first.
/// The grouping is a sorted map, so rows with equal active-job counts
/// keep a deterministic name order under the stable sort.
pub fn rank(jobs: &[JobRecord], config: &EngineConfig) -> Vec<PmScorecard> {
    let mut rows: Vec<PmScorecard> = group_by_pm(jobs)
        .into_iter()
        .map(|(pm, group)| score_group(pm, &group, config))
        .collect();
    rows.sort_by(|a, b| b.active_jobs.cmp(&a.active_jobs));
    rows
}

fn score_group(project_manager: String, group: &[JobRecord], config: &EngineConfig) -> PmScorecard {
    let mut active_jobs = 0usize;
    let mut jobs_behind_schedule = 0usize;
    let mut active_margin_sum = Decimal::ZERO;
    let mut total_underbilled = Decimal::ZERO;

    for job in group {
        let ev = evaluate(job);
        total_underbilled += (-ev.billing_difference).max(Decimal::ZERO);

        if job.is_active() {
            active_jobs += 1;
            active_margin_sum += profit_margin_percent(job, &ev);
            if is_behind_schedule(job, config.schedule_slack_days) {
                jobs_behind_schedule += 1;
            }
        }
    }

    let avg_margin_percent = if active_jobs == 0 {
        Decimal::ZERO
    } else {
        active_margin_sum / Decimal::from(active_jobs as u64)
    };

    PmScorecard {
        project_manager,
        total_jobs: group.len(),
        active_jobs,
        avg_margin_percent,
        margin_tier: margin_tier(avg_margin_percent),
        total_underbilled,
        billing_tier: billing_tier(total_underbilled),
        jobs_behind_schedule,
        schedule_tier: schedule_tier(jobs_behind_schedule),
    }
}
