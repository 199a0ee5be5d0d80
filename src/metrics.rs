//! Job Metrics Projector.
//!
//! Composes earned-value output with a job's status and date fields into
//! the per-job display metrics every view renders. This is the only
//! per-job computation allowed to depend on "now" (for `days_open`);
//! the earned-value math itself stays time-independent so snapshot
//! deltas can re-run it over frozen job lists.

use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::config::EngineConfig;
use crate::core::{DerivedJobMetrics, JobRecord, JobType};
use crate::earned::{evaluate, EarnedValue};

const PERCENT: Decimal = dec!(100);

/// Decimal places kept on percentage quotients. Margins are summed in
/// the portfolio reduction, so they need bounded scale for the same
/// reason earned revenue does.
pub const PERCENT_SCALE: u32 = 4;

fn to_percent_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives display metrics for one job.
pub fn project(job: &JobRecord, today: NaiveDate, config: &EngineConfig) -> DerivedJobMetrics {
    let ev = evaluate(job);

    DerivedJobMetrics {
        earned_revenue: ev.earned_revenue,
        billing_difference: ev.billing_difference,
        forecasted_profit: ev.forecasted_profit,
        profit_margin_percent: profit_margin_percent(job, &ev),
        days_open: days_open(job, today),
        is_behind_schedule: is_behind_schedule(job, config.schedule_slack_days),
        is_at_risk_margin: is_at_risk_margin(job, &ev),
    }
}

/// Planned margin for fixed-price work, realized margin for T&M.
pub fn profit_margin_percent(job: &JobRecord, ev: &EarnedValue) -> Decimal {
    match job.job_type {
        JobType::FixedPrice => {
            let contract = job.contract.total();
            if contract <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                to_percent_scale((contract - job.budget.total()) / contract * PERCENT)
            }
        }
        JobType::TimeAndMaterial => {
            if ev.earned_revenue <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                to_percent_scale(ev.forecasted_profit / ev.earned_revenue * PERCENT)
            }
        }
    }
}

/// Whole days since the scheduled start, floored at zero. Only Active
/// jobs with a scheduled start have a meaningful value.
pub fn days_open(job: &JobRecord, today: NaiveDate) -> Option<i64> {
    if !job.is_active() {
        return None;
    }
    let start = job.start_date.date()?;
    Some((today - start).num_days().max(0))
}

/// End date slipped past target by more than the slack window. Both
/// dates must actually be scheduled.
pub fn is_behind_schedule(job: &JobRecord, slack_days: i64) -> bool {
    match (job.target_end_date.date(), job.end_date.date()) {
        (Some(target), Some(end)) => end > target + Duration::days(slack_days),
        _ => false,
    }
}

pub fn is_at_risk_margin(job: &JobRecord, ev: &EarnedValue) -> bool {
    job.target_profit
        .is_some_and(|target| ev.forecasted_profit < target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tests::sample_job;
    use crate::core::{CostBreakdown, JobStatus, ScheduleField};

    fn money(total: Decimal) -> CostBreakdown {
        CostBreakdown::new(total, Decimal::ZERO, Decimal::ZERO)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_price_margin_is_planned_margin() {
        let job = sample_job("m"); // contract 100k, budget 80k
        let ev = evaluate(&job);
        assert_eq!(profit_margin_percent(&job, &ev), dec!(20));
    }

    #[test]
    fn zero_contract_margin_is_zero() {
        let mut job = sample_job("zc");
        job.contract = money(Decimal::ZERO);
        let ev = evaluate(&job);
        assert_eq!(profit_margin_percent(&job, &ev), Decimal::ZERO);
    }

    #[test]
    fn margin_quotients_have_bounded_scale() {
        let mut job = sample_job("bm");
        job.contract = money(dec!(3));
        job.budget = money(dec!(2)); // (1/3) * 100 repeats forever
        let ev = evaluate(&job);
        let margin = profit_margin_percent(&job, &ev);
        assert!(margin.scale() <= PERCENT_SCALE);
        assert_eq!(margin, dec!(33.3333));
    }

    #[test]
    fn days_open_floors_future_starts_at_zero() {
        let mut job = sample_job("fd");
        job.start_date = ScheduleField::Date(date(2026, 6, 1));
        assert_eq!(days_open(&job, date(2026, 5, 1)), Some(0));
    }

    #[test]
    fn days_open_requires_active_status_and_scheduled_start() {
        let mut job = sample_job("da");
        assert_eq!(days_open(&job, date(2026, 1, 15)), Some(10));

        job.status = JobStatus::Completed;
        assert_eq!(days_open(&job, date(2026, 1, 15)), None);

        job.status = JobStatus::Active;
        job.start_date = ScheduleField::Unscheduled;
        assert_eq!(days_open(&job, date(2026, 1, 15)), None);
    }

    #[test]
    fn behind_schedule_respects_slack_window() {
        let mut job = sample_job("bs");
        job.target_end_date = ScheduleField::Date(date(2026, 3, 1));

        job.end_date = ScheduleField::Date(date(2026, 3, 14));
        assert!(!is_behind_schedule(&job, 14));

        job.end_date = ScheduleField::Date(date(2026, 3, 16));
        assert!(is_behind_schedule(&job, 14));
        assert!(is_behind_schedule(&job, 0));
    }

    #[test]
    fn unscheduled_dates_never_flag_slip() {
        let mut job = sample_job("un");
        job.target_end_date = ScheduleField::Unscheduled;
        job.end_date = ScheduleField::Date(date(2026, 12, 31));
        assert!(!is_behind_schedule(&job, 0));
    }

    #[test]
    fn at_risk_only_when_target_set_and_missed() {
        let mut job = sample_job("ar");
        job.costs = money(dec!(40000));
        job.cost_to_complete = money(dec!(50000));
        let ev = evaluate(&job); // forecast 10k

        assert!(!is_at_risk_margin(&job, &ev));
        job.target_profit = Some(dec!(15000));
        assert!(is_at_risk_margin(&job, &ev));
        job.target_profit = Some(dec!(5000));
        assert!(!is_at_risk_margin(&job, &ev));
    }
}
