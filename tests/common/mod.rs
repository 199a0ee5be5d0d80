// Test utility module for wipcore integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use wipcore::{CostBreakdown, JobRecord, JobStatus, JobType, ScheduleField};

pub fn money(total: Decimal) -> CostBreakdown {
    CostBreakdown::new(total, Decimal::ZERO, Decimal::ZERO)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Active fixed-price job with a 100k contract against an 80k budget
/// and otherwise empty ledgers.
pub fn fixed_price_job(id: &str) -> JobRecord {
    JobRecord {
        id: id.to_string(),
        job_no: format!("26-{id}"),
        job_name: format!("Project {id}"),
        job_type: JobType::FixedPrice,
        status: JobStatus::Active,
        project_manager: Some("Jordan".to_string()),
        estimator: None,
        start_date: ScheduleField::Date(date(2026, 1, 5)),
        end_date: ScheduleField::Unscheduled,
        target_end_date: ScheduleField::Unscheduled,
        on_hold_date: None,
        contract: money(Decimal::from(100_000)),
        budget: money(Decimal::from(80_000)),
        invoiced: CostBreakdown::default(),
        costs: CostBreakdown::default(),
        cost_to_complete: CostBreakdown::default(),
        target_profit: None,
        target_margin: None,
        last_updated: Utc::now(),
    }
}

pub fn tm_job(id: &str) -> JobRecord {
    let mut job = fixed_price_job(id);
    job.job_type = JobType::TimeAndMaterial;
    job.contract = CostBreakdown::default();
    job.budget = CostBreakdown::default();
    job
}
