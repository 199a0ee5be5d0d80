//! Portfolio Aggregator.
//!
//! Rolls per-job earned value up into the company-wide numbers the
//! dashboard headline shows, partitions jobs per project manager, and
//! provides the pure filter predicate views compose before aggregating.
//!
//! Every per-job figure entering the reduction has bounded scale
//! (earned revenue is quantized to minor units, margins to
//! [`crate::metrics::PERCENT_SCALE`]), so the `Decimal` sums never
//! round and the rayon reduction yields the same totals for any split
//! of the collection — the additivity every rollup view relies on.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{JobRecord, JobStatus, JobType};
use crate::earned::evaluate;
use crate::metrics::profit_margin_percent;

/// Grouping bucket for jobs with no project manager assigned. Grouping
/// never drops a job.
pub const UNASSIGNED_PM: &str = "Unassigned";

/// Company-wide rollup of a job collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_earned_revenue: Decimal,
    /// Contract value not yet earned, fixed-price jobs only. A job with
    /// an undefined percent complete contributes its full contract.
    pub backlog_to_earn: Decimal,
    /// Net over/under-billing across the collection.
    pub net_billing_position: Decimal,
    pub average_profit_margin: Decimal,
    pub job_count: usize,
    pub jobs_by_status: BTreeMap<JobStatus, usize>,
}

/// Running totals for the parallel reduction.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    earned: Decimal,
    backlog: Decimal,
    billing: Decimal,
    margin_sum: Decimal,
}

impl Totals {
    fn merge(self, other: Totals) -> Totals {
        Totals {
            earned: self.earned + other.earned,
            backlog: self.backlog + other.backlog,
            billing: self.billing + other.billing,
            margin_sum: self.margin_sum + other.margin_sum,
        }
    }

    fn from_job(job: &JobRecord) -> Totals {
        let ev = evaluate(job);
        let backlog = match job.job_type {
            JobType::FixedPrice => {
                (job.contract.total() - ev.earned_revenue).max(Decimal::ZERO)
            }
            // No fixed ceiling to back into.
            JobType::TimeAndMaterial => Decimal::ZERO,
        };
        Totals {
            earned: ev.earned_revenue,
            backlog,
            billing: ev.billing_difference,
            margin_sum: profit_margin_percent(job, &ev),
        }
    }
}

/// Rolls a job collection up into company-wide totals. The caller
/// pre-filters with [`JobFilter`] (or its own predicates) as needed.
pub fn summarize(jobs: &[JobRecord]) -> PortfolioSummary {
    let totals = jobs
        .par_iter()
        .map(Totals::from_job)
        .reduce(Totals::default, Totals::merge);

    let average_profit_margin = if jobs.is_empty() {
        Decimal::ZERO
    } else {
        totals.margin_sum / Decimal::from(jobs.len() as u64)
    };

    let mut jobs_by_status = BTreeMap::new();
    for job in jobs {
        *jobs_by_status.entry(job.status).or_insert(0) += 1;
    }

    PortfolioSummary {
        total_earned_revenue: totals.earned,
        backlog_to_earn: totals.backlog,
        net_billing_position: totals.billing,
        average_profit_margin,
        job_count: jobs.len(),
        jobs_by_status,
    }
}

/// Partitions jobs per project manager. Empty or missing assignments
/// land in the explicit [`UNASSIGNED_PM`] bucket.
pub fn group_by_pm(jobs: &[JobRecord]) -> BTreeMap<String, Vec<JobRecord>> {
    jobs.iter().fold(BTreeMap::new(), |mut groups, job| {
        let pm = job
            .project_manager
            .as_deref()
            .map(str::trim)
            .filter(|pm| !pm.is_empty())
            .unwrap_or(UNASSIGNED_PM)
            .to_string();
        groups.entry(pm).or_default().push(job.clone());
        groups
    })
}

/// Pure filter predicate a view composes before aggregating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Statuses to keep; `None` keeps everything.
    pub statuses: Option<Vec<JobStatus>>,
    /// Exact project-manager match, with [`UNASSIGNED_PM`] selecting
    /// unassigned jobs.
    pub project_manager: Option<String>,
    /// Case-insensitive substring over job number and name.
    pub search: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobRecord) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&job.status) {
                return false;
            }
        }
        if let Some(pm) = &self.project_manager {
            let assigned = job
                .project_manager
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(UNASSIGNED_PM);
            if assigned != pm {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = job.job_no.to_lowercase().contains(&needle)
                || job.job_name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, jobs: &[JobRecord]) -> Vec<JobRecord> {
        jobs.iter().filter(|j| self.matches(j)).cloned().collect()
    }
}
