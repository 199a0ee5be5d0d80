pub mod breakdown;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use breakdown::CostBreakdown;

use crate::errors::{WipError, WipResult};

/// Billing model of a job. The Earned Value Calculator is the single
/// dispatch point on this variant; downstream components consume its
/// output rather than re-branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    FixedPrice,
    TimeAndMaterial,
}

/// Lifecycle status of a job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum JobStatus {
    Draft,
    Future,
    Active,
    OnHold,
    Completed,
    Archived,
}

/// A date field that may be deliberately unscheduled.
///
/// Serialized as an ISO date string or the sentinel `"unscheduled"`,
/// matching the row shape the persistence layer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScheduleField {
    Date(NaiveDate),
    Unscheduled,
}

impl ScheduleField {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ScheduleField::Date(d) => Some(*d),
            ScheduleField::Unscheduled => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleField::Date(_))
    }
}

impl TryFrom<String> for ScheduleField {
    type Error = WipError;

    fn try_from(value: String) -> WipResult<Self> {
        if value == "unscheduled" {
            return Ok(ScheduleField::Unscheduled);
        }
        value
            .parse::<NaiveDate>()
            .map(ScheduleField::Date)
            .map_err(|_| WipError::ScheduleFormat(value))
    }
}

impl From<ScheduleField> for String {
    fn from(value: ScheduleField) -> Self {
        match value {
            ScheduleField::Date(d) => d.format("%Y-%m-%d").to_string(),
            ScheduleField::Unscheduled => "unscheduled".to_string(),
        }
    }
}

/// One job's ledger row. The engine only ever reads these; creation,
/// mutation, and deletion belong to the job-entry workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub job_no: String,
    pub job_name: String,
    pub job_type: JobType,
    pub status: JobStatus,
    #[serde(default)]
    pub project_manager: Option<String>,
    #[serde(default)]
    pub estimator: Option<String>,
    pub start_date: ScheduleField,
    pub end_date: ScheduleField,
    pub target_end_date: ScheduleField,
    #[serde(default)]
    pub on_hold_date: Option<NaiveDate>,
    pub contract: CostBreakdown,
    pub budget: CostBreakdown,
    pub invoiced: CostBreakdown,
    pub costs: CostBreakdown,
    pub cost_to_complete: CostBreakdown,
    #[serde(default)]
    pub target_profit: Option<Decimal>,
    #[serde(default)]
    pub target_margin: Option<Decimal>,
    pub last_updated: DateTime<Utc>,
}

impl JobRecord {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }

    /// Checks the on-hold invariant: `on_hold_date` is present iff the
    /// job is on hold. Set on the transition in, cleared on the
    /// transition out; a mismatch means the upstream workflow corrupted
    /// the record.
    pub fn validate(&self) -> WipResult<()> {
        let on_hold = self.status == JobStatus::OnHold;
        if on_hold != self.on_hold_date.is_some() {
            return Err(WipError::OnHoldInvariant {
                job_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// One staffing discipline's row in a capacity plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRow {
    pub discipline: String,
    pub label: String,
    pub headcount: Decimal,
    pub hours_per_person: Decimal,
    pub committed_hours: Decimal,
}

impl CapacityRow {
    /// Available hours are derived, never stored.
    pub fn available_hours(&self) -> Decimal {
        self.headcount * self.hours_per_person
    }
}

/// A tenant's staffing capacity plan. A plan with zero rows has zero
/// available and committed capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityPlan {
    pub planning_horizon_weeks: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rows: Vec<CapacityRow>,
}

impl CapacityPlan {
    pub fn validate(&self) -> WipResult<()> {
        if self.planning_horizon_weeks == 0 {
            return Err(WipError::invalid_field(
                "planningHorizonWeeks",
                "must be positive",
            ));
        }
        for row in &self.rows {
            for (field, value) in [
                ("headcount", row.headcount),
                ("hoursPerPerson", row.hours_per_person),
                ("committedHours", row.committed_hours),
            ] {
                if value < Decimal::ZERO {
                    return Err(WipError::InvalidField {
                        field: format!("{} ({})", field, row.discipline),
                        reason: "cannot be negative".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Immutable point-in-time copy of the job set, taken at most once per
/// WIP week and used only for period-over-period deltas.
///
/// Jobs are held in an `im::Vector` so capturing a snapshot of a large
/// portfolio is structural sharing, not a deep copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub jobs: im::Vector<JobRecord>,
}

impl JobsSnapshot {
    pub fn capture(timestamp: DateTime<Utc>, jobs: &[JobRecord]) -> Self {
        Self {
            timestamp,
            jobs: jobs.iter().cloned().collect(),
        }
    }
}

/// Per-job display metrics. Always recomputable from a `JobRecord` plus
/// "now"; never a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedJobMetrics {
    pub earned_revenue: Decimal,
    pub billing_difference: Decimal,
    pub forecasted_profit: Decimal,
    pub profit_margin_percent: Decimal,
    pub days_open: Option<i64>,
    pub is_behind_schedule: bool,
    pub is_at_risk_margin: bool,
}

/// Parses a JSON array of job rows, failing loudly on shape violations
/// so the caller can flag corrupt records instead of rendering
/// misleading figures.
pub fn parse_jobs(raw: &str) -> WipResult<Vec<JobRecord>> {
    let jobs: Vec<JobRecord> =
        serde_json::from_str(raw).map_err(|e| WipError::Shape(e.to_string()))?;
    for job in &jobs {
        job.validate()?;
    }
    Ok(jobs)
}

/// Parses and validates a capacity plan row set.
pub fn parse_capacity_plan(raw: &str) -> WipResult<CapacityPlan> {
    let plan: CapacityPlan =
        serde_json::from_str(raw).map_err(|e| WipError::Shape(e.to_string()))?;
    plan.validate()?;
    Ok(plan)
}
