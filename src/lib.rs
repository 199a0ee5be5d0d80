//! WIP (percentage-of-completion) job-costing calculation engine.
//!
//! Turns raw job ledger records into the derived metrics a contractor
//! dashboard displays: earned revenue, billing position, forecasted
//! profit, margin, PM scorecards, capacity utilization, and
//! week-over-week deltas. Pure computation — the engine performs no I/O
//! and holds no state of its own; every function is safe to call
//! concurrently and returns the same output for the same input.

pub mod capacity;
pub mod config;
pub mod core;
pub mod earned;
pub mod errors;
pub mod metrics;
pub mod portfolio;
pub mod scorecard;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    parse_capacity_plan, parse_jobs, CapacityPlan, CapacityRow, CostBreakdown,
    DerivedJobMetrics, JobRecord, JobStatus, JobType, JobsSnapshot, ScheduleField,
};

pub use crate::config::{EngineConfig, DEFAULT_SCHEDULE_SLACK_DAYS, DEFAULT_WEEK_END_DAY};

pub use crate::errors::{WipError, WipResult};

pub use crate::earned::{evaluate, EarnedValue, MINOR_UNIT_SCALE};

pub use crate::metrics::{project, PERCENT_SCALE};

pub use crate::portfolio::{
    group_by_pm, summarize, JobFilter, PortfolioSummary, UNASSIGNED_PM,
};

pub use crate::scorecard::{rank, PmScorecard, Tier};

pub use crate::capacity::{balance, CapacitySummary, RowBalance};

pub use crate::snapshot::{
    observe, same_wip_week, week_over_week, wip_week_end, SnapshotDecision, WeekOverWeekDelta,
};
