//! Engine policy knobs.
//!
//! Thresholds that are product policy rather than accounting math live
//! here as named defaults, so a tenant can override them without the
//! formulas changing underneath.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Days a job's end date may slip past its target before the job is
/// flagged behind schedule. The product historically used both zero and
/// fourteen days in different views; the engine standardizes on fourteen
/// and leaves the knob per-tenant.
pub const DEFAULT_SCHEDULE_SLACK_DAYS: i64 = 14;

/// Weekday on which the tenant's WIP reporting week ends. The week
/// starts the following calendar day.
pub const DEFAULT_WEEK_END_DAY: Weekday = Weekday::Fri;

fn default_schedule_slack_days() -> i64 {
    DEFAULT_SCHEDULE_SLACK_DAYS
}

fn default_week_end_day() -> Weekday {
    DEFAULT_WEEK_END_DAY
}

/// Per-tenant engine configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Slack window for the behind-schedule flag, in days.
    #[serde(default = "default_schedule_slack_days")]
    pub schedule_slack_days: i64,

    /// Boundary weekday of the WIP reporting week.
    #[serde(default = "default_week_end_day")]
    pub week_end_day: Weekday,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schedule_slack_days: default_schedule_slack_days(),
            week_end_day: default_week_end_day(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.schedule_slack_days, DEFAULT_SCHEDULE_SLACK_DAYS);
        assert_eq!(config.week_end_day, Weekday::Fri);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.schedule_slack_days, 14);
    }
}
