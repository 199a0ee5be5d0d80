//! Capacity Balancer.
//!
//! Computes available, committed, balance, and utilization per staffing
//! discipline and for the plan as a whole. Independent of job data.
//!
//! Plan-level utilization is recomputed from the summed totals, not
//! averaged across rows — utilization is not linear-additive.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{CapacityPlan, CapacityRow};

const PERCENT: Decimal = dec!(100);

/// Derived metrics for one capacity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowBalance {
    pub discipline: String,
    pub label: String,
    pub available_hours: Decimal,
    pub committed_hours: Decimal,
    /// Available minus committed; negative means over-committed.
    pub balance_hours: Decimal,
    pub utilization_percent: Decimal,
}

/// Plan-wide capacity rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySummary {
    pub planning_horizon_weeks: u32,
    pub total_available_hours: Decimal,
    pub total_committed_hours: Decimal,
    pub total_balance_hours: Decimal,
    pub utilization_percent: Decimal,
    pub rows: Vec<RowBalance>,
}

fn utilization_percent(committed: Decimal, available: Decimal) -> Decimal {
    if available <= Decimal::ZERO {
        // Defined fallback, not a division error.
        log::debug!("utilization against zero available hours defined as 0");
        Decimal::ZERO
    } else {
        committed / available * PERCENT
    }
}

fn balance_row(row: &CapacityRow) -> RowBalance {
    let available = row.available_hours();
    RowBalance {
        discipline: row.discipline.clone(),
        label: row.label.clone(),
        available_hours: available,
        committed_hours: row.committed_hours,
        balance_hours: available - row.committed_hours,
        utilization_percent: utilization_percent(row.committed_hours, available),
    }
}

/// Balances a capacity plan. Callers whose tenant has capacity metrics
/// disabled simply do not call this.
pub fn balance(plan: &CapacityPlan) -> CapacitySummary {
    let rows: Vec<RowBalance> = plan.rows.iter().map(balance_row).collect();

    let total_available: Decimal = rows.iter().map(|r| r.available_hours).sum();
    let total_committed: Decimal = rows.iter().map(|r| r.committed_hours).sum();

    CapacitySummary {
        planning_horizon_weeks: plan.planning_horizon_weeks,
        total_available_hours: total_available,
        total_committed_hours: total_committed,
        total_balance_hours: total_available - total_committed,
        utilization_percent: utilization_percent(total_committed, total_available),
        rows,
    }
}
