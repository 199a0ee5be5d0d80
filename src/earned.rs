//! Earned Value Calculator.
//!
//! Converts a single job's ledger into earned revenue, billing position,
//! and forecasted profit. This is the one place the engine branches on
//! `JobType`:
//!
//! - **Fixed price** earns by the cost-to-cost method: percent complete
//!   is costs over budget, applied to contract value. The result is
//!   deliberately not clamped to the contract — earning past the
//!   contract is the margin-erosion signal, not a bug.
//! - **Time and material** earns cost incurred to date (cost-plus).
//!   There is no contract ceiling to take a percentage of.
//!
//! No field here depends on "now", so the same math runs unchanged over
//! a frozen snapshot's job list.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{JobRecord, JobType};

/// Decimal places of a currency minor unit (cents). The cost-to-cost
/// quotient is quantized to this scale, so every per-job figure has
/// bounded scale and rollup sums stay exact no matter how a collection
/// is split.
pub const MINOR_UNIT_SCALE: u32 = 2;

fn to_minor_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Earned-value output for one job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedValue {
    /// Contract value earned by work performed, independent of invoicing.
    pub earned_revenue: Decimal,
    /// Invoiced minus earned. Positive is over-billed (cash ahead of
    /// work), negative is under-billed (work ahead of cash).
    pub billing_difference: Decimal,
    pub forecasted_profit: Decimal,
}

/// Computes earned value for one job. Pure and idempotent.
pub fn evaluate(job: &JobRecord) -> EarnedValue {
    let contract = job.contract.total();
    let costs = job.costs.total();
    let invoiced = job.invoiced.total();

    let (earned_revenue, forecasted_profit) = match job.job_type {
        JobType::FixedPrice => {
            let budget = job.budget.total();
            let earned = if budget <= Decimal::ZERO {
                // Undefined percent complete: treat as 0% earned so the
                // full contract stays in backlog, rather than erroring.
                log::debug!(
                    "job {} has non-positive budget {budget}; earned revenue defined as 0",
                    job.id
                );
                Decimal::ZERO
            } else {
                to_minor_units(contract * (costs / budget))
            };
            let forecast = contract - (costs + job.cost_to_complete.total());
            (earned, forecast)
        }
        JobType::TimeAndMaterial => {
            let earned = costs;
            (earned, earned - costs)
        }
    };

    EarnedValue {
        earned_revenue,
        billing_difference: invoiced - earned_revenue,
        forecasted_profit,
    }
}
