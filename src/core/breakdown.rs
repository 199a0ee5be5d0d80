//! Three-way cost/value split and its arithmetic.
//!
//! Every ledger figure in the engine (contract, budget, invoiced, costs,
//! cost to complete) is a labor/material/other split; the rest of the
//! engine only ever consumes the scalar total. All amounts are
//! `rust_decimal::Decimal` — no floating point in ledger math.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labor/material/other currency split.
///
/// Components are expected non-negative but are passed through
/// unmodified either way; input validation belongs to the layer that
/// owns the records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostBreakdown {
    pub labor: Decimal,
    pub material: Decimal,
    pub other: Decimal,
}

impl CostBreakdown {
    pub fn new(labor: Decimal, material: Decimal, other: Decimal) -> Self {
        Self {
            labor,
            material,
            other,
        }
    }

    /// Scalar value of the split.
    pub fn total(&self) -> Decimal {
        self.labor + self.material + self.other
    }

    /// Component-wise sum, used by rollups that keep the split intact.
    pub fn combine(&self, other: &CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            labor: self.labor + other.labor,
            material: self.material + other.material,
            other: self.other + other.other,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_sums_all_three_components() {
        let breakdown = CostBreakdown::new(dec!(100), dec!(250.50), dec!(49.50));
        assert_eq!(breakdown.total(), dec!(400));
    }

    #[test]
    fn negative_components_pass_through() {
        let breakdown = CostBreakdown::new(dec!(-50), dec!(30), dec!(0));
        assert_eq!(breakdown.total(), dec!(-20));
    }

    #[test]
    fn combine_is_component_wise() {
        let a = CostBreakdown::new(dec!(1), dec!(2), dec!(3));
        let b = CostBreakdown::new(dec!(10), dec!(20), dec!(30));
        let combined = a.combine(&b);
        assert_eq!(combined.labor, dec!(11));
        assert_eq!(combined.material, dec!(22));
        assert_eq!(combined.other, dec!(33));
        assert_eq!(combined.total(), a.total() + b.total());
    }

    #[test]
    fn missing_component_is_a_shape_error() {
        let result: Result<CostBreakdown, _> =
            serde_json::from_str(r#"{"labor": 10, "material": 5}"#);
        assert!(result.is_err());
    }
}
