//! Fabric stock rules used by the inventory ledger.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::order::validate_amount;
use crate::types::{round_amount, Amount, DbId};

/// Fabrics with fewer meters than this show up in the low-stock alert list.
pub const LOW_STOCK_THRESHOLD_METERS: i64 = 10;

/// How an order deduction treats a fabric that does not have enough meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
    /// Deduct unconditionally; stock may go negative.
    #[default]
    Permissive,
    /// Refuse the deduction (and the whole order) when stock would go negative.
    Strict,
}

impl StockPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(CoreError::Validation(format!(
                "Unknown stock policy '{other}'. Must be one of: permissive, strict"
            ))),
        }
    }
}

/// The stock movement an order line causes, if any.
///
/// The requirement is rounded to the stored scale, so the movement equals
/// what the order item records. Lines without a fabric, or whose rounded
/// requirement is not positive, leave stock untouched.
pub fn planned_deduction(
    fabric_id: Option<DbId>,
    fabric_required: Amount,
) -> Option<(DbId, Amount)> {
    let meters = round_amount(fabric_required);
    match fabric_id {
        Some(id) if meters > Decimal::ZERO => Some((id, meters)),
        _ => None,
    }
}

/// Validate an absolute stock correction.
pub fn validate_stock_level(meters: Amount) -> Result<(), CoreError> {
    validate_amount("metersAvailable", meters)
}
