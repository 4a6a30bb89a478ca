//! Order vocabulary and the figures derived when an order is written.
//!
//! An order header carries two kinds of derived data:
//!
//! - a **compatibility snapshot** of its line items (first item's fabric,
//!   dress and size plus summed quantity and fabric requirement), kept for
//!   consumers that still read single-item orders from the header;
//! - **financials**: header prices default to the item sums, and
//!   `total_cost` / `profit` are always recomputed from the parts.
//!
//! Both are pure functions over [`LineFigures`] so they can be tested
//! without a database. Every figure is rounded to the stored scale before it
//! is summed, so header totals and stock movements agree with the rows.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{max_amount, round_amount, Amount, DbId};
use crate::validation::{max_length, max_length_if_present, NAME_MAX_LEN, SIZE_CHART_MAX_LEN};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_CANCELLED: &str = "Cancelled";

const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Validate that `status` is one of the known order statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid order status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ord-";

/// Generate a new order id (`ord-` followed by a time-ordered UUID v7).
///
/// Ids are always minted server-side; whatever the client sends is ignored.
pub fn generate_order_id() -> String {
    format!("{ORDER_ID_PREFIX}{}", Uuid::now_v7().simple())
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// Upper bound on a single line's quantity.
pub const MAX_LINE_QUANTITY: i32 = 10_000;

/// Dress name used on a header with no items to snapshot.
pub const MULTI_ITEM_LABEL: &str = "Multi-Item Order";

/// Borrowed view of one order line, as far as header derivation cares.
#[derive(Debug, Clone, Copy)]
pub struct LineFigures<'a> {
    pub dress_name: &'a str,
    pub fabric_id: Option<DbId>,
    pub size_chart: Option<&'a str>,
    pub quantity: i32,
    pub fabric_required: Amount,
    pub fabric_cost: Amount,
    pub stitching_cost: Amount,
    pub selling_price: Amount,
}

/// Reject negative money or meter figures, and figures that do not fit a
/// `NUMERIC(10, 2)` column once rounded.
pub fn validate_amount(field: &str, value: Amount) -> Result<(), CoreError> {
    if value < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    check_magnitude(field, value)
}

fn check_magnitude(field: &str, value: Amount) -> Result<(), CoreError> {
    let max = max_amount();
    if round_amount(value).abs() > max {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {max} (got {value})"
        )));
    }
    Ok(())
}

/// Validate the line items of a new order.
///
/// The list must be non-empty. Every line needs a dress name and a size chart
/// that fit their columns, a quantity in `1..=MAX_LINE_QUANTITY`, and
/// non-negative figures within the amount range.
pub fn validate_lines(lines: &[LineFigures<'_>]) -> Result<(), CoreError> {
    if lines.is_empty() {
        return Err(CoreError::Validation(
            "An order needs at least one item".into(),
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        if line.dress_name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Item {index}: dressName must not be empty"
            )));
        }
        max_length(&format!("Item {index}: dressName"), line.dress_name, NAME_MAX_LEN)?;
        max_length_if_present(
            &format!("Item {index}: sizeChart"),
            line.size_chart,
            SIZE_CHART_MAX_LEN,
        )?;
        if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
            return Err(CoreError::Validation(format!(
                "Item {index}: quantity must be between 1 and {MAX_LINE_QUANTITY} (got {})",
                line.quantity
            )));
        }
        validate_amount(&format!("Item {index}: fabricRequired"), line.fabric_required)?;
        validate_amount(&format!("Item {index}: fabricCost"), line.fabric_cost)?;
        validate_amount(&format!("Item {index}: stitchingCost"), line.stitching_cost)?;
        validate_amount(&format!("Item {index}: sellingPrice"), line.selling_price)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Compatibility snapshot
// ---------------------------------------------------------------------------

/// Single-item view of a multi-item order, stored on the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilitySnapshot {
    pub fabric_id: Option<DbId>,
    pub dress_name: String,
    pub size_chart: Option<String>,
    pub quantity: i32,
    pub fabric_required: Amount,
}

impl CompatibilitySnapshot {
    /// The summed fabric requirement must still fit the header column.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_magnitude("fabricRequired", self.fabric_required)
    }
}

/// Derive the header snapshot: identity fields from the first line, sums of
/// quantity and (rounded) fabric requirement over all lines.
pub fn compatibility_snapshot(lines: &[LineFigures<'_>]) -> CompatibilitySnapshot {
    let quantity = lines
        .iter()
        .fold(0i32, |acc, line| acc.saturating_add(line.quantity));
    let fabric_required = sum_lines(lines, |line| line.fabric_required);

    match lines.first() {
        Some(first) => CompatibilitySnapshot {
            fabric_id: first.fabric_id,
            dress_name: first.dress_name.to_string(),
            size_chart: first.size_chart.map(str::to_string),
            quantity,
            fabric_required,
        },
        None => CompatibilitySnapshot {
            fabric_id: None,
            dress_name: MULTI_ITEM_LABEL.to_string(),
            size_chart: None,
            quantity,
            fabric_required,
        },
    }
}

// ---------------------------------------------------------------------------
// Financials
// ---------------------------------------------------------------------------

/// Header-level prices as supplied by the caller. `None` means "derive".
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialInputs {
    pub selling_price: Option<Amount>,
    pub stitching_cost: Option<Amount>,
    pub fabric_cost: Option<Amount>,
    pub courier_cost_from_me: Option<Amount>,
    pub courier_cost_to_me: Option<Amount>,
}

impl FinancialInputs {
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("sellingPrice", self.selling_price),
            ("stitchingCost", self.stitching_cost),
            ("fabricCost", self.fabric_cost),
            ("courierCostFromMe", self.courier_cost_from_me),
            ("courierCostToMe", self.courier_cost_to_me),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                validate_amount(field, value)?;
            }
        }
        Ok(())
    }
}

/// Fully resolved header figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFinancials {
    pub selling_price: Amount,
    pub stitching_cost: Amount,
    pub fabric_cost: Amount,
    pub courier_cost_from_me: Amount,
    pub courier_cost_to_me: Amount,
    pub total_cost: Amount,
    pub profit: Amount,
}

impl OrderFinancials {
    /// Compute `total_cost` and `profit` from the five inputs, each rounded
    /// to the stored scale first.
    pub fn from_parts(
        selling_price: Amount,
        stitching_cost: Amount,
        fabric_cost: Amount,
        courier_cost_from_me: Amount,
        courier_cost_to_me: Amount,
    ) -> Self {
        let selling_price = round_amount(selling_price);
        let stitching_cost = round_amount(stitching_cost);
        let fabric_cost = round_amount(fabric_cost);
        let courier_cost_from_me = round_amount(courier_cost_from_me);
        let courier_cost_to_me = round_amount(courier_cost_to_me);
        let total_cost = fabric_cost + stitching_cost + courier_cost_from_me + courier_cost_to_me;
        Self {
            selling_price,
            stitching_cost,
            fabric_cost,
            courier_cost_from_me,
            courier_cost_to_me,
            total_cost,
            profit: selling_price - total_cost,
        }
    }

    /// Resolve caller inputs against the line items. Omitted prices fall back
    /// to the item sums; omitted courier costs are zero.
    pub fn derive(inputs: &FinancialInputs, lines: &[LineFigures<'_>]) -> Self {
        Self::from_parts(
            inputs
                .selling_price
                .unwrap_or_else(|| sum_lines(lines, |line| line.selling_price)),
            inputs
                .stitching_cost
                .unwrap_or_else(|| sum_lines(lines, |line| line.stitching_cost)),
            inputs
                .fabric_cost
                .unwrap_or_else(|| sum_lines(lines, |line| line.fabric_cost)),
            inputs.courier_cost_from_me.unwrap_or(Decimal::ZERO),
            inputs.courier_cost_to_me.unwrap_or(Decimal::ZERO),
        )
    }

    /// Every figure, derived ones included, must fit its column.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("sellingPrice", self.selling_price),
            ("stitchingCost", self.stitching_cost),
            ("fabricCost", self.fabric_cost),
            ("courierCostFromMe", self.courier_cost_from_me),
            ("courierCostToMe", self.courier_cost_to_me),
            ("totalCost", self.total_cost),
            ("profit", self.profit),
        ];
        for (field, value) in fields {
            check_magnitude(field, value)?;
        }
        Ok(())
    }
}

/// Sum of one rounded figure over all lines.
fn sum_lines(lines: &[LineFigures<'_>], pick: impl Fn(&LineFigures<'_>) -> Amount) -> Amount {
    lines.iter().map(|line| round_amount(pick(line))).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn line(
        dress: &'static str,
        fabric_id: Option<DbId>,
        quantity: i32,
        meters: i64,
    ) -> LineFigures<'static> {
        LineFigures {
            dress_name: dress,
            fabric_id,
            size_chart: Some("M"),
            quantity,
            fabric_required: Decimal::from(meters),
            fabric_cost: Decimal::from(100),
            stitching_cost: Decimal::from(50),
            selling_price: Decimal::from(300),
        }
    }

    // -- status --

    #[test]
    fn known_statuses_are_valid() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!(validate_status("Shipped"), Err(CoreError::Validation(_)));
        assert_matches!(validate_status("pending"), Err(CoreError::Validation(_)));
    }

    // -- ids --

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = generate_order_id();
        let b = generate_order_id();
        assert!(a.starts_with(ORDER_ID_PREFIX));
        assert!(a.len() <= 50);
        assert_ne!(a, b);
    }

    // -- snapshot --

    #[test]
    fn snapshot_takes_identity_from_first_line_and_sums_the_rest() {
        let lines = [line("Kurta", Some(1), 2, 10), line("Blouse", Some(2), 3, 15)];
        let snapshot = compatibility_snapshot(&lines);

        assert_eq!(snapshot.fabric_id, Some(1));
        assert_eq!(snapshot.dress_name, "Kurta");
        assert_eq!(snapshot.size_chart.as_deref(), Some("M"));
        assert_eq!(snapshot.quantity, 5);
        assert_eq!(snapshot.fabric_required, Decimal::from(25));
    }

    #[test]
    fn snapshot_of_no_lines_is_empty() {
        let snapshot = compatibility_snapshot(&[]);
        assert_eq!(snapshot.fabric_id, None);
        assert_eq!(snapshot.dress_name, MULTI_ITEM_LABEL);
        assert_eq!(snapshot.quantity, 0);
        assert!(snapshot.fabric_required.is_zero());
    }

    // -- validation --

    #[test]
    fn empty_item_list_is_rejected() {
        assert_matches!(validate_lines(&[]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let lines = [line("Kurta", Some(1), 0, 10)];
        assert_matches!(validate_lines(&lines), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_fabric_requirement_is_rejected() {
        let lines = [line("Kurta", Some(1), 1, -3)];
        assert_matches!(
            validate_lines(&lines),
            Err(CoreError::Validation(msg)) if msg.contains("fabricRequired")
        );
    }

    #[test]
    fn blank_dress_name_is_rejected() {
        let lines = [line("  ", None, 1, 0)];
        assert_matches!(validate_lines(&lines), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_requirement_without_fabric_is_valid() {
        let lines = [line("Alteration", None, 1, 0)];
        assert!(validate_lines(&lines).is_ok());
    }

    // -- financials --

    #[test]
    fn financials_default_to_item_sums() {
        let lines = [line("Kurta", Some(1), 1, 10), line("Blouse", Some(1), 1, 5)];
        let fin = OrderFinancials::derive(&FinancialInputs::default(), &lines);

        assert_eq!(fin.selling_price, Decimal::from(600));
        assert_eq!(fin.fabric_cost, Decimal::from(200));
        assert_eq!(fin.stitching_cost, Decimal::from(100));
        assert_eq!(fin.total_cost, Decimal::from(300));
        assert_eq!(fin.profit, Decimal::from(300));
    }

    #[test]
    fn explicit_header_figures_win_over_sums() {
        let lines = [line("Kurta", Some(1), 1, 10)];
        let inputs = FinancialInputs {
            selling_price: Some(Decimal::from(1000)),
            courier_cost_from_me: Some(Decimal::from(40)),
            courier_cost_to_me: Some(Decimal::from(60)),
            ..FinancialInputs::default()
        };
        let fin = OrderFinancials::derive(&inputs, &lines);

        assert_eq!(fin.selling_price, Decimal::from(1000));
        assert_eq!(fin.total_cost, Decimal::from(250));
        assert_eq!(fin.profit, Decimal::from(750));
    }

    #[test]
    fn profit_can_be_negative() {
        let fin = OrderFinancials::from_parts(
            Decimal::from(100),
            Decimal::from(80),
            Decimal::from(50),
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(fin.profit, Decimal::from(-30));
    }

    #[test]
    fn negative_header_figure_is_rejected() {
        let inputs = FinancialInputs {
            courier_cost_to_me: Some(Decimal::from(-1)),
            ..FinancialInputs::default()
        };
        assert_matches!(inputs.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn oversized_text_is_rejected() {
        let mut long_size = line("Kurta", Some(1), 1, 2);
        long_size.size_chart = Some("Extra Large Custom");
        assert_matches!(
            validate_lines(&[long_size]),
            Err(CoreError::Validation(msg)) if msg.contains("sizeChart")
        );

        let long_name = "x".repeat(256);
        let mut long_dress = line("Kurta", Some(1), 1, 2);
        long_dress.dress_name = &long_name;
        assert_matches!(
            validate_lines(&[long_dress]),
            Err(CoreError::Validation(msg)) if msg.contains("dressName")
        );
    }

    #[test]
    fn amount_above_column_range_is_rejected() {
        assert!(validate_amount("sellingPrice", Decimal::new(9_999_999_999, 2)).is_ok());
        assert_matches!(
            validate_amount("sellingPrice", Decimal::from(1_000_000_000)),
            Err(CoreError::Validation(msg)) if msg.contains("sellingPrice")
        );
        // Rounds up past the limit.
        assert!(validate_amount("sellingPrice", Decimal::new(99_999_999_995, 3)).is_err());
    }

    #[test]
    fn sub_cent_figures_are_rounded_before_summing() {
        let mut a = line("Kurta", Some(1), 1, 0);
        a.fabric_required = Decimal::new(5, 3);
        a.selling_price = Decimal::new(100_005, 3);
        let mut b = a;
        b.fabric_required = Decimal::new(7, 0) / Decimal::new(3, 0);

        let snapshot = compatibility_snapshot(&[a, b]);
        assert_eq!(snapshot.fabric_required, Decimal::new(234, 2));

        let fin = OrderFinancials::derive(&FinancialInputs::default(), &[a, b]);
        assert_eq!(fin.selling_price, Decimal::new(20_002, 2));
    }

    #[test]
    fn derived_totals_must_fit_their_columns() {
        let max = Decimal::new(9_999_999_999, 2);
        let fin =
            OrderFinancials::from_parts(Decimal::ZERO, max, max, Decimal::ZERO, Decimal::ZERO);
        assert_matches!(
            fin.validate(),
            Err(CoreError::Validation(msg)) if msg.contains("totalCost")
        );

        let lines = [line("Kurta", Some(1), 1, 2), line("Blouse", Some(1), 1, 3)];
        let fin = OrderFinancials::derive(&FinancialInputs::default(), &lines);
        assert!(fin.validate().is_ok());
        assert!(compatibility_snapshot(&lines).validate().is_ok());
    }
}
