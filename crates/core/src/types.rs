/// Numeric primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (order and delivery dates) carry no time component.
pub type Date = chrono::NaiveDate;

/// Money amounts and fabric lengths in meters. Backed by `NUMERIC(10, 2)`.
pub type Amount = rust_decimal::Decimal;

/// Schema-less JSON object used for activity details and user preferences.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Decimal places kept by the `NUMERIC(10, 2)` columns.
pub const AMOUNT_SCALE: u32 = 2;

/// Round to [`AMOUNT_SCALE`] the way PostgreSQL rounds `NUMERIC`
/// (half away from zero), so values computed here match what is stored.
pub fn round_amount(value: Amount) -> Amount {
    value.round_dp_with_strategy(
        AMOUNT_SCALE,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Largest magnitude a `NUMERIC(10, 2)` column holds: 99,999,999.99.
pub fn max_amount() -> Amount {
    rust_decimal::Decimal::new(9_999_999_999, AMOUNT_SCALE)
}
