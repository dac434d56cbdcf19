use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A KPI counts as on track when value/target reaches this ratio.
pub const ON_TRACK_RATIO: Decimal = dec!(0.8);

/// Change percent beyond which a KPI trends up (or below the negation, down).
pub const TREND_THRESHOLD: Decimal = dec!(0.5);

/// Categories every new workspace starts with. Users extend the list by
/// creating KPIs under new category names.
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Revenue", "Marketing", "Sales", "Operations", "Customer"];
