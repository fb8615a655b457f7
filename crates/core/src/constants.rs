/// Category assigned to transactions recorded without one.
/// Never shown in budget progress displays.
pub const DEFAULT_CATEGORY: &str = "Others";

/// Minimum trimmed length of a budget category, in characters
pub const MIN_CATEGORY_LENGTH: usize = 2;

/// Maximum trimmed length of a budget category, in characters
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Upper bound of a budget usage percentage
pub const MAX_USAGE_PERCENT: u32 = 100;
