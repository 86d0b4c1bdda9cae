/// Default listing page size when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Default listing offset.
pub const DEFAULT_PAGE_OFFSET: i64 = 0;

/// Decimal precision for displayed monetary amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
