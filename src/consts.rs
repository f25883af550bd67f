/// Earliest Gregorian year accepted by [`crate::lunar_info`] (inclusive)
pub const MIN_YEAR: i32 = 1901;

/// Latest Gregorian year accepted by [`crate::lunar_info`] (inclusive)
pub const MAX_YEAR: i32 = 2100;

/// First lunar year covered by the packed lunar year table
pub const FIRST_LUNAR_YEAR: i32 = 1900;

/// Last lunar year covered by the packed lunar year table (inclusive)
pub const LAST_LUNAR_YEAR: i32 = 2099;

/// Gregorian date of the first day of lunar year [`FIRST_LUNAR_YEAR`].
/// Day offsets of the conversion walk are counted from here.
pub const EPOCH_YEAR: i32 = 1900;
/// Month of the epoch
pub const EPOCH_MONTH: u32 = 1;
/// Day of the epoch
pub const EPOCH_DAY: u32 = 31;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Days in a big (大) lunar month
pub const BIG_MONTH_DAYS: u32 = 30;
/// Days in a small (小) lunar month
pub const SMALL_MONTH_DAYS: u32 = 29;

/// Number of ordinal months in a lunar year, not counting a leap month
pub const LUNAR_MONTHS: u8 = 12;
