//! Gregorian to lunar date conversion.
//!
//! The converter counts whole days from the epoch (the first day of lunar
//! 1900) and walks the packed table forward, first year by year, then month by
//! month within the year the remainder falls in.

use crate::CalendarError;
use crate::consts::{EPOCH_DAY, EPOCH_MONTH, EPOCH_YEAR, FIRST_LUNAR_YEAR};
use crate::names;
use crate::table::{LunarMonth, LunarYearRecord, decode_year};
use chrono::NaiveDate;
use log::{debug, trace, warn};
use serde::Serialize;
use std::fmt;

/// First day of lunar [`FIRST_LUNAR_YEAR`]
const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(EPOCH_YEAR, EPOCH_MONTH, EPOCH_DAY) {
    Some(date) => date,
    None => panic!("epoch is not a valid date"),
};

/// A date in the Chinese lunisolar calendar.
///
/// Ordering is chronological: year, then month, then the leap flag (a leap
/// month follows the ordinal month it doubles), then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    year:          i32,
    month:         u8,
    is_leap_month: bool,
    day:           u8,
}

impl LunarDate {
    /// Lunar year number
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Ordinal month, 1..=12, shared by a leap month and the month it follows
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month, 1..=30
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }

    /// Sexagenary year label with zodiac animal, e.g. `甲辰年(龙)`
    pub fn year_label(&self) -> String {
        names::year_label(self.year)
    }

    pub fn stem(&self) -> &'static str {
        names::stem(self.year)
    }

    pub fn branch(&self) -> &'static str {
        names::branch(self.year)
    }

    pub fn zodiac(&self) -> &'static str {
        names::zodiac(self.year)
    }

    /// Month name such as `正月` or `腊月`. A leap month carries the same name
    /// as its ordinal month.
    pub fn month_name(&self) -> &'static str {
        names::MONTH_NAMES[usize::from(self.month - 1)]
    }

    /// Day name such as `初一` or `廿九`
    pub fn day_name(&self) -> &'static str {
        names::DAY_NAMES[usize::from(self.day - 1)]
    }
}

/// Renders `<year label>年<month name><day name>`, e.g. `甲辰年(龙)年正月初一`.
impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}{}", self.year_label(), self.month_name(), self.day_name())
    }
}

/// Converts a Gregorian date to its lunar date.
///
/// # Errors
/// Returns `CalendarError::OutOfRangeYear` when the date falls in a lunar year
/// the table does not cover: before 1900-01-31 or on/after 2100-02-09.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use lunisolar::solar_to_lunar;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// let lunar = solar_to_lunar(date).unwrap();
///
/// assert_eq!((2024, 1, 1), (lunar.year(), lunar.month(), lunar.day()));
/// assert_eq!("甲辰年(龙)年正月初一", lunar.to_string());
/// ```
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, CalendarError> {
    trace!("solar_to_lunar {date}");
    let mut offset = date.signed_duration_since(EPOCH).num_days();
    if offset < 0 {
        warn!("{date} is before the lunar year table starts at {EPOCH}");
        return Err(CalendarError::OutOfRangeYear {
            year: FIRST_LUNAR_YEAR - 1,
        });
    }

    let mut year = FIRST_LUNAR_YEAR;
    let record = loop {
        let record = decode_year(year)?;
        let days = i64::from(record.total_days());
        if offset < days {
            break record;
        }
        offset -= days;
        year += 1;
    };
    debug!("{date} is day {offset} of lunar year {year}");

    let (month, day) = locate(&record, offset).ok_or(CalendarError::OutOfRangeYear { year: year + 1 })?;
    Ok(LunarDate {
        year,
        month: month.month,
        is_leap_month: month.is_leap,
        day,
    })
}

/// Finds the month containing zero-based day `offset` of the year and the
/// one-based day within it.
fn locate(record: &LunarYearRecord, mut offset: i64) -> Option<(LunarMonth, u8)> {
    for month in record.months() {
        let days = i64::from(month.days);
        if offset < days {
            return u8::try_from(offset + 1).ok().map(|day| (month, day));
        }
        offset -= days;
    }
    None
}
