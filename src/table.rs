//! Packed lunar year table and its decoder.
//!
//! Every lunar year from [`FIRST_LUNAR_YEAR`] to [`LAST_LUNAR_YEAR`] is a
//! single 17-bit value:
//!
//! | bits    | meaning                                                    |
//! |---------|------------------------------------------------------------|
//! | `0..4`  | leap month, `0` when the year has none                     |
//! | `4..16` | month lengths, bit 15 is month 1, bit 4 is month 12        |
//! | `16`    | leap month length                                          |
//!
//! A set month bit means a big month of 30 days, a clear bit a small month of
//! 29 days.

use crate::CalendarError;
use crate::consts::{BIG_MONTH_DAYS, FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR, LUNAR_MONTHS, SMALL_MONTH_DAYS};
use log::{trace, warn};
use serde::Serialize;

const LEAP_MONTH_MASK: u32 = 0xf;
const FIRST_MONTH_BIT: u32 = 15;
const BIG_LEAP_MONTH_BIT: u32 = 1 << 16;

#[rustfmt::skip]
static LUNAR_YEAR_TABLE: [u32; 200] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04bd7, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
];

/// Decoded layout of one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarYearRecord {
    /// Lunar year number, named after the Gregorian year its first month falls in
    pub year:              i32,
    /// Ordinal month doubled by the leap month, `0` when there is none
    pub leap_month:        u8,
    /// `true` for a 30-day month, indexed by ordinal month minus one
    pub month_lengths:     [bool; 12],
    /// `true` when the leap month has 30 days
    pub leap_month_is_big: bool,
}

/// One month of a lunar year as it occurs in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarMonth {
    /// Ordinal month, 1..=12
    pub month:   u8,
    /// Whether this is the inserted leap month following `month`
    pub is_leap: bool,
    /// 29 or 30
    pub days:    u32,
}

/// Decodes the table entry for lunar year `year`.
///
/// # Errors
/// Returns `CalendarError::OutOfRangeYear` when `year` is outside
/// `FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR`.
///
/// # Examples
///
/// ```
/// use lunisolar::decode_year;
///
/// let record = decode_year(2023).unwrap();
/// assert_eq!(record.leap_month, 2);
/// assert_eq!(record.total_days(), 384);
/// ```
pub fn decode_year(year: i32) -> Result<LunarYearRecord, CalendarError> {
    trace!("decode_year {year}");
    let packed = packed_entry(year)?;
    let mut month_lengths = [false; 12];
    for (i, big) in (0u32..).zip(month_lengths.iter_mut()) {
        *big = (packed >> (FIRST_MONTH_BIT - i)) & 1 == 1;
    }
    // The nibble never exceeds 12 for any stored entry
    let leap_month = (packed & LEAP_MONTH_MASK) as u8;
    Ok(LunarYearRecord {
        year,
        leap_month,
        month_lengths,
        leap_month_is_big: packed & BIG_LEAP_MONTH_BIT != 0,
    })
}

/// Total number of days in lunar year `year`, leap month included.
///
/// # Errors
/// Returns `CalendarError::OutOfRangeYear` when the table has no entry for `year`.
pub fn lunar_year_days(year: i32) -> Result<u32, CalendarError> {
    decode_year(year).map(|record| record.total_days())
}

fn packed_entry(year: i32) -> Result<u32, CalendarError> {
    if !(FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR).contains(&year) {
        warn!("lunar year {year} is outside the table ({FIRST_LUNAR_YEAR}-{LAST_LUNAR_YEAR})");
        return Err(CalendarError::OutOfRangeYear { year });
    }
    usize::try_from(year - FIRST_LUNAR_YEAR)
        .ok()
        .and_then(|index| LUNAR_YEAR_TABLE.get(index))
        .copied()
        .ok_or(CalendarError::OutOfRangeYear { year })
}

const fn length_of(big: bool) -> u32 {
    if big { BIG_MONTH_DAYS } else { SMALL_MONTH_DAYS }
}

impl LunarYearRecord {
    /// Whether the year has an inserted leap month
    #[inline]
    pub const fn has_leap_month(&self) -> bool {
        self.leap_month != 0
    }

    /// Days in ordinal month `month` (1..=12), `None` for any other value
    pub fn month_days(&self, month: u8) -> Option<u32> {
        let index = usize::from(month).checked_sub(1)?;
        self.month_lengths.get(index).map(|&big| length_of(big))
    }

    /// Days in the leap month, `None` when the year has none
    pub const fn leap_month_days(&self) -> Option<u32> {
        if self.has_leap_month() {
            Some(length_of(self.leap_month_is_big))
        } else {
            None
        }
    }

    /// Total days of the year: the 12 ordinal months plus the leap month if any
    pub fn total_days(&self) -> u32 {
        let ordinary: u32 = self.month_lengths.iter().map(|&big| length_of(big)).sum();
        ordinary + self.leap_month_days().unwrap_or(0)
    }

    /// Number of months in the year, 12 or 13
    pub const fn month_count(&self) -> usize {
        if self.has_leap_month() { 13 } else { 12 }
    }

    /// Months of the year in calendar order, with the leap month placed
    /// directly after the ordinal month it doubles.
    pub fn months(&self) -> impl Iterator<Item = LunarMonth> + '_ {
        (1..=LUNAR_MONTHS).flat_map(move |month| {
            let ordinary = LunarMonth {
                month,
                is_leap: false,
                days: length_of(self.month_lengths[usize::from(month - 1)]),
            };
            let leap = (month == self.leap_month).then(|| LunarMonth {
                month,
                is_leap: true,
                days: length_of(self.leap_month_is_big),
            });
            std::iter::once(ordinary).chain(leap)
        })
    }
}
