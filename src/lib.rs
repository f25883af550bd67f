//! Conversion from Gregorian dates to the Chinese lunisolar calendar
//! (农历), with solar term and festival labels.
//!
//! Lunar years are read from a packed table covering lunar 1900 to 2099, so
//! Gregorian dates from 1900-01-31 to 2100-02-08 convert. [`lunar_info`]
//! accepts Gregorian years 1901 to 2100 and reports anything it cannot
//! convert as [`CalendarError::OutOfRangeYear`] instead of guessing.
//!
//! ```
//! use lunisolar::lunar_info;
//!
//! let info = lunar_info(2024, 2, 10).unwrap();
//!
//! assert_eq!("初一", info.lunar_day);
//! assert_eq!("甲辰年(龙)年正月初一", info.lunar_date);
//! assert_eq!(Some("春节"), info.festival);
//! assert!(!info.is_leap_month);
//! ```

mod annotate;
mod consts;
mod convert;
mod month_view;
pub mod names;
mod prelude;
mod table;
mod types;

pub use annotate::{Annotation, NEW_YEARS_EVE, annotate, festival, solar_term};
pub use consts::*;
pub use convert::{LunarDate, solar_to_lunar};
pub use month_view::{CalendarDay, MonthView, month_view};
pub use table::{LunarMonth, LunarYearRecord, decode_year, lunar_year_days};
pub use types::{Month, Year};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A Gregorian date inside the supported range (years 1901 to 2100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref)]
#[display(fmt = "{}", "_0")]
pub struct SolarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type for calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The Gregorian year, or the lunar year a date falls in, has no calendar data.
    #[error("Year {year} is outside the supported range")]
    OutOfRangeYear { year: i32 },

    /// Malformed Gregorian date components.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Lunar calendar details of one Gregorian day, as shown by a calendar page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarInfo {
    /// Day name, e.g. `初一`
    pub lunar_day:     &'static str,
    /// Full lunar date, e.g. `甲辰年(龙)年正月初一`
    pub lunar_date:    String,
    pub solar_term:    Option<&'static str>,
    pub festival:      Option<&'static str>,
    pub is_leap_month: bool,
}

impl SolarDate {
    /// Creates a date from Gregorian components.
    ///
    /// The year is checked first, so an unsupported year is reported as such
    /// even when the month or day is also wrong.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRangeYear` for years outside 1901..=2100 and
    /// `CalendarError::Parse` for an invalid month or day.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        NaiveDate::from_ymd_opt(year.get(), month.get().into(), day.into())
            .map(Self)
            .ok_or_else(|| {
                ParseError::InvalidDay {
                    year: year.get(),
                    month: month.get(),
                    day,
                }
                .into()
            })
    }

    /// Wraps a chrono date, checking the year against the supported range.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRangeYear` for years outside 1901..=2100.
    pub fn from_naive(date: NaiveDate) -> Result<Self, CalendarError> {
        Year::new(date.year())?;
        Ok(Self(date))
    }

    /// Today in the local timezone.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRangeYear` if the clock is outside 1901..=2100.
    pub fn today() -> Result<Self, CalendarError> {
        Self::from_naive(Local::now().date_naive())
    }

    /// The underlying chrono date
    #[inline]
    pub const fn to_naive(self) -> NaiveDate {
        self.0
    }

    /// The following day, `None` past the end of 2100
    pub fn next_day(self) -> Option<Self> {
        self.0.succ_opt().and_then(|next| Self::from_naive(next).ok())
    }

    /// Whether this is today's local date
    pub fn is_today(&self) -> bool {
        is_today(&self.0)
    }

    /// Lunar date of this day
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRangeYear` when the lunar year has no table entry.
    pub fn to_lunar(self) -> Result<LunarDate, CalendarError> {
        solar_to_lunar(self.0)
    }

    /// Lunar date, solar term and festival of this day.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRangeYear` when the lunar year has no table
    /// entry (dates from 2100-02-09 onward).
    pub fn lunar_info(self) -> Result<LunarInfo, CalendarError> {
        let lunar = self.to_lunar()?;
        let annotation = annotate(&self.0, &lunar);
        debug!("{} -> {} {:?}", self, lunar, annotation);
        Ok(LunarInfo {
            lunar_day:     lunar.day_name(),
            lunar_date:    lunar.to_string(),
            solar_term:    annotation.solar_term,
            festival:      annotation.festival,
            is_leap_month: lunar.is_leap_month(),
        })
    }
}

/// Lunar calendar details of a Gregorian date given as plain components.
///
/// # Errors
/// Returns `CalendarError::OutOfRangeYear` when `year` is outside 1901..=2100
/// or the date has no lunar table entry, and `CalendarError::Parse` for an
/// invalid month or day.
///
/// # Examples
///
/// ```
/// use lunisolar::{CalendarError, lunar_info};
///
/// assert_eq!(Some("元旦"), lunar_info(2025, 1, 1).unwrap().festival);
/// assert_eq!(
///     Err(CalendarError::OutOfRangeYear { year: 2101 }),
///     lunar_info(2101, 1, 1)
/// );
/// ```
pub fn lunar_info(year: i32, month: u8, day: u8) -> Result<LunarInfo, CalendarError> {
    trace!("lunar_info {year}-{month:02}-{day:02}");
    SolarDate::new(year, month, day)?.lunar_info()
}

/// Whether `date` has today's local year, month and day.
pub fn is_today<D: Datelike>(date: &D) -> bool {
    let today = Local::now().date_naive();
    date.year() == today.year() && date.month() == today.month() && date.day() == today.day()
}

impl FromStr for SolarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        // ISO format only: YYYY-MM-DD
        let date = trimmed
            .parse::<NaiveDate>()
            .map_err(|err| ParseError::InvalidFormat(format!("{trimmed}: {err}")))?;
        Self::from_naive(date)
    }
}

impl TryFrom<(i32, u8, u8)> for SolarDate {
    type Error = CalendarError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl TryFrom<NaiveDate> for SolarDate {
    type Error = CalendarError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive(value)
    }
}

impl From<SolarDate> for NaiveDate {
    fn from(date: SolarDate) -> Self {
        date.0
    }
}

impl Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lunar_new_year_2024() {
        let info = lunar_info(2024, 2, 10).unwrap();
        assert_eq!(info.lunar_day, "初一");
        assert_eq!(info.lunar_date, "甲辰年(龙)年正月初一");
        assert_eq!(info.festival, Some("春节"));
        assert_eq!(info.solar_term, None);
        assert!(!info.is_leap_month);
    }

    #[test]
    fn test_gregorian_festival_priority() {
        let info = lunar_info(2025, 1, 1).unwrap();
        assert_eq!(info.festival, Some("元旦"));
        assert_eq!(info.lunar_date, "甲辰年(龙)年腊月初二");

        // Valentine's day on lunar new year 1915
        let info = lunar_info(1915, 2, 14).unwrap();
        assert_eq!(info.lunar_day, "初一");
        assert_eq!(info.festival, Some("情人节"));
    }

    #[test]
    fn test_out_of_range_years() {
        struct TestCase {
            ymd:         (i32, u8, u8),
            year:        i32,
            description: &'static str,
        }

        let cases = [
            TestCase {
                ymd:         (1900, 1, 1),
                year:        1900,
                description: "Gregorian year before the range",
            },
            TestCase {
                ymd:         (2101, 1, 1),
                year:        2101,
                description: "Gregorian year after the range",
            },
            TestCase {
                ymd:         (1900, 13, 40),
                year:        1900,
                description: "year is checked before month and day",
            },
            TestCase {
                ymd:         (2100, 2, 9),
                year:        2100,
                description: "lunar year 2100 has no table entry",
            },
            TestCase {
                ymd:         (2100, 12, 31),
                year:        2100,
                description: "last Gregorian day falls in lunar 2100",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.ymd;
            assert_eq!(
                lunar_info(y, m, d),
                Err(CalendarError::OutOfRangeYear { year: case.year }),
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_range_edges() {
        let info = lunar_info(1901, 1, 1).unwrap();
        assert_eq!(info.lunar_date, "庚子年(鼠)年冬月十一");

        let info = lunar_info(2100, 2, 8).unwrap();
        assert_eq!(info.lunar_date, "己未年(羊)年腊月三十");
        assert_eq!(info.festival, Some(NEW_YEARS_EVE));
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            lunar_info(2024, 13, 1),
            Err(CalendarError::Parse(ParseError::InvalidMonth(13)))
        ));
        assert!(matches!(
            lunar_info(2023, 2, 29),
            Err(CalendarError::Parse(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            }))
        ));
        assert!(matches!(
            lunar_info(2100, 2, 29),
            Err(CalendarError::Parse(ParseError::InvalidDay { day: 29, .. }))
        ));
        assert!(matches!(
            lunar_info(2024, 2, 0),
            Err(CalendarError::Parse(ParseError::InvalidDay { day: 0, .. }))
        ));
        assert!(lunar_info(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_leap_month_info() {
        let info = lunar_info(2023, 3, 22).unwrap();
        assert!(info.is_leap_month);
        assert_eq!(info.lunar_date, "癸卯年(兔)年二月初一");

        let info = lunar_info(2023, 3, 21).unwrap();
        assert!(!info.is_leap_month);
        assert_eq!(info.lunar_day, "三十");
    }

    #[test]
    fn test_solar_term_and_festival_together() {
        let info = lunar_info(2024, 4, 4).unwrap();
        assert_eq!(info.solar_term, Some("清明"));
        assert_eq!(info.festival, None);

        // 2020-10-01 is also mid-autumn, but 国庆节 wins
        let info = lunar_info(2020, 10, 1).unwrap();
        assert_eq!(info.lunar_day, "十五");
        assert_eq!(info.festival, Some("国庆节"));
    }

    #[test]
    fn test_parse_iso_date() {
        let date = "2024-02-10".parse::<SolarDate>().unwrap();
        assert_eq!(date, SolarDate::new(2024, 2, 10).unwrap());
        assert_eq!(date.to_string(), "2024-02-10");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 10));

        let date = " 2024-02-09\n".parse::<SolarDate>().unwrap();
        assert_eq!(date.to_string(), "2024-02-09");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "".parse::<SolarDate>(),
            Err(CalendarError::Parse(ParseError::EmptyInput))
        );
        assert!(matches!(
            "2024-02".parse::<SolarDate>(),
            Err(CalendarError::Parse(ParseError::InvalidFormat(_)))
        ));
        assert!(matches!(
            "2024-aa-01".parse::<SolarDate>(),
            Err(CalendarError::Parse(ParseError::InvalidFormat(_)))
        ));
        assert!(matches!(
            "02/10/2024".parse::<SolarDate>(),
            Err(CalendarError::Parse(ParseError::InvalidFormat(_)))
        ));
        assert_eq!(
            "1899-12-31".parse::<SolarDate>(),
            Err(CalendarError::OutOfRangeYear { year: 1899 })
        );
        // Day validity is decided by chrono's parser
        assert!(matches!(
            "2024-02-30".parse::<SolarDate>(),
            Err(CalendarError::Parse(ParseError::InvalidFormat(_)))
        ));
        assert!("2024-02-29".parse::<SolarDate>().is_ok());
        assert!("2100-02-29".parse::<SolarDate>().is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CalendarError::OutOfRangeYear { year: 1900 }.to_string(),
            "Year 1900 is outside the supported range"
        );
        assert_eq!(
            CalendarError::from(ParseError::InvalidMonth(13)).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            ParseError::InvalidDay {
                year:  2023,
                month: 2,
                day:   29,
            }
            .to_string(),
            "Invalid day 29 for month 2023-02"
        );
    }

    #[test]
    fn test_from_naive_range() {
        let date = NaiveDate::from_ymd_opt(1900, 12, 31).unwrap();
        assert_eq!(
            SolarDate::from_naive(date),
            Err(CalendarError::OutOfRangeYear { year: 1900 })
        );

        let date = NaiveDate::from_ymd_opt(2050, 6, 15).unwrap();
        let solar = SolarDate::try_from(date).unwrap();
        assert_eq!(NaiveDate::from(solar), date);
        assert_eq!(solar.to_naive(), date);
    }

    #[test]
    fn test_next_day() {
        let date = SolarDate::new(2024, 2, 29).unwrap();
        assert_eq!(date.next_day(), Some(SolarDate::new(2024, 3, 1).unwrap()));

        let last = SolarDate::new(2100, 12, 31).unwrap();
        assert_eq!(last.next_day(), None);
    }

    #[test]
    fn test_is_today() {
        let today = Local::now().date_naive();
        assert!(is_today(&today));
        if let Some(tomorrow) = today.succ_opt() {
            assert!(!is_today(&tomorrow));
        }
        if let Ok(date) = SolarDate::today() {
            assert!(date.is_today());
        }
    }

    #[test]
    fn test_serde() {
        let date = SolarDate::new(2024, 2, 10).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2024-02-10""#);

        let parsed: SolarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        assert!(serde_json::from_str::<SolarDate>(r#""1900-01-01""#).is_err());
    }

    #[test]
    fn test_lunar_info_serde_shape() {
        let info = lunar_info(2024, 2, 10).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "lunarDay": "初一",
                "lunarDate": "甲辰年(龙)年正月初一",
                "solarTerm": null,
                "festival": "春节",
                "isLeapMonth": false,
            })
        );
    }

    #[test]
    fn test_ordering() {
        let a = SolarDate::new(2024, 2, 9).unwrap();
        let b = SolarDate::new(2024, 2, 10).unwrap();
        assert!(a < b);
        assert_eq!(SolarDate::try_from((2024, 2, 9)).unwrap(), a);
    }
}
