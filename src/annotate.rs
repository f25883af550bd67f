//! Solar term and festival labels.
//!
//! Solar terms come from a fixed month/day table that does not vary by year,
//! so a term that really falls a day earlier or later in some year is reported
//! on the tabled day.

use crate::convert::LunarDate;
use crate::names;
use chrono::Datelike;
use log::trace;
use serde::Serialize;

/// Lunar new year's eve, reported on the 30th of the twelfth month
pub const NEW_YEARS_EVE: &str = "除夕";

/// Gregorian `(month, day)` of each solar term, in the order of [`names::SOLAR_TERMS`]
#[rustfmt::skip]
static SOLAR_TERM_DAYS: [(u8, u8); 24] = [
    (1, 5),  (1, 20),  (2, 3),  (2, 18),  (3, 5),  (3, 20),
    (4, 4),  (4, 20),  (5, 5),  (5, 21),  (6, 5),  (6, 21),
    (7, 7),  (7, 22),  (8, 7),  (8, 23),  (9, 7),  (9, 23),
    (10, 8), (10, 23), (11, 7), (11, 22), (12, 7), (12, 21),
];

/// `(month, day, name)` of festivals fixed in the Gregorian calendar
static GREGORIAN_FESTIVALS: [(u8, u8, &str); 15] = [
    (1, 1, "元旦"),
    (2, 14, "情人节"),
    (3, 8, "妇女节"),
    (3, 12, "植树节"),
    (4, 1, "愚人节"),
    (5, 1, "劳动节"),
    (5, 4, "青年节"),
    (6, 1, "儿童节"),
    (7, 1, "建党节"),
    (8, 1, "建军节"),
    (9, 10, "教师节"),
    (10, 1, "国庆节"),
    (10, 31, "万圣节"),
    (12, 24, "平安夜"),
    (12, 25, "圣诞节"),
];

/// `(month, day, name)` of festivals fixed in the lunar calendar
static LUNAR_FESTIVALS: [(u8, u8, &str); 9] = [
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (5, 5, "端午节"),
    (7, 7, "七夕"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (12, 8, "腊八节"),
    (12, 23, "小年"),
];

/// Optional labels for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub solar_term: Option<&'static str>,
    pub festival:   Option<&'static str>,
}

fn lookup(table: &[(u8, u8, &'static str)], month: u8, day: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|&&(m, d, _)| m == month && d == day)
        .map(|&(_, _, name)| name)
}

/// Solar term falling on Gregorian `month`/`day`, if any.
///
/// # Examples
///
/// ```
/// use lunisolar::solar_term;
///
/// assert_eq!(Some("清明"), solar_term(4, 4));
/// assert_eq!(None, solar_term(4, 5));
/// ```
pub fn solar_term(month: u8, day: u8) -> Option<&'static str> {
    SOLAR_TERM_DAYS
        .iter()
        .position(|&term_day| term_day == (month, day))
        .map(|index| names::SOLAR_TERMS[index])
}

/// Festival of a day. Gregorian festivals win over lunar ones, and lunar new
/// year's eve is only considered when neither table matches.
pub fn festival(month: u8, day: u8, lunar: &LunarDate) -> Option<&'static str> {
    lookup(&GREGORIAN_FESTIVALS, month, day)
        .or_else(|| lookup(&LUNAR_FESTIVALS, lunar.month(), lunar.day()))
        .or_else(|| (lunar.month() == 12 && lunar.day() == 30).then_some(NEW_YEARS_EVE))
}

/// Labels for a Gregorian date and its already converted lunar date.
pub fn annotate<D: Datelike>(date: &D, lunar: &LunarDate) -> Annotation {
    // Month and day of a Datelike are always within u8
    let (month, day) = (date.month() as u8, date.day() as u8);
    trace!("annotate {month:02}{day:02} / {lunar}");
    Annotation {
        solar_term: solar_term(month, day),
        festival:   festival(month, day, lunar),
    }
}
