//! One Gregorian month laid out for a calendar page.

use crate::types::{Month, Year};
use crate::{CalendarError, LunarInfo, SolarDate};
use chrono::Datelike;
use log::trace;
use serde::Serialize;

/// A day cell of a month page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date:     SolarDate,
    pub info:     LunarInfo,
    pub is_today: bool,
}

/// Every day of a Gregorian month with its lunar details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year:           Year,
    pub month:          Month,
    /// Empty cells before the 1st in a week starting on Sunday
    pub leading_blanks: u8,
    pub days:           Vec<CalendarDay>,
}

impl MonthView {
    /// Days grouped into weeks starting on Sunday, `None` for padding cells.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let padding = std::iter::repeat_n(None, usize::from(self.leading_blanks));
        let cells: Vec<Option<&CalendarDay>> = padding.chain(self.days.iter().map(Some)).collect();
        cells
            .chunks(7)
            .map(|week| {
                let mut week = week.to_vec();
                week.resize(7, None);
                week
            })
            .collect()
    }

    /// Cells carrying a festival or solar term, in date order
    pub fn highlighted(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days
            .iter()
            .filter(|day| day.info.festival.is_some() || day.info.solar_term.is_some())
    }
}

/// Builds the page for Gregorian `year`-`month`.
///
/// # Errors
/// Returns `CalendarError::OutOfRangeYear` if the year is unsupported or any
/// day of the month has no lunar table entry, and `CalendarError::Parse` for
/// an invalid month.
///
/// # Examples
///
/// ```
/// use lunisolar::month_view;
///
/// let view = month_view(2024, 2).unwrap();
/// assert_eq!(view.days.len(), 29);
/// assert_eq!(view.leading_blanks, 4); // 2024-02-01 is a Thursday
/// ```
pub fn month_view(year: i32, month: u8) -> Result<MonthView, CalendarError> {
    trace!("month_view {year}-{month:02}");
    let year = Year::new(year)?;
    let month = Month::new(month)?;

    let first = SolarDate::new(year.get(), month.get(), 1)?;
    // Weekday numbers are 0..=6
    let leading_blanks = first.weekday().num_days_from_sunday() as u8;

    let days = month
        .dates(year)
        .map(|date| {
            let date = SolarDate::from_naive(date)?;
            Ok(CalendarDay {
                date,
                info: date.lunar_info()?,
                is_today: date.is_today(),
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;

    Ok(MonthView {
        year,
        month,
        leading_blanks,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn test_february_2024() {
        let view = month_view(2024, 2).unwrap();
        assert_eq!(view.days.len(), 29);
        assert_eq!(view.leading_blanks, 4);

        let new_year = &view.days[9];
        assert_eq!(new_year.date.to_string(), "2024-02-10");
        assert_eq!(new_year.info.festival, Some("春节"));

        let eve = &view.days[8];
        assert_eq!(eve.info.festival, Some("除夕"));
    }

    #[test]
    fn test_weeks_layout() {
        let view = month_view(2024, 2).unwrap();
        let weeks = view.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks.iter().all(|week| week.len() == 7));
        assert!(weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(weeks[0][4].map(|day| day.date.day()), Some(1));
        assert_eq!(weeks[4][4].map(|day| day.date.day()), Some(29));
        assert!(weeks[4][5].is_none());
    }

    #[test]
    fn test_highlighted_days() {
        let view = month_view(2024, 2).unwrap();
        let labels: Vec<(u32, &str)> = view
            .highlighted()
            .map(|day| {
                (
                    day.date.day(),
                    day.info.festival.or(day.info.solar_term).unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                (2, "小年"),
                (3, "立春"),
                (9, "除夕"),
                (10, "春节"),
                (14, "情人节"),
                (18, "雨水"),
                (24, "元宵节"),
            ]
        );
    }

    #[test]
    fn test_only_one_today_at_most() {
        let view = month_view(2024, 2).unwrap();
        assert!(view.days.iter().filter(|day| day.is_today).count() <= 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            month_view(1900, 12),
            Err(CalendarError::OutOfRangeYear { year: 1900 })
        );
        assert_eq!(
            month_view(2024, 13),
            Err(CalendarError::Parse(ParseError::InvalidMonth(13)))
        );
        // February 2100 runs past the last lunar year in the table
        assert_eq!(
            month_view(2100, 2),
            Err(CalendarError::OutOfRangeYear { year: 2100 })
        );
        assert!(month_view(2100, 1).is_ok());
        assert_eq!(month_view(2023, 2).map(|view| view.days.len()), Ok(28));
    }
}
