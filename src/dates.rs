//! Calendar arithmetic and bilingual date rendering.
//!
//! Only two locales exist in this application, so the month and weekday
//! vocabularies live in small in-crate tables instead of pulling in a locale
//! database. The two output shapes mirror the original editor: a long form
//! used in the document title and a `MM/DD (weekday)` short form used in the
//! per-day headers.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::Language;

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const ZH_WEEKDAYS: [&str; 7] = ["週日", "週一", "週二", "週三", "週四", "週五", "週六"];

/// The next Sunday on or after `from`. Used as the schedule fallback when no
/// start date has been saved yet.
pub fn next_upcoming_sunday(from: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - from.weekday().num_days_from_sunday()) % 7;
    from + Days::new(u64::from(days_ahead))
}

/// Long-form date for the document title: `August 31, 2025` in English,
/// `2025年8月31日` in Chinese.
pub fn long_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::English => format!(
            "{} {}, {}",
            EN_MONTHS[date.month0() as usize],
            date.day(),
            date.year()
        ),
        Language::Chinese => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
    }
}

/// Short-form date for day headers: `08/31 (Sun)` / `08/31 (週日)`.
pub fn short_date(date: NaiveDate, language: Language) -> String {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let name = match language {
        Language::English => EN_WEEKDAYS[weekday],
        Language::Chinese => ZH_WEEKDAYS[weekday],
    };
    format!("{:02}/{:02} ({})", date.month(), date.day(), name)
}

/// The short-form date for day `day` of a week anchored at `start`.
pub fn display_date(start: NaiveDate, day: u8, language: Language) -> String {
    short_date(start + Days::new(u64::from(day)), language)
}
