//! Deterministic storage keys. These strings are the on-disk contract: they
//! match the layout the original editor wrote, so existing records keep
//! loading after the rewrite.

use crate::models::Language;

/// Schedule anchor date, stored as `YYYY-MM-DD`.
pub const KEY_SUNDAY_DATE: &str = "sundayDate";
/// Number of days displayed, stored as a decimal integer.
pub const KEY_DAYS_TO_SHOW: &str = "daysToShow";
/// Whether the week starts on Sunday, stored as `true`/`false`.
pub const KEY_START_ON_SUNDAY: &str = "startOnSunday";

/// Key for a day-section record, e.g. `verse_3_zh-tw`.
pub fn verse_key(day: u8, language: Language) -> String {
    format!("verse_{}_{}", day, language.code())
}

/// Key for the per-language title record, e.g. `title_line_en`.
pub fn title_key(language: Language) -> String {
    format!("title_line_{}", language.code())
}

/// Key for the per-language summary record, e.g. `summary_en`.
pub fn summary_key(language: Language) -> String {
    format!("summary_{}", language.code())
}
