//! Title and summary records plus the persisted schedule configuration.
//!
//! These are the simple half of the state model: per-language text records
//! with default-value fallback and no cross-day relationships. Reads fall
//! back to defaults on any storage problem; writes are persisted immediately
//! with no validation and dropped silently on failure.

use chrono::NaiveDate;

use crate::dates::next_upcoming_sunday;
use crate::models::{Language, ScheduleConfig};
use crate::store::{
    summary_key, title_key, RecordStore, KEY_DAYS_TO_SHOW, KEY_START_ON_SUNDAY, KEY_SUNDAY_DATE,
};

/// Title shown when no `title_line_<lang>` record exists yet.
pub fn default_title(language: Language) -> &'static str {
    match language {
        Language::English => "Announcements",
        Language::Chinese => "報告事項",
    }
}

/// Summary used when no `summary_<lang>` record exists yet.
pub fn default_summary(language: Language) -> &'static str {
    match language {
        Language::English => "Summary",
        Language::Chinese => "摘要",
    }
}

/// Starter text the editor seeds an untouched summary box with. Kept apart
/// from [`default_summary`]: the export default stays short, while a fresh
/// editing session begins from the congregation's usual boilerplate.
pub fn summary_template(language: Language) -> &'static str {
    match language {
        Language::English => {
            "1. Come pray together in one accord for the saints and gospel warfare, every Tues. evening 8:00 - 9:30pm\n2. This week's reading material: "
        }
        Language::Chinese => {
            "1. 每週二晚上 8:00-9:30 為聖徒和福音的爭戰同心合意地來在一起禱告\n2. 本週讀經進度: "
        }
    }
}

pub fn load_title(store: &dyn RecordStore, language: Language) -> String {
    store
        .get(&title_key(language))
        .ok()
        .flatten()
        .unwrap_or_else(|| default_title(language).to_string())
}

pub fn set_title(store: &dyn RecordStore, language: Language, text: &str) {
    let _ = store.set(&title_key(language), text);
}

pub fn load_summary(store: &dyn RecordStore, language: Language) -> String {
    store
        .get(&summary_key(language))
        .ok()
        .flatten()
        .unwrap_or_else(|| default_summary(language).to_string())
}

pub fn set_summary(store: &dyn RecordStore, language: Language, text: &str) {
    let _ = store.set(&summary_key(language), text);
}

impl ScheduleConfig {
    /// Load the schedule from the store, falling back field by field: a
    /// missing or unparseable start date becomes the next upcoming Sunday
    /// relative to `today`, the day count defaults to 7 (and clamps into
    /// 1..=7), and the Sunday start defaults to on.
    pub fn load(store: &dyn RecordStore, today: NaiveDate) -> Self {
        let start_date = store
            .get(KEY_SUNDAY_DATE)
            .ok()
            .flatten()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
            .unwrap_or_else(|| next_upcoming_sunday(today));

        let days_to_show = store
            .get(KEY_DAYS_TO_SHOW)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .map(|days| days.clamp(1, 7))
            .unwrap_or(7);

        let start_on_sunday = store
            .get(KEY_START_ON_SUNDAY)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            start_date,
            days_to_show,
            start_on_sunday,
        }
    }

    /// Persist all three fields. Each is an independent record; a failed
    /// write of one does not block the others.
    pub fn save(&self, store: &dyn RecordStore) {
        let _ = store.set(
            KEY_SUNDAY_DATE,
            &self.start_date.format("%Y-%m-%d").to_string(),
        );
        let _ = store.set(KEY_DAYS_TO_SHOW, &self.days_to_show.to_string());
        let _ = store.set(KEY_START_ON_SUNDAY, &self.start_on_sunday.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn titles_fall_back_per_language() {
        let store = MemoryStore::new();
        assert_eq!(load_title(&store, Language::English), "Announcements");
        assert_eq!(load_title(&store, Language::Chinese), "報告事項");
    }

    #[test]
    fn summaries_fall_back_per_language() {
        let store = MemoryStore::new();
        assert_eq!(load_summary(&store, Language::English), "Summary");
        assert_eq!(load_summary(&store, Language::Chinese), "摘要");
    }

    #[test]
    fn saved_text_wins_over_defaults() {
        let store = MemoryStore::new();
        set_title(&store, Language::English, "Lord's Day Announcements");
        set_summary(&store, Language::Chinese, "本週事項");
        assert_eq!(
            load_title(&store, Language::English),
            "Lord's Day Announcements"
        );
        assert_eq!(load_summary(&store, Language::Chinese), "本週事項");
        // The other language is untouched.
        assert_eq!(load_title(&store, Language::Chinese), "報告事項");
    }

    #[test]
    fn empty_saved_text_is_still_a_value() {
        // An empty string is a deliberate user choice, not an absent record.
        let store = MemoryStore::new();
        set_title(&store, Language::English, "");
        assert_eq!(load_title(&store, Language::English), "");
    }

    #[test]
    fn schedule_defaults_anchor_on_the_next_sunday() {
        let store = MemoryStore::new();
        // 2025-06-04 is a Wednesday.
        let schedule = ScheduleConfig::load(&store, date(2025, 6, 4));
        assert_eq!(schedule.start_date, date(2025, 6, 8));
        assert_eq!(schedule.days_to_show, 7);
        assert!(schedule.start_on_sunday);
    }

    #[test]
    fn schedule_round_trips_through_the_store() {
        let store = MemoryStore::new();
        let schedule = ScheduleConfig {
            start_date: date(2025, 12, 21),
            days_to_show: 4,
            start_on_sunday: false,
        };
        schedule.save(&store);

        assert_eq!(
            store.get(KEY_SUNDAY_DATE).unwrap().as_deref(),
            Some("2025-12-21")
        );
        assert_eq!(store.get(KEY_DAYS_TO_SHOW).unwrap().as_deref(), Some("4"));
        assert_eq!(
            store.get(KEY_START_ON_SUNDAY).unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(ScheduleConfig::load(&store, date(2025, 1, 1)), schedule);
    }

    #[test]
    fn garbage_schedule_fields_fall_back_individually() {
        let store = MemoryStore::new();
        store.set(KEY_SUNDAY_DATE, "not-a-date").unwrap();
        store.set(KEY_DAYS_TO_SHOW, "many").unwrap();
        store.set(KEY_START_ON_SUNDAY, "false").unwrap();

        let schedule = ScheduleConfig::load(&store, date(2025, 6, 4));
        assert_eq!(schedule.start_date, date(2025, 6, 8));
        assert_eq!(schedule.days_to_show, 7);
        // The one parseable field is honored.
        assert!(!schedule.start_on_sunday);
    }

    #[test]
    fn out_of_range_day_counts_clamp() {
        let store = MemoryStore::new();
        store.set(KEY_DAYS_TO_SHOW, "12").unwrap();
        assert_eq!(ScheduleConfig::load(&store, date(2025, 6, 4)).days_to_show, 7);
        store.set(KEY_DAYS_TO_SHOW, "0").unwrap();
        assert_eq!(ScheduleConfig::load(&store, date(2025, 6, 4)).days_to_show, 1);
    }
}
