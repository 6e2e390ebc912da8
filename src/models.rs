//! Domain models shared between the editor, the persistence layer, and the
//! PDF export path. The serialized shapes here mirror the records kept in the
//! key/value store, so field naming matters: day-section records are stored as
//! camelCase JSON and must keep round-tripping with data written by earlier
//! versions of the composer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two languages the composer edits side by side. Every per-day and
/// title/summary record exists once per language; nothing is ever shared
/// between the English and Chinese columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    /// Both languages in the order the editor displays them.
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    /// Locale code used inside storage keys (`verse_3_zh-tw` and friends).
    /// Changing these strings would orphan every existing record.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh-tw",
        }
    }

    /// Short tag used in exported file names (`church-announcements-zh.pdf`).
    pub fn file_tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Column heading shown in the editor.
    pub fn heading(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// One reference/text pair within a day section. The `id` is an opaque UUID
/// assigned at creation and kept stable across edits; the editor uses it to
/// address individual rows and it is never reused within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseEntry {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default)]
    pub verse_reference: String,
    #[serde(default)]
    pub verse_text: String,
}

impl VerseEntry {
    /// Create an empty entry with a freshly generated id.
    pub fn new() -> Self {
        Self {
            id: fresh_id(),
            verse_reference: String::new(),
            verse_text: String::new(),
        }
    }

    /// Whether both columns are blank (ignoring whitespace). Blank rows are
    /// kept in storage but dropped from the exported document.
    pub fn is_blank(&self) -> bool {
        self.verse_reference.trim().is_empty() && self.verse_text.trim().is_empty()
    }
}

impl Default for VerseEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// The editable scripture/message record for one day and language. Persisted
/// as JSON under `verse_<day>_<lang>`. The verse list is never empty; loading
/// normalizes any stored record that violates that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySection {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub verses: Vec<VerseEntry>,
    #[serde(default)]
    pub message: String,
}

impl DaySection {
    /// The default a day materializes as on first access: no book, no
    /// message, exactly one blank verse row.
    pub fn empty() -> Self {
        Self {
            book: String::new(),
            verses: vec![VerseEntry::new()],
            message: String::new(),
        }
    }

    /// Enforce the non-empty verse list invariant on a freshly deserialized
    /// section.
    pub fn normalize(&mut self) {
        if self.verses.is_empty() {
            self.verses.push(VerseEntry::new());
        }
    }
}

/// Process-wide schedule settings driving which days are displayed and
/// exported. Not keyed by language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// The Sunday (or chosen start date) the week is anchored on.
    pub start_date: NaiveDate,
    /// How many days to display, 1 through 7.
    pub days_to_show: u8,
    /// When false, the week starts on Monday (day index 1) instead of Sunday.
    pub start_on_sunday: bool,
}

impl ScheduleConfig {
    /// The day indices (0 = Sunday .. 6 = Saturday) covered by this schedule.
    ///
    /// Without the Sunday start the indices shift up by one and anything past
    /// Saturday is dropped, so requesting 7 days yields only days 1 through 6.
    /// That truncation matches the original editor and is intentional.
    pub fn day_indices(&self) -> Vec<u8> {
        (0..self.days_to_show)
            .filter_map(|i| {
                let day = if self.start_on_sunday { i } else { i + 1 };
                (day <= 6).then_some(day)
            })
            .collect()
    }
}
