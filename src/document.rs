//! The document assembler: a pure transformation from store contents and
//! schedule config to a renderer-agnostic description of the exportable
//! content for one language.
//!
//! Assembly always reads the store fresh instead of consulting any in-memory
//! editing state; since every mutation persists eagerly, the store is the
//! authoritative snapshot. Given identical store contents and config the
//! output is byte-for-byte identical.

use crate::content::{load_summary, load_title};
use crate::dates::{display_date, long_date};
use crate::models::{DaySection, Language, ScheduleConfig};
use crate::store::RecordStore;

/// One rendered verse table row. Only rows with a non-blank reference or
/// text make it into the description; fully blank rows stay in storage but
/// are invisible in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRow {
    pub reference: String,
    pub text: String,
}

/// One day's worth of exportable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    /// `"<date> <book>"`, trimmed so a missing book leaves no trailing space.
    pub header: String,
    pub rows: Vec<VerseRow>,
    /// Present only when the stored message is non-blank.
    pub message: Option<String>,
}

/// The full, ordered description of one language's export: a title block, a
/// summary block, and one block per included day. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescription {
    pub language: Language,
    /// Long-form start date followed by the title text, trimmed.
    pub title: String,
    /// Summary text, verbatim.
    pub summary: String,
    pub days: Vec<DayBlock>,
}

/// Assemble the exportable document for `language`.
///
/// Day selection follows [`ScheduleConfig::day_indices`], including its
/// intentional truncation at Saturday when the week starts on Monday. Each
/// included day is loaded fresh from the store.
pub fn assemble(
    store: &dyn RecordStore,
    schedule: &ScheduleConfig,
    language: Language,
) -> DocumentDescription {
    let title_text = load_title(store, language);
    let title = format!("{} {}", long_date(schedule.start_date, language), title_text)
        .trim()
        .to_string();
    let summary = load_summary(store, language);

    let days = schedule
        .day_indices()
        .into_iter()
        .map(|day| {
            let section = DaySection::load(store, day, language);
            let date = display_date(schedule.start_date, day, language);
            let header = format!("{} {}", date, section.book).trim().to_string();
            let rows = section
                .verses
                .iter()
                .filter(|verse| !verse.is_blank())
                .map(|verse| VerseRow {
                    reference: verse.verse_reference.clone(),
                    text: verse.verse_text.clone(),
                })
                .collect();
            let message = if section.message.trim().is_empty() {
                None
            } else {
                Some(section.message.clone())
            };
            DayBlock {
                header,
                rows,
                message,
            }
        })
        .collect();

    DocumentDescription {
        language,
        title,
        summary,
        days,
    }
}
