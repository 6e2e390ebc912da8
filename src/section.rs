//! The day-section model: loading, mutating, and persisting the editable
//! state for one `(day, language)` pair.
//!
//! Persistence is eager. Every successful mutation writes the full
//! `{book, verses, message}` record back to the store and publishes the
//! record key on the bus, so the store is always the source of truth and an
//! export never depends on in-memory state. Write failures are dropped
//! silently per the storage contract; the user keeps editing and simply loses
//! that write.

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{DaySection, Language, VerseEntry};
use crate::store::{verse_key, KeyBus, RecordStore};

/// Which half of a verse row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseField {
    Reference,
    Text,
}

impl DaySection {
    /// Fetch the record for `(day, language)` from the store. Absent records,
    /// malformed JSON, and records with an empty verse list all normalize to
    /// the default section with one blank verse; storage problems never
    /// propagate to the caller.
    pub fn load(store: &dyn RecordStore, day: u8, language: Language) -> Self {
        let raw = store.get(&verse_key(day, language)).ok().flatten();
        match raw.map(|text| serde_json::from_str::<DaySection>(&text)) {
            Some(Ok(mut section)) => {
                section.normalize();
                section
            }
            _ => DaySection::empty(),
        }
    }
}

/// Editing state for one day in one language.
///
/// The "same as previous day" link is a live relationship, not a copy: while
/// active, this day's message mirrors whatever day `n-1` currently stores for
/// the same language. The model subscribes to the previous day's record key
/// and re-reads it when [`DaySectionModel::sync_with_previous`] finds the
/// subscription flag raised.
pub struct DaySectionModel {
    day: u8,
    language: Language,
    section: DaySection,
    same_as_previous: bool,
    previous_changed: Option<Rc<Cell<bool>>>,
}

impl DaySectionModel {
    /// Materialize the model for `(day, language)`, subscribing to the
    /// previous day's record when one exists. Day 0 has no previous day and
    /// never links.
    pub fn load(store: &dyn RecordStore, bus: &KeyBus, day: u8, language: Language) -> Self {
        let section = DaySection::load(store, day, language);
        let previous_changed =
            (day > 0).then(|| bus.subscribe(&verse_key(day - 1, language)));
        Self {
            day,
            language,
            section,
            same_as_previous: false,
            previous_changed,
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn section(&self) -> &DaySection {
        &self.section
    }

    /// Whether this day can offer the "same as previous day" link at all.
    pub fn can_link_previous(&self) -> bool {
        self.day > 0
    }

    pub fn same_as_previous(&self) -> bool {
        self.same_as_previous
    }

    pub fn set_book(&mut self, store: &dyn RecordStore, bus: &KeyBus, book: String) {
        self.section.book = book;
        self.save(store, bus);
    }

    /// Update the free-form message. A no-op while the previous-day link is
    /// active, since day `n-1` owns the value then.
    pub fn set_message(&mut self, store: &dyn RecordStore, bus: &KeyBus, message: String) {
        if self.same_as_previous {
            return;
        }
        self.section.message = message;
        self.save(store, bus);
    }

    /// Append one empty verse row and return its id so the editor can focus
    /// it.
    pub fn add_verse(&mut self, store: &dyn RecordStore, bus: &KeyBus) -> String {
        let verse = VerseEntry::new();
        let id = verse.id.clone();
        self.section.verses.push(verse);
        self.save(store, bus);
        id
    }

    /// Update one field of the verse identified by `id`. Returns false when
    /// no such verse exists.
    pub fn update_verse(
        &mut self,
        store: &dyn RecordStore,
        bus: &KeyBus,
        id: &str,
        field: VerseField,
        value: String,
    ) -> bool {
        let Some(verse) = self.section.verses.iter_mut().find(|verse| verse.id == id) else {
            return false;
        };
        match field {
            VerseField::Reference => verse.verse_reference = value,
            VerseField::Text => verse.verse_text = value,
        }
        self.save(store, bus);
        true
    }

    /// Remove the verse identified by `id`. Deleting the last remaining row
    /// is a no-op: a section always keeps at least one verse.
    pub fn delete_verse(&mut self, store: &dyn RecordStore, bus: &KeyBus, id: &str) -> bool {
        if self.section.verses.len() <= 1 {
            return false;
        }
        let before = self.section.verses.len();
        self.section.verses.retain(|verse| verse.id != id);
        if self.section.verses.len() == before {
            return false;
        }
        self.save(store, bus);
        true
    }

    /// Toggle the live link to the previous day's message. Enabling it
    /// immediately overwrites this day's message with the previous day's
    /// current value; disabling it leaves the last mirrored value in place as
    /// an ordinary editable message.
    pub fn set_same_as_previous(&mut self, store: &dyn RecordStore, bus: &KeyBus, enabled: bool) {
        if self.day == 0 {
            return;
        }
        self.same_as_previous = enabled;
        if enabled {
            self.section.message = previous_message(store, self.day, self.language);
            self.save(store, bus);
        }
    }

    /// React to a previous-day change notification. When the subscription
    /// flag is raised and the link is active, re-read day `n-1`'s message and
    /// overwrite our own; day `n-1` is the single source of truth while
    /// linked. Returns true when the message actually changed, so the caller
    /// can keep draining until a chain of linked days settles.
    pub fn sync_with_previous(&mut self, store: &dyn RecordStore, bus: &KeyBus) -> bool {
        let Some(flag) = &self.previous_changed else {
            return false;
        };
        if !flag.replace(false) {
            return false;
        }
        if !self.same_as_previous {
            return false;
        }
        let message = previous_message(store, self.day, self.language);
        if message == self.section.message {
            return false;
        }
        self.section.message = message;
        self.save(store, bus);
        true
    }

    /// Persist the full section and announce the change. Serialization of
    /// these small records cannot realistically fail, and write errors are
    /// swallowed by contract, so this never returns an error.
    fn save(&self, store: &dyn RecordStore, bus: &KeyBus) {
        let key = verse_key(self.day, self.language);
        if let Ok(serialized) = serde_json::to_string(&self.section) {
            let _ = store.set(&key, &serialized);
        }
        bus.publish(&key);
    }
}

/// Read the previous day's message straight from the store. Missing or
/// malformed records read as an empty message.
fn previous_message(store: &dyn RecordStore, day: u8, language: Language) -> String {
    if day == 0 {
        return String::new();
    }
    DaySection::load(store, day - 1, language).message
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};

    use super::*;
    use crate::store::MemoryStore;

    /// Store whose writes always fail, for exercising the silent-drop
    /// contract.
    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage disabled"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn first_load_returns_one_blank_verse() {
        let store = MemoryStore::new();
        let section = DaySection::load(&store, 3, Language::English);
        assert_eq!(section.book, "");
        assert_eq!(section.message, "");
        assert_eq!(section.verses.len(), 1);
        assert!(section.verses[0].is_blank());
        assert!(!section.verses[0].id.is_empty());
    }

    #[test]
    fn malformed_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("verse_2_en", "{not json").unwrap();
        let section = DaySection::load(&store, 2, Language::English);
        assert_eq!(section.book, "");
        assert_eq!(section.message, "");
        assert_eq!(section.verses.len(), 1);
        assert!(section.verses[0].is_blank());
    }

    #[test]
    fn stored_empty_verse_list_is_normalized() {
        let store = MemoryStore::new();
        store
            .set("verse_1_en", r#"{"book":"Mark","verses":[],"message":"m"}"#)
            .unwrap();
        let section = DaySection::load(&store, 1, Language::English);
        assert_eq!(section.book, "Mark");
        assert_eq!(section.verses.len(), 1);
    }

    #[test]
    fn load_then_save_is_a_no_op_on_reload() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        store
            .set(
                "verse_4_en",
                r#"{"book":"Luke","verses":[{"id":"v1","verseReference":"1:1","verseText":"text"}],"message":"hi"}"#,
            )
            .unwrap();

        let mut model = DaySectionModel::load(&store, &bus, 4, Language::English);
        // Re-setting the book to its current value re-persists the record.
        let book = model.section().book.clone();
        model.set_book(&store, &bus, book);

        let reloaded = DaySection::load(&store, 4, Language::English);
        assert_eq!(reloaded, *model.section());
        assert_eq!(reloaded.verses[0].id, "v1");
    }

    #[test]
    fn mutations_persist_immediately() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 0, Language::Chinese);

        model.set_book(&store, &bus, "詩篇".to_string());
        let stored = store.get("verse_0_zh-tw").unwrap().unwrap();
        assert!(stored.contains("詩篇"));

        model.set_message(&store, &bus, "訊息".to_string());
        let stored = store.get("verse_0_zh-tw").unwrap().unwrap();
        assert!(stored.contains("訊息"));
    }

    #[test]
    fn deleting_the_sole_verse_is_a_no_op() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 0, Language::English);
        let only_id = model.section().verses[0].id.clone();

        assert!(!model.delete_verse(&store, &bus, &only_id));
        assert_eq!(model.section().verses.len(), 1);
        assert_eq!(model.section().verses[0].id, only_id);
    }

    #[test]
    fn add_and_delete_verses_respect_ids() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 0, Language::English);
        let first_id = model.section().verses[0].id.clone();
        let second_id = model.add_verse(&store, &bus);
        assert_eq!(model.section().verses.len(), 2);
        assert_ne!(first_id, second_id);

        assert!(model.delete_verse(&store, &bus, &first_id));
        assert_eq!(model.section().verses.len(), 1);
        assert_eq!(model.section().verses[0].id, second_id);

        assert!(!model.delete_verse(&store, &bus, "no-such-id"));
    }

    #[test]
    fn update_verse_targets_one_field_of_one_row() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 0, Language::English);
        let id = model.section().verses[0].id.clone();

        assert!(model.update_verse(&store, &bus, &id, VerseField::Reference, "John 1:1".into()));
        assert!(model.update_verse(&store, &bus, &id, VerseField::Text, "In the beginning".into()));
        assert!(!model.update_verse(&store, &bus, "bogus", VerseField::Text, "x".into()));

        let verse = &model.section().verses[0];
        assert_eq!(verse.verse_reference, "John 1:1");
        assert_eq!(verse.verse_text, "In the beginning");
    }

    #[test]
    fn day_zero_never_links_to_a_previous_day() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 0, Language::English);
        assert!(!model.can_link_previous());

        model.set_same_as_previous(&store, &bus, true);
        assert!(!model.same_as_previous());
    }

    #[test]
    fn enabling_the_link_copies_the_current_previous_message() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut previous = DaySectionModel::load(&store, &bus, 1, Language::English);
        previous.set_message(&store, &bus, "prayer meeting".to_string());

        let mut linked = DaySectionModel::load(&store, &bus, 2, Language::English);
        linked.set_same_as_previous(&store, &bus, true);
        assert_eq!(linked.section().message, "prayer meeting");

        // The mirrored value is persisted, not just displayed.
        let stored = DaySection::load(&store, 2, Language::English);
        assert_eq!(stored.message, "prayer meeting");
    }

    #[test]
    fn linked_message_tracks_later_previous_day_edits() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut previous = DaySectionModel::load(&store, &bus, 1, Language::English);
        let mut linked = DaySectionModel::load(&store, &bus, 2, Language::English);
        linked.set_same_as_previous(&store, &bus, true);

        previous.set_message(&store, &bus, "updated later".to_string());
        assert!(linked.sync_with_previous(&store, &bus));
        assert_eq!(linked.section().message, "updated later");

        // Once settled, another sync pass is quiet.
        assert!(!linked.sync_with_previous(&store, &bus));
    }

    #[test]
    fn direct_edits_are_ignored_while_linked() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut previous = DaySectionModel::load(&store, &bus, 3, Language::English);
        previous.set_message(&store, &bus, "owned by day 3".to_string());

        let mut linked = DaySectionModel::load(&store, &bus, 4, Language::English);
        linked.set_same_as_previous(&store, &bus, true);
        linked.set_message(&store, &bus, "should be dropped".to_string());
        assert_eq!(linked.section().message, "owned by day 3");

        linked.set_same_as_previous(&store, &bus, false);
        linked.set_message(&store, &bus, "editable again".to_string());
        assert_eq!(linked.section().message, "editable again");
    }

    #[test]
    fn a_chain_of_linked_days_settles_in_order() {
        let store = MemoryStore::new();
        let bus = KeyBus::new();
        let mut day1 = DaySectionModel::load(&store, &bus, 1, Language::English);
        let mut day2 = DaySectionModel::load(&store, &bus, 2, Language::English);
        let mut day3 = DaySectionModel::load(&store, &bus, 3, Language::English);
        day2.set_same_as_previous(&store, &bus, true);
        day3.set_same_as_previous(&store, &bus, true);

        day1.set_message(&store, &bus, "ripples".to_string());
        // Draining in ascending day order settles the chain in one pass.
        day2.sync_with_previous(&store, &bus);
        day3.sync_with_previous(&store, &bus);
        assert_eq!(day2.section().message, "ripples");
        assert_eq!(day3.section().message, "ripples");
    }

    #[test]
    fn broken_storage_never_panics_the_model() {
        let store = BrokenStore;
        let bus = KeyBus::new();
        let mut model = DaySectionModel::load(&store, &bus, 2, Language::English);
        assert_eq!(model.section().verses.len(), 1);

        // Writes fail underneath; the in-memory state still advances.
        model.set_book(&store, &bus, "Acts".to_string());
        assert_eq!(model.section().book, "Acts");
    }
}
