//! Core library surface for the weekly announcements composer.
//!
//! The layering runs bottom-up: [`store`] is the key/value record layer,
//! [`models`] and [`section`]/[`content`] are the editing state on top of it,
//! [`document`] assembles a renderer-agnostic description of the final page,
//! and [`export`] turns that description into a PDF. [`ui`] is the Ratatui
//! front end gluing it all together.
pub mod content;
pub mod dates;
pub mod document;
pub mod export;
pub mod models;
pub mod section;
pub mod store;
pub mod ui;

/// The persistence seam every layer above reads and writes through.
pub use store::{RecordStore, SqliteStore};

/// The primary domain types other layers manipulate.
pub use models::{DaySection, Language, ScheduleConfig, VerseEntry};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
