//! Central application state for the composer TUI.
//!
//! The app shows both language columns side by side, mirroring the original
//! two-column editor. A flat focus list per column keeps navigation simple:
//! every editable thing (title, summary, each day's book, each verse cell,
//! the message, and the previous-day link checkbox) is one focusable field,
//! and the arrow keys walk that list. All edits flow straight into the models,
//! which persist on every mutation, so there is no save step anywhere.

use std::cmp::min;
use std::mem;

use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::content::{load_title, set_summary, set_title, summary_template};
use crate::dates::{display_date, long_date};
use crate::document::assemble;
use crate::export::{export, ExportMode};
use crate::models::{Language, ScheduleConfig};
use crate::section::{DaySectionModel, VerseField};
use crate::store::{summary_key, KeyBus, RecordStore};

use super::forms::{ScheduleField, ScheduleForm};
use super::helpers::{centered_rect, field_line, surface_error};

/// Header space for the schedule summary and key hints.
const HEADER_HEIGHT: u16 = 4;
/// Footer space reserved for status messages.
const FOOTER_HEIGHT: u16 = 3;

/// Fine-grained input modes. `Editing` always targets the focused field of
/// the active column.
enum Mode {
    Normal,
    Editing,
    Schedule(ScheduleForm),
}

/// Addresses one focusable field within a language column. Section and verse
/// positions are indices into the current field list, recomputed after every
/// structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldId {
    Title,
    Summary,
    Book(usize),
    Verse(usize, usize, VerseField),
    Message(usize),
    LinkToggle(usize),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// One language's editing state: the title and summary text plus one section
/// model per displayed day.
struct LanguageColumn {
    language: Language,
    title: String,
    summary: String,
    sections: Vec<DaySectionModel>,
}

impl LanguageColumn {
    fn load(
        store: &dyn RecordStore,
        bus: &KeyBus,
        schedule: &ScheduleConfig,
        language: Language,
    ) -> Self {
        let title = load_title(store, language);
        // An untouched summary box starts from the usual boilerplate; it is
        // not persisted until the user actually edits it.
        let summary = store
            .get(&summary_key(language))
            .ok()
            .flatten()
            .unwrap_or_else(|| summary_template(language).to_string());
        let sections = schedule
            .day_indices()
            .into_iter()
            .map(|day| DaySectionModel::load(store, bus, day, language))
            .collect();
        Self {
            language,
            title,
            summary,
            sections,
        }
    }

    /// The focus list in display order.
    fn fields(&self) -> Vec<FieldId> {
        let mut fields = vec![FieldId::Title, FieldId::Summary];
        for (idx, section) in self.sections.iter().enumerate() {
            fields.push(FieldId::Book(idx));
            for verse_idx in 0..section.section().verses.len() {
                fields.push(FieldId::Verse(idx, verse_idx, VerseField::Reference));
                fields.push(FieldId::Verse(idx, verse_idx, VerseField::Text));
            }
            fields.push(FieldId::Message(idx));
            if section.can_link_previous() {
                fields.push(FieldId::LinkToggle(idx));
            }
        }
        fields
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Box<dyn RecordStore>,
    bus: KeyBus,
    schedule: ScheduleConfig,
    columns: Vec<LanguageColumn>,
    active_column: usize,
    cursor: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Hydrate the app from the store: load the schedule (anchored on today
    /// for the fallback date) and both language columns.
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self::with_today(store, Local::now().date_naive())
    }

    /// Like [`App::new`] with an explicit "today", so tests get a stable
    /// fallback start date.
    pub fn with_today(store: Box<dyn RecordStore>, today: chrono::NaiveDate) -> Self {
        let bus = KeyBus::new();
        let schedule = ScheduleConfig::load(store.as_ref(), today);
        let columns = Language::ALL
            .iter()
            .map(|&language| LanguageColumn::load(store.as_ref(), &bus, &schedule, language))
            .collect();
        Self {
            store,
            bus,
            schedule,
            columns,
            active_column: 0,
            cursor: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Process one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Editing => self.handle_editing_key(code),
            Mode::Schedule(form) => self.handle_schedule_key(code, form),
        };

        self.drain_notifications();
        self.clamp_cursor();
        Ok(exit)
    }

    /// Periodic upkeep between key presses: settle any pending previous-day
    /// link updates.
    pub fn tick(&mut self) {
        self.drain_notifications();
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_column = (self.active_column + 1) % self.columns.len();
                self.clamp_cursor();
            }
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-5),
            KeyCode::PageDown => self.move_cursor(5),
            KeyCode::Home => self.cursor = 0,
            KeyCode::Enter => match self.focused_field() {
                Some(FieldId::LinkToggle(idx)) => self.toggle_link(idx),
                Some(_) => {
                    self.clear_status();
                    return Mode::Editing;
                }
                None => {}
            },
            KeyCode::Char(' ') => {
                if let Some(FieldId::LinkToggle(idx)) = self.focused_field() {
                    self.toggle_link(idx);
                }
            }
            KeyCode::Char('+') => self.add_verse_row(),
            KeyCode::Char('-') => self.delete_verse_row(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.clear_status();
                return Mode::Schedule(ScheduleForm::from_config(&self.schedule));
            }
            KeyCode::Char('d') | KeyCode::Char('D') => self.export_active(ExportMode::Download),
            KeyCode::Char('o') | KeyCode::Char('O') => self.export_active(ExportMode::Open),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_editing_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Enter => {
                // The summary is the one multi-line field; Enter inserts a
                // line break there and commits everywhere else.
                if matches!(self.focused_field(), Some(FieldId::Summary)) {
                    self.edit_push('\n');
                    Mode::Editing
                } else {
                    Mode::Normal
                }
            }
            KeyCode::Backspace => {
                self.edit_backspace();
                Mode::Editing
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.edit_push(ch);
                Mode::Editing
            }
            _ => Mode::Editing,
        }
    }

    fn handle_schedule_key(&mut self, code: KeyCode, mut form: ScheduleForm) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                form.toggle_field();
                Mode::Schedule(form)
            }
            KeyCode::Char(' ') => {
                form.toggle_flag();
                Mode::Schedule(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::Schedule(form)
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(config) => {
                    self.apply_schedule(config);
                    Mode::Normal
                }
                Err(err) => {
                    form.error = Some(surface_error(&err));
                    Mode::Schedule(form)
                }
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::Schedule(form)
            }
            _ => Mode::Schedule(form),
        }
    }

    fn focused_field(&self) -> Option<FieldId> {
        self.columns[self.active_column]
            .fields()
            .get(self.cursor)
            .copied()
    }

    fn focused_section(&self) -> Option<usize> {
        match self.focused_field()? {
            FieldId::Book(idx)
            | FieldId::Verse(idx, _, _)
            | FieldId::Message(idx)
            | FieldId::LinkToggle(idx) => Some(idx),
            FieldId::Title | FieldId::Summary => None,
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        let len = self.columns[self.active_column].fields().len();
        if len == 0 {
            return;
        }
        let current = self.cursor as i32;
        self.cursor = current.saturating_add(delta).clamp(0, len as i32 - 1) as usize;
    }

    fn clamp_cursor(&mut self) {
        let len = self.columns[self.active_column].fields().len();
        self.cursor = if len == 0 { 0 } else { min(self.cursor, len - 1) };
    }

    fn field_value(&self, field: FieldId) -> String {
        let column = &self.columns[self.active_column];
        match field {
            FieldId::Title => column.title.clone(),
            FieldId::Summary => column.summary.clone(),
            FieldId::Book(idx) => column.sections[idx].section().book.clone(),
            FieldId::Verse(idx, verse_idx, half) => {
                let verse = &column.sections[idx].section().verses[verse_idx];
                match half {
                    VerseField::Reference => verse.verse_reference.clone(),
                    VerseField::Text => verse.verse_text.clone(),
                }
            }
            FieldId::Message(idx) => column.sections[idx].section().message.clone(),
            FieldId::LinkToggle(_) => String::new(),
        }
    }

    fn apply_field_value(&mut self, field: FieldId, value: String) {
        let column_idx = self.active_column;
        let language = self.columns[column_idx].language;
        match field {
            FieldId::Title => {
                set_title(self.store.as_ref(), language, &value);
                self.columns[column_idx].title = value;
            }
            FieldId::Summary => {
                set_summary(self.store.as_ref(), language, &value);
                self.columns[column_idx].summary = value;
            }
            FieldId::Book(idx) => {
                self.columns[column_idx].sections[idx].set_book(
                    self.store.as_ref(),
                    &self.bus,
                    value,
                );
            }
            FieldId::Verse(idx, verse_idx, half) => {
                let id = self.columns[column_idx].sections[idx].section().verses[verse_idx]
                    .id
                    .clone();
                self.columns[column_idx].sections[idx].update_verse(
                    self.store.as_ref(),
                    &self.bus,
                    &id,
                    half,
                    value,
                );
            }
            FieldId::Message(idx) => {
                if self.columns[column_idx].sections[idx].same_as_previous() {
                    self.set_status(
                        "Message mirrors the previous day; untick the link to edit it.",
                        StatusKind::Error,
                    );
                } else {
                    self.columns[column_idx].sections[idx].set_message(
                        self.store.as_ref(),
                        &self.bus,
                        value,
                    );
                }
            }
            FieldId::LinkToggle(_) => {}
        }
    }

    fn edit_push(&mut self, ch: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.field_value(field);
        value.push(ch);
        self.apply_field_value(field, value);
    }

    fn edit_backspace(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let mut value = self.field_value(field);
        if value.pop().is_some() {
            self.apply_field_value(field, value);
        }
    }

    fn toggle_link(&mut self, idx: usize) {
        let column_idx = self.active_column;
        let enabled = !self.columns[column_idx].sections[idx].same_as_previous();
        self.columns[column_idx].sections[idx].set_same_as_previous(
            self.store.as_ref(),
            &self.bus,
            enabled,
        );
        let text = if enabled {
            "Message now mirrors the previous day."
        } else {
            "Message unlinked; it keeps the last mirrored text."
        };
        self.set_status(text, StatusKind::Info);
    }

    fn add_verse_row(&mut self) {
        let Some(idx) = self.focused_section() else {
            self.set_status("Select a day before adding a verse row.", StatusKind::Error);
            return;
        };
        self.columns[self.active_column].sections[idx].add_verse(self.store.as_ref(), &self.bus);
        self.set_status("Verse row added.", StatusKind::Info);
    }

    fn delete_verse_row(&mut self) {
        let Some(FieldId::Verse(idx, verse_idx, _)) = self.focused_field() else {
            self.set_status("Select a verse row to delete.", StatusKind::Error);
            return;
        };
        let id = self.columns[self.active_column].sections[idx].section().verses[verse_idx]
            .id
            .clone();
        let deleted = self.columns[self.active_column].sections[idx].delete_verse(
            self.store.as_ref(),
            &self.bus,
            &id,
        );
        if deleted {
            self.set_status("Verse row deleted.", StatusKind::Info);
        } else {
            self.set_status("A day keeps at least one verse row.", StatusKind::Error);
        }
    }

    fn apply_schedule(&mut self, config: ScheduleConfig) {
        self.schedule = config;
        self.schedule.save(self.store.as_ref());
        self.reload_columns();
        self.set_status("Schedule updated.", StatusKind::Info);
    }

    /// Rebuild both columns from the store. Day models are cheap to reload
    /// and this keeps the displayed day list in lockstep with the schedule.
    fn reload_columns(&mut self) {
        self.columns = Language::ALL
            .iter()
            .map(|&language| {
                LanguageColumn::load(self.store.as_ref(), &self.bus, &self.schedule, language)
            })
            .collect();
        self.cursor = 0;
    }

    fn export_active(&mut self, mode: ExportMode) {
        let language = self.columns[self.active_column].language;
        let doc = assemble(self.store.as_ref(), &self.schedule, language);
        match export(&doc, mode) {
            Ok(path) => {
                self.set_status(format!("Exported {}", path.display()), StatusKind::Info)
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    /// Settle pending previous-day link updates. Sections are visited in
    /// ascending day order, so a chain of linked days converges in one pass.
    fn drain_notifications(&mut self) {
        for column in &mut self.columns {
            for section in &mut column.sections {
                section.sync_with_previous(self.store.as_ref(), &self.bus);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    // ----- rendering -------------------------------------------------------

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        for (idx, area) in columns.iter().enumerate() {
            self.draw_column(frame, idx, *area);
        }

        self.draw_footer(frame, chunks[2]);

        if let Mode::Schedule(form) = &self.mode {
            self.draw_schedule_modal(frame, form);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let schedule_line = Line::from(vec![
            Span::styled(
                "Weekly Announcements Composer",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  ·  {}  ·  {} day(s)  ·  starts {}",
                long_date(self.schedule.start_date, Language::English),
                self.schedule.day_indices().len(),
                if self.schedule.start_on_sunday {
                    "Sunday"
                } else {
                    "Monday"
                }
            )),
        ]);
        let hint_line = Line::from(Span::styled(
            "Tab language · ↑/↓ move · Enter edit · Space link · + add verse · - delete verse · s schedule · d download PDF · o open PDF · q quit",
            Style::default().fg(Color::DarkGray),
        ));
        let header = Paragraph::new(vec![schedule_line, hint_line])
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn draw_column(&self, frame: &mut Frame, idx: usize, area: Rect) {
        let column = &self.columns[idx];
        let active = idx == self.active_column;
        let fields = column.fields();
        let focused = if active {
            fields.get(self.cursor).copied()
        } else {
            None
        };
        let editing = active && matches!(self.mode, Mode::Editing);

        let mut lines: Vec<Line> = Vec::new();
        let mut focus_line = 0usize;

        for field in &fields {
            let is_focused = focused == Some(*field);
            let field_editing = editing && is_focused;
            // The text half of a verse shares the line pushed for the
            // reference half, so its focus position is recorded there.
            if is_focused && !matches!(field, FieldId::Verse(_, _, VerseField::Text)) {
                focus_line = lines.len();
            }
            match *field {
                FieldId::Title => {
                    lines.push(Line::from(Span::styled(
                        long_date(self.schedule.start_date, column.language),
                        Style::default().fg(Color::DarkGray),
                    )));
                    lines.push(field_line(
                        "Title",
                        &column.title,
                        "This week's subject",
                        is_focused,
                        field_editing,
                    ));
                }
                FieldId::Summary => {
                    let style = if is_focused {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::raw("Summary:")));
                    let mut summary_lines = column.summary.lines().peekable();
                    if summary_lines.peek().is_none() {
                        lines.push(Line::from(Span::styled(
                            "This week's summary",
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                    for text in summary_lines {
                        lines.push(Line::from(Span::styled(text.to_string(), style)));
                    }
                    if field_editing {
                        lines.push(Line::from(Span::styled(
                            "▏",
                            Style::default().fg(Color::Yellow),
                        )));
                    }
                }
                FieldId::Book(section_idx) => {
                    let section = &column.sections[section_idx];
                    lines.push(Line::default());
                    if is_focused {
                        focus_line = lines.len();
                    }
                    let date = display_date(
                        self.schedule.start_date,
                        section.day(),
                        column.language,
                    );
                    let book = &section.section().book;
                    let book_style = if is_focused {
                        Style::default().fg(Color::Yellow)
                    } else if book.is_empty() {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    let mut spans = vec![
                        Span::styled(date, Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(" "),
                        Span::styled(
                            if book.is_empty() {
                                "Book Name".to_string()
                            } else {
                                book.clone()
                            },
                            book_style,
                        ),
                    ];
                    if field_editing {
                        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
                    }
                    lines.push(Line::from(spans));
                }
                FieldId::Verse(section_idx, verse_idx, half) => {
                    // Each verse renders as one line; the second half of the
                    // pair reuses the line pushed for the first half.
                    if half == VerseField::Text {
                        continue;
                    }
                    let verse = &column.sections[section_idx].section().verses[verse_idx];
                    let ref_focused =
                        focused == Some(FieldId::Verse(section_idx, verse_idx, VerseField::Reference));
                    let text_focused =
                        focused == Some(FieldId::Verse(section_idx, verse_idx, VerseField::Text));
                    if text_focused {
                        focus_line = lines.len();
                    }
                    let mut spans = vec![Span::raw("  ")];
                    spans.push(verse_span(&verse.verse_reference, "Ref", ref_focused));
                    if editing && ref_focused {
                        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
                    }
                    spans.push(Span::raw(" │ "));
                    spans.push(verse_span(&verse.verse_text, "Text", text_focused));
                    if editing && text_focused {
                        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
                    }
                    lines.push(Line::from(spans));
                }
                FieldId::Message(section_idx) => {
                    let section = &column.sections[section_idx];
                    lines.push(field_line(
                        "Message",
                        &section.section().message,
                        "Optional message",
                        is_focused,
                        field_editing,
                    ));
                }
                FieldId::LinkToggle(section_idx) => {
                    let linked = column.sections[section_idx].same_as_previous();
                    let marker = if linked { "[x]" } else { "[ ]" };
                    let style = if is_focused {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    lines.push(Line::from(Span::styled(
                        format!("  {marker} Same as last day"),
                        style,
                    )));
                }
            }
        }

        let border_style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let viewport = area.height.saturating_sub(2) as usize;
        let offset = if viewport > 0 && focus_line >= viewport {
            (focus_line + 1 - viewport) as u16
        } else {
            0
        };
        let body = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(column.language.heading()),
            )
            .scroll((offset, 0));
        frame.render_widget(body, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => Line::from(Span::styled(
                "Edits are saved as you type.",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_schedule_modal(&self, frame: &mut Frame, form: &ScheduleForm) {
        let area = centered_rect(44, 36, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            form.build_line("Start date", ScheduleField::Date),
            form.build_line("Days to show", ScheduleField::Days),
            form.build_line("Start on Sunday", ScheduleField::StartOnSunday),
            Line::default(),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Tab next · Space toggle · Enter apply · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let modal = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Schedule"),
        );
        frame.render_widget(modal, area);
    }
}

/// Styled span for one half of a verse row.
fn verse_span(value: &str, placeholder: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };
    Span::styled(display, style)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::content::load_summary;
    use crate::models::DaySection;
    use crate::store::MemoryStore;

    fn app() -> App {
        // 2025-08-03 is a Sunday, so the fallback schedule starts that day.
        App::with_today(
            Box::new(MemoryStore::new()),
            NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    #[test]
    fn both_columns_cover_the_default_week() {
        let app = app();
        assert_eq!(app.columns.len(), 2);
        assert_eq!(app.columns[0].sections.len(), 7);
        assert_eq!(app.columns[1].sections.len(), 7);
        assert_eq!(app.focused_field(), Some(FieldId::Title));
    }

    #[test]
    fn day_zero_offers_no_link_toggle() {
        let app = app();
        let fields = app.columns[0].fields();
        assert!(!fields.contains(&FieldId::LinkToggle(0)));
        assert!(fields.contains(&FieldId::LinkToggle(1)));
    }

    #[test]
    fn typing_into_the_title_persists_per_language() {
        let mut app = app();
        app.handle_key(KeyCode::Enter).unwrap();
        // Clear the default before typing.
        for _ in 0.."Announcements".len() {
            app.handle_key(KeyCode::Backspace).unwrap();
        }
        type_text(&mut app, "Church Life");
        app.handle_key(KeyCode::Esc).unwrap();

        assert_eq!(
            app.store.get("title_line_en").unwrap().as_deref(),
            Some("Church Life")
        );
        // The Chinese column keeps its own record untouched.
        assert_eq!(app.store.get("title_line_zh-tw").unwrap(), None);
    }

    #[test]
    fn summary_edits_persist_but_the_seed_does_not() {
        let mut app = app();
        // The seeded boilerplate is visible but not yet stored.
        assert!(app.columns[0].summary.starts_with("1. Come pray"));
        assert_eq!(load_summary(app.store.as_ref(), Language::English), "Summary");

        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        type_text(&mut app, "!");
        assert!(load_summary(app.store.as_ref(), Language::English).ends_with('!'));
    }

    #[test]
    fn deleting_the_only_verse_row_reports_the_invariant() {
        let mut app = app();
        // Move to day 0's first verse reference field.
        while app.focused_field() != Some(FieldId::Verse(0, 0, VerseField::Reference)) {
            app.handle_key(KeyCode::Down).unwrap();
        }
        app.handle_key(KeyCode::Char('-')).unwrap();
        assert_eq!(app.columns[0].sections[0].section().verses.len(), 1);
        assert!(matches!(
            app.status,
            Some(StatusMessage {
                kind: StatusKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn linked_days_follow_edits_made_through_the_app() {
        let mut app = app();
        app.columns[0].sections[1].set_same_as_previous(app.store.as_ref(), &app.bus, true);

        // Edit day 0's message via the key pipeline.
        while app.focused_field() != Some(FieldId::Message(0)) {
            app.handle_key(KeyCode::Down).unwrap();
        }
        app.handle_key(KeyCode::Enter).unwrap();
        type_text(&mut app, "hi");
        app.handle_key(KeyCode::Esc).unwrap();

        assert_eq!(app.columns[0].sections[1].section().message, "hi");
        assert_eq!(
            DaySection::load(app.store.as_ref(), 1, Language::English).message,
            "hi"
        );
    }

    #[test]
    fn schedule_apply_reshapes_the_columns() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s')).unwrap();
        let Mode::Schedule(form) = &mut app.mode else {
            panic!("expected schedule mode");
        };
        form.days = "7".to_string();
        form.start_on_sunday = false;
        app.handle_key(KeyCode::Enter).unwrap();

        // Monday start truncates to six days.
        assert_eq!(app.columns[0].sections.len(), 6);
        assert_eq!(app.columns[0].sections[0].day(), 1);
        assert_eq!(
            app.store.get("startOnSunday").unwrap().as_deref(),
            Some("false")
        );
    }
}
