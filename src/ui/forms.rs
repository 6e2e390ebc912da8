//! Modal form state for editing the schedule configuration.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::ScheduleConfig;

/// Internal representation of the schedule form fields. Values stay as raw
/// strings while the dialog is open and only become typed on apply.
#[derive(Clone)]
pub(crate) struct ScheduleForm {
    pub(crate) date: String,
    pub(crate) days: String,
    pub(crate) start_on_sunday: bool,
    pub(crate) active: ScheduleField,
    pub(crate) error: Option<String>,
}

/// Fields available within the schedule form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum ScheduleField {
    Date,
    Days,
    StartOnSunday,
}

impl ScheduleForm {
    /// Populate the form from the currently active schedule.
    pub(crate) fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            date: config.start_date.format("%Y-%m-%d").to_string(),
            days: config.days_to_show.to_string(),
            start_on_sunday: config.start_on_sunday,
            active: ScheduleField::Date,
            error: None,
        }
    }

    /// Cycle focus across the three fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ScheduleField::Date => ScheduleField::Days,
            ScheduleField::Days => ScheduleField::StartOnSunday,
            ScheduleField::StartOnSunday => ScheduleField::Date,
        };
    }

    /// Append a character to the active field, validating allowed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            ScheduleField::Date => {
                if ch.is_ascii_digit() || ch == '-' {
                    self.date.push(ch);
                    true
                } else {
                    false
                }
            }
            ScheduleField::Days => {
                if ch.is_ascii_digit() {
                    self.days.push(ch);
                    true
                } else {
                    false
                }
            }
            ScheduleField::StartOnSunday => false,
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            ScheduleField::Date => {
                self.date.pop();
            }
            ScheduleField::Days => {
                self.days.pop();
            }
            ScheduleField::StartOnSunday => {}
        }
    }

    /// Flip the Sunday-start checkbox when it has focus.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.active == ScheduleField::StartOnSunday {
            self.start_on_sunday = !self.start_on_sunday;
            true
        } else {
            false
        }
    }

    /// Validate the inputs and return a typed config ready to apply.
    pub(crate) fn parse_inputs(&self) -> Result<ScheduleConfig> {
        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(anyhow!("Start date is required."));
        }
        let start_date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .context("Start date must be YYYY-MM-DD.")?;

        let days_to_show = self
            .days
            .trim()
            .parse::<u8>()
            .context("Days to show must be a number.")?;
        if !(1..=7).contains(&days_to_show) {
            return Err(anyhow!("Days to show must be between 1 and 7."));
        }

        Ok(ScheduleConfig {
            start_date,
            days_to_show,
            start_on_sunday: self.start_on_sunday,
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: ScheduleField) -> Line<'static> {
        let is_active = self.active == field;
        let display = match field {
            ScheduleField::Date => {
                if self.date.is_empty() {
                    "<YYYY-MM-DD>".to_string()
                } else {
                    self.date.clone()
                }
            }
            ScheduleField::Days => {
                if self.days.is_empty() {
                    "<1-7>".to_string()
                } else {
                    self.days.clone()
                }
            }
            ScheduleField::StartOnSunday => {
                if self.start_on_sunday {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }
}
