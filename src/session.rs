//! The calculator session: owns the form, the current warnings and the history,
//! and applies user actions to them one at a time.

use log::{debug, info, warn};

use crate::calculator::{compute, CalculationResult};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fields::{AgeBracket, Field, FormFields};
use crate::history::History;
use crate::validation::{validate, ValidationErrors};

#[derive(Debug, Clone, Default)]
pub struct SavingsCalculator {
    fields: FormFields,
    errors: ValidationErrors,
    history: History,
    history_visible: bool,
    last_result: Option<CalculationResult>,
    clear_errors_on_edit: bool,
}

impl SavingsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let history = match settings.history_limit {
            Some(limit) => History::with_capacity_limit(limit)?,
            None => History::new(),
        };
        Ok(Self {
            history,
            clear_errors_on_edit: settings.clear_errors_on_edit,
            ..Self::default()
        })
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Set by the first successful submit and never reset.
    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn last_result(&self) -> Option<&CalculationResult> {
        self.last_result.as_ref()
    }

    pub fn edit_field(&mut self, field: Field, value: &str) {
        self.fields.set(field, value);
        self.after_edit(field);
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.fields.push_char(field, c);
        self.after_edit(field);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.fields.pop_char(field);
        self.after_edit(field);
    }

    pub fn select_age(&mut self, age: Option<AgeBracket>) {
        self.fields.age_bracket = age;
        self.after_edit(Field::AgeBracket);
    }

    fn after_edit(&mut self, field: Field) {
        if self.clear_errors_on_edit {
            self.errors.clear_field(field);
        }
    }

    /// Validate the form and, if it passes, compute, record and reset.
    ///
    /// On failure the warnings replace the previous ones and nothing else
    /// changes. On success the form is emptied and the warnings cleared.
    pub fn submit(&mut self) -> Result<&CalculationResult> {
        let errors = validate(&self.fields);
        if !errors.is_empty() {
            warn!("submit rejected, invalid fields: {}", errors.summary());
            self.errors = errors.clone();
            return Err(Error::InvalidInput { errors });
        }

        let result = compute(&self.fields)?;
        info!(
            "recorded result: age {}, old {}, new {}, savings {}",
            result.age(),
            result.old_yearly_cost_text(),
            result.new_yearly_cost_text(),
            result.yearly_savings_text()
        );

        self.history.record(result.clone());
        self.errors = ValidationErrors::default();
        self.fields.clear();
        self.history_visible = true;
        Ok(&*self.last_result.insert(result))
    }

    /// Remove a history entry. Unknown indexes are ignored.
    pub fn remove_entry(&mut self, index: usize) -> Option<CalculationResult> {
        let removed = self.history.remove(index);
        match &removed {
            Some(_) => info!("removed history entry {}", index),
            None => debug!("ignored removal of missing history entry {}", index),
        }
        removed
    }

    pub fn clear_history(&mut self) {
        info!("cleared {} history entries", self.history.len());
        self.history.clear();
    }
}
