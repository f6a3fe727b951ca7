//! Pre-computation checks over the five form fields.
//!
//! Presence is checked first. A present numeric field that does not parse gets
//! a second, distinct message, and one outside the accepted magnitude a third,
//! so the calculator never sees garbage or overflows.

use std::collections::BTreeMap;

use crate::fields::{Field, FormFields};

/// Field name -> warning. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.messages.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.messages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.messages.iter().map(|(f, m)| (*f, *m))
    }

    pub fn clear_field(&mut self, field: Field) {
        self.messages.remove(&field);
    }

    /// Comma-separated field names, for log lines and error display.
    pub fn summary(&self) -> String {
        self.fields().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
    }

    /// A single missing-field warning.
    pub(crate) fn missing(field: Field) -> Self {
        let mut errors = Self::default();
        errors.insert(field, missing_message(field));
        errors
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.messages.insert(field, message);
    }
}

pub fn missing_message(field: Field) -> &'static str {
    match field {
        Field::OldUsage => "Enter old dishwasher energy usage",
        Field::NewUsage => "Enter new dishwasher energy usage",
        Field::Frequency => "Enter frequency (cycles per year)",
        Field::CostPerUnit => "Enter electricity cost",
        Field::AgeBracket => "Select dishwasher age",
    }
}

pub fn malformed_message(field: Field) -> &'static str {
    match field {
        Field::OldUsage => "Old energy usage must be a number",
        Field::NewUsage => "New energy usage must be a number",
        Field::Frequency => "Frequency must be a whole number of cycles",
        Field::CostPerUnit => "Electricity cost must be a number",
        Field::AgeBracket => "Select one of the listed ages",
    }
}

pub fn too_large_message(field: Field) -> &'static str {
    match field {
        Field::OldUsage => "Old energy usage is too large",
        Field::NewUsage => "New energy usage is too large",
        Field::Frequency => "Frequency is too large",
        Field::CostPerUnit => "Electricity cost is too large",
        Field::AgeBracket => "Select a listed age",
    }
}

/// Largest accepted magnitude for a usage or cost figure.
pub const MAX_DECIMAL: f64 = 1e9;

/// Largest accepted cycle count.
pub const MAX_CYCLES: i64 = 1_000_000_000;

/// Parse a usage or cost figure. Non-finite values are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a cycle count.
pub fn parse_cycles(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// The warning for a present value, if it has one.
fn check_value(field: Field, text: &str) -> Option<&'static str> {
    match field {
        Field::Frequency => match parse_cycles(text) {
            // whole numbers past i64 still read as "too large", not "not a number"
            None if parse_decimal(text).is_some_and(|v| v.fract() == 0.0 && v.abs() > MAX_CYCLES as f64) => {
                Some(too_large_message(field))
            }
            None => Some(malformed_message(field)),
            Some(v) if v.unsigned_abs() > MAX_CYCLES as u64 => Some(too_large_message(field)),
            Some(_) => None,
        },
        Field::OldUsage | Field::NewUsage | Field::CostPerUnit => match parse_decimal(text) {
            None => Some(malformed_message(field)),
            Some(v) if v.abs() > MAX_DECIMAL => Some(too_large_message(field)),
            Some(_) => None,
        },
        Field::AgeBracket => None,
    }
}

/// Check every field and return the full set of problems. Pure; the caller stores the result.
pub fn validate(fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::ALL {
        let text = fields.get(field);
        if text.trim().is_empty() {
            errors.insert(field, missing_message(field));
        } else if let Some(message) = check_value(field, text) {
            errors.insert(field, message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::AgeBracket;

    fn complete() -> FormFields {
        FormFields::new("500", "300", "300", "0.12", Some(AgeBracket::UnderFive))
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(validate(&complete()).is_empty());
    }

    #[test]
    fn test_empty_form_flags_all_five_fields() {
        let errors = validate(&FormFields::default());
        assert_eq!(errors.len(), 5);
        for field in Field::ALL {
            assert_eq!(errors.get(field), Some(missing_message(field)));
        }
    }

    #[test]
    fn test_only_empty_fields_are_reported() {
        let mut fields = complete();
        fields.new_usage.clear();
        fields.age_bracket = None;

        let errors = validate(&fields);
        let flagged: Vec<Field> = errors.fields().collect();
        assert_eq!(flagged, vec![Field::AgeBracket, Field::NewUsage]);
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut fields = complete();
        fields.cost_per_unit = "   ".to_string();
        let errors = validate(&fields);
        assert_eq!(errors.get(Field::CostPerUnit), Some(missing_message(Field::CostPerUnit)));
    }

    #[test]
    fn test_messages_are_distinct_and_non_empty() {
        let mut seen = std::collections::HashSet::new();
        for field in Field::ALL {
            assert!(!missing_message(field).is_empty());
            assert!(seen.insert(missing_message(field)));
            assert!(seen.insert(malformed_message(field)));
            assert!(seen.insert(too_large_message(field)));
        }
    }

    #[test]
    fn test_garbage_numbers_get_malformed_message() {
        let mut fields = complete();
        fields.old_usage = "12abc".to_string();
        fields.frequency = "12.5".to_string();

        let errors = validate(&fields);
        assert_eq!(errors.get(Field::OldUsage), Some(malformed_message(Field::OldUsage)));
        assert_eq!(errors.get(Field::Frequency), Some(malformed_message(Field::Frequency)));
        assert!(!errors.contains(Field::NewUsage));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut fields = complete();
        fields.cost_per_unit = "inf".to_string();
        fields.new_usage = "NaN".to_string();
        let errors = validate(&fields);
        assert!(errors.contains(Field::CostPerUnit));
        assert!(errors.contains(Field::NewUsage));
    }

    #[test]
    fn test_huge_values_get_too_large_message() {
        let mut fields = complete();
        let huge = format!("1{}", "0".repeat(308));
        fields.old_usage = huge.clone();
        fields.new_usage = huge;
        fields.cost_per_unit = "1e307".to_string();
        fields.frequency = format!("1{}", "0".repeat(30));

        let errors = validate(&fields);
        for field in [Field::OldUsage, Field::NewUsage, Field::CostPerUnit, Field::Frequency] {
            assert_eq!(errors.get(field), Some(too_large_message(field)));
        }
    }

    #[test]
    fn test_values_at_the_limit_pass() {
        let mut fields = complete();
        fields.old_usage = "1000000000".to_string();
        fields.frequency = MAX_CYCLES.to_string();
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn test_negative_numbers_pass_validation() {
        let mut fields = complete();
        fields.old_usage = "-5".to_string();
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut fields = complete();
        fields.frequency.clear();
        assert_eq!(validate(&fields), validate(&fields));
    }

    #[test]
    fn test_summary_lists_field_names() {
        let mut fields = complete();
        fields.old_usage.clear();
        fields.frequency.clear();
        assert_eq!(validate(&fields).summary(), "oldUsage, frequency");
    }
}
