use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fields::{AgeBracket, Field, FormFields};
use crate::validation::{parse_cycles, parse_decimal, ValidationErrors};

/// One computed comparison. Figures are already rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    old_yearly_cost: f64,
    new_yearly_cost: f64,
    yearly_savings: f64,
    age: AgeBracket,
}

impl CalculationResult {
    pub fn old_yearly_cost(&self) -> f64 {
        self.old_yearly_cost
    }

    pub fn new_yearly_cost(&self) -> f64 {
        self.new_yearly_cost
    }

    pub fn yearly_savings(&self) -> f64 {
        self.yearly_savings
    }

    pub fn age(&self) -> AgeBracket {
        self.age
    }

    pub fn old_yearly_cost_text(&self) -> String {
        format!("{:.2}", self.old_yearly_cost)
    }

    pub fn new_yearly_cost_text(&self) -> String {
        format!("{:.2}", self.new_yearly_cost)
    }

    pub fn yearly_savings_text(&self) -> String {
        format!("{:.2}", self.yearly_savings)
    }
}

/// Round half away from zero to two decimals. Negative zero comes back as zero.
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn decimal(fields: &FormFields, field: Field) -> Result<f64> {
    let text = fields.get(field);
    parse_decimal(text).ok_or_else(|| Error::Malformed {
        field,
        value: text.to_string(),
    })
}

/// Compute yearly costs and savings from a validated form.
///
/// Savings come from the unrounded products and are rounded once, so the
/// three figures may disagree by a cent at the boundary.
pub fn compute(fields: &FormFields) -> Result<CalculationResult> {
    let old_usage = decimal(fields, Field::OldUsage)?;
    let new_usage = decimal(fields, Field::NewUsage)?;
    let cost_per_unit = decimal(fields, Field::CostPerUnit)?;
    let cycles = parse_cycles(&fields.frequency).ok_or_else(|| Error::Malformed {
        field: Field::Frequency,
        value: fields.frequency.clone(),
    })?;
    let age = fields.age_bracket.ok_or_else(|| Error::InvalidInput {
        errors: ValidationErrors::missing(Field::AgeBracket),
    })?;

    let old_cost = old_usage * cycles as f64 * cost_per_unit;
    let new_cost = new_usage * cycles as f64 * cost_per_unit;

    Ok(CalculationResult {
        old_yearly_cost: finite_cents("old yearly cost", old_cost)?,
        new_yearly_cost: finite_cents("new yearly cost", new_cost)?,
        yearly_savings: finite_cents("yearly savings", old_cost - new_cost)?,
        age,
    })
}

fn finite_cents(figure: &'static str, value: f64) -> Result<f64> {
    let rounded = round_cents(value);
    if value.is_finite() && rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(Error::OutOfRange { figure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::missing_message;

    fn form(old: &str, new: &str, freq: &str, cost: &str) -> FormFields {
        FormFields::new(old, new, freq, cost, Some(AgeBracket::FiveToTen))
    }

    #[test]
    fn test_reference_figures() {
        let result = compute(&form("500", "300", "300", "0.12")).unwrap();
        assert_eq!(result.old_yearly_cost_text(), "18000.00");
        assert_eq!(result.new_yearly_cost_text(), "10800.00");
        assert_eq!(result.yearly_savings_text(), "7200.00");
        assert_eq!(result.old_yearly_cost(), 18000.0);
        assert_eq!(result.yearly_savings(), 7200.0);
    }

    #[test]
    fn test_monthly_cycles_example() {
        let result = compute(&form("500", "300", "12", "0.15")).unwrap();
        assert_eq!(result.old_yearly_cost_text(), "900.00");
        assert_eq!(result.new_yearly_cost_text(), "540.00");
        assert_eq!(result.yearly_savings_text(), "360.00");
        assert_eq!(result.age(), AgeBracket::FiveToTen);
    }

    #[test]
    fn test_equal_usage_saves_exactly_zero() {
        let result = compute(&form("1.37", "1.37", "221", "0.173")).unwrap();
        assert_eq!(result.yearly_savings(), 0.0);
        assert!(result.yearly_savings().is_sign_positive());
        assert_eq!(result.yearly_savings_text(), "0.00");
    }

    #[test]
    fn test_worse_replacement_gives_negative_savings() {
        let result = compute(&form("1", "2", "100", "0.5")).unwrap();
        assert_eq!(result.yearly_savings_text(), "-50.00");
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(2.346), 2.35);
        assert_eq!(round_cents(-2.346), -2.35);
        assert_eq!(round_cents(18000.000000000004), 18000.0);
        assert_eq!(round_cents(-0.001), 0.0);
        assert!(round_cents(-0.001).is_sign_positive());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let err = compute(&form("abc", "1", "1", "1")).unwrap_err();
        match err {
            Error::Malformed { field, value } => {
                assert_eq!(field, Field::OldUsage);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_age_is_reported_as_missing() {
        let mut fields = form("1", "1", "1", "1");
        fields.age_bracket = None;
        match compute(&fields).unwrap_err() {
            Error::InvalidInput { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors.get(Field::AgeBracket),
                    Some(missing_message(Field::AgeBracket))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_savings_rounded_once_from_unrounded_costs() {
        let result = compute(&form("0.014", "0.006", "1", "1")).unwrap();
        assert_eq!(result.old_yearly_cost_text(), "0.01");
        assert_eq!(result.new_yearly_cost_text(), "0.01");
        assert_eq!(result.yearly_savings_text(), "0.01");
    }

    #[test]
    fn test_overflowing_products_are_out_of_range() {
        let huge = format!("1{}", "0".repeat(308));
        assert!(matches!(
            compute(&form(&huge, &huge, "10", "1")),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            compute(&form("1e307", "1", "1", "1")),
            Err(Error::OutOfRange { figure: "old yearly cost" })
        ));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let result = compute(&form("500", "300", "12", "0.15")).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["oldYearlyCost"], 900.0);
        assert_eq!(json["yearlySavings"], 360.0);
        assert_eq!(json["age"], "5-10 years");
    }
}
