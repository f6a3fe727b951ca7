use serde::{Deserialize, Serialize};
use std::fmt;

/// One named input of the calculator form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    AgeBracket,
    OldUsage,
    NewUsage,
    Frequency,
    CostPerUnit,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::AgeBracket,
        Field::OldUsage,
        Field::NewUsage,
        Field::Frequency,
        Field::CostPerUnit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::AgeBracket => "Dishwasher Age",
            Field::OldUsage => "Old Dishwasher Energy Usage (kWh per cycle)",
            Field::NewUsage => "New Dishwasher Energy Usage (kWh per cycle)",
            Field::Frequency => "Usage Frequency (cycles per year)",
            Field::CostPerUnit => "Electricity Cost per kWh",
        }
    }

    /// Whether the field holds free numeric text (everything except the age selector).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::AgeBracket)
    }

    pub fn next(&self) -> Field {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Field {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::AgeBracket => "ageBracket",
            Field::OldUsage => "oldUsage",
            Field::NewUsage => "newUsage",
            Field::Frequency => "frequency",
            Field::CostPerUnit => "costPerUnit",
        };
        f.write_str(name)
    }
}

/// Age range of the dishwasher being replaced. Display label only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "<5 years")]
    UnderFive,
    #[serde(rename = "5-10 years")]
    FiveToTen,
    #[serde(rename = ">10 years")]
    OverTen,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [AgeBracket::UnderFive, AgeBracket::FiveToTen, AgeBracket::OverTen];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::UnderFive => "<5 years",
            AgeBracket::FiveToTen => "5-10 years",
            AgeBracket::OverTen => ">10 years",
        }
    }

    pub fn from_label(label: &str) -> Option<AgeBracket> {
        Self::ALL.iter().copied().find(|b| b.label() == label.trim())
    }

    /// Step through the selector; an unset selector starts at the first bracket.
    pub fn cycle_next(current: Option<AgeBracket>) -> AgeBracket {
        match current {
            None => Self::ALL[0],
            Some(b) => {
                let idx = Self::ALL.iter().position(|x| *x == b).unwrap_or(0);
                Self::ALL[(idx + 1) % Self::ALL.len()]
            }
        }
    }

    pub fn cycle_previous(current: Option<AgeBracket>) -> AgeBracket {
        match current {
            None => Self::ALL[Self::ALL.len() - 1],
            Some(b) => {
                let idx = Self::ALL.iter().position(|x| *x == b).unwrap_or(0);
                Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
            }
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form state as entered by the user. Numbers are kept as text until compute time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub old_usage: String,
    pub new_usage: String,
    pub frequency: String,
    pub cost_per_unit: String,
    pub age_bracket: Option<AgeBracket>,
}

impl FormFields {
    pub fn new(
        old_usage: &str,
        new_usage: &str,
        frequency: &str,
        cost_per_unit: &str,
        age_bracket: Option<AgeBracket>,
    ) -> Self {
        Self {
            old_usage: old_usage.to_string(),
            new_usage: new_usage.to_string(),
            frequency: frequency.to_string(),
            cost_per_unit: cost_per_unit.to_string(),
            age_bracket,
        }
    }

    /// Current text of a field. The age selector reports its label, or "" when unset.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::OldUsage => &self.old_usage,
            Field::NewUsage => &self.new_usage,
            Field::Frequency => &self.frequency,
            Field::CostPerUnit => &self.cost_per_unit,
            Field::AgeBracket => self.age_bracket.map(|b| b.label()).unwrap_or(""),
        }
    }

    /// Replace a field's value. For the age selector an unknown label unsets it.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::AgeBracket => self.age_bracket = AgeBracket::from_label(value),
            _ => {
                if let Some(text) = self.text_mut(field) {
                    *text = value.to_string();
                }
            }
        }
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self, field: Field) {
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    pub fn is_blank(&self, field: Field) -> bool {
        self.get(field).trim().is_empty()
    }

    pub fn is_all_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.is_blank(*f))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::OldUsage => Some(&mut self.old_usage),
            Field::NewUsage => Some(&mut self.new_usage),
            Field::Frequency => Some(&mut self.frequency),
            Field::CostPerUnit => Some(&mut self.cost_per_unit),
            Field::AgeBracket => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_round_trip_every_field() {
        let mut fields = FormFields::default();
        fields.set(Field::OldUsage, "500");
        fields.set(Field::NewUsage, "300");
        fields.set(Field::Frequency, "12");
        fields.set(Field::CostPerUnit, "0.15");
        fields.set(Field::AgeBracket, "5-10 years");

        assert_eq!(fields.get(Field::OldUsage), "500");
        assert_eq!(fields.get(Field::NewUsage), "300");
        assert_eq!(fields.get(Field::Frequency), "12");
        assert_eq!(fields.get(Field::CostPerUnit), "0.15");
        assert_eq!(fields.age_bracket, Some(AgeBracket::FiveToTen));
    }

    #[test]
    fn test_unknown_age_label_unsets_selector() {
        let mut fields = FormFields::default();
        fields.set(Field::AgeBracket, ">10 years");
        fields.set(Field::AgeBracket, "ancient");
        assert_eq!(fields.age_bracket, None);
        assert!(fields.is_blank(Field::AgeBracket));
    }

    #[test]
    fn test_push_and_pop_ignore_age_selector() {
        let mut fields = FormFields::default();
        fields.push_char(Field::Frequency, '1');
        fields.push_char(Field::Frequency, '2');
        fields.push_char(Field::AgeBracket, 'x');
        fields.pop_char(Field::Frequency);

        assert_eq!(fields.frequency, "1");
        assert_eq!(fields.age_bracket, None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut fields = FormFields::new("1", "2", "3", "4", Some(AgeBracket::OverTen));
        fields.clear();
        assert!(fields.is_all_blank());
    }

    #[test]
    fn test_age_cycling_wraps() {
        assert_eq!(AgeBracket::cycle_next(None), AgeBracket::UnderFive);
        assert_eq!(AgeBracket::cycle_next(Some(AgeBracket::OverTen)), AgeBracket::UnderFive);
        assert_eq!(AgeBracket::cycle_previous(None), AgeBracket::OverTen);
        assert_eq!(AgeBracket::cycle_previous(Some(AgeBracket::UnderFive)), AgeBracket::OverTen);
    }

    #[test]
    fn test_field_focus_order_wraps() {
        assert_eq!(Field::CostPerUnit.next(), Field::AgeBracket);
        assert_eq!(Field::AgeBracket.previous(), Field::CostPerUnit);
        assert_eq!(Field::OldUsage.next(), Field::NewUsage);
    }
}
