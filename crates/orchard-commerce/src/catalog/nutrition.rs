//! Nutrition facts as served by the product listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A nutrient the filter sidebar can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Some(Nutrient::Calories),
            "protein" => Some(Nutrient::Protein),
            "carbs" | "carbohydrates" => Some(Nutrient::Carbs),
            "fat" => Some(Nutrient::Fat),
            _ => None,
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nutrient amount; the admin form stores some as text (`"12.5g"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
}

impl NutrientValue {
    /// Numeric reading of the value. Text is read by its leading decimal
    /// number; anything unreadable counts as `0`.
    pub fn as_f64(&self) -> f64 {
        match self {
            NutrientValue::Number(n) if n.is_finite() => *n,
            NutrientValue::Number(_) => 0.0,
            NutrientValue::Text(s) => parse_leading_decimal(s).unwrap_or(0.0),
        }
    }
}

impl From<f64> for NutrientValue {
    fn from(n: f64) -> Self {
        NutrientValue::Number(n)
    }
}

impl From<&str> for NutrientValue {
    fn from(s: &str) -> Self {
        NutrientValue::Text(s.to_string())
    }
}

/// Per-product nutrition record. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    pub calories: Option<NutrientValue>,
    pub protein: Option<NutrientValue>,
    pub carbs: Option<NutrientValue>,
    pub fat: Option<NutrientValue>,
}

impl NutritionFacts {
    /// Numeric value of a nutrient; missing fields read as `0`.
    pub fn value(&self, nutrient: Nutrient) -> f64 {
        let field = match nutrient {
            Nutrient::Calories => &self.calories,
            Nutrient::Protein => &self.protein,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fat => &self.fat,
        };
        field.as_ref().map(NutrientValue::as_f64).unwrap_or(0.0)
    }
}

/// Read the longest leading decimal number of `s`, accepting `,` as the
/// decimal separator.
fn parse_leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_separator = false;

    for (i, ch) in s.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' | ',' if !seen_separator => seen_separator = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    s[..end]
        .trim_end_matches(['.', ','])
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_values_parse_leading_number() {
        assert_eq!(NutrientValue::from("12.5g").as_f64(), 12.5);
        assert_eq!(NutrientValue::from(" 3,2 g").as_f64(), 3.2);
        assert_eq!(NutrientValue::from("40").as_f64(), 40.0);
        assert_eq!(NutrientValue::from("7.").as_f64(), 7.0);
    }

    #[test]
    fn test_unparseable_values_read_as_zero() {
        assert_eq!(NutrientValue::from("n/a").as_f64(), 0.0);
        assert_eq!(NutrientValue::from("").as_f64(), 0.0);
        assert_eq!(NutrientValue::from("-").as_f64(), 0.0);
        assert_eq!(NutrientValue::Number(f64::NAN).as_f64(), 0.0);
    }

    #[test]
    fn test_missing_field_reads_as_zero() {
        let facts = NutritionFacts {
            protein: Some(2.5.into()),
            ..Default::default()
        };
        assert_eq!(facts.value(Nutrient::Protein), 2.5);
        assert_eq!(facts.value(Nutrient::Fat), 0.0);
    }

    #[test]
    fn test_nutrition_facts_from_mixed_json() {
        let facts: NutritionFacts =
            serde_json::from_str(r#"{"calories": 320, "protein": "2.1g", "carbs": "78"}"#)
                .unwrap();
        assert_eq!(facts.value(Nutrient::Calories), 320.0);
        assert_eq!(facts.value(Nutrient::Protein), 2.1);
        assert_eq!(facts.value(Nutrient::Carbs), 78.0);
        assert!(facts.fat.is_none());
    }

    #[test]
    fn test_nutrient_from_str() {
        assert_eq!(Nutrient::from_str("Protein"), Some(Nutrient::Protein));
        assert_eq!(Nutrient::from_str("carbohydrates"), Some(Nutrient::Carbs));
        assert_eq!(Nutrient::from_str("sugar"), None);
    }
}
