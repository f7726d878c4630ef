use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single typed cell of a form row.
///
/// Untagged on the wire: booleans and numbers keep their JSON type, calendar
/// dates arrive as `"YYYY-MM-DD"` strings and everything else is plain text.
/// A JSON `null` maps to a cleared date picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Decimal(f64),
    Date(Option<NaiveDate>),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => *d,
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Blank means "the user left it empty": whitespace-only text or a cleared
    /// date. Numbers and booleans always carry a value.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Date(d) => d.is_none(),
            FieldValue::Bool(_) | FieldValue::Decimal(_) => false,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}
