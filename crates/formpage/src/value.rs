//! Form data and state values, and the loose matching used between them.
//!
//! Form data is what travels over the wire: a flat map of strings (or arrays of
//! strings for multi-select inputs). State is the application's typed record and
//! may hold numbers, booleans, dates and nested records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Flat record exchanged with the browser, keyed by field name.
pub type FormData = Map<String, Value>;

/// Typed domain record owned by the host application, keyed by field name.
pub type State = BTreeMap<String, StateValue>;

/// A single typed state value.
///
/// Dates serialize as ISO `YYYY-MM-DD` strings. Loaded state never guesses
/// dates: those strings come back as [`StateValue::Text`] and date fields read
/// them through [`StateValue::as_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum StateValue {
    /// Explicitly blank.
    #[default]
    Null,
    /// Boolean answer (yes/no).
    Bool(bool),
    /// Numeric answer (numbers, currency, numeric list values).
    Number(f64),
    /// Calendar date.
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    /// Free text or string list value.
    Text(String),
    /// Multi-select answer.
    List(Vec<StateValue>),
    /// Nested record, e.g. an address.
    Record(BTreeMap<String, StateValue>),
}

impl StateValue {
    /// Whether this value is [`StateValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert a (validated) form value into state without type-specific parsing.
    pub fn from_form(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_form).collect()),
            Value::Object(map) => Self::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_form(v)))
                    .collect(),
            ),
        }
    }

    /// Render as the string a form input would carry.
    ///
    /// Lists join with `,`, which is the comma-joined shape multi-select inputs
    /// accept back.
    pub fn to_form_string(&self) -> String {
        match self {
            Self::Null | Self::Record(_) => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::to_form_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Canonical string key used to compare against list values.
    pub fn loose_key(&self) -> String {
        self.to_form_string()
    }

    /// Interpret as a date, accepting ISO strings as well as native dates.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    /// Borrow the nested record, if this is one.
    pub fn as_record(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Convert into a JSON value (dates become ISO strings).
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => number_value(*n),
            Self::Date(_) => Value::String(self.to_form_string()),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Record(r) => {
                Value::Object(r.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for StateValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for StateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for StateValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// Format a number the way it would be typed into a form (`10`, not `10.0`).
pub fn format_number(n: f64) -> String {
    n.to_string()
}

/// Build a JSON number, preferring an integer representation when exact.
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Canonical string key for a form or list value.
///
/// Submitted form data is always textual while list values may be numbers or
/// booleans, so every comparison between the two goes through this key on both
/// sides.
pub fn loose_key(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_default(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(loose_key).collect::<Vec<_>>().join(","),
    }
}

/// Normalise a multi-select submission into its individual keys.
///
/// Accepts a single scalar, an array, or a comma-joined string.
pub fn selected_keys(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(loose_key).collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => s.split(',').map(|p| p.trim().to_string()).collect(),
        Some(other) => vec![loose_key(other)],
    }
}

/// Keys selected in a state value (scalar or list).
pub fn selected_state_keys(value: Option<&StateValue>) -> Vec<String> {
    match value {
        None | Some(StateValue::Null) => Vec::new(),
        Some(StateValue::List(items)) => items.iter().map(StateValue::loose_key).collect(),
        Some(other) => vec![other.loose_key()],
    }
}

/// Read a form value as trimmed text; numbers are formatted, other shapes are blank.
pub fn form_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_default(),
        _ => String::new(),
    }
}
