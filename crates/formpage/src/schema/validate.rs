use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

use super::{
    DatePartKeys, FieldSchema, NumberRule, ObjectSchema, Presence, Rule, TextFormat, TextRule,
    ViolationKind,
};
use crate::value::{FormData, form_text, loose_key, number_value, selected_keys};

/// Runs of ASCII word characters.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word pattern compiles"));

/// A local part, an `@`, and a domain of at least two labels.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern compiles")
});

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Key path of the offending value (one segment for flat form data).
    pub path: Vec<String>,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Display-ready message.
    pub message: String,
}

/// Result of running an [`ObjectSchema`].
#[derive(Debug, Clone, Default)]
pub struct Validated {
    /// The converted submission: trimmed strings, typed numbers, booleans and
    /// list values. Keys not named by the schema pass through untouched.
    pub value: FormData,
    /// Every violation, in schema key order.
    pub violations: Vec<Violation>,
}

impl Validated {
    /// Whether no constraint failed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl ObjectSchema {
    /// Validate a submission, collecting every violation.
    pub fn validate(&self, input: &FormData) -> Validated {
        let mut value = input.clone();
        let mut violations = Vec::new();

        for (name, schema) in self.keys.iter() {
            let schema = resolve(schema, input);
            match check(schema, input.get(name), input) {
                Ok(Some(v)) => {
                    value.insert(name.to_string(), v);
                }
                Ok(None) => {
                    value.remove(name);
                }
                Err(kind) => violations.push(Violation {
                    path: vec![name.to_string()],
                    kind,
                    message: schema.message_for(kind),
                }),
            }
        }

        trace!(
            keys = self.keys.len(),
            violations = violations.len(),
            "validated form data"
        );
        Validated { value, violations }
    }
}

/// Follow conditional schemas until a concrete one is reached.
fn resolve<'a>(mut schema: &'a FieldSchema, input: &FormData) -> &'a FieldSchema {
    while let Rule::When(cond) = &schema.rule {
        let raw = input.get(&cond.controller);
        let selected = if cond.multiple {
            selected_keys(raw).iter().any(|k| *k == cond.value_key)
        } else {
            raw.is_some_and(|v| loose_key(v) == cond.value_key)
        };
        schema = if selected { &cond.then } else { &cond.otherwise };
    }
    schema
}

/// Check one value. `Ok(None)` means the key is absent from the result.
fn check(
    schema: &FieldSchema,
    raw: Option<&Value>,
    siblings: &FormData,
) -> Result<Option<Value>, ViolationKind> {
    if let Rule::DateParts(keys) = &schema.rule {
        return check_date_parts(schema.presence, keys, siblings);
    }

    let value = match raw {
        Some(Value::Null) if schema.allow_null => return Ok(Some(Value::Null)),
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(Value::String(s)) if matches!(&schema.rule, Rule::Text(t) if t.trim) => {
            Some(Value::String(s.trim().to_string()))
        }
        Some(v) => Some(v.clone()),
    };

    let value = match value {
        Some(Value::String(s)) if s.is_empty() => {
            if schema.allow_empty {
                return Ok(Some(Value::String(s)));
            }
            if schema.empty_is_missing {
                None
            } else {
                Some(Value::String(s))
            }
        }
        other => other,
    };

    let Some(value) = value else {
        return match schema.presence {
            Presence::Required => Err(ViolationKind::Required),
            Presence::Optional => Ok(None),
        };
    };

    apply(&schema.rule, value).map(Some)
}

/// Apply the type-specific rule to a present value.
fn apply(rule: &Rule, value: Value) -> Result<Value, ViolationKind> {
    match rule {
        Rule::Any | Rule::DateParts(_) | Rule::When(_) => Ok(value),
        Rule::Text(text) => check_text(text, value),
        Rule::Number(number) => check_number(number, &value),
        Rule::Boolean => check_boolean(&value),
        Rule::Choice { values, multiple } => check_choice(values, *multiple, &value),
        Rule::IsoDate => match &value {
            Value::String(s) if NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").is_ok() => {
                Ok(Value::String(s.trim().to_string()))
            }
            _ => Err(ViolationKind::InvalidDate),
        },
    }
}

fn check_text(rule: &TextRule, value: Value) -> Result<Value, ViolationKind> {
    let Value::String(s) = value else {
        return Err(ViolationKind::WrongType);
    };
    if s.is_empty() {
        return Err(ViolationKind::Empty);
    }
    if let Some(limit) = rule.max_words {
        if word_count(&s) > limit {
            return Err(ViolationKind::TooManyWords);
        }
    } else if let Some(max) = rule.max
        && s.chars().count() > max
    {
        return Err(ViolationKind::TooLong);
    }
    let well_formed = match &rule.format {
        None => true,
        Some(TextFormat::Email) => EMAIL.is_match(&s),
        Some(TextFormat::Pattern(re)) => re.is_match(&s),
    };
    if !well_formed {
        return Err(ViolationKind::WrongFormat);
    }
    Ok(Value::String(s))
}

/// Parse a number from a JSON number or a numeric string.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn check_number(rule: &NumberRule, value: &Value) -> Result<Value, ViolationKind> {
    let n = parse_number(value).ok_or(ViolationKind::WrongType)?;
    if rule.integer && n.fract() != 0.0 {
        return Err(ViolationKind::NotInteger);
    }
    if rule.min.is_some_and(|min| n < min) {
        return Err(ViolationKind::TooSmall);
    }
    if rule.max.is_some_and(|max| n > max) {
        return Err(ViolationKind::TooLarge);
    }
    if rule.greater.is_some_and(|g| n <= g) {
        return Err(ViolationKind::NotGreater);
    }
    if rule.less.is_some_and(|l| n >= l) {
        return Err(ViolationKind::NotLess);
    }
    Ok(number_value(n))
}

fn check_boolean(value: &Value) -> Result<Value, ViolationKind> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        _ => Err(ViolationKind::WrongType),
    }
}

fn check_choice(values: &[Value], multiple: bool, value: &Value) -> Result<Value, ViolationKind> {
    let find = |key: &str| values.iter().find(|v| loose_key(v) == key).cloned();

    if !multiple {
        return find(&loose_key(value)).ok_or(ViolationKind::NotInList);
    }

    let keys = selected_keys(Some(value));
    let mut chosen = Vec::with_capacity(keys.len());
    for key in &keys {
        chosen.push(find(key).ok_or(ViolationKind::NotInList)?);
    }
    match (value, chosen.len()) {
        (Value::Array(_), _) => Ok(Value::Array(chosen)),
        (_, 1) => Ok(chosen.remove(0)),
        _ => Ok(Value::Array(chosen)),
    }
}

fn check_date_parts(
    presence: Presence,
    keys: &DatePartKeys,
    siblings: &FormData,
) -> Result<Option<Value>, ViolationKind> {
    let parts = [&keys.day, &keys.month, &keys.year].map(|k| form_text(siblings.get(k)));

    if parts.iter().all(String::is_empty) {
        return match presence {
            Presence::Required => Err(ViolationKind::Required),
            Presence::Optional => Ok(None),
        };
    }
    if parts.iter().any(String::is_empty) {
        return Err(ViolationKind::IncompleteDate);
    }

    date_from_parts(&parts).map(|d| Some(Value::String(d.format("%Y-%m-%d").to_string())))
}

/// Build a date from entered day, month and year text.
///
/// Parts must be whole numbers and together name a real calendar date, so
/// 31 November is rejected rather than rolled over into December.
pub(crate) fn date_from_parts(parts: &[String; 3]) -> Result<NaiveDate, ViolationKind> {
    let mut numbers = [0i64; 3];
    for (slot, part) in numbers.iter_mut().zip(parts) {
        match part.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e9 => *slot = n as i64,
            _ => return Err(ViolationKind::WrongType),
        }
    }
    let [day, month, year] = numbers;
    match (i32::try_from(year), u32::try_from(month), u32::try_from(day)) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d).ok_or(ViolationKind::InvalidDate),
        _ => Err(ViolationKind::InvalidDate),
    }
}

/// Number of words for word-limit checks.
///
/// Counts runs of ASCII word characters; text that starts with punctuation or
/// other non-word characters counts one extra word.
pub(crate) fn word_count(s: &str) -> usize {
    let runs = WORD.find_iter(s).count();
    let leading = s
        .chars()
        .next()
        .is_some_and(|c| !(c.is_ascii_alphanumeric() || c == '_'));
    runs + usize::from(leading)
}
