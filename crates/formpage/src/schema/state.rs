//! Constraints on the typed state produced from a valid submission.

use std::collections::BTreeMap;

use tracing::trace;

use super::{Violation, ViolationKind};
use crate::value::{State, StateValue};

/// Expected shape of one state value.
#[derive(Debug, Clone, PartialEq)]
pub enum StateKind {
    /// Any value.
    Any,
    /// A string.
    Text,
    /// A number.
    Number,
    /// A boolean.
    Boolean,
    /// A calendar date.
    Date,
    /// One (or, when `multiple`, several) of the given canonical keys.
    Choice {
        /// Allowed canonical keys.
        keys: Vec<String>,
        /// Accept a list of values.
        multiple: bool,
    },
    /// A nested record with its own rules.
    Record(Vec<(String, StateRule)>),
}

impl StateKind {
    /// Noun used in type messages.
    fn noun(&self) -> &'static str {
        match self {
            Self::Any => "value",
            Self::Text => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Choice { .. } => "choice",
            Self::Record(_) => "record",
        }
    }
}

/// Constraint on one state value.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRule {
    /// Label used in messages.
    pub label: String,
    /// A null or missing value is a violation.
    pub required: bool,
    /// Expected shape.
    pub kind: StateKind,
}

impl StateRule {
    /// Build a rule.
    pub fn new(label: impl Into<String>, required: bool, kind: StateKind) -> Self {
        Self {
            label: label.into(),
            required,
            kind,
        }
    }

    /// The same rule with nulls accepted.
    pub fn relaxed(&self) -> Self {
        Self {
            required: false,
            ..self.clone()
        }
    }

    fn check(&self, value: Option<&StateValue>, path: &mut Vec<String>, out: &mut Vec<Violation>) {
        let value = match value {
            None | Some(StateValue::Null) => {
                if self.required {
                    out.push(self.violation(path, ViolationKind::Required));
                }
                return;
            }
            Some(v) => v,
        };

        let ok = match (&self.kind, value) {
            (StateKind::Any, _)
            | (StateKind::Text, StateValue::Text(_))
            | (StateKind::Number, StateValue::Number(_))
            | (StateKind::Boolean, StateValue::Bool(_))
            | (StateKind::Date, StateValue::Date(_)) => true,
            (StateKind::Date, v @ StateValue::Text(_)) => v.as_date().is_some(),
            (StateKind::Choice { keys, multiple }, v) => {
                let in_list = |v: &StateValue| keys.contains(&v.loose_key());
                match v {
                    StateValue::List(items) if *multiple => items.iter().all(in_list),
                    StateValue::List(_) | StateValue::Record(_) => false,
                    scalar => in_list(scalar),
                }
            }
            (StateKind::Record(rules), StateValue::Record(record)) => {
                check_record(rules, record, path, out);
                true
            }
            _ => false,
        };

        if !ok {
            let kind = match self.kind {
                StateKind::Choice { .. } => ViolationKind::NotInList,
                _ => ViolationKind::WrongType,
            };
            out.push(self.violation(path, kind));
        }
    }

    fn violation(&self, path: &[String], kind: ViolationKind) -> Violation {
        let message = match kind {
            ViolationKind::Required => format!("{} is required", self.label),
            ViolationKind::NotInList => format!("{} must be from the list", self.label),
            _ => format!("{} must be a {}", self.label, self.kind.noun()),
        };
        Violation {
            path: path.to_vec(),
            kind,
            message,
        }
    }
}

fn check_record(
    rules: &[(String, StateRule)],
    record: &BTreeMap<String, StateValue>,
    path: &mut Vec<String>,
    out: &mut Vec<Violation>,
) {
    for (key, rule) in rules {
        path.push(key.clone());
        rule.check(record.get(key), path, out);
        path.pop();
    }
}

/// Named state rules in contribution order; later entries replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct StateSchema {
    /// Rules in order.
    rules: Vec<(String, StateRule)>,
}

impl StateSchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, name: impl Into<String>, rule: StateRule) {
        let name = name.into();
        match self.rules.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = rule,
            None => self.rules.push((name, rule)),
        }
    }

    /// Merge another schema into this one; later entries win.
    pub fn extend(&mut self, other: Self) {
        for (name, rule) in other.rules {
            self.insert(name, rule);
        }
    }

    /// Look up a rule.
    pub fn get(&self, name: &str) -> Option<&StateRule> {
        self.rules.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Every rule with nulls accepted.
    pub fn relaxed(self) -> Self {
        Self {
            rules: self
                .rules
                .into_iter()
                .map(|(n, r)| (n, r.relaxed()))
                .collect(),
        }
    }

    /// Rules as record fields, for nesting inside a [`StateKind::Record`].
    pub fn into_fields(self) -> Vec<(String, StateRule)> {
        self.rules
    }

    /// Validate a state update. Keys without a rule are ignored.
    pub fn validate(&self, state: &State) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        check_record(&self.rules, state, &mut path, &mut out);
        trace!(
            rules = self.rules.len(),
            violations = out.len(),
            "validated state"
        );
        out
    }
}
