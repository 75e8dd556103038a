//! Display-ready validation errors.

use serde::{Deserialize, Serialize};

use crate::schema::Violation;

/// Title of the page-level error summary.
pub const ERROR_SUMMARY_TITLE: &str = "Fix the following errors";

/// A set of user-facing errors for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Errors {
    /// Summary heading.
    pub title_text: String,
    /// One entry per violation, in field order.
    pub error_list: Vec<ErrorItem>,
}

/// One user-facing error, anchored to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Fragment link to the input, e.g. `#address__postcode`.
    pub href: String,
    /// Field name the error belongs to (`__`-joined for nested values).
    pub name: String,
    /// Message.
    pub text: String,
    /// Dotted path to the value, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorItem {
    /// An error for a named field.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            href: format!("#{name}"),
            path: Some(name.clone()),
            name,
            text: text.into(),
        }
    }
}

impl From<&Violation> for ErrorItem {
    fn from(v: &Violation) -> Self {
        let name = v.path.join("__");
        Self {
            href: format!("#{name}"),
            name,
            text: v.message.clone(),
            path: Some(v.path.join(".")),
        }
    }
}

impl Errors {
    /// Errors with the standard summary title.
    pub fn new(error_list: Vec<ErrorItem>) -> Self {
        Self {
            title_text: ERROR_SUMMARY_TITLE.to_string(),
            error_list,
        }
    }

    /// Convert violations, or `None` when there are none.
    pub fn from_violations(violations: &[Violation]) -> Option<Self> {
        if violations.is_empty() {
            return None;
        }
        Some(Self::new(violations.iter().map(ErrorItem::from).collect()))
    }

    /// The first message reported for a field.
    pub fn first_for(&self, name: &str) -> Option<&str> {
        self.error_list
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.text.as_str())
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.error_list.len()
    }

    /// Whether there are no errors.
    pub fn is_empty(&self) -> bool {
        self.error_list.is_empty()
    }
}

/// Outcome of validating a submission or a state update.
#[derive(Debug, Clone)]
pub struct ValidationResult<T> {
    /// The converted value (meaningful only when `errors` is `None`).
    pub value: T,
    /// Errors, if any constraint failed.
    pub errors: Option<Errors>,
}

impl<T> ValidationResult<T> {
    /// Whether validation succeeded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }
}
