//! A small declarative validation engine for flat form submissions.
//!
//! Each form component contributes one or more named [`FieldSchema`] entries;
//! entries are merged into an [`ObjectSchema`] per collection level and run
//! against submitted form data with every violation collected.

mod state;
mod validate;

use std::{collections::BTreeMap, vec};

use regex::Regex;
use serde_json::Value;

pub use state::{StateKind, StateRule, StateSchema};
pub use validate::{Validated, Violation};
pub(crate) use validate::{date_from_parts, parse_number, word_count};

/// Whether a field must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A missing value is a violation.
    Required,
    /// A missing value is accepted and left out of the result.
    Optional,
}

/// Violation categories, each carrying its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationKind {
    /// Value absent.
    Required,
    /// Value present but the empty string.
    Empty,
    /// More characters than allowed.
    TooLong,
    /// More words than allowed.
    TooManyWords,
    /// Value of the wrong type (e.g. not a number, not a boolean).
    WrongType,
    /// Number is not a whole number.
    NotInteger,
    /// Number below the inclusive minimum.
    TooSmall,
    /// Number above the inclusive maximum.
    TooLarge,
    /// Number not above the exclusive lower bound.
    NotGreater,
    /// Number not below the exclusive upper bound.
    NotLess,
    /// Value is not one of the allowed values.
    NotInList,
    /// Value does not match the required format.
    WrongFormat,
    /// Some but not all parts of a date were entered.
    IncompleteDate,
    /// Date parts do not form a real calendar date.
    InvalidDate,
}

/// Format constraint for text values.
#[derive(Debug, Clone)]
pub enum TextFormat {
    /// Plausible email address.
    Email,
    /// Whole value must match the pattern.
    Pattern(Regex),
}

/// Constraints for string values.
#[derive(Debug, Clone, Default)]
pub struct TextRule {
    /// Trim surrounding whitespace before checking.
    pub trim: bool,
    /// Maximum number of characters.
    pub max: Option<usize>,
    /// Maximum number of words.
    pub max_words: Option<usize>,
    /// Format constraint.
    pub format: Option<TextFormat>,
}

/// Constraints for numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRule {
    /// Reject fractional numbers.
    pub integer: bool,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Exclusive lower bound.
    pub greater: Option<f64>,
    /// Exclusive upper bound.
    pub less: Option<f64>,
}

/// Names of the three inputs of a date-parts field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePartKeys {
    /// Day input name.
    pub day: String,
    /// Month input name.
    pub month: String,
    /// Year input name.
    pub year: String,
}

/// Type-specific constraint of a field.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Anything goes.
    Any,
    /// A string.
    Text(TextRule),
    /// A number; numeric strings are converted.
    Number(NumberRule),
    /// A boolean; `"true"`/`"false"` strings are converted.
    Boolean,
    /// One (or, when `multiple`, several) of the given values, compared loosely.
    Choice {
        /// Allowed values, typed as declared in the list.
        values: Vec<Value>,
        /// Accept several values (array or comma-joined string).
        multiple: bool,
    },
    /// The field's value is checked against three sibling part inputs.
    DateParts(DatePartKeys),
    /// An ISO `YYYY-MM-DD` date string.
    IsoDate,
    /// Pick a schema depending on another field's submitted value.
    When(Box<Conditional>),
}

/// A schema chosen by whether `controller` includes `value_key`.
#[derive(Debug, Clone)]
pub struct Conditional {
    /// Name of the controlling field.
    pub controller: String,
    /// Canonical key of the controlling value.
    pub value_key: String,
    /// Whether the controller is multi-select. A single-choice controller
    /// matches its whole value, commas included.
    pub multiple: bool,
    /// Schema used when the value is selected.
    pub then: FieldSchema,
    /// Schema used otherwise.
    pub otherwise: FieldSchema,
}

/// Validation schema for one named field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Label used in default messages.
    pub label: String,
    /// Whether the field must be supplied.
    pub presence: Presence,
    /// Treat `""` as if the value were missing.
    pub empty_is_missing: bool,
    /// Accept `""` as a valid value.
    pub allow_empty: bool,
    /// Accept `null` as a valid value.
    pub allow_null: bool,
    /// The type-specific constraint.
    pub rule: Rule,
    /// Custom messages by violation kind.
    pub messages: BTreeMap<ViolationKind, String>,
}

impl FieldSchema {
    /// A schema with the given rule, required by default.
    pub fn new(rule: Rule) -> Self {
        Self {
            label: String::new(),
            presence: Presence::Required,
            empty_is_missing: false,
            allow_empty: false,
            allow_null: false,
            rule,
            messages: BTreeMap::new(),
        }
    }

    /// An unconstrained, optional schema.
    pub fn any() -> Self {
        Self::new(Rule::Any).optional()
    }

    /// A conditional schema.
    pub fn when(conditional: Conditional) -> Self {
        let label = conditional.then.label.clone();
        Self {
            label,
            ..Self::new(Rule::When(Box::new(conditional)))
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Require a value.
    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    /// Accept a missing value.
    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    /// Required or optional depending on the flag.
    pub fn presence(self, required: bool) -> Self {
        if required {
            self.required()
        } else {
            self.optional()
        }
    }

    /// Treat `""` as missing.
    pub fn empty_as_missing(mut self) -> Self {
        self.empty_is_missing = true;
        self
    }

    /// Accept `""`.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Accept `null`.
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Set the message for a violation kind.
    pub fn message(mut self, kind: ViolationKind, text: impl Into<String>) -> Self {
        self.messages.insert(kind, text.into());
        self
    }

    /// A version of this schema that accepts anything, including nothing.
    ///
    /// Used for nested fields whose controlling item is not selected: their
    /// values are discarded when state is built, so they are not checked.
    pub fn relaxed(&self) -> Self {
        Self {
            presence: Presence::Optional,
            allow_empty: true,
            allow_null: true,
            rule: Rule::Any,
            ..self.clone()
        }
    }

    /// The message reported for a violation.
    pub fn message_for(&self, kind: ViolationKind) -> String {
        if let Some(text) = self.messages.get(&kind) {
            return text.clone();
        }
        let label = if self.label.is_empty() {
            "Value"
        } else {
            self.label.as_str()
        };
        match kind {
            ViolationKind::Required => format!("{label} is required"),
            ViolationKind::Empty => format!("{label} is not allowed to be empty"),
            ViolationKind::TooLong => format!("{label} is too long"),
            ViolationKind::TooManyWords => format!("{label} has too many words"),
            ViolationKind::WrongType => format!("{label} is not the right type"),
            ViolationKind::NotInteger => format!("{label} must be a whole number"),
            ViolationKind::TooSmall | ViolationKind::NotGreater => format!("{label} is too small"),
            ViolationKind::TooLarge | ViolationKind::NotLess => format!("{label} is too large"),
            ViolationKind::NotInList => format!("{label} must be from the list"),
            ViolationKind::WrongFormat => format!("{label} is in the wrong format"),
            ViolationKind::IncompleteDate => format!("{label} must include a day, month and year"),
            ViolationKind::InvalidDate => format!("{label} must be a real date"),
        }
    }
}

/// Named field schemas in contribution order.
///
/// Inserting a name that is already present replaces the earlier entry in place.
#[derive(Debug, Clone, Default)]
pub struct SchemaKeys {
    /// Entries in order.
    entries: Vec<(String, FieldSchema)>,
}

impl SchemaKeys {
    /// Empty set of keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry set.
    pub fn single(name: impl Into<String>, schema: FieldSchema) -> Self {
        let mut keys = Self::new();
        keys.insert(name, schema);
        keys
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, schema: FieldSchema) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = schema,
            None => self.entries.push((name, schema)),
        }
    }

    /// Merge another set into this one; later entries win.
    pub fn extend(&mut self, other: Self) {
        for (name, schema) in other.entries {
            self.insert(name, schema);
        }
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Entry names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for SchemaKeys {
    type Item = (String, FieldSchema);
    type IntoIter = vec::IntoIter<(String, FieldSchema)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Schema for a whole submission: one object with named keys.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    /// The merged keys.
    pub keys: SchemaKeys,
}

impl ObjectSchema {
    /// Wrap merged keys.
    pub fn new(keys: SchemaKeys) -> Self {
        Self { keys }
    }
}
