//! Text-like inputs.
//!
//! One [`TextField`] covers every text variant; the [`TextKind`] selects the
//! variant-specific defaults, schema additions and view-model tweaks that are
//! applied on top of the shared text behavior.

use regex::Regex;
use serde_json::Value;

use super::field::{self, FieldBase, FormField, text_for_errors};
use crate::{
    config::RequestConfig,
    currency::to_currency,
    definition::{Affix, TextFieldDef},
    error::Error,
    schema::{
        FieldSchema, Rule, SchemaKeys, StateKind, StateSchema, TextFormat, TextRule, ViolationKind,
    },
    validation::Errors,
    value::{FormData, State, StateValue, format_number},
    view::FieldModel,
};

/// Which text variant a [`TextField`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// `TextField`.
    Plain,
    /// `MultilineTextField`.
    Multiline,
    /// `CharacterCountField`.
    CharacterCount,
    /// `EmailAddressField`.
    Email,
    /// `NamesField`.
    Names,
    /// `TelephoneNumberField`.
    Telephone,
    /// `CurrencyField`.
    Currency,
}

impl TextKind {
    /// Component type name.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Plain => "TextField",
            Self::Multiline => "MultilineTextField",
            Self::CharacterCount => "CharacterCountField",
            Self::Email => "EmailAddressField",
            Self::Names => "NamesField",
            Self::Telephone => "TelephoneNumberField",
            Self::Currency => "CurrencyField",
        }
    }

    /// Classes used when the definition sets none.
    fn default_classes(self) -> Option<&'static str> {
        match self {
            Self::Email | Self::Names => Some("govuk-input--width-20"),
            Self::Telephone | Self::Currency => Some("govuk-input--width-10"),
            _ => None,
        }
    }

    /// Autocomplete token emitted when `options.autocomplete` is set.
    fn autocomplete(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("email"),
            Self::Names => Some("name"),
            Self::Telephone => Some("tel"),
            _ => None,
        }
    }

    fn is_textarea(self) -> bool {
        matches!(self, Self::Multiline | Self::CharacterCount)
    }
}

/// A text input or textarea.
#[derive(Debug, Clone)]
pub struct TextField {
    /// Shared identity and options.
    base: FieldBase,
    /// Variant.
    kind: TextKind,
    /// Character limit.
    max: Option<usize>,
    /// Word limit; takes precedence over `max`.
    max_words: Option<usize>,
    /// Textarea rows.
    rows: Option<u32>,
    /// Character count threshold.
    threshold: Option<u32>,
    /// Emit an autocomplete hint.
    autocomplete: bool,
    /// Text before the input.
    prefix: Option<Affix>,
    /// Text after the input.
    suffix: Option<Affix>,
    /// Precomputed rule.
    rule: TextRule,
}

impl TextField {
    /// Build a text field of the given variant.
    pub fn new(kind: TextKind, def: &TextFieldDef) -> Result<Self, Error> {
        let mut base = FieldBase::new(kind.type_name(), &def.field, &def.options.common)?;
        if let Some(classes) = kind.default_classes() {
            base = base.default_classes(classes);
        }

        let mut prefix = def.options.prefix.clone();
        if kind == TextKind::Currency && prefix.is_none() {
            prefix = Some(Affix {
                text: "£".to_string(),
            });
        }

        let format = match kind {
            TextKind::Email => Some(TextFormat::Email),
            TextKind::Currency => {
                let symbols = prefix.as_ref().map(|p| regex::escape(&p.text)).unwrap_or_default();
                let pattern =
                    format!(r"^[0-9,{symbols}]*(?:[0-9][0-9,]*(?:\.[0-9]*)?|\.[0-9]+)$");
                let re = Regex::new(&pattern).map_err(|e| {
                    Error::definition(format!("{}: invalid currency prefix: {e}", base.name))
                })?;
                Some(TextFormat::Pattern(re))
            }
            _ => None,
        };

        let max_words = def.schema.maxwords.filter(|n| *n > 0);
        let rule = TextRule {
            trim: def.schema.trim != Some(false),
            max: if max_words.is_some() { None } else { def.schema.max },
            max_words,
            format,
        };

        Ok(Self {
            base,
            kind,
            max: def.schema.max,
            max_words,
            rows: def.options.rows,
            threshold: def.options.threshold,
            autocomplete: def.options.autocomplete,
            prefix,
            suffix: def.options.suffix.clone(),
            rule,
        })
    }

    /// Build a plain text field directly, as composite fields do for their parts.
    pub(crate) fn plain(name: String, title: &str, max: usize, required: bool) -> Self {
        Self {
            base: FieldBase {
                name,
                title: Some(title.to_string()),
                required,
                ..FieldBase::default()
            },
            kind: TextKind::Plain,
            max: Some(max),
            max_words: None,
            rows: None,
            threshold: None,
            autocomplete: false,
            prefix: None,
            suffix: None,
            rule: TextRule {
                trim: true,
                max: Some(max),
                ..TextRule::default()
            },
        }
    }

    /// Variant of this field.
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// The field schema with messages for the given error text.
    fn schema(&self, config: &RequestConfig) -> FieldSchema {
        let text = text_for_errors(&self.base, config);
        let mut schema = FieldSchema::new(Rule::Text(self.rule.clone()))
            .label(text.title.clone())
            .presence(self.base.required)
            .message(ViolationKind::Required, format!("Enter {}", text.name))
            .message(ViolationKind::Empty, format!("Enter {}", text.name));
        if !self.base.required {
            schema = schema.allow_empty();
        }
        if let Some(max) = self.rule.max {
            schema = schema.message(
                ViolationKind::TooLong,
                format!("{} must be {max} characters or fewer", text.title),
            );
        }
        if let Some(words) = self.max_words {
            schema = schema.message(
                ViolationKind::TooManyWords,
                format!("{} must be {words} words or fewer", text.title),
            );
        }
        match self.kind {
            TextKind::Email => schema.message(
                ViolationKind::WrongFormat,
                format!("Enter {} in the correct format", text.name),
            ),
            TextKind::Currency => schema.message(
                ViolationKind::WrongFormat,
                format!("{} must be a number", text.title),
            ),
            _ => schema,
        }
    }
}

impl FormField for TextField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        SchemaKeys::single(&self.base.name, self.schema(config))
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let kind = match self.kind {
            TextKind::Currency => StateKind::Number,
            _ => StateKind::Text,
        };
        let mut schema = StateSchema::new();
        schema.insert(&self.base.name, field::state_rule(&self.base, config, kind));
        schema
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        if self.kind != TextKind::Currency {
            return field::state_from_valid_form(&self.base, form);
        }
        let amount = match form.get(&self.base.name) {
            Some(Value::String(s)) => to_currency(s),
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        };
        State::from([(
            self.base.name.clone(),
            amount.map_or(StateValue::Null, StateValue::Number),
        )])
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        model.prefix = self.prefix.clone();
        model.suffix = self.suffix.clone();
        if self.max_words.is_none() {
            model.attributes.maxlength = self.max;
        }
        if self.kind.is_textarea() {
            model.rows = self.rows;
        }
        if self.kind == TextKind::CharacterCount {
            model.attributes.maxlength = None;
            if self.max_words.is_some() {
                model.maxwords = self.max_words;
            } else {
                model.maxlength = self.max;
            }
            model.threshold = self.threshold;
        }
        match self.kind {
            TextKind::Email => model.input_type = Some("email".to_string()),
            TextKind::Telephone => model.input_type = Some("tel".to_string()),
            _ => {}
        }
        if matches!(self.kind, TextKind::Email | TextKind::Names | TextKind::Currency) {
            model.attributes.spellcheck = Some("false".to_string());
        }
        if self.autocomplete {
            model.autocomplete = self.kind.autocomplete().map(str::to_string);
        }
        model
    }

    fn display_string(&self, state: &State) -> String {
        match state.get(&self.base.name) {
            Some(StateValue::Number(n)) => format_number(*n),
            _ => field::display_string(&self.base, state),
        }
    }
}
