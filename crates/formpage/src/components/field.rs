//! Behavior shared by every form component.
//!
//! The [`FormField`] trait's provided methods delegate to the free functions in
//! this module so that a component overriding a method can still call the
//! shared behavior and post-process its result.

use serde_json::Value;

use crate::{
    config::RequestConfig,
    definition::{CommonOptions, FieldDef},
    error::Error,
    schema::{FieldSchema, SchemaKeys, StateKind, StateRule, StateSchema},
    validation::Errors,
    value::{FormData, State, StateValue},
    view::{ErrorMessage, FieldModel, Hint, Label},
};

/// Label classes for a normal question.
pub(crate) const LABEL_CLASSES: &str = "govuk-label--s";

/// Identity, display text and common options of a form component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldBase {
    /// Field name.
    pub name: String,
    /// Question text.
    pub title: Option<String>,
    /// Hint HTML.
    pub hint: Option<String>,
    /// Title used in error messages.
    pub title_for_error: Option<String>,
    /// Whether an answer is required.
    pub required: bool,
    /// CSS classes for the input.
    pub classes: Option<String>,
    /// Render the label as the page heading.
    pub is_page_heading: bool,
}

impl FieldBase {
    /// Build from a definition, rejecting a blank name.
    pub fn new(type_name: &str, field: &FieldDef, common: &CommonOptions) -> Result<Self, Error> {
        if field.name.trim().is_empty() {
            return Err(Error::definition(format!(
                "{type_name} component is missing a name"
            )));
        }
        Ok(Self {
            name: field.name.clone(),
            title: field.title.clone(),
            hint: field.hint.clone(),
            title_for_error: field.title_for_error.clone(),
            required: common.required != Some(false),
            classes: common.classes.clone(),
            is_page_heading: common.is_page_heading,
        })
    }

    /// Use `classes` when none were configured.
    pub(crate) fn default_classes(mut self, classes: &str) -> Self {
        if self.classes.is_none() {
            self.classes = Some(classes.to_string());
        }
        self
    }
}

/// Title and name of a field as they appear in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorText {
    /// Sentence-start form, e.g. `Date of birth`.
    pub title: String,
    /// Mid-sentence form, e.g. `date of birth`.
    pub name: String,
}

/// Error text for a field, honoring request overrides.
pub fn text_for_errors(base: &FieldBase, config: &RequestConfig) -> ErrorText {
    let overrides = config.component(&base.name);
    let title = overrides
        .and_then(|o| o.title_for_error.clone().or_else(|| o.title.clone()))
        .or_else(|| base.title_for_error.clone())
        .or_else(|| base.title.clone())
        .unwrap_or_else(|| capitalize(&base.name));
    let name = lower_first(&title);
    ErrorText { title, name }
}

/// Upper-case the first character.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character.
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label text: the (possibly overridden) title, marked when optional.
pub fn label_text(base: &FieldBase, config: &RequestConfig) -> String {
    let title = config
        .component(&base.name)
        .and_then(|o| o.title.clone())
        .or_else(|| base.title.clone())
        .unwrap_or_else(|| base.name.clone());
    if base.required {
        title
    } else {
        format!("{title} (optional)")
    }
}

/// The standard field model: id, name, label, hint, value and first error.
pub fn base_view_model(
    base: &FieldBase,
    config: &RequestConfig,
    form_data: &FormData,
    errors: Option<&Errors>,
) -> FieldModel {
    let hint = config
        .component(&base.name)
        .and_then(|o| o.hint.clone())
        .or_else(|| base.hint.clone());
    FieldModel {
        id: base.name.clone(),
        name: base.name.clone(),
        classes: base.classes.clone(),
        label: Label {
            text: label_text(base, config),
            classes: Some(LABEL_CLASSES.to_string()),
            html: None,
            is_page_heading: base.is_page_heading,
        },
        value: form_data.get(&base.name).cloned(),
        hint: hint.map(|html| Hint { html }),
        error_message: errors
            .and_then(|e| e.first_for(&base.name))
            .map(|text| ErrorMessage {
                text: text.to_string(),
            }),
        ..FieldModel::default()
    }
}

/// The form value of a state entry; `None` when the state lacks the key.
pub fn form_data_from_state(base: &FieldBase, state: &State) -> Option<FormData> {
    let value = state.get(&base.name)?;
    let mut form = FormData::new();
    form.insert(base.name.clone(), Value::String(value.to_form_string()));
    Some(form)
}

/// The state entry of a validated form value; blank or absent becomes null.
pub fn state_from_valid_form(base: &FieldBase, form: &FormData) -> State {
    let value = match form.get(&base.name) {
        None | Some(Value::Null) => StateValue::Null,
        Some(Value::String(s)) if s.is_empty() => StateValue::Null,
        Some(v) => StateValue::from_form(v),
    };
    State::from([(base.name.clone(), value)])
}

/// Default display string: the state value as text, blank when absent or null.
pub fn display_string(base: &FieldBase, state: &State) -> String {
    state
        .get(&base.name)
        .map(StateValue::to_form_string)
        .unwrap_or_default()
}

/// State rule of the given kind, honoring required/optional.
pub fn state_rule(base: &FieldBase, config: &RequestConfig, kind: StateKind) -> StateRule {
    StateRule::new(text_for_errors(base, config).title, base.required, kind)
}

/// Capabilities of a component that takes part in a form.
pub trait FormField {
    /// Shared identity and options.
    fn base(&self) -> &FieldBase;

    /// Field name.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// This field's contribution to the page schema.
    fn form_schema_keys(&self, _config: &RequestConfig) -> SchemaKeys {
        SchemaKeys::single(self.name(), FieldSchema::any())
    }

    /// This field's contribution to the state schema. Unconstrained by default.
    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let label = text_for_errors(self.base(), config).title;
        let mut schema = StateSchema::new();
        schema.insert(self.name(), StateRule::new(label, false, StateKind::Any));
        schema
    }

    /// Form data to render for the given state.
    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        form_data_from_state(self.base(), state)
    }

    /// State update for a validated submission.
    fn state_from_valid_form(&self, form: &FormData) -> State {
        state_from_valid_form(self.base(), form)
    }

    /// Render-ready model.
    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        base_view_model(self.base(), config, form_data, errors)
    }

    /// Human-readable rendering of the stored answer.
    fn display_string(&self, state: &State) -> String {
        display_string(self.base(), state)
    }
}
