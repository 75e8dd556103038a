use std::collections::BTreeMap;

use serde_json::Value;

use super::{
    Component,
    field::{self, FieldBase, FormField},
    text::TextField,
};
use crate::{
    collection::ComponentCollection,
    config::RequestConfig,
    definition::AddressFieldDef,
    error::Error,
    schema::{SchemaKeys, StateKind, StateRule, StateSchema},
    validation::Errors,
    value::{FormData, State, StateValue, form_text},
    view::{FieldModel, Fieldset},
};

/// Address lines: record key, title, character limit, and whether the line is
/// optional regardless of the field's own `required` option.
const LINES: [(&str, &str, usize, bool); 5] = [
    ("premises", "Premises", 100, false),
    ("street", "Street", 100, true),
    ("locality", "Locality", 100, true),
    ("town", "Town", 100, false),
    ("postcode", "Postcode", 10, false),
];

/// A UK postal address entered as five text inputs named `<name>__<line>`.
///
/// State holds a single record keyed by line, or null when no premises were
/// entered.
#[derive(Debug, Clone)]
pub struct UkAddressField {
    /// Shared identity and options.
    base: FieldBase,
    /// The line inputs.
    children: ComponentCollection,
}

impl UkAddressField {
    /// Build from a definition.
    pub fn new(def: &AddressFieldDef) -> Result<Self, Error> {
        let base = FieldBase::new("UkAddressField", &def.field, &def.options)?;
        let children = LINES
            .iter()
            .map(|(key, title, max, always_optional)| {
                Component::Text(TextField::plain(
                    line_name(&base.name, key),
                    title,
                    *max,
                    base.required && !always_optional,
                ))
            })
            .collect();
        Ok(Self {
            children: ComponentCollection::from_components(children),
            base,
        })
    }

    /// The line inputs.
    pub fn children(&self) -> &ComponentCollection {
        &self.children
    }
}

fn line_name(name: &str, key: &str) -> String {
    format!("{name}__{key}")
}

impl FormField for UkAddressField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        self.children.form_schema_keys(config)
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let fields = LINES
            .iter()
            .map(|(key, title, _, always_optional)| {
                let required = self.base.required && !always_optional;
                ((*key).to_string(), StateRule::new(*title, required, StateKind::Text))
            })
            .collect();
        let mut schema = StateSchema::new();
        schema.insert(
            &self.base.name,
            field::state_rule(&self.base, config, StateKind::Record(fields)),
        );
        schema
    }

    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        let record = state.get(&self.base.name).and_then(StateValue::as_record);
        Some(
            LINES
                .iter()
                .map(|(key, ..)| {
                    let value = record
                        .and_then(|r| r.get(*key))
                        .map(StateValue::to_form_string)
                        .unwrap_or_default();
                    (line_name(&self.base.name, key), Value::String(value))
                })
                .collect(),
        )
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        let line = |key: &str| form_text(form.get(&line_name(&self.base.name, key)));
        let value = if line("premises").is_empty() {
            StateValue::Null
        } else {
            let record: BTreeMap<String, StateValue> = LINES
                .iter()
                .map(|(key, ..)| {
                    let text = line(*key);
                    let value = if text.is_empty() {
                        StateValue::Null
                    } else {
                        StateValue::Text(text)
                    };
                    ((*key).to_string(), value)
                })
                .collect();
            StateValue::Record(record)
        };
        State::from([(self.base.name.clone(), value)])
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        model.fieldset = Some(Fieldset {
            legend: model.label.clone(),
        });
        model.children = Some(self.children.view_model(config, form_data, errors));
        model
    }

    fn display_string(&self, state: &State) -> String {
        let Some(record) = state.get(&self.base.name).and_then(StateValue::as_record) else {
            return String::new();
        };
        LINES
            .iter()
            .filter_map(|(key, ..)| record.get(*key))
            .map(StateValue::to_form_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
