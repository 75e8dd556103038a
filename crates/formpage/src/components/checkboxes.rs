use serde_json::Value;

use super::{
    BuildContext,
    choice::{ChoiceList, ItemView, select_message},
    field::{self, FieldBase, FormField, text_for_errors},
};
use crate::{
    config::RequestConfig,
    definition::ListFieldDef,
    error::Error,
    schema::{FieldSchema, Rule, SchemaKeys, StateKind, StateSchema, ViolationKind},
    validation::Errors,
    value::{FormData, State, StateValue, selected_keys, selected_state_keys},
    view::{FieldModel, Fieldset, Items},
};

/// Several choices from a list, shown as checkboxes.
///
/// The submitted value may be a single value, an array of values, or a
/// comma-joined string; all three select the same items.
#[derive(Debug, Clone)]
pub struct CheckboxesField {
    /// Shared identity and options.
    base: FieldBase,
    /// The items.
    list: ChoiceList,
    /// Bold item labels.
    bold: bool,
    /// Items may reveal a free-text input.
    with_text: bool,
}

impl CheckboxesField {
    /// Build from a definition. `with_text` enables revealed text inputs.
    pub fn new(def: &ListFieldDef, ctx: &BuildContext<'_>, with_text: bool) -> Result<Self, Error> {
        let type_name = if with_text {
            "CheckboxesWithTextField"
        } else {
            "CheckboxesField"
        };
        let base = FieldBase::new(type_name, &def.field, &def.options.common)?;
        let mut list = ChoiceList::resolve(&base.name, def.options.list.as_ref(), ctx)?;
        if !with_text {
            for item in &mut list.items {
                item.text_field = None;
            }
        }
        Ok(Self {
            base,
            list,
            bold: def.options.bold,
            with_text,
        })
    }

    /// Whether items may reveal text inputs.
    pub fn with_text(&self) -> bool {
        self.with_text
    }

    /// The resolved list.
    pub fn list(&self) -> &ChoiceList {
        &self.list
    }
}

impl FormField for CheckboxesField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let schema = FieldSchema::new(Rule::Choice {
            values: self.list.items.iter().map(|i| i.value.clone()).collect(),
            multiple: true,
        })
        .label(text.title.clone())
        .presence(self.base.required)
        .empty_as_missing()
        .message(ViolationKind::Required, select_message(&self.base, config))
        .message(ViolationKind::Empty, select_message(&self.base, config))
        .message(
            ViolationKind::NotInList,
            format!("{} must be from the list", text.title),
        );

        let mut keys = SchemaKeys::single(&self.base.name, schema);
        keys.extend(self.list.conditional_schema_keys(&self.base.name, true, config));
        keys
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        schema.insert(
            &self.base.name,
            field::state_rule(
                &self.base,
                config,
                StateKind::Choice {
                    keys: self.list.keys(),
                    multiple: true,
                },
            ),
        );
        schema.extend(self.list.conditional_state_schema(config));
        schema
    }

    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        let mut form = FormData::new();
        if let Some(value) = state.get(&self.base.name) {
            let value = match value {
                StateValue::List(_) => Value::Array(
                    selected_state_keys(Some(value))
                        .into_iter()
                        .map(Value::String)
                        .collect(),
                ),
                other => Value::String(other.to_form_string()),
            };
            form.insert(self.base.name.clone(), value);
        }
        form.extend(self.list.conditional_form_data(state));
        (!form.is_empty()).then_some(form)
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        let mut state = field::state_from_valid_form(&self.base, form);
        let chosen = selected_keys(form.get(&self.base.name));
        state.extend(self.list.conditional_state(form, &chosen));
        state
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        let chosen = selected_keys(form_data.get(&self.base.name));
        let view = ItemView {
            config,
            form_data,
            errors,
        };
        let items = self
            .list
            .items
            .iter()
            .map(|item| {
                self.list
                    .item_model(item, chosen.contains(&item.key), self.bold, view)
            })
            .collect();
        model.fieldset = Some(Fieldset {
            legend: model.label.clone(),
        });
        model.items = Some(Items::Choices(items));
        model
    }

    fn display_string(&self, state: &State) -> String {
        selected_state_keys(state.get(&self.base.name))
            .iter()
            .filter_map(|key| self.list.find(key).map(|i| i.text.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
