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
    value::{FormData, State, loose_key},
    view::{FieldModel, Fieldset, Items},
};

/// A single choice from a list, shown as radio buttons.
#[derive(Debug, Clone)]
pub struct RadiosField {
    /// Shared identity and options.
    base: FieldBase,
    /// The items.
    list: ChoiceList,
    /// Items can be narrowed per request.
    filterable: bool,
    /// Bold item labels.
    bold: bool,
}

impl RadiosField {
    /// Build from a definition.
    pub fn new(def: &ListFieldDef, ctx: &BuildContext<'_>) -> Result<Self, Error> {
        let base = FieldBase::new("RadiosField", &def.field, &def.options.common)?;
        let list = ChoiceList::resolve(&base.name, def.options.list.as_ref(), ctx)?;
        Ok(Self {
            base,
            list,
            filterable: def.options.filterable,
            bold: def.options.bold,
        })
    }

    /// The resolved list.
    pub fn list(&self) -> &ChoiceList {
        &self.list
    }

    /// Canonical key of the submitted choice.
    fn chosen(&self, form: &FormData) -> Vec<String> {
        match form.get(&self.base.name) {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => vec![loose_key(v)],
        }
    }
}

impl FormField for RadiosField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let values = self
            .list
            .offered(&self.base.name, self.filterable, config)
            .into_iter()
            .map(|i| i.value.clone())
            .collect();
        let schema = FieldSchema::new(Rule::Choice {
            values,
            multiple: false,
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
        keys.extend(self.list.conditional_schema_keys(&self.base.name, false, config));
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
                    multiple: false,
                },
            ),
        );
        schema.extend(self.list.conditional_state_schema(config));
        schema
    }

    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        let mut form = field::form_data_from_state(&self.base, state)?;
        form.extend(self.list.conditional_form_data(state));
        Some(form)
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        let mut state = field::state_from_valid_form(&self.base, form);
        state.extend(self.list.conditional_state(form, &self.chosen(form)));
        state
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        let chosen = self.chosen(form_data);
        let view = ItemView {
            config,
            form_data,
            errors,
        };
        let items = self
            .list
            .offered(&self.base.name, self.filterable, config)
            .into_iter()
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
        state
            .get(&self.base.name)
            .and_then(|v| self.list.text_for(v))
            .unwrap_or_default()
            .to_string()
    }
}
