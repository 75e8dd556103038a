use serde_json::Value;

use super::{
    choice::select_message,
    field::{self, FieldBase, FormField, text_for_errors},
};
use crate::{
    config::RequestConfig,
    definition::YesNoFieldDef,
    error::Error,
    schema::{FieldSchema, Rule, SchemaKeys, StateKind, StateSchema, ViolationKind},
    validation::Errors,
    value::{FormData, State, StateValue, loose_key},
    view::{FieldModel, Fieldset, ItemModel, Items},
};

/// A boolean question answered with Yes or No radios.
#[derive(Debug, Clone)]
pub struct YesNoField {
    /// Shared identity and options.
    base: FieldBase,
    /// Items in display order.
    items: [(&'static str, bool); 2],
}

impl YesNoField {
    /// Build from a definition.
    pub fn new(def: &YesNoFieldDef) -> Result<Self, Error> {
        let base = FieldBase::new("YesNoField", &def.field, &def.options.common)?
            .default_classes("govuk-radios--inline");
        let yes = ("Yes", true);
        let no = ("No", false);
        let items = if def.options.yes_first != Some(false) {
            [yes, no]
        } else {
            [no, yes]
        };
        Ok(Self { base, items })
    }
}

impl FormField for YesNoField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let schema = FieldSchema::new(Rule::Boolean)
            .label(text.title.clone())
            .presence(self.base.required)
            .empty_as_missing()
            .message(ViolationKind::Required, select_message(&self.base, config))
            .message(ViolationKind::Empty, select_message(&self.base, config))
            .message(
                ViolationKind::WrongType,
                format!(
                    "{} must be {} or {}",
                    text.title, self.items[0].0, self.items[1].0
                ),
            );
        SchemaKeys::single(&self.base.name, schema)
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        schema.insert(
            &self.base.name,
            field::state_rule(&self.base, config, StateKind::Boolean),
        );
        schema
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        let current = form_data.get(&self.base.name).map(loose_key);
        let items = self
            .items
            .iter()
            .map(|(text, value)| ItemModel {
                text: (*text).to_string(),
                value: Some(Value::Bool(*value)),
                checked: Some(current.as_deref() == Some(if *value { "true" } else { "false" })),
                ..ItemModel::default()
            })
            .collect();
        model.fieldset = Some(Fieldset {
            legend: model.label.clone(),
        });
        model.items = Some(Items::Choices(items));
        model
    }

    fn display_string(&self, state: &State) -> String {
        match state.get(&self.base.name) {
            Some(StateValue::Bool(b)) => self
                .items
                .iter()
                .find(|(_, v)| v == b)
                .map(|(text, _)| (*text).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}
