use std::iter;

use super::{
    BuildContext,
    choice::{ChoiceList, select_message},
    field::{self, FieldBase, FormField, text_for_errors},
};
use crate::{
    config::RequestConfig,
    definition::ListFieldDef,
    error::Error,
    schema::{FieldSchema, Rule, SchemaKeys, StateKind, StateSchema, ViolationKind},
    validation::Errors,
    value::{FormData, State, loose_key},
    view::{FieldModel, ItemModel, Items},
};

/// A single choice from a drop-down list.
#[derive(Debug, Clone)]
pub struct SelectField {
    /// Shared identity and options.
    base: FieldBase,
    /// The items.
    list: ChoiceList,
    /// Items can be narrowed per request.
    filterable: bool,
}

impl SelectField {
    /// Build from a definition.
    pub fn new(def: &ListFieldDef, ctx: &BuildContext<'_>) -> Result<Self, Error> {
        let base = FieldBase::new("SelectField", &def.field, &def.options.common)?;
        let list = ChoiceList::resolve(&base.name, def.options.list.as_ref(), ctx)?;
        Ok(Self {
            base,
            list,
            filterable: def.options.filterable,
        })
    }
}

impl FormField for SelectField {
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
        SchemaKeys::single(&self.base.name, schema)
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
        let blank = ItemModel {
            text: String::new(),
            ..ItemModel::default()
        };
        let items = iter::once(blank)
            .chain(
                self.list
                    .offered(&self.base.name, self.filterable, config)
                    .into_iter()
                    .map(|item| ItemModel {
                        text: item.text.clone(),
                        value: Some(item.value.clone()),
                        selected: Some(current.as_deref() == Some(item.key.as_str())),
                        ..ItemModel::default()
                    }),
            )
            .collect();
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
