//! Lists of selectable items and the content they reveal.
//!
//! Radios and checkboxes share the conditional-reveal rules implemented here:
//! nested fields of an item are validated only while that item is chosen, and
//! their state is nulled whenever it is not.

use serde_json::Value;
use tracing::debug;

use super::{
    BuildContext,
    field::{FieldBase, text_for_errors},
};
use crate::{
    collection::ComponentCollection,
    config::RequestConfig,
    definition::{ConditionalTextFieldDef, ListDef, ListItemDef, ListRef, ListType},
    error::Error,
    schema::{
        Conditional, FieldSchema, Rule, SchemaKeys, StateKind, StateRule, StateSchema, TextRule,
        ViolationKind,
    },
    validation::Errors,
    value::{FormData, State, StateValue, form_text, loose_key},
    view::{
        Attributes, ConditionalModel, ErrorMessage, FieldModel, Hint, ItemLabel, ItemModel, Label,
    },
};

/// Label classes applied to items of a `bold` list.
const BOLD_ITEM_CLASSES: &str = "govuk-label--s";

/// Classes of a revealed text input.
const CONDITIONAL_INPUT_CLASSES: &str = "govuk-!-width-one-third";

/// A free-text input revealed by a checkbox.
#[derive(Debug, Clone)]
pub struct ConditionalText {
    /// Identity and display text; always required while revealed.
    base: FieldBase,
    /// Character limit.
    max: Option<usize>,
    /// Trim surrounding whitespace.
    trim: bool,
}

impl ConditionalText {
    fn new(def: &ConditionalTextFieldDef) -> Result<Self, Error> {
        Ok(Self {
            base: FieldBase::new("conditionalTextField", &def.field, &Default::default())?,
            max: def.schema.max,
            trim: def.schema.trim != Some(false),
        })
    }

    /// Input name.
    pub fn name(&self) -> &str {
        &self.base.name
    }
}

/// One selectable item.
#[derive(Debug, Clone)]
pub struct ChoiceItem {
    /// Display text.
    pub text: String,
    /// Typed value as declared.
    pub value: Value,
    /// Canonical key of `value`.
    pub key: String,
    /// Hint shown under the item.
    pub description: Option<String>,
    /// Static HTML revealed when chosen.
    pub conditional_html: Option<String>,
    /// Components revealed when chosen.
    pub conditional: Option<ComponentCollection>,
    /// Text input revealed when checked.
    pub text_field: Option<ConditionalText>,
}

impl ChoiceItem {
    fn new(def: &ListItemDef, ctx: &BuildContext<'_>) -> Result<Self, Error> {
        let conditional = match &def.conditional {
            Some(c) if !c.components.is_empty() => {
                Some(ComponentCollection::new(&c.components, ctx)?)
            }
            _ => None,
        };
        let text_field = def
            .conditional_text_field
            .as_ref()
            .map(ConditionalText::new)
            .transpose()?;
        Ok(Self {
            text: def.text.clone(),
            key: loose_key(&def.value),
            value: def.value.clone(),
            description: def.description.clone(),
            conditional_html: def.conditional_html.clone(),
            conditional,
            text_field,
        })
    }
}

/// The resolved items of a choice field.
#[derive(Debug, Clone, Default)]
pub struct ChoiceList {
    /// Declared value type.
    pub list_type: ListType,
    /// Items in display order.
    pub items: Vec<ChoiceItem>,
}

impl ChoiceList {
    /// Resolve a component's list, inline or by page-level name.
    pub fn resolve(
        component: &str,
        list: Option<&ListRef>,
        ctx: &BuildContext<'_>,
    ) -> Result<Self, Error> {
        let def: &ListDef = match list {
            Some(ListRef::Inline(def)) => def,
            Some(ListRef::Named(name)) => ctx.list(name).ok_or_else(|| Error::UnknownList {
                component: component.to_string(),
                list: name.clone(),
            })?,
            None => {
                return Err(Error::definition(format!(
                    "{component}: choice component has no list"
                )));
            }
        };
        let items = def
            .items
            .iter()
            .map(|item| ChoiceItem::new(item, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            list_type: def.list_type,
            items,
        })
    }

    /// Item with the given canonical key.
    pub fn find(&self, key: &str) -> Option<&ChoiceItem> {
        self.items.iter().find(|i| i.key == key)
    }

    /// Items offered for this request.
    ///
    /// A filterable field is narrowed to the request's filter values, unless
    /// fewer than two items would remain, in which case every item is offered.
    pub fn offered(
        &self,
        name: &str,
        filterable: bool,
        config: &RequestConfig,
    ) -> Vec<&ChoiceItem> {
        let all: Vec<&ChoiceItem> = self.items.iter().collect();
        if !filterable {
            return all;
        }
        let Some(keys) = config.component(name).and_then(|o| o.filter_keys()) else {
            return all;
        };
        let narrowed: Vec<&ChoiceItem> = all
            .iter()
            .copied()
            .filter(|i| keys.contains(&i.key))
            .collect();
        if narrowed.len() < 2 {
            debug!(
                field = name,
                matched = narrowed.len(),
                "ignoring filter that leaves fewer than two items"
            );
            return all;
        }
        narrowed
    }

    /// Canonical keys of every item, for state checks.
    pub fn keys(&self) -> Vec<String> {
        self.items.iter().map(|i| i.key.clone()).collect()
    }

    /// Text of the item matching a state value.
    pub fn text_for(&self, value: &StateValue) -> Option<&str> {
        self.find(&value.loose_key()).map(|i| i.text.as_str())
    }

    /// Schema keys of revealed content, active only while the item is chosen.
    ///
    /// `multiple` is set for checkbox controllers, whose submissions may
    /// carry several keys.
    pub fn conditional_schema_keys(
        &self,
        controller: &str,
        multiple: bool,
        config: &RequestConfig,
    ) -> SchemaKeys {
        let chosen = |key: &str, schema: FieldSchema| {
            let otherwise = schema.relaxed();
            FieldSchema::when(Conditional {
                controller: controller.to_string(),
                value_key: key.to_string(),
                multiple,
                then: schema,
                otherwise,
            })
        };
        let mut keys = SchemaKeys::new();
        for item in &self.items {
            if let Some(collection) = &item.conditional {
                for (name, schema) in collection.form_schema_keys(config) {
                    keys.insert(name, chosen(&item.key, schema));
                }
            }
            if let Some(text) = &item.text_field {
                keys.insert(text.name(), chosen(&item.key, text_schema(text, config)));
            }
        }
        keys
    }

    /// State rules of revealed content; nulls are always accepted.
    pub fn conditional_state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        for item in &self.items {
            if let Some(collection) = &item.conditional {
                schema.extend(collection.state_schema(config).relaxed());
            }
            if let Some(text) = &item.text_field {
                let label = text_for_errors(&text.base, config).title;
                schema.insert(text.name(), StateRule::new(label, false, StateKind::Text));
            }
        }
        schema
    }

    /// Form data of revealed content.
    pub fn conditional_form_data(&self, state: &State) -> FormData {
        let mut form = FormData::new();
        for item in &self.items {
            if let Some(collection) = &item.conditional {
                form.extend(collection.form_data_from_state(state));
            }
            if let Some(text) = &item.text_field {
                let value = state
                    .get(text.name())
                    .map(StateValue::to_form_string)
                    .unwrap_or_default();
                form.insert(text.name().to_string(), Value::String(value));
            }
        }
        form
    }

    /// State of revealed content; content of items not chosen is nulled.
    pub fn conditional_state(&self, form: &FormData, chosen: &[String]) -> State {
        let mut state = State::new();
        for item in &self.items {
            let is_chosen = chosen.contains(&item.key);
            if let Some(collection) = &item.conditional {
                if is_chosen {
                    state.extend(collection.state_from_valid_form(form));
                } else {
                    state.extend(
                        collection
                            .state_keys()
                            .into_iter()
                            .map(|k| (k, StateValue::Null)),
                    );
                }
            }
            if let Some(text) = &item.text_field {
                let value = form_text(form.get(text.name()));
                let value = if is_chosen && !value.is_empty() {
                    StateValue::Text(value)
                } else {
                    StateValue::Null
                };
                state.insert(text.name().to_string(), value);
            }
        }
        state
    }

    /// View model of one item.
    pub fn item_model(
        &self,
        item: &ChoiceItem,
        checked: bool,
        bold: bool,
        view: ItemView<'_>,
    ) -> ItemModel {
        ItemModel {
            text: item.text.clone(),
            value: Some(item.value.clone()),
            checked: Some(checked),
            selected: None,
            label: bold.then(|| ItemLabel {
                classes: BOLD_ITEM_CLASSES.to_string(),
            }),
            hint: item.description.clone().map(|html| Hint { html }),
            conditional: conditional_model(item, view),
        }
    }
}

/// Request inputs needed to render revealed content.
#[derive(Debug, Clone, Copy)]
pub struct ItemView<'a> {
    /// Request overrides.
    pub config: &'a RequestConfig,
    /// Current form data.
    pub form_data: &'a FormData,
    /// Errors from the last submission.
    pub errors: Option<&'a Errors>,
}

fn text_schema(text: &ConditionalText, config: &RequestConfig) -> FieldSchema {
    let errors = text_for_errors(&text.base, config);
    let mut schema = FieldSchema::new(Rule::Text(TextRule {
        trim: text.trim,
        max: text.max,
        ..TextRule::default()
    }))
    .label(errors.title.clone())
    .required()
    .empty_as_missing()
    .message(ViolationKind::Required, format!("Enter {}", errors.name))
    .message(ViolationKind::Empty, format!("Enter {}", errors.name));
    if let Some(max) = text.max {
        schema = schema.message(
            ViolationKind::TooLong,
            format!("{} must be {max} characters or fewer", errors.title),
        );
    }
    schema
}

fn conditional_model(item: &ChoiceItem, view: ItemView<'_>) -> Option<ConditionalModel> {
    let input = item.text_field.as_ref().map(|text| {
        let name = text.name().to_string();
        Box::new(FieldModel {
            id: name.clone(),
            label: Label {
                text: text.base.title.clone().unwrap_or_else(|| item.text.clone()),
                ..Label::default()
            },
            classes: Some(CONDITIONAL_INPUT_CLASSES.to_string()),
            value: view.form_data.get(&name).cloned(),
            hint: text.base.hint.clone().map(|html| Hint { html }),
            attributes: Attributes {
                maxlength: text.max,
                ..Attributes::default()
            },
            error_message: view
                .errors
                .and_then(|e| e.first_for(&name))
                .map(|t| ErrorMessage {
                    text: t.to_string(),
                }),
            name,
            ..FieldModel::default()
        })
    });
    let components = item
        .conditional
        .as_ref()
        .map(|c| c.view_model(view.config, view.form_data, view.errors));

    if input.is_none() && components.is_none() && item.conditional_html.is_none() {
        return None;
    }
    Some(ConditionalModel {
        html: item.conditional_html.clone(),
        input,
        components,
    })
}

/// The "nothing chosen" message of a choice field.
pub(crate) fn select_message(base: &FieldBase, config: &RequestConfig) -> String {
    format!("Select {}", text_for_errors(base, config).name)
}
