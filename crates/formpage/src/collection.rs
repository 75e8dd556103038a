//! An ordered set of components whose per-field results are merged.

use crate::{
    components::{BuildContext, Component, FormField},
    config::RequestConfig,
    definition::ComponentDef,
    error::Error,
    schema::{ObjectSchema, SchemaKeys, StateSchema},
    validation::Errors,
    value::{FormData, State},
    view::ComponentViewModel,
};

/// Components in definition order.
///
/// Merges are last-writer-wins: a name contributed by two components takes the
/// later component's value. [`crate::Page`] rejects such definitions up front.
#[derive(Debug, Clone, Default)]
pub struct ComponentCollection {
    /// The components.
    items: Vec<Component>,
}

impl ComponentCollection {
    /// Build every component of a definition list.
    pub fn new(defs: &[ComponentDef], ctx: &BuildContext<'_>) -> Result<Self, Error> {
        let items = defs
            .iter()
            .map(|def| Component::new(def, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    /// Wrap already-built components.
    pub fn from_components(items: Vec<Component>) -> Self {
        Self { items }
    }

    /// Every component, form or not.
    pub fn items(&self) -> &[Component] {
        &self.items
    }

    /// Components that take input.
    pub fn form_items(&self) -> impl Iterator<Item = &dyn FormField> {
        self.items.iter().filter_map(Component::as_form_field)
    }

    /// Merged schema keys of every form component.
    pub fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let mut keys = SchemaKeys::new();
        for field in self.form_items() {
            keys.extend(field.form_schema_keys(config));
        }
        keys
    }

    /// The merged keys as an object schema.
    pub fn form_schema(&self, config: &RequestConfig) -> ObjectSchema {
        ObjectSchema::new(self.form_schema_keys(config))
    }

    /// Merged state rules of every form component.
    pub fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        for field in self.form_items() {
            schema.extend(field.state_schema(config));
        }
        schema
    }

    /// Form data for a state; components whose key is absent contribute nothing.
    pub fn form_data_from_state(&self, state: &State) -> FormData {
        let mut form = FormData::new();
        for field in self.form_items() {
            if let Some(data) = field.form_data_from_state(state) {
                form.extend(data);
            }
        }
        form
    }

    /// State update for a validated submission.
    pub fn state_from_valid_form(&self, form: &FormData) -> State {
        let mut state = State::new();
        for field in self.form_items() {
            state.extend(field.state_from_valid_form(form));
        }
        state
    }

    /// Every state key this collection writes.
    pub fn state_keys(&self) -> Vec<String> {
        self.state_from_valid_form(&FormData::new())
            .into_keys()
            .collect()
    }

    /// Form field names contributed by each form component, in order.
    pub(crate) fn field_names(&self) -> Vec<Vec<String>> {
        let config = RequestConfig::default();
        self.form_items()
            .map(|f| {
                f.form_schema_keys(&config)
                    .names()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    /// View models of every component, in definition order.
    pub fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> Vec<ComponentViewModel> {
        self.items
            .iter()
            .map(|c| c.view_model(config, form_data, errors))
            .collect()
    }

    /// Display strings of every form component, keyed by name.
    pub fn display_strings(&self, state: &State) -> Vec<(String, String)> {
        self.form_items()
            .map(|f| (f.name().to_string(), f.display_string(state)))
            .collect()
    }
}
