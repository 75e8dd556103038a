use serde_json::Value;

use super::field::{self, FieldBase, FormField};
use crate::{
    config::RequestConfig,
    definition::HiddenFieldDef,
    error::Error,
    validation::Errors,
    value::FormData,
    view::FieldModel,
};

/// A fixed value carried through the form without user interaction.
#[derive(Debug, Clone)]
pub struct HiddenField {
    /// Shared identity and options.
    base: FieldBase,
    /// The value rendered into the input.
    value: Value,
}

impl HiddenField {
    /// Build from a definition.
    pub fn new(def: &HiddenFieldDef) -> Result<Self, Error> {
        Ok(Self {
            base: FieldBase::new("HiddenField", &def.field, &Default::default())?,
            value: def.value.clone(),
        })
    }
}

impl FormField for HiddenField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        model.input_type = Some("hidden".to_string());
        model.value = Some(self.value.clone());
        model
    }
}
