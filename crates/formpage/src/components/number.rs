use super::field::{self, FieldBase, FormField, text_for_errors};
use crate::{
    config::RequestConfig,
    definition::{Affix, NumberFieldDef},
    error::Error,
    schema::{FieldSchema, NumberRule, Rule, SchemaKeys, StateKind, StateSchema, ViolationKind},
    validation::Errors,
    value::{FormData, format_number},
    view::FieldModel,
};

/// A numeric input.
///
/// Blank input is handled before the numeric constraints run: a required field
/// reports it as missing, an optional field keeps it as an intentional blank.
#[derive(Debug, Clone)]
pub struct NumberField {
    /// Shared identity and options.
    base: FieldBase,
    /// Numeric constraints.
    rule: NumberRule,
    /// Text before the input.
    prefix: Option<Affix>,
    /// Text after the input.
    suffix: Option<Affix>,
}

impl NumberField {
    /// Build from a definition.
    pub fn new(def: &NumberFieldDef) -> Result<Self, Error> {
        let s = &def.schema;
        Ok(Self {
            base: FieldBase::new("NumberField", &def.field, &def.options.common)?,
            rule: NumberRule {
                integer: s.integer,
                min: s.min,
                max: s.max,
                greater: s.greater,
                less: s.less,
            },
            prefix: def.options.prefix.clone(),
            suffix: def.options.suffix.clone(),
        })
    }
}

impl FormField for NumberField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let title = &text.title;
        let r = &self.rule;

        let mut schema = FieldSchema::new(Rule::Number(*r))
            .label(title.clone())
            .presence(self.base.required)
            .message(ViolationKind::Required, format!("Enter {}", text.name))
            .message(ViolationKind::Empty, format!("Enter {}", text.name))
            .message(ViolationKind::WrongType, format!("{title} must be a number"))
            .message(ViolationKind::NotInteger, format!("{title} must be a whole number"));
        schema = if self.base.required {
            schema.empty_as_missing()
        } else {
            schema.allow_empty()
        };
        if let Some(min) = r.min {
            schema = schema.message(
                ViolationKind::TooSmall,
                format!("{title} must be {} or more", format_number(min)),
            );
        }
        if let Some(max) = r.max {
            let word = if r.integer { "fewer" } else { "less" };
            schema = schema.message(
                ViolationKind::TooLarge,
                format!("{title} must be {} or {word}", format_number(max)),
            );
        }
        if let Some(greater) = r.greater {
            schema = schema.message(
                ViolationKind::NotGreater,
                format!("{title} must be more than {}", format_number(greater)),
            );
        }
        if let Some(less) = r.less {
            schema = schema.message(
                ViolationKind::NotLess,
                format!("{title} must be less than {}", format_number(less)),
            );
        }
        SchemaKeys::single(&self.base.name, schema)
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        schema.insert(
            &self.base.name,
            field::state_rule(&self.base, config, StateKind::Number),
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
        model.prefix = self.prefix.clone();
        model.suffix = self.suffix.clone();
        model.input_type = Some("number".to_string());
        model
    }
}
