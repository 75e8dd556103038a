//! Date and time inputs.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use super::field::{self, FieldBase, FormField, text_for_errors};
use crate::{
    config::RequestConfig,
    definition::DateFieldDef,
    error::Error,
    schema::{
        DatePartKeys, FieldSchema, Rule, SchemaKeys, StateKind, StateSchema, TextRule,
        ViolationKind, date_from_parts,
    },
    validation::Errors,
    value::{FormData, State, StateValue, form_text},
    view::{DatePartModel, FieldModel, Fieldset, Items},
};

/// Format used when a date is shown to people, e.g. `1 October 2000`.
pub(crate) const DISPLAY_FORMAT: &str = "%-d %B %Y";

/// Format of ISO date strings.
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Labels, name suffixes and widths of the three part inputs.
const PARTS: [(&str, &str, usize); 3] = [
    ("Day", "__day", 2),
    ("Month", "__month", 2),
    ("Year", "__year", 4),
];

fn display_date(state: &State, name: &str) -> String {
    state
        .get(name)
        .and_then(StateValue::as_date)
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

fn date_state_schema(base: &FieldBase, config: &RequestConfig) -> StateSchema {
    let mut schema = StateSchema::new();
    schema.insert(&base.name, field::state_rule(base, config, StateKind::Date));
    schema
}

/// A date entered as separate day, month and year inputs.
#[derive(Debug, Clone)]
pub struct DatePartsField {
    /// Shared identity and options.
    base: FieldBase,
    /// Names of the part inputs.
    keys: DatePartKeys,
}

impl DatePartsField {
    /// Build from a definition.
    pub fn new(def: &DateFieldDef) -> Result<Self, Error> {
        let base = FieldBase::new("DatePartsField", &def.field, &def.options)?;
        let part = |suffix: &str| format!("{}{suffix}", base.name);
        let keys = DatePartKeys {
            day: part(PARTS[0].1),
            month: part(PARTS[1].1),
            year: part(PARTS[2].1),
        };
        Ok(Self { base, keys })
    }

    fn part_names(&self) -> [&String; 3] {
        [&self.keys.day, &self.keys.month, &self.keys.year]
    }
}

impl FormField for DatePartsField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let schema = FieldSchema::new(Rule::DateParts(self.keys.clone()))
            .label(text.title.clone())
            .presence(self.base.required)
            .message(ViolationKind::Required, format!("Enter {}", text.name))
            .message(
                ViolationKind::IncompleteDate,
                format!("{} must include a day, month and year", text.title),
            )
            .message(ViolationKind::WrongType, format!("Enter a real {}", text.name))
            .message(ViolationKind::InvalidDate, format!("Enter a real {}", text.name));

        let mut keys = SchemaKeys::single(&self.base.name, schema);
        for name in self.part_names() {
            keys.insert(name, FieldSchema::any());
        }
        keys
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        date_state_schema(&self.base, config)
    }

    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        let date = state.get(&self.base.name).and_then(StateValue::as_date);
        let parts = match date {
            Some(d) => [
                format!("{:02}", d.day()),
                format!("{:02}", d.month()),
                format!("{:04}", d.year()),
            ],
            None => Default::default(),
        };
        Some(
            self.part_names()
                .into_iter()
                .zip(parts)
                .map(|(name, part)| (name.clone(), Value::String(part)))
                .collect(),
        )
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        let parts = self.part_names().map(|n| form_text(form.get(n)));
        let date = date_from_parts(&parts).ok();
        State::from([(
            self.base.name.clone(),
            date.map_or(StateValue::Null, StateValue::Date),
        )])
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        let error_class = if model.error_message.is_some() {
            " govuk-input--error"
        } else {
            ""
        };
        let parts = PARTS
            .iter()
            .zip(self.part_names())
            .map(|((label, _, width), name)| DatePartModel {
                label: (*label).to_string(),
                id: name.clone(),
                name: name.clone(),
                classes: format!("govuk-input--width-{width}{error_class}"),
                value: form_data.get(name.as_str()).cloned(),
            })
            .collect();
        model.items = Some(Items::DateParts(parts));
        model.fieldset = Some(Fieldset {
            legend: model.label.clone(),
        });
        model
    }

    fn display_string(&self, state: &State) -> String {
        display_date(state, &self.base.name)
    }
}

/// A date entered in a single ISO `YYYY-MM-DD` input.
#[derive(Debug, Clone)]
pub struct DateField {
    /// Shared identity and options.
    base: FieldBase,
}

impl DateField {
    /// Build from a definition.
    pub fn new(def: &DateFieldDef) -> Result<Self, Error> {
        Ok(Self {
            base: FieldBase::new("DateField", &def.field, &def.options)?
                .default_classes("govuk-input--width-10"),
        })
    }
}

impl FormField for DateField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let mut schema = FieldSchema::new(Rule::IsoDate)
            .label(text.title.clone())
            .presence(self.base.required)
            .message(ViolationKind::Required, format!("Enter {}", text.name))
            .message(ViolationKind::Empty, format!("Enter {}", text.name))
            .message(ViolationKind::InvalidDate, format!("Enter a real {}", text.name));
        schema = if self.base.required {
            schema.empty_as_missing()
        } else {
            schema.allow_empty()
        };
        SchemaKeys::single(&self.base.name, schema)
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        date_state_schema(&self.base, config)
    }

    fn form_data_from_state(&self, state: &State) -> Option<FormData> {
        let value = state.get(&self.base.name)?;
        let text = match value.as_date() {
            Some(d) => d.format(ISO_FORMAT).to_string(),
            None => value.to_form_string(),
        };
        Some(FormData::from_iter([(self.base.name.clone(), Value::String(text))]))
    }

    fn state_from_valid_form(&self, form: &FormData) -> State {
        let text = form_text(form.get(&self.base.name));
        let date = NaiveDate::parse_from_str(&text, ISO_FORMAT).ok();
        State::from([(
            self.base.name.clone(),
            date.map_or(StateValue::Null, StateValue::Date),
        )])
    }

    fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> FieldModel {
        let mut model = field::base_view_model(&self.base, config, form_data, errors);
        model.input_type = Some("date".to_string());
        model
    }

    fn display_string(&self, state: &State) -> String {
        display_date(state, &self.base.name)
    }
}

/// A time of day input.
#[derive(Debug, Clone)]
pub struct TimeField {
    /// Shared identity and options.
    base: FieldBase,
}

impl TimeField {
    /// Build from a definition.
    pub fn new(def: &DateFieldDef) -> Result<Self, Error> {
        Ok(Self {
            base: FieldBase::new("TimeField", &def.field, &def.options)?
                .default_classes("govuk-input--width-4"),
        })
    }
}

impl FormField for TimeField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn form_schema_keys(&self, config: &RequestConfig) -> SchemaKeys {
        let text = text_for_errors(&self.base, config);
        let mut schema = FieldSchema::new(Rule::Text(TextRule {
            trim: true,
            ..TextRule::default()
        }))
        .label(text.title.clone())
        .presence(self.base.required)
        .message(ViolationKind::Required, format!("Enter {}", text.name))
        .message(ViolationKind::Empty, format!("Enter {}", text.name));
        if !self.base.required {
            schema = schema.allow_empty();
        }
        SchemaKeys::single(&self.base.name, schema)
    }

    fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        let mut schema = StateSchema::new();
        schema.insert(
            &self.base.name,
            field::state_rule(&self.base, config, StateKind::Text),
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
        model.input_type = Some("time".to_string());
        model
    }
}
