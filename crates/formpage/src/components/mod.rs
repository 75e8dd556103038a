//! Runtime components built from definitions.
//!
//! [`Component`] is a closed set of variants; [`Component::new`] is the only
//! place a definition's `type` is mapped to behavior. Form components expose
//! their capabilities through the [`FormField`] trait.

mod address;
mod checkboxes;
mod choice;
mod content;
mod date;
mod field;
mod hidden;
mod number;
mod radios;
mod select;
mod text;
mod yesno;

pub use address::UkAddressField;
pub use checkboxes::CheckboxesField;
pub use choice::{ChoiceItem, ChoiceList, ConditionalText};
pub use content::{Content, fill_template};
pub use date::{DateField, DatePartsField, TimeField};
pub use field::{ErrorText, FieldBase, FormField, label_text, text_for_errors};
pub use hidden::HiddenField;
pub use number::NumberField;
pub use radios::RadiosField;
pub use select::SelectField;
pub use text::{TextField, TextKind};
pub use yesno::YesNoField;

use crate::{
    config::RequestConfig,
    definition::{ComponentDef, ListDef},
    error::Error,
    validation::Errors,
    value::FormData,
    view::{ComponentViewModel, Model},
};

/// Page-level context available while components are built.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildContext<'a> {
    /// Named lists declared by the page.
    lists: &'a [ListDef],
}

impl<'a> BuildContext<'a> {
    /// Context with the given named lists.
    pub fn new(lists: &'a [ListDef]) -> Self {
        Self { lists }
    }

    /// Look up a named list.
    pub fn list(&self, name: &str) -> Option<&'a ListDef> {
        self.lists.iter().find(|l| l.name.as_deref() == Some(name))
    }
}

/// A component of a page.
#[derive(Debug, Clone)]
pub enum Component {
    /// Any text variant.
    Text(TextField),
    /// Numeric input.
    Number(NumberField),
    /// Day / month / year inputs.
    DateParts(DatePartsField),
    /// ISO date input.
    Date(DateField),
    /// Time input.
    Time(TimeField),
    /// Drop-down choice.
    Select(SelectField),
    /// Radios.
    Radios(RadiosField),
    /// Checkboxes, optionally with revealed text inputs.
    Checkboxes(CheckboxesField),
    /// Yes / No radios.
    YesNo(YesNoField),
    /// UK address.
    UkAddress(UkAddressField),
    /// Hidden value.
    Hidden(HiddenField),
    /// Static content.
    Content(Content),
}

impl Component {
    /// Build a component from its definition.
    pub fn new(def: &ComponentDef, ctx: &BuildContext<'_>) -> Result<Self, Error> {
        use ComponentDef as D;
        Ok(match def {
            D::TextField(d) => Self::Text(TextField::new(TextKind::Plain, d)?),
            D::MultilineTextField(d) => Self::Text(TextField::new(TextKind::Multiline, d)?),
            D::CharacterCountField(d) => Self::Text(TextField::new(TextKind::CharacterCount, d)?),
            D::EmailAddressField(d) => Self::Text(TextField::new(TextKind::Email, d)?),
            D::NamesField(d) => Self::Text(TextField::new(TextKind::Names, d)?),
            D::TelephoneNumberField(d) => Self::Text(TextField::new(TextKind::Telephone, d)?),
            D::CurrencyField(d) => Self::Text(TextField::new(TextKind::Currency, d)?),
            D::NumberField(d) => Self::Number(NumberField::new(d)?),
            D::DatePartsField(d) => Self::DateParts(DatePartsField::new(d)?),
            D::DateField(d) => Self::Date(DateField::new(d)?),
            D::TimeField(d) => Self::Time(TimeField::new(d)?),
            D::SelectField(d) => Self::Select(SelectField::new(d, ctx)?),
            D::RadiosField(d) => Self::Radios(RadiosField::new(d, ctx)?),
            D::CheckboxesField(d) => Self::Checkboxes(CheckboxesField::new(d, ctx, false)?),
            D::CheckboxesWithTextField(d) => Self::Checkboxes(CheckboxesField::new(d, ctx, true)?),
            D::YesNoField(d) => Self::YesNo(YesNoField::new(d)?),
            D::UkAddressField(d) => Self::UkAddress(UkAddressField::new(d)?),
            D::HiddenField(d) => Self::Hidden(HiddenField::new(d)?),
            D::Para(d) => Self::Content(Content::para(d)),
            D::Html(d) => Self::Content(Content::html(d)),
            D::InsetText(d) => Self::Content(Content::inset_text(d)),
            D::Details(d) => Self::Content(Content::details(d)),
            D::WarningText(d) => Self::Content(Content::warning_text(d)),
            D::DynamicHtml(d) => Self::Content(Content::dynamic_html(d)),
        })
    }

    /// Component type name, as written in definitions.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(f) => f.kind().type_name(),
            Self::Number(_) => "NumberField",
            Self::DateParts(_) => "DatePartsField",
            Self::Date(_) => "DateField",
            Self::Time(_) => "TimeField",
            Self::Select(_) => "SelectField",
            Self::Radios(_) => "RadiosField",
            Self::Checkboxes(f) if f.with_text() => "CheckboxesWithTextField",
            Self::Checkboxes(_) => "CheckboxesField",
            Self::YesNo(_) => "YesNoField",
            Self::UkAddress(_) => "UkAddressField",
            Self::Hidden(_) => "HiddenField",
            Self::Content(c) => c.type_name(),
        }
    }

    /// The form capabilities, unless this is static content.
    pub fn as_form_field(&self) -> Option<&dyn FormField> {
        Some(match self {
            Self::Text(f) => f,
            Self::Number(f) => f,
            Self::DateParts(f) => f,
            Self::Date(f) => f,
            Self::Time(f) => f,
            Self::Select(f) => f,
            Self::Radios(f) => f,
            Self::Checkboxes(f) => f,
            Self::YesNo(f) => f,
            Self::UkAddress(f) => f,
            Self::Hidden(f) => f,
            Self::Content(_) => return None,
        })
    }

    /// Whether this component takes input.
    pub fn is_form_component(&self) -> bool {
        self.as_form_field().is_some()
    }

    /// Render-ready model wrapped with its type.
    pub fn view_model(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> ComponentViewModel {
        let model = match (self, self.as_form_field()) {
            (_, Some(field)) => Model::Field(Box::new(field.view_model(config, form_data, errors))),
            (Self::Content(content), None) => Model::Content(content.view_model(config)),
            (_, None) => Model::Content(Default::default()),
        };
        ComponentViewModel {
            component_type: self.type_name().to_string(),
            is_form_component: self.is_form_component(),
            model,
        }
    }
}
