//! Render-ready view models consumed by a template renderer.
//!
//! Everything here serializes to the camelCase shapes GOV.UK Frontend macros
//! expect; optional parts are omitted rather than emitted as `null`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{definition::Affix, validation::Errors};

/// Whole-page view model.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageViewModel {
    /// Title for `<title>` and, when `show_title`, the page heading.
    pub page_title: String,
    /// Section title shown above the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    /// Caption shown above the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_caption: Option<String>,
    /// Render the page title as a heading.
    pub show_title: bool,
    /// Wrap components in a form with a submit button.
    pub use_form: bool,
    /// Submit button text.
    pub button_text: String,
    /// One entry per component, in definition order.
    pub components: Vec<ComponentViewModel>,
    /// Errors from the last submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    /// Host-supplied pass-through data.
    #[serde(flatten)]
    pub view: Map<String, Value>,
}

/// View model of one component.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentViewModel {
    /// Component type name.
    #[serde(rename = "type")]
    pub component_type: String,
    /// Whether the component takes input.
    pub is_form_component: bool,
    /// Type-specific model.
    pub model: Model,
}

impl ComponentViewModel {
    /// The field model, for form components.
    pub fn field(&self) -> Option<&FieldModel> {
        match &self.model {
            Model::Field(f) => Some(f),
            Model::Content(_) => None,
        }
    }

    /// Mutable field model, for form components.
    pub fn field_mut(&mut self) -> Option<&mut FieldModel> {
        match &mut self.model {
            Model::Field(f) => Some(f),
            Model::Content(_) => None,
        }
    }

    /// The content model, for static components.
    pub fn content(&self) -> Option<&ContentModel> {
        match &self.model {
            Model::Content(c) => Some(c),
            Model::Field(_) => None,
        }
    }
}

/// Model payload of a component.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Model {
    /// An input.
    Field(Box<FieldModel>),
    /// Static content.
    Content(ContentModel),
}

/// Model of a static content block.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentModel {
    /// Body HTML of paragraphs, HTML blocks, inset text and dynamic HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Summary of a details block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_html: Option<String>,
    /// Body of a details block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Warning text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Assistive text for the warning icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_fallback_text: Option<String>,
}

/// Model of an input.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldModel {
    /// Element id.
    pub id: String,
    /// Input name.
    pub name: String,
    /// CSS classes for the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
    /// HTML attributes.
    pub attributes: Attributes,
    /// Label (or fieldset legend).
    pub label: Label,
    /// Current value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Hint under the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Hint>,
    /// Inline error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<ErrorMessage>,
    /// Input type (`email`, `tel`, `number`, `date`, `time`, `hidden`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Browser autocomplete hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    /// Text before the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Affix>,
    /// Text after the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<Affix>,
    /// Textarea rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Character limit shown by a character count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
    /// Word limit shown by a character count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxwords: Option<usize>,
    /// Percentage at which a character count appears.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    /// Fieldset wrapping grouped inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldset: Option<Fieldset>,
    /// Choice items or date part inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    /// Nested component view models (address lines).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentViewModel>>,
}

impl FieldModel {
    /// Choice items, if this field has them.
    pub fn choices(&self) -> &[ItemModel] {
        match &self.items {
            Some(Items::Choices(items)) => items,
            _ => &[],
        }
    }

    /// Date part inputs, if this field has them.
    pub fn date_parts(&self) -> &[DatePartModel] {
        match &self.items {
            Some(Items::DateParts(parts)) => parts,
            _ => &[],
        }
    }
}

/// HTML attributes of an input.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Attributes {
    /// Maximum characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
    /// `"false"` to disable spellchecking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spellcheck: Option<String>,
}

/// Label of an input or legend of a fieldset.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Label text.
    pub text: String,
    /// CSS classes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
    /// HTML that replaces the text (used for captions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Render as the page heading.
    #[serde(skip_serializing_if = "is_false")]
    pub is_page_heading: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Hint text.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Hint {
    /// Hint HTML.
    pub html: String,
}

/// Inline error message.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ErrorMessage {
    /// Message text.
    pub text: String,
}

/// Fieldset wrapper.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Fieldset {
    /// Legend, mirroring the field label.
    pub legend: Label,
}

/// Items of a grouped input.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Items {
    /// Radios, checkboxes or select options.
    Choices(Vec<ItemModel>),
    /// Day, month and year inputs.
    DateParts(Vec<DatePartModel>),
}

/// One radio, checkbox or select option.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ItemModel {
    /// Display text.
    pub text: String,
    /// Value; absent for the blank select option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Checked state of radios and checkboxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Selected state of select options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    /// Item label styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ItemLabel>,
    /// Item hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<Hint>,
    /// Content revealed when the item is chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalModel>,
}

/// Styling for an item label.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ItemLabel {
    /// CSS classes.
    pub classes: String,
}

/// Content revealed by an item.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ConditionalModel {
    /// Static HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// A revealed text input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Box<FieldModel>>,
    /// Revealed nested components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentViewModel>>,
}

/// One of the day, month and year inputs.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct DatePartModel {
    /// `Day`, `Month` or `Year`.
    pub label: String,
    /// Element id.
    pub id: String,
    /// Input name.
    pub name: String,
    /// CSS classes.
    pub classes: String,
    /// Current value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}
