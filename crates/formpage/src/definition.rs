//! Declarative page definitions as read from JSON.
//!
//! Each component `type` maps to its own definition struct so that options are
//! checked against the shape expected for that type when the page is loaded. An
//! unknown `type`, or a form component without a `name`, fails deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single question page.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageDef {
    /// Page title; when absent the page may take its title from a single question.
    #[serde(default)]
    pub title: Option<String>,
    /// Section title shown above the heading.
    #[serde(default)]
    pub section_title: Option<String>,
    /// Caption shown above the heading (takes precedence over `sectionTitle`).
    #[serde(default)]
    pub caption: Option<String>,
    /// Whether the page leads somewhere else (renders a form even without fields).
    #[serde(default)]
    pub has_next: Option<bool>,
    /// Text for the submit button.
    #[serde(default)]
    pub submit_button_text: Option<String>,
    /// Components in display order.
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    /// Named lists that choice components may reference.
    #[serde(default)]
    pub lists: Vec<ListDef>,
}

/// One component of a page, discriminated by its `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentDef {
    /// Single-line text input.
    TextField(TextFieldDef),
    /// Textarea.
    MultilineTextField(TextFieldDef),
    /// Textarea with a live character or word count.
    CharacterCountField(TextFieldDef),
    /// Email address input.
    EmailAddressField(TextFieldDef),
    /// Personal names input.
    NamesField(TextFieldDef),
    /// Telephone number input.
    TelephoneNumberField(TextFieldDef),
    /// Money amount input.
    CurrencyField(TextFieldDef),
    /// Numeric input.
    NumberField(NumberFieldDef),
    /// Day / month / year inputs.
    DatePartsField(DateFieldDef),
    /// Single ISO date input.
    DateField(DateFieldDef),
    /// Time input.
    TimeField(DateFieldDef),
    /// Drop-down choice.
    SelectField(ListFieldDef),
    /// Single choice radios.
    RadiosField(ListFieldDef),
    /// Multiple choice checkboxes.
    CheckboxesField(ListFieldDef),
    /// Checkboxes whose items may reveal a text input.
    CheckboxesWithTextField(ListFieldDef),
    /// Yes / No radios.
    YesNoField(YesNoFieldDef),
    /// UK postal address made of several text inputs.
    UkAddressField(AddressFieldDef),
    /// Fixed value carried through the form.
    HiddenField(HiddenFieldDef),
    /// Paragraph of text.
    Para(ContentDef),
    /// Raw HTML block.
    Html(ContentDef),
    /// Inset text block.
    InsetText(ContentDef),
    /// Expandable details block.
    Details(ContentDef),
    /// Warning callout.
    WarningText(WarningTextDef),
    /// HTML template with request-supplied parameters.
    DynamicHtml(DynamicHtmlDef),
}

/// Identity and display text shared by every form component.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Field name; unique within a page.
    pub name: String,
    /// Question text.
    #[serde(default)]
    pub title: Option<String>,
    /// Hint HTML shown under the label.
    #[serde(default)]
    pub hint: Option<String>,
    /// Title used inside error messages.
    #[serde(default)]
    pub title_for_error: Option<String>,
}

/// Options understood by every form component.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommonOptions {
    /// Whether an answer is required (default true).
    #[serde(default)]
    pub required: Option<bool>,
    /// CSS classes for the input.
    #[serde(default)]
    pub classes: Option<String>,
    /// Render the label as the page heading.
    #[serde(default)]
    pub is_page_heading: bool,
}

/// Text shown before or after an input.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Affix {
    /// Affix text, e.g. `£`.
    #[serde(default)]
    pub text: String,
}

/// Text-like fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options.
    #[serde(default)]
    pub options: TextOptions,
    /// Validation constraints.
    #[serde(default)]
    pub schema: TextConstraints,
}

/// Options for text-like fields.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    /// Shared options.
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Emit an `autocomplete` hint for the browser.
    #[serde(default)]
    pub autocomplete: bool,
    /// Textarea rows.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Percentage of the limit at which the counter appears.
    #[serde(default)]
    pub threshold: Option<u32>,
    /// Text before the input.
    #[serde(default)]
    pub prefix: Option<Affix>,
    /// Text after the input.
    #[serde(default)]
    pub suffix: Option<Affix>,
}

/// Constraints for text-like fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextConstraints {
    /// Maximum number of characters.
    #[serde(default)]
    pub max: Option<usize>,
    /// Maximum number of words; takes precedence over `max`.
    #[serde(default)]
    pub maxwords: Option<usize>,
    /// Trim surrounding whitespace (default true).
    #[serde(default)]
    pub trim: Option<bool>,
}

/// Numeric fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NumberFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options.
    #[serde(default)]
    pub options: NumberOptions,
    /// Validation constraints.
    #[serde(default)]
    pub schema: NumberConstraints,
}

/// Options for numeric fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NumberOptions {
    /// Shared options.
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Text before the input.
    #[serde(default)]
    pub prefix: Option<Affix>,
    /// Text after the input.
    #[serde(default)]
    pub suffix: Option<Affix>,
}

/// Constraints for numeric fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct NumberConstraints {
    /// Only whole numbers are accepted.
    #[serde(default)]
    pub integer: bool,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<f64>,
    /// Exclusive lower bound.
    #[serde(default)]
    pub greater: Option<f64>,
    /// Exclusive upper bound.
    #[serde(default)]
    pub less: Option<f64>,
}

/// Date and time fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DateFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options.
    #[serde(default)]
    pub options: CommonOptions,
}

/// Choice fields backed by a list.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options, including the list.
    #[serde(default)]
    pub options: ListOptions,
}

/// Options for choice fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListOptions {
    /// Shared options.
    #[serde(flatten)]
    pub common: CommonOptions,
    /// The items to choose from, inline or by page-level list name.
    #[serde(default)]
    pub list: Option<ListRef>,
    /// Allow the selectable items to be narrowed per request.
    #[serde(default)]
    pub filterable: bool,
    /// Render item labels in bold.
    #[serde(default)]
    pub bold: bool,
}

/// Reference to a list: a page-level list name or an inline list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListRef {
    /// Name of a list declared in [`PageDef::lists`].
    Named(String),
    /// List declared in place.
    Inline(ListDef),
}

/// Value type of a list.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Items carry string values.
    #[default]
    String,
    /// Items carry numeric values.
    Number,
}

/// A named enumeration of selectable items.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListDef {
    /// List name (required for page-level lists).
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable list title.
    #[serde(default)]
    pub title: Option<String>,
    /// Value type of the items.
    #[serde(default, rename = "type")]
    pub list_type: ListType,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<ListItemDef>,
}

/// One selectable item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemDef {
    /// Display text.
    pub text: String,
    /// Submitted value.
    pub value: Value,
    /// Hint shown under the item.
    #[serde(default)]
    pub description: Option<String>,
    /// Static HTML revealed when the item is selected.
    #[serde(default)]
    pub conditional_html: Option<String>,
    /// Components revealed when the item is selected.
    #[serde(default)]
    pub conditional: Option<ConditionalDef>,
    /// Text input revealed when the item is checked (checkboxes with text).
    #[serde(default)]
    pub conditional_text_field: Option<ConditionalTextFieldDef>,
}

/// Nested components revealed by a list item.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConditionalDef {
    /// Components in display order.
    #[serde(default)]
    pub components: Vec<ComponentDef>,
}

/// Free-text input attached to a checkbox item.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConditionalTextFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Validation constraints.
    #[serde(default)]
    pub schema: TextConstraints,
}

/// Yes / No fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct YesNoFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options.
    #[serde(default)]
    pub options: YesNoOptions,
}

/// Options for yes / no fields.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct YesNoOptions {
    /// Shared options.
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Show "Yes" before "No" (default true).
    #[serde(default)]
    pub yes_first: Option<bool>,
}

/// UK address fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AddressFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// Behavioral options.
    #[serde(default)]
    pub options: CommonOptions,
}

/// Hidden fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HiddenFieldDef {
    /// Name and display text.
    #[serde(flatten)]
    pub field: FieldDef,
    /// The fixed value.
    #[serde(default)]
    pub value: Value,
}

/// Static content blocks.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContentDef {
    /// Optional name.
    #[serde(default)]
    pub name: Option<String>,
    /// Title (the summary of a details block).
    #[serde(default)]
    pub title: Option<String>,
    /// Content HTML.
    #[serde(default)]
    pub content: String,
}

/// Warning callout.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WarningTextDef {
    /// Optional name.
    #[serde(default)]
    pub name: Option<String>,
    /// Warning text.
    #[serde(default)]
    pub text: String,
    /// Assistive text for the icon.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Parameterised HTML block.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DynamicHtmlDef {
    /// Name used to look up parameter values in the request config.
    pub name: String,
    /// Template containing `$PARAM$` tokens.
    #[serde(default)]
    pub template_html: String,
}
