//! Declarative question pages.
//!
//! A [`Page`] is built from a JSON [`PageDef`]. It produces a render-ready
//! [`PageViewModel`], validates submissions into typed [`State`] updates, and
//! maps stored state back to form data for redisplay. Validation failures are
//! returned as [`Errors`] values; [`Error`] is reserved for broken definitions
//! and failing collaborators.

mod collection;
pub mod components;
mod config;
mod currency;
mod definition;
mod error;
mod flow;
mod html;
mod loader;
mod lookup;
mod page;
pub mod schema;
mod validation;
mod value;
mod view;

#[cfg(test)]
mod test_choice;
#[cfg(test)]
mod test_content;
#[cfg(test)]
mod test_flow;
#[cfg(test)]
mod test_page;
#[cfg(test)]
mod test_schema;

pub use collection::ComponentCollection;
pub use components::{BuildContext, Component, FormField};
pub use config::{ComponentOverrides, PageOverrides, RequestConfig, RequestConfigBuilder};
pub use currency::to_currency;
pub use definition::{
    AddressFieldDef, Affix, CommonOptions, ComponentDef, ConditionalDef, ConditionalTextFieldDef,
    ContentDef, DateFieldDef, DynamicHtmlDef, FieldDef, HiddenFieldDef, ListDef, ListFieldDef,
    ListItemDef, ListOptions, ListRef, ListType, NumberConstraints, NumberFieldDef, NumberOptions,
    PageDef, TextConstraints, TextFieldDef, TextOptions, WarningTextDef, YesNoFieldDef,
    YesNoOptions,
};
pub use error::Error;
pub use flow::{MemoryStore, Outcome, StateCheck, StateStore, handle_get, handle_post};
pub use html::escape_html;
pub use loader::{load_from_path, load_from_str, parse_def, read_json};
pub use lookup::{
    AddressCandidate, AddressLookup, AddressParts, fallback_candidates, find_addresses,
};
pub use page::{DEFAULT_BUTTON_TEXT, DEFAULT_PAGE_TITLE, Page};
pub use validation::{ERROR_SUMMARY_TITLE, ErrorItem, Errors, ValidationResult};
pub use value::{FormData, State, StateValue, format_number, loose_key};
pub use view::{
    Attributes, ComponentViewModel, ConditionalModel, ContentModel, DatePartModel, ErrorMessage,
    FieldModel, Fieldset, Hint, ItemLabel, ItemModel, Items, Label, Model, PageViewModel,
};
