//! A question page: one component collection plus page chrome.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    collection::ComponentCollection,
    components::BuildContext,
    config::RequestConfig,
    definition::PageDef,
    error::Error,
    schema::{ObjectSchema, StateSchema},
    validation::{Errors, ValidationResult},
    value::{FormData, State},
    view::PageViewModel,
};

/// Title used when a page has none and no question is promoted to heading.
pub const DEFAULT_PAGE_TITLE: &str = "Question";

/// Submit button text when the definition gives none.
pub const DEFAULT_BUTTON_TEXT: &str = "Continue";

/// Label classes of a question promoted to page heading.
const HEADING_LABEL_CLASSES: &str = "govuk-label--xl";

/// A page built from a [`PageDef`]. Immutable once built.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page title.
    title: Option<String>,
    /// Section title.
    section_title: Option<String>,
    /// Caption; falls back to the section title.
    caption: Option<String>,
    /// Whether the page leads on to another.
    has_next: bool,
    /// Submit button text.
    button_text: String,
    /// The components.
    components: ComponentCollection,
}

impl Page {
    /// Build a page, rejecting unknown lists and repeated field names.
    pub fn new(def: &PageDef) -> Result<Self, Error> {
        let ctx = BuildContext::new(&def.lists);
        let components = ComponentCollection::new(&def.components, &ctx)?;

        let mut seen = HashSet::new();
        for names in components.field_names() {
            for name in names {
                if !seen.insert(name.clone()) {
                    return Err(Error::DuplicateName { name });
                }
            }
        }

        debug!(
            components = components.items().len(),
            form_components = components.form_items().count(),
            lists = def.lists.len(),
            "page built"
        );

        Ok(Self {
            title: def.title.clone(),
            section_title: def.section_title.clone(),
            caption: def.caption.clone(),
            has_next: def.has_next != Some(false),
            button_text: def
                .submit_button_text
                .clone()
                .unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
            components,
        })
    }

    /// The page's components.
    pub fn components(&self) -> &ComponentCollection {
        &self.components
    }

    /// Whether any component takes input.
    pub fn has_form_components(&self) -> bool {
        self.components.form_items().next().is_some()
    }

    /// Form schema for a request.
    pub fn form_schema(&self, config: &RequestConfig) -> ObjectSchema {
        self.components.form_schema(config)
    }

    /// State schema for a request.
    pub fn state_schema(&self, config: &RequestConfig) -> StateSchema {
        self.components.state_schema(config)
    }

    /// Form data to render for a state.
    pub fn form_data_from_state(&self, state: &State) -> FormData {
        self.components.form_data_from_state(state)
    }

    /// State update for a validated submission.
    pub fn state_from_valid_form(&self, form: &FormData) -> State {
        self.components.state_from_valid_form(form)
    }

    /// Validate a submission, reporting every violation.
    pub fn validate_form(&self, payload: &FormData) -> ValidationResult<FormData> {
        self.validate_form_with_config(payload, &RequestConfig::default())
    }

    /// Validate a submission against a request's schema.
    pub fn validate_form_with_config(
        &self,
        payload: &FormData,
        config: &RequestConfig,
    ) -> ValidationResult<FormData> {
        let validated = self.form_schema(config).validate(payload);
        ValidationResult {
            errors: Errors::from_violations(&validated.violations),
            value: validated.value,
        }
    }

    /// Validate a state update.
    pub fn validate_state(&self, state: &State) -> ValidationResult<State> {
        self.validate_state_with_config(state, &RequestConfig::default())
    }

    /// Validate a state update against a request's state schema.
    pub fn validate_state_with_config(
        &self,
        state: &State,
        config: &RequestConfig,
    ) -> ValidationResult<State> {
        let violations = self.state_schema(config).validate(state);
        ValidationResult {
            value: state.clone(),
            errors: Errors::from_violations(&violations),
        }
    }

    /// View model with no request overrides.
    pub fn view_model(&self, form_data: &FormData, errors: Option<&Errors>) -> PageViewModel {
        self.view_model_with_config(&RequestConfig::default(), form_data, errors)
    }

    /// View model for a request.
    ///
    /// When the only form component is also the first component, its label
    /// becomes the page heading and the page title is taken from it.
    pub fn view_model_with_config(
        &self,
        config: &RequestConfig,
        form_data: &FormData,
        errors: Option<&Errors>,
    ) -> PageViewModel {
        let mut components = self.components.view_model(config, form_data, errors);
        let caption = config
            .page
            .caption
            .clone()
            .or_else(|| self.caption.clone())
            .or_else(|| self.section_title.clone());
        let mut page_title = config.page.title.clone().or_else(|| self.title.clone());
        let mut show_title = true;

        let form_count = components.iter().filter(|c| c.is_form_component).count();
        if form_count == 1
            && let Some(field) = components.first_mut().and_then(|c| c.field_mut())
        {
            let label = &mut field.label;
            if let Some(caption) = &caption {
                label.html = Some(format!(
                    "<span class=\"govuk-caption-xl\">{caption}</span> {}",
                    label.text
                ));
            }
            label.is_page_heading = true;
            label.classes = Some(HEADING_LABEL_CLASSES.to_string());
            page_title = config
                .page
                .title
                .clone()
                .or_else(|| Some(label.text.clone()));
            if let Some(fieldset) = &mut field.fieldset {
                fieldset.legend = field.label.clone();
            }
            show_title = false;
        }

        PageViewModel {
            page_title: page_title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
            section_title: self.section_title.clone(),
            page_caption: caption,
            show_title,
            use_form: self.has_form_components() || self.has_next,
            button_text: self.button_text.clone(),
            components,
            errors: errors.cloned(),
            view: config.view.clone(),
        }
    }

    /// Display strings of every form component, keyed by name.
    pub fn display_strings(&self, state: &State) -> Vec<(String, String)> {
        self.components.display_strings(state)
    }
}
