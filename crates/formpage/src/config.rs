//! Per-request overrides supplied by the host alongside a page.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::value::loose_key;

/// Request-specific configuration.
///
/// Two keys are reserved: `$PAGE$` overrides page chrome and `$VIEW$` is merged
/// verbatim into the page view model. Every other key names a component.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RequestConfig {
    /// Page title and caption overrides.
    #[serde(rename = "$PAGE$", default)]
    pub page: PageOverrides,
    /// Arbitrary data passed through to the view model.
    #[serde(rename = "$VIEW$", default)]
    pub view: Map<String, Value>,
    /// Overrides keyed by component name.
    #[serde(flatten)]
    pub components: HashMap<String, ComponentOverrides>,
}

/// Overrides for page chrome.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageOverrides {
    /// Replacement page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement caption.
    #[serde(default)]
    pub caption: Option<String>,
}

/// Overrides for one component.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOverrides {
    /// Replacement question text.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement title used in error messages.
    #[serde(default)]
    pub title_for_error: Option<String>,
    /// Replacement hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// Values a filterable choice field is narrowed to; ignored unless an array.
    #[serde(default)]
    pub filter: Option<Value>,
    /// Values substituted into a dynamic HTML template.
    #[serde(default)]
    pub parameter_values: Vec<Value>,
}

impl ComponentOverrides {
    /// Canonical keys of the filter, when it is an array.
    pub fn filter_keys(&self) -> Option<Vec<String>> {
        match &self.filter {
            Some(Value::Array(items)) => Some(items.iter().map(loose_key).collect()),
            _ => None,
        }
    }
}

impl RequestConfig {
    /// Overrides for the named component, if any.
    pub fn component(&self, name: &str) -> Option<&ComponentOverrides> {
        self.components.get(name)
    }

    /// Start building a config in code.
    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder::default()
    }
}

/// Fluent construction of a [`RequestConfig`], mostly for hosts and tests.
#[derive(Debug, Default)]
pub struct RequestConfigBuilder {
    /// Config under construction.
    config: RequestConfig,
}

impl RequestConfigBuilder {
    /// Override the page title.
    pub fn page_title(mut self, title: impl Into<String>) -> Self {
        self.config.page.title = Some(title.into());
        self
    }

    /// Override the page caption.
    pub fn page_caption(mut self, caption: impl Into<String>) -> Self {
        self.config.page.caption = Some(caption.into());
        self
    }

    /// Add a pass-through view value.
    pub fn view(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.view.insert(key.into(), value);
        self
    }

    /// Replace the overrides for one component.
    pub fn component(mut self, name: impl Into<String>, overrides: ComponentOverrides) -> Self {
        self.config.components.insert(name.into(), overrides);
        self
    }

    /// Finish.
    pub fn build(self) -> RequestConfig {
        self.config
    }
}
