//! Static content blocks: no schema, no data, just a view model.

use serde_json::Value;

use crate::{
    config::RequestConfig,
    definition::{ContentDef, DynamicHtmlDef, WarningTextDef},
    html::escape_html,
    value::loose_key,
    view::ContentModel,
};

/// Placeholder replaced by successive parameter values.
const PARAMETER_TOKEN: &str = "$PARAM$";

/// Fallback assistive text of a warning icon.
const WARNING_FALLBACK: &str = "Warning";

/// A static content component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A paragraph of body text.
    Para {
        /// Body HTML.
        content: String,
    },
    /// A raw HTML block.
    Html {
        /// Body HTML.
        content: String,
    },
    /// Inset text.
    InsetText {
        /// Body HTML.
        content: String,
    },
    /// Expandable details.
    Details {
        /// Summary shown when collapsed.
        title: String,
        /// Body HTML.
        content: String,
    },
    /// A warning callout.
    WarningText {
        /// Warning text.
        text: String,
        /// Assistive text for the icon.
        summary: Option<String>,
    },
    /// HTML filled in from request parameters.
    DynamicHtml {
        /// Name used to look up parameter values.
        name: String,
        /// Template with `$PARAM$` placeholders.
        template: String,
    },
}

impl Content {
    pub(crate) fn para(def: &ContentDef) -> Self {
        Self::Para {
            content: def.content.clone(),
        }
    }

    pub(crate) fn html(def: &ContentDef) -> Self {
        Self::Html {
            content: def.content.clone(),
        }
    }

    pub(crate) fn inset_text(def: &ContentDef) -> Self {
        Self::InsetText {
            content: def.content.clone(),
        }
    }

    pub(crate) fn details(def: &ContentDef) -> Self {
        Self::Details {
            title: def.title.clone().unwrap_or_default(),
            content: def.content.clone(),
        }
    }

    pub(crate) fn warning_text(def: &WarningTextDef) -> Self {
        Self::WarningText {
            text: def.text.clone(),
            summary: def.summary.clone(),
        }
    }

    pub(crate) fn dynamic_html(def: &DynamicHtmlDef) -> Self {
        Self::DynamicHtml {
            name: def.name.clone(),
            template: def.template_html.clone(),
        }
    }

    /// Component type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Para { .. } => "Para",
            Self::Html { .. } => "Html",
            Self::InsetText { .. } => "InsetText",
            Self::Details { .. } => "Details",
            Self::WarningText { .. } => "WarningText",
            Self::DynamicHtml { .. } => "DynamicHtml",
        }
    }

    /// Render-ready model.
    pub fn view_model(&self, config: &RequestConfig) -> ContentModel {
        match self {
            Self::Para { content } | Self::Html { content } | Self::InsetText { content } => {
                ContentModel {
                    content: Some(content.clone()),
                    ..ContentModel::default()
                }
            }
            Self::Details { title, content } => ContentModel {
                summary_html: Some(title.clone()),
                html: Some(content.clone()),
                ..ContentModel::default()
            },
            Self::WarningText { text, summary } => ContentModel {
                text: Some(text.clone()),
                icon_fallback_text: Some(
                    summary.clone().unwrap_or_else(|| WARNING_FALLBACK.to_string()),
                ),
                ..ContentModel::default()
            },
            Self::DynamicHtml { name, template } => {
                let params = config
                    .component(name)
                    .map(|o| o.parameter_values.as_slice())
                    .unwrap_or_default();
                ContentModel {
                    content: Some(fill_template(template, params)),
                    ..ContentModel::default()
                }
            }
        }
    }
}

/// Replace each placeholder, left to right, with the next escaped parameter.
///
/// Placeholders beyond the supplied parameters become empty; surplus
/// parameters are ignored.
pub fn fill_template(template: &str, params: &[Value]) -> String {
    let mut values = params.iter().map(|v| escape_html(&loose_key(v)));
    let mut pieces = template.split(PARAMETER_TOKEN);
    let mut out = pieces.next().unwrap_or_default().to_string();
    for piece in pieces {
        out.push_str(&values.next().unwrap_or_default());
        out.push_str(piece);
    }
    out
}
