use crate::fragments::{FragmentKind, Fragments};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Categories a template may be filed under
pub const CATEGORIES: [&str; 8] = [
    "Cards",
    "Buttons",
    "Forms",
    "Navigation",
    "Modals",
    "Inputs",
    "Loaders",
    "Animations",
];

/// Identifier of a persisted template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u64);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TemplateId)
    }
}

impl From<u64> for TemplateId {
    fn from(id: u64) -> Self {
        TemplateId(id)
    }
}

/// A reusable UI component snippet as persisted by the catalog.
///
/// The core only ever reads templates; edits live in an edit buffer and
/// never flow back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "codeHTML")]
    pub code_html: String,
    #[serde(rename = "codeCSS", default)]
    pub code_css: String,
    #[serde(rename = "codeJS", default)]
    pub code_js: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_by: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// The canonical fragments of this template
    pub fn fragments(&self) -> Fragments {
        Fragments {
            html: self.code_html.clone(),
            css: self.code_css.clone(),
            js: self.code_js.clone(),
        }
    }

    pub fn fragment(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Html => &self.code_html,
            FragmentKind::Css => &self.code_css,
            FragmentKind::Js => &self.code_js,
        }
    }
}

fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Insert payload for a new template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "codeHTML")]
    pub code_html: String,
    #[serde(rename = "codeCSS", default)]
    pub code_css: String,
    #[serde(rename = "codeJS", default)]
    pub code_js: String,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_by: Option<u64>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The store has already handed out the largest id
    #[error("No template ids left")]
    IdsExhausted,
}

impl NewTemplate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("Title", &self.title),
            ("Category", &self.category),
            ("Description", &self.description),
            ("HTML code", &self.code_html),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::Required(field));
            }
        }

        if !CATEGORIES.contains(&self.category.as_str()) {
            return Err(ValidationError::UnknownCategory(self.category.clone()));
        }

        Ok(())
    }

    /// Assign identity and creation time, validating first
    pub fn into_template(
        self,
        id: TemplateId,
        created_at: DateTime<Utc>,
    ) -> Result<Template, ValidationError> {
        self.validate()?;

        Ok(Template {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            code_html: self.code_html,
            code_css: self.code_css,
            code_js: self.code_js,
            preview_image: self.preview_image,
            tags: self.tags,
            created_by: self.created_by,
            created_at,
        })
    }
}
