use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three code fragments making up a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Html,
    Css,
    Js,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 3] = [FragmentKind::Html, FragmentKind::Css, FragmentKind::Js];

    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Html => "html",
            FragmentKind::Css => "css",
            FragmentKind::Js => "js",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown fragment kind: {0} (expected html, css or js)")]
pub struct UnknownFragmentKind(pub String);

impl FromStr for FragmentKind {
    type Err = UnknownFragmentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(FragmentKind::Html),
            "css" => Ok(FragmentKind::Css),
            "js" | "javascript" => Ok(FragmentKind::Js),
            _ => Err(UnknownFragmentKind(s.to_string())),
        }
    }
}

/// Markup, style and script text, either canonical or drafted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragments {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Fragments {
    pub fn new(
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    pub fn get(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Html => &self.html,
            FragmentKind::Css => &self.css,
            FragmentKind::Js => &self.js,
        }
    }

    pub fn get_mut(&mut self, kind: FragmentKind) -> &mut String {
        match kind {
            FragmentKind::Html => &mut self.html,
            FragmentKind::Css => &mut self.css,
            FragmentKind::Js => &mut self.js,
        }
    }
}
