//! Hosting contract for composed documents.
//!
//! Composed documents carry user-editable script and are never sanitized, so
//! every host that renders one must confine it: scripts may run, but the
//! document gets an opaque origin with no access to the embedding page's
//! storage, navigation or top-level browsing context.

use crate::compiler::{escape_html, RenderableDocument};

/// Capabilities granted to a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_scripts: bool,
}

impl SandboxPolicy {
    /// Scripts run, nothing else is granted
    pub const PREVIEW: SandboxPolicy = SandboxPolicy {
        allow_scripts: true,
    };

    /// Value for an iframe `sandbox` attribute
    pub fn iframe_attribute(&self) -> &'static str {
        if self.allow_scripts {
            "allow-scripts"
        } else {
            ""
        }
    }

    /// Value for a `Content-Security-Policy` header on a directly served document
    pub fn content_security_policy(&self) -> &'static str {
        if self.allow_scripts {
            "sandbox allow-scripts"
        } else {
            "sandbox"
        }
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self::PREVIEW
    }
}

/// How a host presents the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameMode {
    /// Full-size interactive preview next to the editor
    Live,
    /// Scaled, non-interactive card preview
    Thumbnail { scale: f32 },
}

impl FrameMode {
    pub const CARD_SCALE: f32 = 0.6;

    pub fn card() -> Self {
        FrameMode::Thumbnail {
            scale: Self::CARD_SCALE,
        }
    }
}

/// A composed document plus the embedding it must be rendered with.
///
/// Thumbnail behaviour lives entirely in the frame styling; the document is
/// the same one the live preview gets.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub document: RenderableDocument,
    pub policy: SandboxPolicy,
    pub mode: FrameMode,
    pub title: String,
}

impl PreviewFrame {
    pub fn live(document: RenderableDocument, title: impl Into<String>) -> Self {
        Self {
            document,
            policy: SandboxPolicy::PREVIEW,
            mode: FrameMode::Live,
            title: title.into(),
        }
    }

    pub fn thumbnail(document: RenderableDocument, title: impl Into<String>) -> Self {
        Self {
            document,
            policy: SandboxPolicy::PREVIEW,
            mode: FrameMode::card(),
            title: format!("Preview of {}", title.into()),
        }
    }

    /// Inline style applied to the iframe element
    pub fn frame_style(&self) -> String {
        match self.mode {
            FrameMode::Live => "width: 100%; height: 100%; border: 0;".to_string(),
            FrameMode::Thumbnail { scale } => format!(
                "width: 100%; height: 100%; border: 0; overflow: hidden; pointer-events: none; transform: scale({});",
                scale
            ),
        }
    }

    /// Render the embedding iframe with the document in `srcdoc`
    pub fn to_iframe_html(&self) -> String {
        format!(
            "<iframe srcdoc=\"{}\" sandbox=\"{}\" title=\"{}\" style=\"{}\"{}></iframe>",
            escape_html(self.document.as_str()),
            self.policy.iframe_attribute(),
            escape_html(&self.title),
            self.frame_style(),
            match self.mode {
                FrameMode::Live => "",
                FrameMode::Thumbnail { .. } => " scrolling=\"no\" tabindex=\"-1\"",
            }
        )
    }
}
