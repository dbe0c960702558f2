use crate::entitlement::{evaluate, DenialReason, ExportGrant};
use std::sync::Arc;
use swatch_common::{AccessContext, StoreError, Template, TemplateId, TemplateStore};
use swatch_compiler_html::compose_standalone;
use thiserror::Error;

pub const EXPORT_MIME_TYPE: &str = "text/html";

/// Errors that can end an export attempt. None of them carry a partial
/// artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Export denied: {0}")]
    Denied(DenialReason),

    #[error("Template {0} not found")]
    NotFound(TemplateId),

    #[error("Template store unavailable: {0}")]
    Transport(String),
}

impl From<StoreError> for ExportError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ExportError::NotFound(id),
            StoreError::Transport(message) => ExportError::Transport(message),
        }
    }
}

/// A downloadable standalone document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    filename: String,
    mime_type: &'static str,
    content: String,
}

impl ExportArtifact {
    /// Build from canonical template data. Requires a grant.
    pub fn build(template: &Template, _grant: ExportGrant) -> Self {
        let document = compose_standalone(&template.title, &template.fragments());

        Self {
            filename: export_filename(&template.title),
            mime_type: EXPORT_MIME_TYPE,
            content: document.into_string(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// File name for an exported template: the lower-cased title with every
/// run of whitespace turned into one hyphen.
pub fn export_filename(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('-');
            }
            in_whitespace = true;
        } else {
            stem.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    if stem.is_empty() {
        stem.push_str("template");
    }

    format!("{}.html", stem)
}

/// Produces export artifacts for entitled callers.
///
/// Always reads canonical fragments from the store. Open edit buffers are
/// never consulted, so an export reflects the last published version.
#[derive(Clone)]
pub struct ExportGate {
    store: Arc<dyn TemplateStore>,
}

impl ExportGate {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub async fn request_export(
        &self,
        template_id: TemplateId,
        ctx: &AccessContext,
    ) -> Result<ExportArtifact, ExportError> {
        let decision = evaluate(ctx);
        let grant = decision.into_grant().map_err(|reason| {
            tracing::debug!(%template_id, role = ctx.role.as_str(), %reason, "export denied");
            ExportError::Denied(reason)
        })?;

        let template = self.store.get_template(template_id).await.map_err(|e| {
            if let StoreError::Transport(message) = &e {
                tracing::warn!(%template_id, error = %message, "export fetch failed");
            }
            ExportError::from(e)
        })?;

        tracing::debug!(
            %template_id,
            reason = %decision.reason(),
            "export granted"
        );

        Ok(ExportArtifact::build(&template, grant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Fancy Card"), "fancy-card.html");
        assert_eq!(export_filename("Glow  Button\tV2"), "glow-button-v2.html");
        assert_eq!(export_filename(" Padded "), "-padded-.html");
        assert_eq!(export_filename(""), "template.html");
    }

    #[test]
    fn test_store_errors_map_to_export_errors() {
        assert_eq!(
            ExportError::from(StoreError::NotFound(TemplateId(3))),
            ExportError::NotFound(TemplateId(3))
        );
        assert_eq!(
            ExportError::from(StoreError::Transport("timeout".to_string())),
            ExportError::Transport("timeout".to_string())
        );
    }
}
