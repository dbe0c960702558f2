//! # Edit Session Management
//!
//! An EditSession is one open template view: a buffer seeded from the
//! store, a version counter, and a live preview composed on demand.
//!
//! Sessions never share state. Two views of the same template get two
//! independent buffers.

use crate::{EditBuffer, EditorError};
use swatch_common::{FragmentKind, Fragments, Template, TemplateId, TemplateStore};
use swatch_compiler_html::{compose, RenderableDocument};

/// One open template view
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Incremented on every edit and reset
    pub version: u64,

    buffer: EditBuffer,
}

impl EditSession {
    /// Start a session from an already fetched template
    pub fn new(id: impl Into<String>, template: &Template) -> Self {
        Self {
            id: id.into(),
            version: 0,
            buffer: EditBuffer::seeded(template),
        }
    }

    /// Fetch canonical fragments and seed a new session.
    ///
    /// Nothing is created when the id does not resolve.
    pub async fn open(
        id: impl Into<String>,
        store: &dyn TemplateStore,
        template_id: TemplateId,
    ) -> Result<Self, EditorError> {
        let id = id.into();
        tracing::debug!(session = %id, %template_id, "opening edit session");

        let template = store.get_template(template_id).await?;
        Ok(Self::new(id, &template))
    }

    pub fn template_id(&self) -> TemplateId {
        self.buffer.original_ref()
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Replace one draft and return the new version
    pub fn set_fragment(&mut self, kind: FragmentKind, text: impl Into<String>) -> u64 {
        self.buffer.set_fragment(kind, text);
        self.version += 1;
        self.version
    }

    /// Re-read canonical fragments and discard every unsaved edit.
    ///
    /// The buffer is only touched once the fetch has succeeded, so a failed
    /// or abandoned fetch leaves the drafts as they were.
    pub async fn reset(&mut self, store: &dyn TemplateStore) -> Result<u64, EditorError> {
        let template = store.get_template(self.template_id()).await?;
        tracing::debug!(session = %self.id, template_id = %template.id, "resetting drafts");
        self.reset_from(&template)
    }

    /// Reset from a template fetched by the caller
    pub fn reset_from(&mut self, template: &Template) -> Result<u64, EditorError> {
        self.buffer.reset_from(template)?;
        self.version += 1;
        Ok(self.version)
    }

    pub fn snapshot(&self) -> Fragments {
        self.buffer.snapshot()
    }

    /// Compose the current drafts into a fresh document
    pub fn preview(&self) -> RenderableDocument {
        compose(&self.buffer.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use swatch_common::{MemoryTemplateStore, StoreError};

    fn store() -> MemoryTemplateStore {
        MemoryTemplateStore::with_templates([Template {
            id: TemplateId(1),
            title: "Fancy Card".to_string(),
            category: "Cards".to_string(),
            description: String::new(),
            code_html: "<div>A</div>".to_string(),
            code_css: ".a{color:red}".to_string(),
            code_js: String::new(),
            preview_image: None,
            tags: vec![],
            created_by: None,
            created_at: Utc::now(),
        }])
    }

    #[tokio::test]
    async fn test_session_creation() {
        let store = store();
        let session = EditSession::open("view-1", &store, TemplateId(1))
            .await
            .unwrap();

        assert_eq!(session.id, "view-1");
        assert_eq!(session.version, 0);
        assert_eq!(session.template_id(), TemplateId(1));
    }

    #[tokio::test]
    async fn test_open_unknown_template() {
        let store = store();
        let result = EditSession::open("view-1", &store, TemplateId(99)).await;

        assert_eq!(
            result.unwrap_err(),
            EditorError::Store(StoreError::NotFound(TemplateId(99)))
        );
    }

    #[tokio::test]
    async fn test_versions_increase() {
        let store = store();
        let mut session = EditSession::open("view-1", &store, TemplateId(1))
            .await
            .unwrap();

        assert_eq!(session.set_fragment(FragmentKind::Html, "<b>1</b>"), 1);
        assert_eq!(session.set_fragment(FragmentKind::Html, "<b>2</b>"), 2);
        assert_eq!(session.reset(&store).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_each_edit_composes_its_own_document() {
        let store = store();
        let mut session = EditSession::open("view-1", &store, TemplateId(1))
            .await
            .unwrap();

        session.set_fragment(FragmentKind::Html, "<b>first</b>");
        let first = session.preview();
        session.set_fragment(FragmentKind::Html, "<b>second</b>");
        let second = session.preview();

        assert!(first.as_str().contains("<b>first</b>"));
        assert!(second.as_str().contains("<b>second</b>"));
        assert_ne!(first, second);
    }
}
