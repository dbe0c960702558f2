//! # Edit Buffer
//!
//! Scratch copies of a template's three fragments. A buffer is owned by
//! exactly one open view and is never written back to the store.

use crate::errors::EditorError;
use swatch_common::{FragmentKind, Fragments, Template, TemplateId};

/// Drafts for one open template view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    drafts: Fragments,
    original_ref: TemplateId,
}

impl EditBuffer {
    /// Seed all three drafts from the template's canonical fragments
    pub fn seeded(template: &Template) -> Self {
        Self {
            drafts: template.fragments(),
            original_ref: template.id,
        }
    }

    /// Template the drafts were seeded from
    pub fn original_ref(&self) -> TemplateId {
        self.original_ref
    }

    /// Replace one draft. The text is not validated; anything goes,
    /// including the empty string.
    pub fn set_fragment(&mut self, kind: FragmentKind, text: impl Into<String>) {
        *self.drafts.get_mut(kind) = text.into();
    }

    /// Current text of one draft
    pub fn fragment(&self, kind: FragmentKind) -> &str {
        self.drafts.get(kind)
    }

    /// Read-only projection of all three drafts
    pub fn snapshot(&self) -> Fragments {
        self.drafts.clone()
    }

    /// Overwrite every draft with the template's canonical fragments,
    /// discarding all edits.
    pub fn reset_from(&mut self, template: &Template) -> Result<(), EditorError> {
        if template.id != self.original_ref {
            return Err(EditorError::TemplateMismatch {
                expected: self.original_ref,
                actual: template.id,
            });
        }

        self.drafts = template.fragments();
        Ok(())
    }

    /// Whether the drafts still match the given canonical template
    pub fn is_pristine(&self, template: &Template) -> bool {
        template.id == self.original_ref && self.drafts == template.fragments()
    }

    /// Draft kinds that differ from the canonical template
    pub fn modified_kinds(&self, template: &Template) -> Vec<FragmentKind> {
        FragmentKind::ALL
            .into_iter()
            .filter(|kind| self.drafts.get(*kind) != template.fragment(*kind))
            .collect()
    }
}
