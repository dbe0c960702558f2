use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use swatch_common::{FragmentKind, Template, TemplateId};
use swatch_editor::{EditSession, EditorError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("View {0} is not open")]
    ViewNotFound(ViewId),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// Identifier of one open template view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Open views, one edit session each
#[derive(Debug, Default)]
pub struct WorkspaceState {
    views: HashMap<ViewId, EditSession>,
    next_id: u64,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    // Open a view on an already fetched template
    pub fn open_view(&mut self, template: &Template) -> ViewId {
        self.next_id += 1;
        let view_id = ViewId(self.next_id);

        self.views.insert(
            view_id,
            EditSession::new(format!("view-{}", view_id), template),
        );
        view_id
    }

    pub fn get_view(&self, view_id: ViewId) -> Result<&EditSession, StateError> {
        self.views
            .get(&view_id)
            .ok_or(StateError::ViewNotFound(view_id))
    }

    pub fn template_of(&self, view_id: ViewId) -> Result<TemplateId, StateError> {
        self.get_view(view_id).map(|session| session.template_id())
    }

    pub fn set_fragment(
        &mut self,
        view_id: ViewId,
        kind: FragmentKind,
        text: String,
    ) -> Result<u64, StateError> {
        let session = self
            .views
            .get_mut(&view_id)
            .ok_or(StateError::ViewNotFound(view_id))?;

        Ok(session.set_fragment(kind, text))
    }

    // Apply a fetched template to a view. If the view was closed while the
    // fetch was outstanding the template is dropped and nothing changes.
    pub fn reset_view(&mut self, view_id: ViewId, template: &Template) -> Result<u64, StateError> {
        let session = self
            .views
            .get_mut(&view_id)
            .ok_or(StateError::ViewNotFound(view_id))?;

        Ok(session.reset_from(template)?)
    }

    pub fn close_view(&mut self, view_id: ViewId) -> bool {
        self.views.remove(&view_id).is_some()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn template() -> Template {
        Template {
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
        }
    }

    #[test]
    fn test_workspace_state_creation() {
        let state = WorkspaceState::new();
        assert_eq!(state.view_count(), 0);
    }

    #[test]
    fn test_views_get_distinct_ids() {
        let mut state = WorkspaceState::new();
        let a = state.open_view(&template());
        let b = state.open_view(&template());

        assert_ne!(a, b);
        assert_eq!(state.view_count(), 2);
        assert_eq!(state.get_view(a).unwrap().id, format!("view-{}", a));
    }

    #[test]
    fn test_views_do_not_share_buffers() {
        let mut state = WorkspaceState::new();
        let a = state.open_view(&template());
        let b = state.open_view(&template());

        state
            .set_fragment(a, FragmentKind::Html, "<p>A only</p>".to_string())
            .unwrap();

        assert_eq!(state.get_view(b).unwrap().snapshot(), template().fragments());
    }

    #[test]
    fn test_reset_after_close_is_discarded() {
        let mut state = WorkspaceState::new();
        let view = state.open_view(&template());
        assert!(state.close_view(view));

        assert_eq!(
            state.reset_view(view, &template()),
            Err(StateError::ViewNotFound(view))
        );
        assert_eq!(state.view_count(), 0);
    }

    #[test]
    fn test_version_increment() {
        let mut state = WorkspaceState::new();
        let view = state.open_view(&template());

        assert_eq!(state.set_fragment(view, FragmentKind::Css, "".to_string()), Ok(1));
        assert_eq!(state.set_fragment(view, FragmentKind::Js, "x()".to_string()), Ok(2));
        assert_eq!(state.reset_view(view, &template()), Ok(3));
    }
}
