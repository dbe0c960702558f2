//! Fragment Store Adapter
//!
//! Read-only access to the template catalog. The catalog itself is owned
//! elsewhere; the adapters here are what the editor and the export gate
//! talk to.

use crate::error::StoreError;
use crate::result::StoreResult;
use crate::template::{NewTemplate, Template, TemplateId, ValidationError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Read access to persisted templates
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Fetch one template. `NotFound` when the id does not resolve,
    /// `Transport` when the backing store cannot be reached.
    async fn get_template(&self, id: TemplateId) -> StoreResult<Template>;
}

/// In-memory catalog for tests and local fixtures
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<BTreeMap<TemplateId, Template>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let store = Self::new();
        for template in templates {
            store.put(template);
        }
        store
    }

    /// Insert or replace a template as-is
    pub fn put(&self, template: Template) {
        self.write_guard().insert(template.id, template);
    }

    /// Validate and insert a new template under the next free id
    pub fn insert(&self, new_template: NewTemplate) -> Result<Template, ValidationError> {
        let mut templates = self.write_guard();
        let next_id = match templates.keys().next_back() {
            Some(last) => last.0.checked_add(1).ok_or(ValidationError::IdsExhausted)?,
            None => 1,
        };
        let template = new_template.into_template(TemplateId(next_id), Utc::now())?;
        templates.insert(template.id, template.clone());
        Ok(template)
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<TemplateId, Template>> {
        self.templates.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<TemplateId, Template>> {
        self.templates.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn get_template(&self, id: TemplateId) -> StoreResult<Template> {
        self.read_guard()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

/// Catalog backed by a JSON file holding an array of templates.
///
/// The file is re-read on every fetch so that publishes made by the catalog
/// owner are visible without a restart.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<Template>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to read catalog");
            StoreError::transport(e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to parse catalog");
            StoreError::transport(e)
        })
    }
}

#[async_trait]
impl TemplateStore for JsonCatalogStore {
    async fn get_template(&self, id: TemplateId) -> StoreResult<Template> {
        tracing::debug!(%id, path = %self.path.display(), "fetching template");

        self.load()
            .await?
            .into_iter()
            .find(|template| template.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}
