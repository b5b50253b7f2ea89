//! Template Store
//!
//! The lookup port the page service renders from, plus an in-memory adapter
//! that can be seeded from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::error::Result;
use crate::templates::Template;

/// Source of page templates.
pub trait TemplateStore: Send + Sync {
    /// Returns the template named `name` if it exists and is active.
    fn find_active(&self, name: &str) -> Option<Template>;

    /// Inserts or replaces a template by name.
    fn upsert(&self, template: Template);
}

/// Template store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: RwLock<HashMap<String, Template>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a list of templates; later duplicates win.
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let templates = templates
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Loads a JSON array of templates from `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let templates: Vec<Template> = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} templates from {}",
            templates.len(),
            path.display()
        );
        Ok(Self::from_templates(templates))
    }

    pub fn len(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn find_active(&self, name: &str) -> Option<Template> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .filter(|t| t.is_active())
            .cloned()
    }

    fn upsert(&self, template: Template) {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(template.name.clone(), template);
    }
}
