//! Request DTOs for the page service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::templates::{Template, TemplateStatus};

/// Request body for publishing a template (PUT /v1/templates)
///
/// # Fields
/// - `name`: Template name, also the page name
/// - `html`: HTML with `{{ .key }}` placeholders
/// - `data`: Optional JSON object as a string
/// - `status`: `active` (default) or `inactive`
#[derive(Debug, Clone, Deserialize)]
pub struct PublishTemplateRequest {
    pub name: String,
    pub html: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub status: TemplateStatus,
}

impl PublishTemplateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Template name cannot be blank".to_string());
        }
        if let Some(data) = self.data.as_deref().filter(|d| !d.is_empty()) {
            if let Err(e) = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(data) {
                return Some(format!("Template data must be a JSON object: {}", e));
            }
        }
        None
    }
}

impl From<PublishTemplateRequest> for Template {
    fn from(req: PublishTemplateRequest) -> Self {
        Template {
            name: req.name,
            html: req.html,
            data: req.data,
            status: req.status,
        }
    }
}
