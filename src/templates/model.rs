//! Template Model
//!
//! A named HTML template with an optional JSON data blob.

use serde::{Deserialize, Serialize};

/// Publication state of a template. Only active templates are served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStatus {
    #[default]
    Active,
    Inactive,
}

/// A stored page template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique name, also used as the page cache key
    pub name: String,
    /// HTML containing `{{ .key }}` placeholders
    pub html: String,
    /// JSON object whose fields fill the placeholders
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub status: TemplateStatus,
}

impl Template {
    /// Creates an active template.
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html: html.into(),
            data: None,
            status: TemplateStatus::Active,
        }
    }

    /// Sets the JSON data blob.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the publication state.
    pub fn with_status(mut self, status: TemplateStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == TemplateStatus::Active
    }
}
