//! Templates Module
//!
//! Page templates, where they are stored, how placeholders are filled, and
//! the cache-aside service that renders pages through the cache.

mod model;
mod render;
mod service;
mod store;

pub use model::{Template, TemplateStatus};
pub use render::combine_html_with_data;
pub use service::PageService;
pub use store::{InMemoryTemplateStore, TemplateStore};
