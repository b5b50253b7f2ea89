//! Page Service
//!
//! Cache-aside rendering: serve a page from the cache, or render it from
//! its template and cache the result for the configured TTL.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::error::{AppError, Result};
use crate::templates::{combine_html_with_data, Template, TemplateStore};

/// Renders pages by name, caching the rendered HTML.
#[derive(Clone)]
pub struct PageService {
    cache: Arc<Cache<String>>,
    templates: Arc<dyn TemplateStore>,
    page_ttl: Duration,
    /// Bumped by every publish; a render that straddles one drops its page
    generation: Arc<AtomicU64>,
}

impl PageService {
    pub fn new(
        cache: Arc<Cache<String>>,
        templates: Arc<dyn TemplateStore>,
        page_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            templates,
            page_ttl,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The shared page cache.
    pub fn cache(&self) -> &Arc<Cache<String>> {
        &self.cache
    }

    // == Render ==
    /// Returns the rendered page for `name`.
    ///
    /// A cache miss is not an error; only a missing or inactive template or
    /// malformed template data fail.
    ///
    /// If a publish lands while the page is being rendered, the result is
    /// still returned but not left in the cache, since it may come from the
    /// template version that publish replaced.
    pub fn render(&self, name: &str) -> Result<String> {
        if let Some(html) = self.cache.get(name) {
            debug!(page = name, "Page cache hit");
            return Ok(html);
        }

        debug!(page = name, "Page cache miss, rendering");
        let generation = self.generation.load(Ordering::SeqCst);
        let template = self.templates.find_active(name).ok_or_else(|| {
            warn!(page = name, "Template not found");
            AppError::TemplateNotFound(name.to_string())
        })?;

        let html = combine_html_with_data(&template.html, template.data.as_deref())?;
        self.cache.set(name, html.clone(), self.page_ttl);

        // A publish that bumped the generation before this check has its own
        // invalidate ordered after the bump, which clears the set above.
        // One that bumped after it may have missed the set, so undo it here.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(page = name, "Template published during render, dropping page");
            self.cache.remove(name);
        }

        Ok(html)
    }

    // == Invalidate ==
    /// Drops the cached page for `name`. Returns true if a live page was cached.
    pub fn invalidate(&self, name: &str) -> bool {
        self.cache.remove(name).is_some()
    }

    // == Publish ==
    /// Stores `template` and drops any page rendered from its previous version.
    pub fn publish(&self, template: Template) {
        let name = template.name.clone();
        self.templates.upsert(template);
        // After the upsert, so a render that sees the new generation also
        // sees the new template.
        self.generation.fetch_add(1, Ordering::SeqCst);
        if self.invalidate(&name) {
            info!(page = %name, "Template updated, cached page invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{InMemoryTemplateStore, TemplateStatus};
    use std::sync::atomic::AtomicBool;
    use std::sync::Barrier;
    use std::thread;

    fn service_with(templates: Vec<Template>, ttl: Duration) -> PageService {
        PageService::new(
            Arc::new(Cache::new()),
            Arc::new(InMemoryTemplateStore::from_templates(templates)),
            ttl,
        )
    }

    #[test]
    fn test_render_then_serve_from_cache() {
        let service = service_with(
            vec![Template::new("home", "<h1>{{ .title }}</h1>").with_data(r#"{"title": "Hi"}"#)],
            Duration::from_secs(60),
        );

        assert_eq!(service.render("home").unwrap(), "<h1>Hi</h1>");
        assert_eq!(service.render("home").unwrap(), "<h1>Hi</h1>");

        let stats = service.cache().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.sets, 1);
    }

    #[test]
    fn test_cached_page_survives_template_change_until_publish() {
        let service = service_with(vec![Template::new("home", "v1")], Duration::from_secs(60));
        assert_eq!(service.render("home").unwrap(), "v1");

        // Changing the store directly does not touch the cached page
        service.templates.upsert(Template::new("home", "v2"));
        assert_eq!(service.render("home").unwrap(), "v1");

        service.publish(Template::new("home", "v3"));
        assert_eq!(service.render("home").unwrap(), "v3");
    }

    #[test]
    fn test_render_after_expiry_rerenders() {
        let service = service_with(vec![Template::new("home", "v1")], Duration::from_millis(30));
        assert_eq!(service.render("home").unwrap(), "v1");

        service.templates.upsert(Template::new("home", "v2"));
        std::thread::sleep(Duration::from_millis(60));

        assert_eq!(service.render("home").unwrap(), "v2");
    }

    #[test]
    fn test_render_missing_template() {
        let service = service_with(vec![], Duration::from_secs(60));
        let result = service.render("missing");
        assert!(matches!(result, Err(AppError::TemplateNotFound(name)) if name == "missing"));
        assert!(service.cache().is_empty());
    }

    #[test]
    fn test_render_inactive_template() {
        let service = service_with(
            vec![Template::new("draft", "<p></p>").with_status(TemplateStatus::Inactive)],
            Duration::from_secs(60),
        );
        assert!(matches!(service.render("draft"), Err(AppError::TemplateNotFound(_))));
    }

    #[test]
    fn test_render_malformed_data_is_not_cached() {
        let service = service_with(
            vec![Template::new("broken", "<p>{{ .x }}</p>").with_data("{oops")],
            Duration::from_secs(60),
        );
        assert!(matches!(service.render("broken"), Err(AppError::MalformedData(_))));
        assert!(service.cache().is_empty());
    }

    /// Store that parks the first `find_active` call after reading, until the
    /// test releases it.
    struct PausingStore {
        inner: InMemoryTemplateStore,
        paused: AtomicBool,
        read_done: Barrier,
        release: Barrier,
    }

    impl TemplateStore for PausingStore {
        fn find_active(&self, name: &str) -> Option<Template> {
            let found = self.inner.find_active(name);
            if !self.paused.swap(true, Ordering::SeqCst) {
                self.read_done.wait();
                self.release.wait();
            }
            found
        }

        fn upsert(&self, template: Template) {
            self.inner.upsert(template);
        }
    }

    #[test]
    fn test_publish_during_render_does_not_leave_old_page() {
        let store = Arc::new(PausingStore {
            inner: InMemoryTemplateStore::from_templates(vec![Template::new("home", "v1")]),
            paused: AtomicBool::new(false),
            read_done: Barrier::new(2),
            release: Barrier::new(2),
        });
        let service = PageService::new(
            Arc::new(Cache::new()),
            store.clone(),
            Duration::from_secs(60),
        );

        let renderer = {
            let service = service.clone();
            thread::spawn(move || service.render("home"))
        };

        // The render has read v1 and not cached it yet
        store.read_done.wait();
        service.publish(Template::new("home", "v2"));
        store.release.wait();

        let during = renderer.join().expect("render thread panicked").unwrap();
        assert_eq!(during, "v1");
        assert_eq!(service.render("home").unwrap(), "v2");
    }

    #[test]
    fn test_zero_ttl_disables_page_caching() {
        let config = crate::config::Config {
            page_cache_ttl: 0,
            ..Default::default()
        };
        let service = service_with(vec![Template::new("home", "v1")], config.page_ttl());

        assert_eq!(service.render("home").unwrap(), "v1");
        assert_eq!(service.render("home").unwrap(), "v1");
        assert!(service.cache().is_empty());
        assert_eq!(service.cache().stats().misses, 2);
    }

    #[test]
    fn test_invalidate() {
        let service = service_with(vec![Template::new("home", "v1")], Duration::from_secs(60));
        assert!(!service.invalidate("home"));

        service.render("home").unwrap();
        assert!(service.invalidate("home"));
        assert!(service.cache().is_empty());
    }
}
