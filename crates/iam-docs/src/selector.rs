//! Selection of the document shown when the viewer page loads.
//!
//! The selector reads the `url` query parameter, falls back to a default
//! document when it is absent or empty, and initializes the viewer once
//! with the full catalog.
//!
//! ```
//! use iam_docs::{DocumentSourceSelector, QueryParams};
//!
//! let selector = DocumentSourceSelector::iam();
//!
//! let config = selector.configuration(&QueryParams::parse("url=/openapi/idp.v1.yaml"));
//! assert_eq!(config.initial_url, "/openapi/idp.v1.yaml");
//! assert_eq!(config.primary_name.as_deref(), Some("IDP"));
//!
//! let config = selector.configuration(&QueryParams::new());
//! assert_eq!(config.initial_url, "/openapi/authn.v1.yaml");
//! ```

use crate::catalog::{DocumentCatalog, DEFAULT_DOCUMENT_URL};
use crate::context::{ViewerBackend, ViewerContext};
use crate::error::DocsResult;
use crate::query::{QueryParams, URL_PARAM};
use crate::viewer::{BehaviorFlags, ViewerConfig, DEFAULT_RENDER_TARGET};

/// Pick the initial document: a non-empty `url` parameter, else `default_url`.
///
/// The override is not checked against the catalog.
#[must_use]
pub fn select_initial_url(params: &QueryParams, default_url: &str) -> String {
    match params.get(URL_PARAM) {
        Some(custom) if !custom.is_empty() => custom.to_string(),
        _ => default_url.to_string(),
    }
}

/// Builds the viewer configuration for a page load and initializes the
/// viewer with it.
#[derive(Debug, Clone)]
pub struct DocumentSourceSelector {
    default_url: String,
    catalog: DocumentCatalog,
    render_target_id: String,
    flags: BehaviorFlags,
}

impl Default for DocumentSourceSelector {
    fn default() -> Self {
        Self::iam()
    }
}

impl DocumentSourceSelector {
    /// Create a selector over `catalog` with `default_url` as fallback.
    #[must_use]
    pub fn new(default_url: impl Into<String>, catalog: DocumentCatalog) -> Self {
        Self {
            default_url: default_url.into(),
            catalog,
            render_target_id: DEFAULT_RENDER_TARGET.to_string(),
            flags: BehaviorFlags::default(),
        }
    }

    /// The IAM platform selector: four documents, AuthN by default.
    #[must_use]
    pub fn iam() -> Self {
        Self::new(DEFAULT_DOCUMENT_URL, DocumentCatalog::iam())
    }

    /// Set the id of the element the viewer mounts into.
    #[must_use]
    pub fn render_target(mut self, id: impl Into<String>) -> Self {
        self.render_target_id = id.into();
        self
    }

    /// Set the behavior flags.
    ///
    /// Deep linking and the standalone layout are always applied on top.
    #[must_use]
    pub fn flags(mut self, flags: BehaviorFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Fallback document url.
    #[must_use]
    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Selectable documents.
    #[must_use]
    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    /// Render target element id.
    #[must_use]
    pub fn render_target_id(&self) -> &str {
        &self.render_target_id
    }

    /// Build the configuration for a page load with the given parameters.
    #[must_use]
    pub fn configuration(&self, params: &QueryParams) -> ViewerConfig {
        let initial_url = select_initial_url(params, &self.default_url);
        let primary_name = self
            .catalog
            .find_by_url(&initial_url)
            .map(|entry| entry.name.clone());

        tracing::debug!(
            initial_url = %initial_url,
            primary = primary_name.as_deref().unwrap_or("-"),
            overridden = initial_url != self.default_url,
            "selected document source"
        );

        ViewerConfig {
            initial_url,
            entries: self.catalog.clone(),
            render_target_id: self.render_target_id.clone(),
            flags: self.flags.pinned(),
            primary_name,
        }
    }

    /// Run the page-load sequence: build the configuration, initialize
    /// `backend` once with it, and return the context holding its handle.
    ///
    /// # Errors
    ///
    /// Returns whatever error the backend reports; the selector itself
    /// cannot fail.
    pub fn load<B: ViewerBackend>(
        &self,
        backend: &B,
        params: &QueryParams,
    ) -> DocsResult<ViewerContext<B::Handle>> {
        let config = self.configuration(params);
        let handle = backend.init(&config)?;
        Ok(ViewerContext::new(config, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DocumentEntry;
    use crate::error::DocsError;
    use crate::viewer::{DocExpansion, Layout};
    use std::cell::Cell;

    struct CountingBackend {
        calls: Cell<usize>,
    }

    impl ViewerBackend for CountingBackend {
        type Handle = usize;

        fn init(&self, _config: &ViewerConfig) -> DocsResult<usize> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.calls.get())
        }
    }

    struct FailingBackend;

    impl ViewerBackend for FailingBackend {
        type Handle = ();

        fn init(&self, _config: &ViewerConfig) -> DocsResult<()> {
            Err(DocsError::viewer_init("malformed url"))
        }
    }

    #[test]
    fn test_select_initial_url_default() {
        assert_eq!(
            select_initial_url(&QueryParams::new(), "/default.yaml"),
            "/default.yaml"
        );
    }

    #[test]
    fn test_select_initial_url_override() {
        let params = QueryParams::parse("url=/custom.yaml");
        assert_eq!(select_initial_url(&params, "/default.yaml"), "/custom.yaml");
    }

    #[test]
    fn test_select_initial_url_empty_falls_back() {
        let params = QueryParams::parse("url=");
        assert_eq!(select_initial_url(&params, "/default.yaml"), "/default.yaml");
    }

    #[test]
    fn test_unknown_override_has_no_primary_name() {
        let selector = DocumentSourceSelector::iam();
        let config = selector.configuration(&QueryParams::parse(
            "url=https://example.com/other.yaml",
        ));

        assert_eq!(config.initial_url, "https://example.com/other.yaml");
        assert!(config.primary_name.is_none());
        assert_eq!(config.entries.len(), 4);
    }

    #[test]
    fn test_default_selects_authn_as_primary() {
        let config = DocumentSourceSelector::iam().configuration(&QueryParams::new());
        assert_eq!(config.primary_name.as_deref(), Some("AuthN"));
    }

    #[test]
    fn test_flags_are_pinned() {
        let selector = DocumentSourceSelector::iam().flags(BehaviorFlags {
            deep_linking: false,
            layout: Layout::Base,
            doc_expansion: DocExpansion::None,
            display_request_duration: true,
        });

        let config = selector.configuration(&QueryParams::parse("deepLinking=false"));
        assert!(config.flags.deep_linking);
        assert_eq!(config.flags.layout, Layout::Standalone);
        assert_eq!(config.flags.doc_expansion, DocExpansion::None);
    }

    #[test]
    fn test_render_target() {
        let selector = DocumentSourceSelector::iam().render_target("docs");
        let config = selector.configuration(&QueryParams::new());
        assert_eq!(config.render_target_id, "docs");
        assert_eq!(selector.render_target_id(), "docs");
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = DocumentCatalog::from_entries([
            DocumentEntry::new("One", "/one.yaml"),
            DocumentEntry::new("Two", "/two.yaml"),
        ])
        .unwrap();
        let selector = DocumentSourceSelector::new("/two.yaml", catalog);

        let config = selector.configuration(&QueryParams::new());
        assert_eq!(config.initial_url, "/two.yaml");
        assert_eq!(config.primary_name.as_deref(), Some("Two"));
    }

    #[test]
    fn test_load_invokes_backend_once() {
        let backend = CountingBackend { calls: Cell::new(0) };
        let selector = DocumentSourceSelector::iam();

        let ctx = selector
            .load(&backend, &QueryParams::parse("url=/openapi/idp.v1.yaml"))
            .unwrap();

        assert_eq!(backend.calls.get(), 1);
        assert_eq!(*ctx.handle(), 1);
        assert_eq!(ctx.initial_url(), "/openapi/idp.v1.yaml");
    }

    #[test]
    fn test_load_propagates_backend_error() {
        let result = DocumentSourceSelector::iam().load(&FailingBackend, &QueryParams::new());
        assert!(matches!(result, Err(DocsError::ViewerInit { .. })));
    }
}
