//! The viewer collaborator seam and the context that retains its handle.

use crate::error::DocsResult;
use crate::viewer::ViewerConfig;

/// A rendering collaborator that can be initialized from a [`ViewerConfig`].
///
/// The production implementation is [`SwaggerUi`](crate::SwaggerUi).
pub trait ViewerBackend {
    /// Handle returned by a successful initialization.
    type Handle;

    /// Initialize the viewer. Called exactly once per page load.
    fn init(&self, config: &ViewerConfig) -> DocsResult<Self::Handle>;
}

impl<B: ViewerBackend + ?Sized> ViewerBackend for &B {
    type Handle = B::Handle;

    fn init(&self, config: &ViewerConfig) -> DocsResult<Self::Handle> {
        (**self).init(config)
    }
}

/// Application context for one page load.
///
/// Holds the configuration the viewer was initialized with together with
/// the handle the backend returned, so later code can reach the active
/// viewer through an explicit value.
#[derive(Debug, Clone)]
pub struct ViewerContext<H> {
    config: ViewerConfig,
    handle: H,
}

impl<H> ViewerContext<H> {
    pub(crate) fn new(config: ViewerConfig, handle: H) -> Self {
        Self { config, handle }
    }

    /// Configuration passed to the backend.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Handle returned by the backend.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Document the viewer opened first.
    #[must_use]
    pub fn initial_url(&self) -> &str {
        &self.config.initial_url
    }

    /// Consume the context, returning the handle.
    pub fn into_handle(self) -> H {
        self.handle
    }

    /// Consume the context, returning configuration and handle.
    pub fn into_parts(self) -> (ViewerConfig, H) {
        (self.config, self.handle)
    }
}
