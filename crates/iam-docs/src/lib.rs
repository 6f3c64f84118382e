//! # IAM Docs
//!
//! Document source selection and Swagger UI rendering for the IAM API
//! reference.
//!
//! This crate provides:
//! - **Document catalog**: the ordered, named OpenAPI documents (AuthN,
//!   Identity, AuthZ, IDP)
//! - **Source selection**: the `url` query override with fallback to a
//!   default document
//! - **Swagger UI backend**: the initializer script and HTML page that hand
//!   the configuration to `SwaggerUIBundle`
//!
//! ## Quick Start
//!
//! ```rust
//! use iam_docs::{DocumentSourceSelector, QueryParams, SwaggerUi};
//!
//! let selector = DocumentSourceSelector::iam();
//! let swagger = SwaggerUi::new().title("IAM API Reference");
//!
//! // One page load: parameters in, initialized viewer out
//! let params = QueryParams::parse("url=/openapi/idp.v1.yaml");
//! let ctx = selector.load(&swagger, &params)?;
//!
//! assert_eq!(ctx.initial_url(), "/openapi/idp.v1.yaml");
//! assert_eq!(ctx.config().entries.len(), 4);
//! # Ok::<(), iam_docs::DocsError>(())
//! ```
//!
//! The returned [`ViewerContext`] is the only place the viewer handle lives;
//! pass it to whatever needs to interact with the viewer afterwards.

mod catalog;
mod context;
mod error;
mod query;
mod selector;
mod swagger;
mod viewer;

pub use catalog::{DocumentCatalog, DocumentEntry, DEFAULT_DOCUMENT_URL};
pub use context::{ViewerBackend, ViewerContext};
pub use error::{DocsError, DocsResult};
pub use query::{QueryParams, URL_PARAM};
pub use selector::{select_initial_url, DocumentSourceSelector};
pub use swagger::{SwaggerPage, SwaggerUi, DEFAULT_SWAGGER_VERSION};
pub use viewer::{BehaviorFlags, DocExpansion, Layout, ViewerConfig, DEFAULT_RENDER_TARGET};
