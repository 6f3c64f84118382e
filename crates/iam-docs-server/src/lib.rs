//! # IAM Docs Server
//!
//! HTTP service hosting the Swagger UI reference for the IAM APIs.
//!
//! - HTTP/1.1 via Hyper, one task per connection
//! - Per-request document selection from the `url` query parameter
//! - Graceful shutdown with connection draining
//! - Health and readiness endpoints
//!
//! ## Example
//!
//! ```rust,no_run
//! use iam_docs_config::ConfigLoader;
//! use iam_docs_server::DocsServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().with_env_prefix("IAM_DOCS").load()?;
//!     DocsServer::from_service_config(&config)?.run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/iam-docs-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod health;
mod server;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use error::{ServerError, ServerResult};
pub use health::{HealthCheck, HealthStatus, ReadinessCheck, ReadinessStatus};
pub use server::{DocsServer, HttpResponse, ResponseBody, SERVICE_NAME};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
