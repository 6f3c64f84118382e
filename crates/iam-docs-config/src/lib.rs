//! Typed configuration for the IAM API docs service.
//!
//! This crate provides:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`DocsServiceConfig`] is the root type:
//!
//! - [`ServerConfig`] - HTTP server settings (address, timeouts)
//! - [`ViewerSection`] - Swagger UI page and document catalog
//! - [`LoggingConfig`] - Log level and format
//!
//! # Example
//!
//! ```no_run
//! use iam_docs_config::{ConfigLoader, DEFAULT_ENV_PREFIX};
//!
//! # fn main() -> Result<(), iam_docs_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("iam-docs.toml")?
//!     .with_env_prefix(DEFAULT_ENV_PREFIX)
//!     .load()?;
//!
//! println!("Serving docs on {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8080"
//! shutdown_timeout_secs = 30
//! request_timeout_ms = 30000
//!
//! [viewer]
//! title = "IAM API Reference"
//! default_url = "/openapi/authn.v1.yaml"
//! render_target = "swagger-ui"
//! doc_expansion = "list"
//!
//! [[viewer.documents]]
//! name = "AuthN"
//! url = "/openapi/authn.v1.yaml"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Scalar values can be overridden with `PREFIX__SECTION__KEY`:
//!
//! - `IAM_DOCS__SERVER__HTTP_ADDR=0.0.0.0:9000`
//! - `IAM_DOCS__VIEWER__DEFAULT_URL=/openapi/idp.v1.yaml`
//! - `IAM_DOCS__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocsServiceConfig::default();
        assert_eq!(config.server.http_addr, "0.0.0.0:8080");
        assert_eq!(config.viewer.render_target, "swagger-ui");
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = DocsServiceConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: DocsServiceConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
