//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use serde::{Deserialize, Serialize};

use iam_docs::{
    BehaviorFlags, DocExpansion, DocumentCatalog, DocumentEntry, DocumentSourceSelector, SwaggerUi,
    DEFAULT_DOCUMENT_URL, DEFAULT_RENDER_TARGET, DEFAULT_SWAGGER_VERSION,
};

use crate::ConfigError;

/// Server configuration section.
///
/// # Example
///
/// ```
/// use iam_docs_config::ServerConfig;
///
/// let config = ServerConfig {
///     http_addr: "127.0.0.1:8080".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.shutdown_timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// HTTP server bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    30000
}

/// Viewer configuration section.
///
/// Deep linking and the standalone layout are fixed by the selector and
/// therefore not configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ViewerSection {
    /// HTML page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Document opened when no `url` query parameter is given.
    #[serde(default = "default_document_url")]
    pub default_url: String,

    /// Id of the element the viewer mounts into.
    #[serde(default = "default_render_target")]
    pub render_target: String,

    /// Default operation expansion.
    #[serde(default)]
    pub doc_expansion: DocExpansion,

    /// Show request durations in "try it out" responses.
    #[serde(default)]
    pub display_request_duration: bool,

    /// Swagger UI dist version loaded from the CDN.
    #[serde(default = "default_swagger_version")]
    pub swagger_version: String,

    /// Alternative base URL for the Swagger UI assets.
    #[serde(default)]
    pub asset_base_url: Option<String>,

    /// Selectable documents in display order.
    #[serde(default = "default_documents")]
    pub documents: Vec<DocumentEntry>,
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_url: default_document_url(),
            render_target: default_render_target(),
            doc_expansion: DocExpansion::default(),
            display_request_duration: false,
            swagger_version: default_swagger_version(),
            asset_base_url: None,
            documents: default_documents(),
        }
    }
}

impl ViewerSection {
    /// Build the document catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] for duplicate names or empty fields.
    pub fn catalog(&self) -> Result<DocumentCatalog, ConfigError> {
        Ok(DocumentCatalog::from_entries(self.documents.iter().cloned())?)
    }

    /// Build the document source selector described by this section.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ViewerSection::catalog`].
    pub fn selector(&self) -> Result<DocumentSourceSelector, ConfigError> {
        let flags = BehaviorFlags::default()
            .doc_expansion(self.doc_expansion)
            .display_request_duration(self.display_request_duration);

        Ok(DocumentSourceSelector::new(&self.default_url, self.catalog()?)
            .render_target(&self.render_target)
            .flags(flags))
    }

    /// Build the Swagger UI backend described by this section.
    #[must_use]
    pub fn swagger_ui(&self) -> SwaggerUi {
        let swagger = SwaggerUi::new()
            .title(&self.title)
            .swagger_version(&self.swagger_version);

        match &self.asset_base_url {
            Some(base) => swagger.asset_base_url(base),
            None => swagger,
        }
    }
}

fn default_title() -> String {
    "IAM API Reference".to_string()
}

fn default_document_url() -> String {
    DEFAULT_DOCUMENT_URL.to_string()
}

fn default_render_target() -> String {
    DEFAULT_RENDER_TARGET.to_string()
}

fn default_swagger_version() -> String {
    DEFAULT_SWAGGER_VERSION.to_string()
}

fn default_documents() -> Vec<DocumentEntry> {
    DocumentCatalog::iam().into()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directives (e.g. "info,iam_docs=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use iam_docs::QueryParams;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, "0.0.0.0:8080");
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.request_timeout_ms, 30000);
    }

    #[test]
    fn test_server_config_unknown_field_rejected() {
        let toml = r#"
            http_addr = "127.0.0.1:3000"
            max_connections = 10
        "#;
        let result: Result<ServerConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_viewer_section_default() {
        let viewer = ViewerSection::default();
        assert_eq!(viewer.default_url, "/openapi/authn.v1.yaml");
        assert_eq!(viewer.render_target, "swagger-ui");
        assert_eq!(viewer.swagger_version, "5.18.2");
        assert_eq!(viewer.documents.len(), 4);
        assert_eq!(viewer.documents[3], DocumentEntry::new("IDP", "/openapi/idp.v1.yaml"));
    }

    #[test]
    fn test_viewer_section_documents_from_toml() {
        let toml = r#"
            default_url = "/specs/b.yaml"
            doc_expansion = "none"

            [[documents]]
            name = "A"
            url = "/specs/a.yaml"

            [[documents]]
            name = "B"
            url = "/specs/b.yaml"
        "#;
        let viewer: ViewerSection = toml::from_str(toml).unwrap();
        assert_eq!(viewer.doc_expansion, DocExpansion::None);
        assert_eq!(viewer.documents.len(), 2);

        let config = viewer.selector().unwrap().configuration(&QueryParams::new());
        assert_eq!(config.initial_url, "/specs/b.yaml");
        assert_eq!(config.primary_name.as_deref(), Some("B"));
        assert_eq!(config.flags.doc_expansion, DocExpansion::None);
        assert!(config.flags.deep_linking);
    }

    #[test]
    fn test_viewer_section_rejects_duplicate_documents() {
        let viewer = ViewerSection {
            documents: vec![
                DocumentEntry::new("AuthN", "/a.yaml"),
                DocumentEntry::new("AuthN", "/b.yaml"),
            ],
            ..Default::default()
        };
        assert!(matches!(viewer.selector(), Err(ConfigError::Catalog(_))));
    }

    #[test]
    fn test_viewer_section_swagger_ui() {
        let viewer = ViewerSection {
            asset_base_url: Some("/static/swagger".to_string()),
            ..Default::default()
        };
        let swagger = viewer.swagger_ui();
        assert_eq!(swagger.page_title(), "IAM API Reference");
        assert_eq!(swagger.assets_url(), "/static/swagger");
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_deserialize() {
        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }
}
