//! Main configuration types.
//!
//! This module provides the top-level [`DocsServiceConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{LoggingConfig, ServerConfig, ViewerSection};

/// Complete configuration of the docs service.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use iam_docs_config::DocsServiceConfig;
///
/// let config = DocsServiceConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:8080");
/// assert_eq!(config.viewer.documents.len(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct DocsServiceConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Viewer page configuration.
    #[serde(default)]
    pub viewer: ViewerSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocsServiceConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use iam_docs_config::{DocsServiceConfig, ServerConfig};
    ///
    /// let config = DocsServiceConfig::builder()
    ///     .server(ServerConfig {
    ///         http_addr: "127.0.0.1:3000".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.server.http_addr, "127.0.0.1:3000");
    /// ```
    #[must_use]
    pub fn builder() -> DocsServiceConfigBuilder {
        DocsServiceConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Server address is not a socket address
    /// - The default document url or render target is empty
    /// - The document list is empty or not a valid catalog
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(crate::ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        if self.server.request_timeout_ms == 0 {
            return Err(crate::ConfigError::invalid_value(
                "server.request_timeout_ms",
                "must be greater than zero",
            ));
        }

        if self.server.shutdown_timeout_secs == 0 {
            return Err(crate::ConfigError::invalid_value(
                "server.shutdown_timeout_secs",
                "must be greater than zero",
            ));
        }

        if self.viewer.default_url.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "viewer.default_url",
                "must not be empty",
            ));
        }

        if self.viewer.render_target.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "viewer.render_target",
                "must not be empty",
            ));
        }

        if self.viewer.documents.is_empty() {
            return Err(crate::ConfigError::validation_error(
                "viewer.documents must contain at least one document",
            ));
        }

        self.viewer.catalog()?;

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored logs at debug level with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use iam_docs_config::DocsServiceConfig;
    ///
    /// let config = DocsServiceConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.server.http_addr = "127.0.0.1:8080".to_string();

        config.logging.level = "debug".to_string();
        config.logging.format = crate::LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config.viewer.display_request_duration = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// # Example
    ///
    /// ```
    /// use iam_docs_config::DocsServiceConfig;
    ///
    /// let config = DocsServiceConfig::production();
    /// assert_eq!(config.logging.format, iam_docs_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = crate::LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }
}

/// Builder for [`DocsServiceConfig`].
#[derive(Debug, Default)]
pub struct DocsServiceConfigBuilder {
    server: Option<ServerConfig>,
    viewer: Option<ViewerSection>,
    logging: Option<LoggingConfig>,
}

impl DocsServiceConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server configuration.
    #[must_use]
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.server = Some(server);
        self
    }

    /// Set the viewer configuration.
    #[must_use]
    pub fn viewer(mut self, viewer: ViewerSection) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> DocsServiceConfig {
        DocsServiceConfig {
            server: self.server.unwrap_or_default(),
            viewer: self.viewer.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<DocsServiceConfig, crate::ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
